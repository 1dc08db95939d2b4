use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{access::require_admin, constants::*, error::LotteryError, state::*};

/// Accounts required to open a new round.
#[derive(Accounts)]
pub struct OpenRound<'info> {
    /// Must be the configured admin; pays for the round account.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Program config, holds the round counter and active pointer.
    #[account(
        mut,
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// Round record, seeded by the next lottery id.
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_SIZE + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED.as_bytes(), &config.lottery_count.saturating_add(1).to_le_bytes()],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Ticket token for the round.
    #[account(mint::token_program = token_program)]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Token account the round's deposits go to; yield is credited here by
    /// the external strategy.
    pub yield_source: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: PDA checked through its seeds.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes()],
        bump = config.vault_authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Token program owning the mint and yield source.
    pub token_program: Interface<'info, TokenInterface>,

    /// System program to create the round account.
    pub system_program: Program<'info, System>,
}

impl<'info> OpenRound<'info> {
    pub fn validate(&self, params: &RoundParams) -> Result<()> {
        require_admin(&self.config, &self.admin.key())?;

        params.validate(self.config.min_lock_seconds)?;

        require_keys_eq!(
            self.yield_source.owner,
            self.vault_authority.key(),
            LotteryError::InvalidYieldSource
        );
        require_keys_eq!(
            self.yield_source.mint,
            self.mint.key(),
            LotteryError::InvalidYieldSource
        );
        // the balance at close is taken as principal plus yield
        require!(
            self.yield_source.amount == 0,
            LotteryError::InvalidYieldSource
        );

        Ok(())
    }
}

/// Opens the next round for ticket sales.
///
/// # Arguments
/// * `ctx` - Context holding the OpenRound accounts
/// * `params` - Ticket price and lock duration of the round
pub fn process_open_lottery(ctx: Context<OpenRound>, params: RoundParams) -> Result<()> {
    ctx.accounts.validate(&params)?;

    let now = Clock::get()?.unix_timestamp;
    let (lottery_id, previous_phase) = ctx.accounts.config.begin_round()?;

    let lottery = &mut ctx.accounts.lottery;
    let event = lottery.open(
        lottery_id,
        ctx.accounts.mint.key(),
        ctx.accounts.yield_source.key(),
        &params,
        previous_phase,
        now,
    );
    lottery.bump = ctx.bumps.lottery;

    msg!(
        "Lottery {} open, ticket price {}, lock {}s",
        lottery_id,
        params.ticket_price,
        params.lock_duration
    );
    emit!(event);

    Ok(())
}
