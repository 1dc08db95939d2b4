use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use super::transfer_from_vault;
use crate::{constants::*, error::LotteryError, events::PrizeClaimed, state::*};

/// Accounts required to pay out one ticket of a settled round.
#[derive(Accounts)]
#[instruction(lottery_id: u64, ticket_id: u64)]
pub struct ClaimTicket<'info> {
    /// Holder of the ticket; pays for the token account if it is missing.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Program config, holds the vault authority bump.
    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// Settled round the ticket belongs to.
    #[account(
        mut,
        seeds = [LOTTERY_SEED.as_bytes(), &lottery_id.to_le_bytes()],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Ticket being claimed.
    #[account(
        mut,
        seeds = [TICKET_SEED.as_bytes(), lottery.key().as_ref(), &ticket_id.to_le_bytes()],
        bump = ticket.bump
    )]
    pub ticket: Box<Account<'info, Ticket>>,

    /// Ticket token of the round.
    #[account(
        address = lottery.token @ LotteryError::TokenMismatch,
        mint::token_program = token_program
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Round's yield source the payout comes from.
    #[account(
        mut,
        address = lottery.yield_source @ LotteryError::InvalidYieldSource
    )]
    pub yield_source: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Owner's associated token account, created if needed.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: PDA checked through its seeds.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes()],
        bump = config.vault_authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Token program for the payout.
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated token program for the owner's token account.
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System program to create the owner's token account.
    pub system_program: Program<'info, System>,
}

impl<'info> ClaimTicket<'info> {
    pub fn validate(&self) -> Result<()> {
        self.lottery.ensure_settled()?;
        self.ticket.ensure_claimable(&self.owner.key())?;
        Ok(())
    }
}

/// Pays the winning ticket its prize or a losing ticket its refund, once.
///
/// # Arguments
/// * `ctx` - Context holding the ClaimTicket accounts
/// * `lottery_id` - Round the ticket belongs to
/// * `ticket_id` - Ticket being claimed
pub fn process_claim(ctx: Context<ClaimTicket>, lottery_id: u64, ticket_id: u64) -> Result<()> {
    ctx.accounts.validate()?;

    let amount = ctx.accounts.lottery.payout_for(ticket_id);
    let is_winner = ctx.accounts.lottery.is_winning_ticket(ticket_id);

    if amount > 0 {
        transfer_from_vault(
            &ctx.accounts.yield_source,
            &ctx.accounts.owner_token_account,
            amount,
            &ctx.accounts.mint,
            ctx.accounts.vault_authority.to_account_info(),
            ctx.accounts.config.vault_authority_bump,
            &ctx.accounts.token_program,
        )?;
    }

    ctx.accounts.ticket.claimed = true;
    ctx.accounts.lottery.record_claim(amount)?;

    msg!("Ticket {} of lottery {} claimed {}", ticket_id, lottery_id, amount);
    emit!(PrizeClaimed {
        lottery_id,
        ticket_id,
        owner: ctx.accounts.owner.key(),
        amount,
        is_winner,
    });

    Ok(())
}
