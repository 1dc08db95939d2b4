use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use super::transfer_from_vault;
use crate::{
    access::require_admin, constants::*, error::LotteryError, payout::split_proceeds, state::*,
};

/// Accounts required to draw the winner and settle the active round.
#[derive(Accounts)]
pub struct CloseRound<'info> {
    /// Must be the configured admin.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Program config; its active pointer is released on settle.
    #[account(
        mut,
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// The active round.
    #[account(
        mut,
        seeds = [LOTTERY_SEED.as_bytes(), &config.active_lottery_id.to_le_bytes()],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The ticket the random value selects; checked against the draw in the handler.
    #[account(
        seeds = [
            TICKET_SEED.as_bytes(),
            lottery.key().as_ref(),
            &winning_ticket.ticket_id.to_le_bytes()
        ],
        bump = winning_ticket.bump
    )]
    pub winning_ticket: Box<Account<'info, Ticket>>,

    /// Ticket token of the round.
    #[account(
        address = lottery.token @ LotteryError::TokenMismatch,
        mint::token_program = token_program
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Round's yield source holding principal plus yield.
    #[account(
        mut,
        address = lottery.yield_source @ LotteryError::InvalidYieldSource
    )]
    pub yield_source: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Fee recipient's token account for the round's token.
    #[account(
        mut,
        token::mint = mint,
        token::authority = config.fee_recipient,
        token::token_program = token_program
    )]
    pub fee_recipient_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: PDA checked through its seeds.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes()],
        bump = config.vault_authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Token program for the fee transfer.
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> CloseRound<'info> {
    /// Returns the winning ticket id once every close condition holds.
    pub fn validate(&self, now: i64) -> Result<u64> {
        require_admin(&self.config, &self.admin.key())?;

        let winning_ticket_id = self.lottery.draw_winning_ticket(now)?;

        require!(
            self.winning_ticket.lottery_id == self.lottery.lottery_id
                && self.winning_ticket.ticket_id == winning_ticket_id,
            LotteryError::InvalidTicket
        );

        Ok(winning_ticket_id)
    }
}

/// Settles the round: splits the yield source balance and pays the fee.
///
/// # Arguments
/// * `ctx` - Context holding the CloseRound accounts
pub fn process_close_lottery(ctx: Context<CloseRound>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let winning_ticket_id = ctx.accounts.validate(now)?;

    // everything in the yield source is this round's principal plus yield
    let total_withdrawn = ctx.accounts.yield_source.amount;
    let payout = split_proceeds(
        total_withdrawn,
        ctx.accounts.lottery.ticket_price,
        ctx.accounts.lottery.ticket_count,
        ctx.accounts.config.fee_bps,
    )?;

    msg!(
        "Withdrawn: {}, yield: {}, fee: {}",
        total_withdrawn,
        payout.yield_earned,
        payout.fee
    );

    if payout.fee > 0 {
        transfer_from_vault(
            &ctx.accounts.yield_source,
            &ctx.accounts.fee_recipient_token_account,
            payout.fee,
            &ctx.accounts.mint,
            ctx.accounts.vault_authority.to_account_info(),
            ctx.accounts.config.vault_authority_bump,
            &ctx.accounts.token_program,
        )?;
    }

    let winner = ctx.accounts.winning_ticket.owner;
    let event = ctx
        .accounts
        .lottery
        .settle(winning_ticket_id, winner, &payout, now);
    ctx.accounts.config.finish_round();

    msg!("Winner: ticket {} held by {}", winning_ticket_id, winner);
    emit!(event);

    Ok(())
}
