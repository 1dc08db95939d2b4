use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use super::transfer_tokens;
use crate::{constants::*, error::LotteryError, state::*};

/// Accounts required to buy one ticket of the open round.
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// Pays the ticket price and the rent of the new accounts.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Program config, used to confirm the round is the active one.
    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// Round the ticket is bought in.
    #[account(
        mut,
        seeds = [LOTTERY_SEED.as_bytes(), &lottery.lottery_id.to_le_bytes()],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Exists once the buyer has a ticket in this round.
    #[account(
        init_if_needed,
        payer = buyer,
        space = DISCRIMINATOR_SIZE + Participant::INIT_SPACE,
        seeds = [PARTICIPANT_SEED.as_bytes(), lottery.key().as_ref(), buyer.key().as_ref()],
        bump
    )]
    pub participant: Box<Account<'info, Participant>>,

    /// New ticket, seeded by the next ticket id of the round.
    #[account(
        init,
        payer = buyer,
        space = DISCRIMINATOR_SIZE + Ticket::INIT_SPACE,
        seeds = [
            TICKET_SEED.as_bytes(),
            lottery.key().as_ref(),
            &lottery.ticket_count.saturating_add(1).to_le_bytes()
        ],
        bump
    )]
    pub ticket: Box<Account<'info, Ticket>>,

    /// Ticket token of the round.
    #[account(mint::token_program = token_program)]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Buyer's token account the price is paid from.
    #[account(
        mut,
        token::mint = mint,
        token::authority = buyer,
        token::token_program = token_program
    )]
    pub buyer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Round's yield source, receives the price.
    #[account(
        mut,
        address = lottery.yield_source @ LotteryError::InvalidYieldSource
    )]
    pub yield_source: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program for the transfer.
    pub token_program: Interface<'info, TokenInterface>,

    /// System program to create the ticket and participant accounts.
    pub system_program: Program<'info, System>,
}

impl<'info> BuyTicket<'info> {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.lottery.lottery_id == self.config.active_lottery_id,
            LotteryError::WrongPhase
        );

        self.lottery.ensure_accepts(&self.mint.key())?;

        require!(
            !self.participant.is_registered(),
            LotteryError::AlreadyParticipating
        );

        require!(
            self.buyer_token_account.amount >= self.lottery.ticket_price,
            LotteryError::InsufficientBalance
        );

        Ok(())
    }
}

/// Sells the caller the next ticket and moves its price into the yield source.
///
/// # Arguments
/// * `ctx` - Context holding the BuyTicket accounts
pub fn process_buy_ticket(ctx: Context<BuyTicket>) -> Result<()> {
    ctx.accounts.validate()?;

    let price = ctx.accounts.lottery.ticket_price;
    transfer_tokens(
        &ctx.accounts.buyer_token_account,
        &ctx.accounts.yield_source,
        price,
        &ctx.accounts.mint,
        ctx.accounts.buyer.to_account_info(),
        &ctx.accounts.token_program,
        &[],
    )?;

    let buyer = ctx.accounts.buyer.key();
    let lottery = &mut ctx.accounts.lottery;
    let (ticket_id, event) = lottery.issue_ticket(buyer)?;
    let lottery_id = lottery.lottery_id;

    ctx.accounts
        .ticket
        .set_inner(Ticket::issue(lottery_id, ticket_id, buyer, ctx.bumps.ticket));
    ctx.accounts
        .participant
        .register(lottery_id, buyer, ticket_id, ctx.bumps.participant)?;

    msg!("Ticket {} of lottery {} sold to {}", ticket_id, lottery_id, buyer);
    emit!(event);

    Ok(())
}
