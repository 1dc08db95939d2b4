use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::{
    access::require_admin,
    constants::*,
    error::LotteryError,
    events::RandomnessRequested,
    state::*,
};

/// Accounts required to close ticket sales and commit to a randomness account.
#[derive(Accounts)]
pub struct StartRound<'info> {
    /// Must be the configured admin; pays for the request account.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Program config, hands out the request id.
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

    /// Pending request, seeded by the next request id.
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_SIZE + RandomnessRequest::INIT_SPACE,
        seeds = [REQUEST_SEED.as_bytes(), &config.request_count.saturating_add(1).to_le_bytes()],
        bump
    )]
    pub request: Box<Account<'info, RandomnessRequest>>,

    /// Switchboard randomness account committed in this transaction's previous slot.
    /// CHECK: owner is checked against the configured source, data is parsed in the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// System program to create the request account.
    pub system_program: Program<'info, System>,
}

impl<'info> StartRound<'info> {
    pub fn validate(&self, now: i64) -> Result<()> {
        require_admin(&self.config, &self.admin.key())?;

        self.lottery
            .ensure_startable(now, self.config.open_dwell_seconds)?;

        require_keys_eq!(
            *self.randomness_account_data.owner,
            self.config.randomness_source,
            LotteryError::IncorrectRandomnessAccount
        );

        Ok(())
    }
}

/// Starts the active round and records the randomness request it waits on.
///
/// # Arguments
/// * `ctx` - Context holding the StartRound accounts
pub fn process_start_lottery(ctx: Context<StartRound>) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts.validate(clock.unix_timestamp)?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::InvalidRandomnessData)?;
    if randomness_data.seed_slot != clock.slot.saturating_sub(1) {
        msg!("Seed slot: {}", randomness_data.seed_slot);
        msg!("Current slot: {}", clock.slot);
        return Err(LotteryError::RandomnessAlreadyRevealed.into());
    }

    let request_id = ctx.accounts.config.next_request_id()?;
    ctx.accounts.config.record_phase(LotteryPhase::Started);

    let lottery = &mut ctx.accounts.lottery;
    let lottery_id = lottery.lottery_id;
    let event = lottery.start(request_id, clock.unix_timestamp);

    ctx.accounts.request.set_inner(RandomnessRequest::new(
        request_id,
        lottery_id,
        ctx.accounts.randomness_account_data.key(),
        clock.unix_timestamp,
        ctx.bumps.request,
    ));

    msg!(
        "Lottery {} started with {} tickets, randomness request {}",
        lottery_id,
        event.ticket_count,
        request_id
    );
    emit!(RandomnessRequested {
        lottery_id,
        request_id,
    });
    emit!(event);

    Ok(())
}
