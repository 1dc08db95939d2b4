use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::{constants::*, error::LotteryError, randomness::RandomWord, state::*};

/// Anyone may crank the callback once the oracle has revealed the committed account.
#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct FulfillRandomness<'info> {
    /// Any signer; pays the transaction fee.
    pub payer: Signer<'info>,

    /// Pending request being answered.
    #[account(
        mut,
        seeds = [REQUEST_SEED.as_bytes(), &request_id.to_le_bytes()],
        bump = request.bump
    )]
    pub request: Box<Account<'info, RandomnessRequest>>,

    /// Round the request was made for.
    #[account(
        mut,
        seeds = [LOTTERY_SEED.as_bytes(), &request.lottery_id.to_le_bytes()],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// CHECK: must be the account committed when the request was made.
    #[account(
        address = request.randomness_account @ LotteryError::IncorrectRandomnessAccount
    )]
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Reads the revealed value and stores it on the round.
///
/// # Arguments
/// * `ctx` - Context holding the FulfillRandomness accounts
/// * `request_id` - Id of the pending request
pub fn process_fulfill_randomness(ctx: Context<FulfillRandomness>, request_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts.request.ensure_pending()?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::InvalidRandomnessData)?;
    let revealed = randomness_data
        .get_value(&clock)
        .map_err(|_| LotteryError::RandomnessNotReady)?;
    let value = RandomWord::from_bytes(revealed);

    let event = ctx.accounts.lottery.record_randomness(request_id, value)?;
    ctx.accounts.request.fulfill(value, clock.unix_timestamp);

    msg!("Randomness result: {:?}", revealed);
    emit!(event);

    Ok(())
}
