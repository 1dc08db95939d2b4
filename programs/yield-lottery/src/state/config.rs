use anchor_lang::prelude::*;

use crate::{constants::*, error::LotteryError, state::LotteryPhase};

/// Program-wide settings plus the pointer to the round in progress.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct LotteryConfig {
    /// Set once at initialization; gates open, start and close.
    pub admin: Pubkey,

    /// Receives the fee share of each round's yield.
    pub fee_recipient: Pubkey,

    /// Owner program of committed randomness accounts on-chain, or the
    /// address allowed to deliver randomness when driven by the host engine.
    pub randomness_source: Pubkey,

    pub fee_bps: u16,

    /// Minimum time between opening a round and starting it.
    pub open_dwell_seconds: i64,

    /// Smallest lock duration a round may be opened with.
    pub min_lock_seconds: i64,

    /// Id of the most recently opened round, 0 before the first one.
    pub lottery_count: u64,

    /// Round currently Open or Started, 0 when none is.
    pub active_lottery_id: u64,

    /// Phase of the most recent round.
    pub phase: LotteryPhase,

    /// Id of the most recent randomness request.
    pub request_count: u64,

    pub bump: u8,
    pub vault_authority_bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigParams {
    pub fee_recipient: Pubkey,
    pub randomness_source: Pubkey,
    pub fee_bps: u16,
    pub open_dwell_seconds: i64,
    pub min_lock_seconds: i64,
}

impl ConfigParams {
    /// 5% fee, two days open, five days locked.
    pub fn with_defaults(fee_recipient: Pubkey, randomness_source: Pubkey) -> Self {
        Self {
            fee_recipient,
            randomness_source,
            fee_bps: DEFAULT_FEE_BPS,
            open_dwell_seconds: DEFAULT_OPEN_DWELL_SECONDS,
            min_lock_seconds: DEFAULT_MIN_LOCK_SECONDS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.fee_bps as u64 <= BPS_DENOMINATOR,
            LotteryError::InvalidFee
        );
        require!(self.open_dwell_seconds > 0, LotteryError::InvalidDuration);
        require!(self.min_lock_seconds > 0, LotteryError::InvalidDuration);
        Ok(())
    }
}

impl LotteryConfig {
    pub fn new(admin: Pubkey, params: &ConfigParams) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            admin,
            fee_recipient: params.fee_recipient,
            randomness_source: params.randomness_source,
            fee_bps: params.fee_bps,
            open_dwell_seconds: params.open_dwell_seconds,
            min_lock_seconds: params.min_lock_seconds,
            ..Default::default()
        })
    }

    /// Claims the next lottery id and makes it the active round.
    ///
    /// Returns the new id and the phase the machine was in before it.
    pub fn begin_round(&mut self) -> Result<(u64, LotteryPhase)> {
        require!(
            self.active_lottery_id == 0
                && matches!(self.phase, LotteryPhase::Closed | LotteryPhase::Settled),
            LotteryError::InvalidPhase
        );

        let lottery_id = self
            .lottery_count
            .checked_add(1)
            .ok_or(LotteryError::Overflow)?;
        let previous_phase = self.phase;

        self.lottery_count = lottery_id;
        self.active_lottery_id = lottery_id;
        self.phase = LotteryPhase::Open;

        Ok((lottery_id, previous_phase))
    }

    pub fn next_request_id(&mut self) -> Result<u64> {
        self.request_count = self
            .request_count
            .checked_add(1)
            .ok_or(LotteryError::Overflow)?;
        Ok(self.request_count)
    }

    pub fn record_phase(&mut self, phase: LotteryPhase) {
        self.phase = phase;
    }

    /// Releases the active pointer once the round has settled.
    pub fn finish_round(&mut self) {
        self.active_lottery_id = 0;
        self.phase = LotteryPhase::Settled;
    }
}
