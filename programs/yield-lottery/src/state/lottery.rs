use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    events::{CloseLottery, NewPlayer, OpenLottery, RandomnessFulfilled, StartLottery},
    payout::Payout,
    randomness::RandomWord,
};

/// Phases move strictly forward: Closed → Open → Started → Settled.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace,
)]
pub enum LotteryPhase {
    #[default]
    Closed,
    Open,
    Started,
    Settled,
}

/// Round parameters chosen by the admin when opening a round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundParams {
    /// Cost of one ticket in base units of the round's token.
    pub ticket_price: u64,

    /// Seconds the round stays Started, funds deposited, before it may close.
    pub lock_duration: i64,
}

impl RoundParams {
    pub fn validate(&self, min_lock_seconds: i64) -> Result<()> {
        require!(self.ticket_price > 0, LotteryError::InvalidTicketPrice);
        require!(
            self.lock_duration >= min_lock_seconds,
            LotteryError::InvalidDuration
        );
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Lottery {
    pub lottery_id: u64,
    pub phase: LotteryPhase,

    /// Mint accepted for tickets this round.
    pub token: Pubkey,

    /// Where ticket payments are deposited for the round's duration.
    pub yield_source: Pubkey,

    pub ticket_price: u64,
    pub lock_duration: i64,

    pub opened_at: i64,
    pub started_at: i64,
    pub settled_at: i64,

    /// Tickets sold; ids run `1..=ticket_count`.
    pub ticket_count: u64,

    /// Randomness request issued when the round started.
    pub request_id: u64,
    pub random_number: [u8; 32],
    pub randomness_fulfilled: bool,

    /// Zero until the round settles.
    pub winning_ticket_id: u64,
    pub winner: Pubkey,

    pub total_withdrawn: u64,
    pub yield_earned: u64,
    pub fee_amount: u64,
    pub winner_prize: u64,
    pub refund_amount: u64,

    pub claimed_count: u64,
    pub total_claimed: u64,

    pub bump: u8,
}

impl Lottery {
    /// Fills a freshly created round record. Validation of the params and of
    /// the active-round pointer happens before this is reached.
    pub fn open(
        &mut self,
        lottery_id: u64,
        token: Pubkey,
        yield_source: Pubkey,
        params: &RoundParams,
        previous_phase: LotteryPhase,
        now: i64,
    ) -> OpenLottery {
        self.lottery_id = lottery_id;
        self.phase = LotteryPhase::Open;
        self.token = token;
        self.yield_source = yield_source;
        self.ticket_price = params.ticket_price;
        self.lock_duration = params.lock_duration;
        self.opened_at = now;
        self.ticket_count = 0;

        OpenLottery {
            lottery_id,
            previous_phase,
            token,
            ticket_price: params.ticket_price,
        }
    }

    pub fn ensure_accepts(&self, token: &Pubkey) -> Result<()> {
        require!(self.phase == LotteryPhase::Open, LotteryError::WrongPhase);
        require_keys_eq!(*token, self.token, LotteryError::TokenMismatch);
        Ok(())
    }

    /// Hands out the next sequential ticket id.
    pub fn issue_ticket(&mut self, owner: Pubkey) -> Result<(u64, NewPlayer)> {
        require!(self.phase == LotteryPhase::Open, LotteryError::WrongPhase);

        let ticket_id = self
            .ticket_count
            .checked_add(1)
            .ok_or(LotteryError::Overflow)?;
        self.ticket_count = ticket_id;

        Ok((
            ticket_id,
            NewPlayer {
                owner,
                ticket_id,
                lottery_id: self.lottery_id,
            },
        ))
    }

    pub fn ensure_startable(&self, now: i64, open_dwell_seconds: i64) -> Result<()> {
        require!(self.phase == LotteryPhase::Open, LotteryError::WrongPhase);

        let ready_at = self
            .opened_at
            .checked_add(open_dwell_seconds)
            .ok_or(LotteryError::Overflow)?;
        if now < ready_at {
            msg!("Now: {}, startable at: {}", now, ready_at);
            return Err(LotteryError::TooEarly.into());
        }

        require!(self.ticket_count > 0, LotteryError::NoTickets);
        Ok(())
    }

    pub fn start(&mut self, request_id: u64, now: i64) -> StartLottery {
        let previous_phase = self.phase;
        self.phase = LotteryPhase::Started;
        self.started_at = now;
        self.request_id = request_id;

        StartLottery {
            lottery_id: self.lottery_id,
            previous_phase,
            lock_duration: self.lock_duration,
            ticket_count: self.ticket_count,
        }
    }

    /// Stores the oracle's value. A fulfilled round never takes a second value.
    pub fn record_randomness(
        &mut self,
        request_id: u64,
        value: RandomWord,
    ) -> Result<RandomnessFulfilled> {
        require!(self.phase == LotteryPhase::Started, LotteryError::WrongPhase);
        require!(self.request_id == request_id, LotteryError::UnknownRequest);
        require!(
            !self.randomness_fulfilled,
            LotteryError::RandomnessAlreadyFulfilled
        );

        self.random_number = value.to_bytes();
        self.randomness_fulfilled = true;

        Ok(RandomnessFulfilled {
            lottery_id: self.lottery_id,
            request_id,
        })
    }

    /// Checks the round may close now and resolves the winning ticket id.
    ///
    /// The lock duration is checked before the randomness, so an early call
    /// reports `TooEarly` even when the oracle has not answered yet.
    pub fn draw_winning_ticket(&self, now: i64) -> Result<u64> {
        require!(self.phase == LotteryPhase::Started, LotteryError::WrongPhase);

        let unlock_at = self
            .started_at
            .checked_add(self.lock_duration)
            .ok_or(LotteryError::Overflow)?;
        if now < unlock_at {
            msg!("Now: {}, closable at: {}", now, unlock_at);
            return Err(LotteryError::TooEarly.into());
        }

        require!(self.randomness_fulfilled, LotteryError::RandomnessNotReady);
        require!(self.ticket_count > 0, LotteryError::NoTickets);

        RandomWord::from_bytes(self.random_number).winning_ticket_id(self.ticket_count)
    }

    pub fn settle(
        &mut self,
        winning_ticket_id: u64,
        winner: Pubkey,
        payout: &Payout,
        now: i64,
    ) -> CloseLottery {
        self.phase = LotteryPhase::Settled;
        self.settled_at = now;
        self.winning_ticket_id = winning_ticket_id;
        self.winner = winner;
        self.total_withdrawn = payout.total_withdrawn;
        self.yield_earned = payout.yield_earned;
        self.fee_amount = payout.fee;
        self.winner_prize = payout.winner_prize;
        self.refund_amount = payout.refund;

        CloseLottery {
            lottery_id: self.lottery_id,
            winner,
            winning_ticket_id,
            ticket_count: self.ticket_count,
        }
    }

    pub fn ensure_settled(&self) -> Result<()> {
        require!(self.phase == LotteryPhase::Settled, LotteryError::WrongPhase);
        Ok(())
    }

    pub fn is_winning_ticket(&self, ticket_id: u64) -> bool {
        self.phase == LotteryPhase::Settled && ticket_id == self.winning_ticket_id
    }

    /// Amount a claim on `ticket_id` pays once the round has settled.
    pub fn payout_for(&self, ticket_id: u64) -> u64 {
        if self.is_winning_ticket(ticket_id) {
            self.winner_prize
        } else {
            self.refund_amount
        }
    }

    pub fn record_claim(&mut self, amount: u64) -> Result<()> {
        self.claimed_count = self
            .claimed_count
            .checked_add(1)
            .ok_or(LotteryError::Overflow)?;
        self.total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        Ok(())
    }
}
