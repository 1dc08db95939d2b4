use anchor_lang::prelude::*;

use super::{
    ledger::LotteryLedger,
    ports::{DepositId, RandomnessProvider, RequestId, TimeSource, TokenBank, YieldVault},
};
use crate::{
    access::{require_admin, require_randomness_source},
    error::LotteryError,
    events::{LotteryEvent, PrizeClaimed, RandomnessRequested},
    payout::split_proceeds,
    randomness::RandomWord,
    state::{Lottery, LotteryConfig, LotteryPhase, RandomnessRequest, RoundParams, Ticket},
};

/// Drives the round state machine against pluggable collaborators.
///
/// Each call validates everything it can before touching the bank, vault or
/// oracle, and only writes to the ledger once those have succeeded. A failed
/// call leaves the ledger as it was, except that `close_lottery` keeps every
/// withdrawal it completed so the next attempt resumes from there.
pub struct LotteryEngine<C, B, V, R> {
    ledger: LotteryLedger,
    /// Token account the engine pulls ticket payments into and pays claims from.
    custody: Pubkey,
    clock: C,
    bank: B,
    vault: V,
    randomness: R,
    events: Vec<LotteryEvent>,
}

impl<C, B, V, R> LotteryEngine<C, B, V, R>
where
    C: TimeSource,
    B: TokenBank,
    V: YieldVault,
    R: RandomnessProvider,
{
    pub fn new(
        config: LotteryConfig,
        custody: Pubkey,
        clock: C,
        bank: B,
        vault: V,
        randomness: R,
    ) -> Self {
        Self {
            ledger: LotteryLedger::new(config),
            custody,
            clock,
            bank,
            vault,
            randomness,
            events: Vec::new(),
        }
    }

    pub fn open_lottery(
        &mut self,
        caller: &Pubkey,
        token: Pubkey,
        yield_source: Pubkey,
        params: RoundParams,
    ) -> Result<u64> {
        let now = self.clock.now();
        let config = self.ledger.config_mut();
        require_admin(config, caller)?;
        params.validate(config.min_lock_seconds)?;
        let (lottery_id, previous_phase) = config.begin_round()?;

        let mut lottery = Lottery::default();
        let event = lottery.open(lottery_id, token, yield_source, &params, previous_phase, now);
        self.ledger.insert_lottery(lottery);

        msg!(
            "Lottery {} opened, ticket price {}",
            lottery_id,
            params.ticket_price
        );
        self.events.push(event.into());
        Ok(lottery_id)
    }

    /// Sells `caller` the next ticket of the active round and deposits its price.
    pub fn buy_ticket(&mut self, caller: &Pubkey, token: &Pubkey) -> Result<u64> {
        let lottery = self
            .ledger
            .active_lottery()
            .ok_or(LotteryError::WrongPhase)?;
        lottery.ensure_accepts(token)?;
        let lottery_id = lottery.lottery_id;
        let price = lottery.ticket_price;
        let yield_source = lottery.yield_source;

        require!(
            !self.ledger.is_participating(lottery_id, caller),
            LotteryError::AlreadyParticipating
        );
        let allowance = self.bank.allowance(token, caller, &self.custody);
        require!(allowance >= price, LotteryError::InsufficientAllowance);
        require!(
            self.bank.balance_of(token, caller) >= price,
            LotteryError::InsufficientBalance
        );

        self.bank
            .transfer_from(token, &self.custody, caller, &self.custody, price)?;
        let deposit = match self.vault.deposit(
            &mut self.bank,
            &yield_source,
            &self.custody,
            token,
            price,
        ) {
            Ok(deposit) => deposit,
            Err(err) => {
                // hand the payment and the allowance back, the ticket was never issued
                self.bank.transfer(token, &self.custody, caller, price)?;
                self.bank.approve(token, caller, &self.custody, allowance);
                return Err(err);
            }
        };

        let lottery = self
            .ledger
            .lottery_mut(lottery_id)
            .ok_or(LotteryError::WrongPhase)?;
        let (ticket_id, event) = lottery.issue_ticket(*caller)?;
        self.ledger
            .insert_ticket(Ticket::issue(lottery_id, ticket_id, *caller, 0))?;
        self.ledger.record_deposit(lottery_id, deposit);

        msg!("Ticket {} sold for lottery {}", ticket_id, lottery_id);
        self.events.push(event.into());
        Ok(ticket_id)
    }

    /// Moves the active round to Started and asks the oracle for randomness.
    pub fn start_lottery(&mut self, caller: &Pubkey) -> Result<RequestId> {
        let now = self.clock.now();
        let config = self.ledger.config();
        require_admin(config, caller)?;
        let open_dwell_seconds = config.open_dwell_seconds;
        let randomness_source = config.randomness_source;

        let lottery = self
            .ledger
            .active_lottery()
            .ok_or(LotteryError::WrongPhase)?;
        lottery.ensure_startable(now, open_dwell_seconds)?;
        let lottery_id = lottery.lottery_id;

        let request_id = self.randomness.request_random_number()?;
        if self.ledger.request(request_id).is_some() {
            // an id already in the table could never be told apart on callback
            self.randomness.cancel_request(request_id)?;
            return Err(LotteryError::UnknownRequest.into());
        }

        let lottery = self
            .ledger
            .lottery_mut(lottery_id)
            .ok_or(LotteryError::WrongPhase)?;
        let event = lottery.start(request_id, now);
        self.ledger.config_mut().record_phase(LotteryPhase::Started);
        self.ledger.insert_request(RandomnessRequest::new(
            request_id,
            lottery_id,
            randomness_source,
            now,
            0,
        ));

        msg!(
            "Lottery {} started with {} tickets, randomness request {}",
            lottery_id,
            event.ticket_count,
            request_id
        );
        self.events.push(
            RandomnessRequested {
                lottery_id,
                request_id,
            }
            .into(),
        );
        self.events.push(event.into());
        Ok(request_id)
    }

    /// Oracle callback. Consumes the pending request exactly once.
    pub fn fulfill_randomness(
        &mut self,
        caller: &Pubkey,
        request_id: RequestId,
        value: RandomWord,
    ) -> Result<()> {
        let now = self.clock.now();
        require_randomness_source(self.ledger.config(), caller)?;

        let request = self
            .ledger
            .request(request_id)
            .ok_or(LotteryError::UnknownRequest)?;
        request.ensure_pending()?;
        let lottery_id = request.lottery_id;

        let lottery = self
            .ledger
            .lottery_mut(lottery_id)
            .ok_or(LotteryError::UnknownRequest)?;
        let event = lottery.record_randomness(request_id, value)?;
        if let Some(request) = self.ledger.request_mut(request_id) {
            request.fulfill(value, now);
        }

        msg!("Randomness delivered for lottery {}", lottery_id);
        self.events.push(event.into());
        Ok(())
    }

    /// Settles the active round: picks the winner, withdraws every deposit and
    /// pays the fee recipient. Returns the winning ticket id.
    pub fn close_lottery(&mut self, caller: &Pubkey) -> Result<u64> {
        let now = self.clock.now();
        let config = self.ledger.config();
        require_admin(config, caller)?;
        let fee_bps = config.fee_bps;
        let fee_recipient = config.fee_recipient;

        let lottery = self
            .ledger
            .active_lottery()
            .ok_or(LotteryError::WrongPhase)?;
        let winning_ticket_id = lottery.draw_winning_ticket(now)?;
        let lottery_id = lottery.lottery_id;
        let token = lottery.token;
        let ticket_price = lottery.ticket_price;
        let ticket_count = lottery.ticket_count;

        let winner = self
            .ledger
            .ticket(lottery_id, winning_ticket_id)
            .ok_or(LotteryError::InvalidTicket)?
            .owner;

        let pending: Vec<DepositId> = self.ledger.deposits(lottery_id).to_vec();
        for deposit in pending {
            let withdrawal = self.vault.withdraw(&mut self.bank, &self.custody, deposit)?;
            let amount = withdrawal.total().ok_or(LotteryError::Overflow)?;
            // recorded one by one, a failure further on must not strand this deposit
            self.ledger.record_withdrawal(lottery_id, deposit, amount)?;
        }
        let total_withdrawn = self.ledger.withdrawn_total(lottery_id);

        let payout = split_proceeds(total_withdrawn, ticket_price, ticket_count, fee_bps)?;
        msg!(
            "Lottery {} withdrew {}, yield {}, fee {}",
            lottery_id,
            total_withdrawn,
            payout.yield_earned,
            payout.fee
        );
        if payout.fee > 0 {
            self.bank
                .transfer(&token, &self.custody, &fee_recipient, payout.fee)?;
        }

        let lottery = self
            .ledger
            .lottery_mut(lottery_id)
            .ok_or(LotteryError::WrongPhase)?;
        let event = lottery.settle(winning_ticket_id, winner, &payout, now);
        self.ledger.config_mut().finish_round();

        msg!(
            "Lottery {} settled, winning ticket {}",
            lottery_id,
            winning_ticket_id
        );
        self.events.push(event.into());
        Ok(winning_ticket_id)
    }

    /// Pays out one ticket of a settled round. Returns the amount paid.
    pub fn claim(&mut self, caller: &Pubkey, lottery_id: u64, ticket_id: u64) -> Result<u64> {
        let lottery = self
            .ledger
            .lottery(lottery_id)
            .ok_or(LotteryError::WrongPhase)?;
        lottery.ensure_settled()?;
        let token = lottery.token;
        let amount = lottery.payout_for(ticket_id);
        let is_winner = lottery.is_winning_ticket(ticket_id);

        self.ledger
            .ticket(lottery_id, ticket_id)
            .ok_or(LotteryError::InvalidTicket)?
            .ensure_claimable(caller)?;

        if amount > 0 {
            self.bank.transfer(&token, &self.custody, caller, amount)?;
        }

        if let Some(ticket) = self.ledger.ticket_mut(lottery_id, ticket_id) {
            ticket.claimed = true;
        }
        if let Some(lottery) = self.ledger.lottery_mut(lottery_id) {
            lottery.record_claim(amount)?;
        }

        msg!(
            "Ticket {} of lottery {} claimed {}",
            ticket_id,
            lottery_id,
            amount
        );
        self.events.push(
            PrizeClaimed {
                lottery_id,
                ticket_id,
                owner: *caller,
                amount,
                is_winner,
            }
            .into(),
        );
        Ok(amount)
    }

    pub fn ledger(&self) -> &LotteryLedger {
        &self.ledger
    }

    pub fn config(&self) -> &LotteryConfig {
        self.ledger.config()
    }

    pub fn lottery(&self, lottery_id: u64) -> Option<&Lottery> {
        self.ledger.lottery(lottery_id)
    }

    pub fn active_lottery(&self) -> Option<&Lottery> {
        self.ledger.active_lottery()
    }

    pub fn ticket(&self, lottery_id: u64, ticket_id: u64) -> Option<&Ticket> {
        self.ledger.ticket(lottery_id, ticket_id)
    }

    pub fn ticket_of(&self, lottery_id: u64, owner: &Pubkey) -> Option<&Ticket> {
        self.ledger.ticket_of(lottery_id, owner)
    }

    /// What a claim on the ticket would pay, `None` until the round settles.
    pub fn payout_for(&self, lottery_id: u64, ticket_id: u64) -> Option<u64> {
        let lottery = self.ledger.lottery(lottery_id)?;
        self.ledger.ticket(lottery_id, ticket_id)?;
        lottery
            .ensure_settled()
            .ok()
            .map(|_| lottery.payout_for(ticket_id))
    }

    pub fn custody(&self) -> &Pubkey {
        &self.custody
    }

    /// Tokens of `token` the engine currently holds in custody.
    pub fn custody_balance(&self, token: &Pubkey) -> u64 {
        self.bank.balance_of(token, &self.custody)
    }

    pub fn take_events(&mut self) -> Vec<LotteryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    pub fn randomness_mut(&mut self) -> &mut R {
        &mut self.randomness
    }
}
