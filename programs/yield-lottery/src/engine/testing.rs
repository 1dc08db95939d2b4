//! In-memory collaborators for driving the engine in tests.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use super::ports::{
    DepositId, RandomnessProvider, RequestId, TimeSource, TokenBank, Withdrawal, YieldVault,
};
use crate::{constants::BPS_DENOMINATOR, error::LotteryError};

#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: i64,
}

impl ManualClock {
    pub fn at(now: i64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, seconds: i64) {
        self.now += seconds;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> i64 {
        self.now
    }
}

#[derive(Debug, Default)]
pub struct MemoryBank {
    balances: BTreeMap<(Pubkey, Pubkey), u64>,
    allowances: BTreeMap<(Pubkey, Pubkey, Pubkey), u64>,
}

impl MemoryBank {
    pub fn mint(&mut self, token: &Pubkey, owner: &Pubkey, amount: u64) {
        *self.balances.entry((*token, *owner)).or_default() += amount;
    }

    fn debit(&mut self, token: &Pubkey, owner: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balances.entry((*token, *owner)).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or(LotteryError::InsufficientBalance)?;
        Ok(())
    }
}

impl TokenBank for MemoryBank {
    fn balance_of(&self, token: &Pubkey, owner: &Pubkey) -> u64 {
        self.balances.get(&(*token, *owner)).copied().unwrap_or(0)
    }

    fn allowance(&self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances
            .get(&(*token, *owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn approve(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64) {
        self.allowances.insert((*token, *owner, *spender), amount);
    }

    fn transfer(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.debit(token, from, amount)?;
        self.mint(token, to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        let allowed = self.allowance(token, from, spender);
        require!(allowed >= amount, LotteryError::InsufficientAllowance);

        self.transfer(token, from, to, amount)?;
        self.approve(token, from, spender, allowed - amount);
        Ok(())
    }
}

#[derive(Debug)]
struct Position {
    depositor: Pubkey,
    token: Pubkey,
    amount: u64,
}

/// Lending pool living at `address`. Withdrawals return the principal
/// scaled by `rate_bps`, with the extra paid from tokens pre-minted to the
/// pool's address; a negative rate models a loss.
#[derive(Debug)]
pub struct MemoryVault {
    pub address: Pubkey,
    pub rate_bps: i64,
    positions: BTreeMap<DepositId, Position>,
    next_id: DepositId,
}

impl MemoryVault {
    pub fn new(address: Pubkey, rate_bps: i64) -> Self {
        Self {
            address,
            rate_bps,
            positions: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn open_positions(&self) -> usize {
        self.positions.len()
    }
}

impl YieldVault for MemoryVault {
    fn deposit(
        &mut self,
        bank: &mut dyn TokenBank,
        yield_source: &Pubkey,
        depositor: &Pubkey,
        token: &Pubkey,
        amount: u64,
    ) -> Result<DepositId> {
        require_keys_eq!(*yield_source, self.address, LotteryError::InvalidYieldSource);
        bank.transfer(token, depositor, &self.address, amount)?;

        let id = self.next_id;
        self.next_id += 1;
        self.positions.insert(
            id,
            Position {
                depositor: *depositor,
                token: *token,
                amount,
            },
        );
        Ok(id)
    }

    fn withdraw(
        &mut self,
        bank: &mut dyn TokenBank,
        depositor: &Pubkey,
        deposit: DepositId,
    ) -> Result<Withdrawal> {
        let position = self
            .positions
            .get(&deposit)
            .ok_or(LotteryError::UnknownDeposit)?;
        require_keys_eq!(*depositor, position.depositor, LotteryError::UnknownDeposit);

        let scaled = position.amount as i128 * (BPS_DENOMINATOR as i128 + self.rate_bps as i128)
            / BPS_DENOMINATOR as i128;
        let returned = scaled.max(0) as u64;
        bank.transfer(&position.token, &self.address, depositor, returned)?;

        let withdrawal = Withdrawal {
            principal: returned.min(position.amount),
            yield_earned: returned.saturating_sub(position.amount),
        };
        self.positions.remove(&deposit);
        Ok(withdrawal)
    }
}

/// Hands out sequential request ids and remembers which are still unanswered.
#[derive(Debug, Default)]
pub struct QueuedRandomness {
    next_id: RequestId,
    pub pending: Vec<RequestId>,
}

impl QueuedRandomness {
    /// Makes the next request reuse ids after `last_issued`.
    pub fn rewind(&mut self, last_issued: RequestId) {
        self.next_id = last_issued;
    }
}

impl RandomnessProvider for QueuedRandomness {
    fn request_random_number(&mut self) -> Result<RequestId> {
        self.next_id += 1;
        self.pending.push(self.next_id);
        Ok(self.next_id)
    }

    fn cancel_request(&mut self, request_id: RequestId) -> Result<()> {
        let index = self
            .pending
            .iter()
            .rposition(|id| *id == request_id)
            .ok_or(LotteryError::UnknownRequest)?;
        self.pending.remove(index);
        Ok(())
    }
}
