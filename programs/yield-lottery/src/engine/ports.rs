//! Collaborators the engine drives but does not implement.

use anchor_lang::prelude::*;

pub type DepositId = u64;
pub type RequestId = u64;

/// Wall-clock source, read once per call.
pub trait TimeSource {
    fn now(&self) -> i64;
}

/// Fungible-token ledger with allowances.
pub trait TokenBank {
    fn balance_of(&self, token: &Pubkey, owner: &Pubkey) -> u64;

    fn allowance(&self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey) -> u64;

    fn approve(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64);

    fn transfer(&mut self, token: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64)
        -> Result<()>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Withdrawal {
    pub principal: u64,
    pub yield_earned: u64,
}

impl Withdrawal {
    pub fn total(&self) -> Option<u64> {
        self.principal.checked_add(self.yield_earned)
    }
}

/// External lending pool. Funds move through the `bank` passed in.
pub trait YieldVault {
    fn deposit(
        &mut self,
        bank: &mut dyn TokenBank,
        yield_source: &Pubkey,
        depositor: &Pubkey,
        token: &Pubkey,
        amount: u64,
    ) -> Result<DepositId>;

    /// Pays principal plus yield back to `depositor`; only the depositor may withdraw.
    fn withdraw(
        &mut self,
        bank: &mut dyn TokenBank,
        depositor: &Pubkey,
        deposit: DepositId,
    ) -> Result<Withdrawal>;
}

/// Oracle that answers each request later through the engine's callback.
pub trait RandomnessProvider {
    fn request_random_number(&mut self) -> Result<RequestId>;

    /// Withdraws a request the engine refused to track; it will never be fulfilled.
    fn cancel_request(&mut self, request_id: RequestId) -> Result<()>;
}
