//! Host-side lottery engine, driven through pluggable bank, vault, clock and
//! oracle ports instead of Solana accounts. It shares the account types and
//! their transition methods with the on-chain instructions.

pub use ledger::*;
pub use lottery_engine::*;
pub use ports::*;

pub mod ledger;
pub mod lottery_engine;
pub mod ports;

#[cfg(test)]
pub mod testing;
