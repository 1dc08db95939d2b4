use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// A 256-bit random value as delivered by the oracle, stored big-endian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomWord([u8; 32]);

impl RandomWord {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// `self mod modulus` over the full 256 bits, folding one byte at a time.
    ///
    /// Returns `None` for a zero modulus.
    pub fn reduce(&self, modulus: u64) -> Option<u64> {
        if modulus == 0 {
            return None;
        }
        let modulus = modulus as u128;
        let remainder = self
            .0
            .iter()
            .fold(0u128, |acc, byte| ((acc << 8) | *byte as u128) % modulus);
        Some(remainder as u64)
    }

    /// Maps the value onto a 1-based ticket id: `(value mod ticket_count) + 1`.
    pub fn winning_ticket_id(&self, ticket_count: u64) -> Result<u64> {
        let index = self.reduce(ticket_count).ok_or(LotteryError::NoTickets)?;
        // index < ticket_count, so this cannot wrap
        Ok(index + 1)
    }
}

impl From<u64> for RandomWord {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<u128> for RandomWord {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}
