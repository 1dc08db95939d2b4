use anchor_lang::prelude::*;

use crate::{error::LotteryError, randomness::RandomWord};

/// Entry of the pending-request table: which round a randomness request feeds.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct RandomnessRequest {
    pub request_id: u64,
    pub lottery_id: u64,

    /// Committed Switchboard randomness account, or the provider address off-chain.
    pub randomness_account: Pubkey,

    pub requested_at: i64,
    pub fulfilled_at: i64,
    pub fulfilled: bool,
    pub value: [u8; 32],
    pub bump: u8,
}

impl RandomnessRequest {
    pub fn new(
        request_id: u64,
        lottery_id: u64,
        randomness_account: Pubkey,
        requested_at: i64,
        bump: u8,
    ) -> Self {
        Self {
            request_id,
            lottery_id,
            randomness_account,
            requested_at,
            bump,
            ..Default::default()
        }
    }

    pub fn ensure_pending(&self) -> Result<()> {
        require!(!self.fulfilled, LotteryError::RandomnessAlreadyFulfilled);
        Ok(())
    }

    pub fn fulfill(&mut self, value: RandomWord, now: i64) {
        self.value = value.to_bytes();
        self.fulfilled = true;
        self.fulfilled_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fulfil_consumes_request() {
        let mut request = RandomnessRequest::new(1, 1, Pubkey::new_unique(), 10, 255);
        assert!(request.ensure_pending().is_ok());

        request.fulfill(RandomWord::from(99u64), 20);
        assert!(request.fulfilled);
        assert_eq!(request.fulfilled_at, 20);
        assert_eq!(
            request.ensure_pending().unwrap_err(),
            anchor_lang::error::Error::from(LotteryError::RandomnessAlreadyFulfilled)
        );
    }
}
