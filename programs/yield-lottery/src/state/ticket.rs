use anchor_lang::prelude::*;

use crate::{access::require_ticket_owner, error::LotteryError};

/// One participation slot. Its `claimed` flag is the round's claim record.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Ticket {
    pub lottery_id: u64,
    pub ticket_id: u64,
    pub owner: Pubkey,
    pub claimed: bool,
    pub bump: u8,
}

impl Ticket {
    pub fn issue(lottery_id: u64, ticket_id: u64, owner: Pubkey, bump: u8) -> Self {
        Self {
            lottery_id,
            ticket_id,
            owner,
            claimed: false,
            bump,
        }
    }

    pub fn ensure_claimable(&self, caller: &Pubkey) -> Result<()> {
        require_ticket_owner(self, caller)?;
        require!(!self.claimed, LotteryError::AlreadyClaimed);
        Ok(())
    }
}

/// Marks that `owner` already holds a ticket in `lottery_id`.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Participant {
    pub lottery_id: u64,
    pub owner: Pubkey,
    /// 0 until the owner's ticket is issued.
    pub ticket_id: u64,
    pub bump: u8,
}

impl Participant {
    pub fn is_registered(&self) -> bool {
        self.ticket_id != 0
    }

    pub fn register(
        &mut self,
        lottery_id: u64,
        owner: Pubkey,
        ticket_id: u64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_registered(), LotteryError::AlreadyParticipating);

        self.lottery_id = lottery_id;
        self.owner = owner;
        self.ticket_id = ticket_id;
        self.bump = bump;
        Ok(())
    }
}
