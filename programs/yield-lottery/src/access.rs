use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    state::{LotteryConfig, Ticket},
};

/// Admin-gated entry points: open, start and close.
pub fn require_admin(config: &LotteryConfig, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, config.admin, LotteryError::Unauthorized);
    Ok(())
}

/// Participant-gated entry points: only the ticket's owner may act on it.
pub fn require_ticket_owner(ticket: &Ticket, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, ticket.owner, LotteryError::InvalidTicket);
    Ok(())
}

/// The randomness callback may only come from the configured provider.
pub fn require_randomness_source(config: &LotteryConfig, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, config.randomness_source, LotteryError::Unauthorized);
    Ok(())
}
