use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    // Access
    #[msg("Caller is not authorized for this action")]
    Unauthorized,

    // Lifecycle
    #[msg("A round is already in progress")]
    InvalidPhase,
    #[msg("Round is not in the required phase")]
    WrongPhase,
    #[msg("Dwell time has not elapsed yet")]
    TooEarly,
    #[msg("Round has no tickets")]
    NoTickets,

    // Tickets
    #[msg("Caller already holds a ticket for this round")]
    AlreadyParticipating,
    #[msg("Token does not match the round's ticket token")]
    TokenMismatch,
    #[msg("Ticket does not belong to the caller")]
    InvalidTicket,
    #[msg("Ticket has already been claimed")]
    AlreadyClaimed,

    // Randomness
    #[msg("Randomness has not been delivered for this round")]
    RandomnessNotReady,
    #[msg("No pending randomness request with this id")]
    UnknownRequest,
    #[msg("Randomness request was already fulfilled")]
    RandomnessAlreadyFulfilled,
    #[msg("Randomness account was already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness account does not match the request")]
    IncorrectRandomnessAccount,
    #[msg("Randomness account data could not be parsed")]
    InvalidRandomnessData,

    // Configuration
    #[msg("Fee basis points must not exceed 10000")]
    InvalidFee,
    #[msg("Duration is below the configured minimum")]
    InvalidDuration,
    #[msg("Ticket price must be greater than 0")]
    InvalidTicketPrice,
    #[msg("Yield source is not a vault-owned, empty account for the round's token")]
    InvalidYieldSource,

    // Funds
    #[msg("Token allowance is below the ticket price")]
    InsufficientAllowance,
    #[msg("Token balance is too low")]
    InsufficientBalance,
    #[msg("Yield vault has no such deposit for this depositor")]
    UnknownDeposit,
    #[msg("Arithmetic overflow")]
    Overflow,
}
