use anchor_lang::prelude::*;
use solana_program::clock::SECONDS_PER_DAY;

/// Seed of the singleton [`LotteryConfig`](crate::state::LotteryConfig) account.
#[constant]
pub const CONFIG_SEED: &str = "config";

/// Seed prefix of a round account, followed by the little-endian lottery id.
#[constant]
pub const LOTTERY_SEED: &str = "lottery";

/// Seed prefix of a ticket account, followed by the lottery key and the ticket id.
#[constant]
pub const TICKET_SEED: &str = "ticket";

/// Seed prefix of the per-owner participation marker.
#[constant]
pub const PARTICIPANT_SEED: &str = "participant";

/// Seed prefix of a pending randomness request, followed by the request id.
#[constant]
pub const REQUEST_SEED: &str = "randomness_request";

/// Seed of the PDA that owns every round's yield-source token account.
#[constant]
pub const VAULT_AUTHORITY_SEED: &str = "vault_authority";

pub const DISCRIMINATOR_SIZE: usize = 8;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// 5% of the yield goes to the fee recipient unless configured otherwise.
pub const DEFAULT_FEE_BPS: u16 = 500;

/// Minimum time a round stays Open before it can be started.
pub const DEFAULT_OPEN_DWELL_SECONDS: i64 = 2 * SECONDS_PER_DAY as i64;

/// Minimum time a round keeps its funds deposited once Started.
pub const DEFAULT_MIN_LOCK_SECONDS: i64 = 5 * SECONDS_PER_DAY as i64;
