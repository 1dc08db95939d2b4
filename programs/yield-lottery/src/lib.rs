#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod access;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod payout;
pub mod randomness;
pub mod state;

pub use instructions::*;
pub use state::*;

declare_id!("2saBsLp9cErfnKfdGmc6KzwYQBUvSgWNmTbXfgH5owfL");

#[program]
pub mod yield_lottery {
    use super::*;

    pub fn initialize_config(ctx: Context<InitializeConfig>, params: ConfigParams) -> Result<()> {
        process_initialize_config(ctx, params)
    }

    pub fn open_lottery(ctx: Context<OpenRound>, params: RoundParams) -> Result<()> {
        process_open_lottery(ctx, params)
    }

    pub fn buy_ticket(ctx: Context<BuyTicket>) -> Result<()> {
        process_buy_ticket(ctx)
    }

    pub fn start_lottery(ctx: Context<StartRound>) -> Result<()> {
        process_start_lottery(ctx)
    }

    pub fn fulfill_randomness(ctx: Context<FulfillRandomness>, request_id: u64) -> Result<()> {
        process_fulfill_randomness(ctx, request_id)
    }

    pub fn close_lottery(ctx: Context<CloseRound>) -> Result<()> {
        process_close_lottery(ctx)
    }

    pub fn claim(ctx: Context<ClaimTicket>, lottery_id: u64, ticket_id: u64) -> Result<()> {
        process_claim(ctx, lottery_id, ticket_id)
    }
}
