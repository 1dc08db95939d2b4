use anchor_lang::prelude::*;

use crate::state::LotteryPhase;

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct OpenLottery {
    pub lottery_id: u64,
    pub previous_phase: LotteryPhase,
    pub token: Pubkey,
    pub ticket_price: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub owner: Pubkey,
    pub ticket_id: u64,
    pub lottery_id: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct StartLottery {
    pub lottery_id: u64,
    pub previous_phase: LotteryPhase,
    pub lock_duration: i64,
    pub ticket_count: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct CloseLottery {
    pub lottery_id: u64,
    pub winner: Pubkey,
    pub winning_ticket_id: u64,
    pub ticket_count: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct RandomnessRequested {
    pub lottery_id: u64,
    pub request_id: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct RandomnessFulfilled {
    pub lottery_id: u64,
    pub request_id: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeClaimed {
    pub lottery_id: u64,
    pub ticket_id: u64,
    pub owner: Pubkey,
    pub amount: u64,
    pub is_winner: bool,
}

/// Every event the program emits, in the order it was produced.
///
/// The host engine keeps these in its log; on-chain they go out through `emit!`.
#[derive(Debug, Clone, PartialEq)]
pub enum LotteryEvent {
    OpenLottery(OpenLottery),
    NewPlayer(NewPlayer),
    StartLottery(StartLottery),
    CloseLottery(CloseLottery),
    RandomnessRequested(RandomnessRequested),
    RandomnessFulfilled(RandomnessFulfilled),
    PrizeClaimed(PrizeClaimed),
}

macro_rules! impl_from_event {
    ($($name:ident),* $(,)?) => {
        $(
            impl From<$name> for LotteryEvent {
                fn from(event: $name) -> Self {
                    LotteryEvent::$name(event)
                }
            }
        )*
    };
}

impl_from_event!(
    OpenLottery,
    NewPlayer,
    StartLottery,
    CloseLottery,
    RandomnessRequested,
    RandomnessFulfilled,
    PrizeClaimed,
);
