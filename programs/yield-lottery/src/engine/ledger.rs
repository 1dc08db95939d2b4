use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use super::ports::{DepositId, RequestId};
use crate::{
    error::LotteryError,
    state::{Lottery, LotteryConfig, RandomnessRequest, Ticket},
};

/// In-memory record of every round, ticket, pending randomness request and
/// vault deposit, keyed the same way the program derives its accounts.
///
/// Deposits leave a round's list as they are withdrawn, and their proceeds
/// add up in `withdrawn` until the round settles.
#[derive(Debug, Default)]
pub struct LotteryLedger {
    config: LotteryConfig,
    lotteries: BTreeMap<u64, Lottery>,
    tickets: BTreeMap<(u64, u64), Ticket>,
    participants: BTreeMap<(u64, Pubkey), u64>,
    requests: BTreeMap<RequestId, RandomnessRequest>,
    deposits: BTreeMap<u64, Vec<DepositId>>,
    withdrawn: BTreeMap<u64, u64>,
}

impl LotteryLedger {
    pub fn new(config: LotteryConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LotteryConfig {
        &mut self.config
    }

    pub fn lottery(&self, lottery_id: u64) -> Option<&Lottery> {
        self.lotteries.get(&lottery_id)
    }

    pub fn lottery_mut(&mut self, lottery_id: u64) -> Option<&mut Lottery> {
        self.lotteries.get_mut(&lottery_id)
    }

    /// The round currently Open or Started, if any.
    pub fn active_lottery(&self) -> Option<&Lottery> {
        match self.config.active_lottery_id {
            0 => None,
            id => self.lotteries.get(&id),
        }
    }

    pub fn lotteries(&self) -> impl Iterator<Item = &Lottery> {
        self.lotteries.values()
    }

    pub fn insert_lottery(&mut self, lottery: Lottery) {
        self.lotteries.insert(lottery.lottery_id, lottery);
    }

    pub fn ticket(&self, lottery_id: u64, ticket_id: u64) -> Option<&Ticket> {
        self.tickets.get(&(lottery_id, ticket_id))
    }

    pub fn ticket_mut(&mut self, lottery_id: u64, ticket_id: u64) -> Option<&mut Ticket> {
        self.tickets.get_mut(&(lottery_id, ticket_id))
    }

    pub fn ticket_of(&self, lottery_id: u64, owner: &Pubkey) -> Option<&Ticket> {
        let ticket_id = self.participants.get(&(lottery_id, *owner))?;
        self.ticket(lottery_id, *ticket_id)
    }

    /// Tickets of one round in id order.
    pub fn tickets(&self, lottery_id: u64) -> impl Iterator<Item = &Ticket> {
        self.tickets
            .range((lottery_id, 0)..=(lottery_id, u64::MAX))
            .map(|(_, ticket)| ticket)
    }

    pub fn is_participating(&self, lottery_id: u64, owner: &Pubkey) -> bool {
        self.participants.contains_key(&(lottery_id, *owner))
    }

    /// Stores a ticket and its owner's participation marker.
    pub fn insert_ticket(&mut self, ticket: Ticket) -> Result<()> {
        let key = (ticket.lottery_id, ticket.owner);
        require!(
            !self.participants.contains_key(&key),
            LotteryError::AlreadyParticipating
        );

        self.participants.insert(key, ticket.ticket_id);
        self.tickets
            .insert((ticket.lottery_id, ticket.ticket_id), ticket);
        Ok(())
    }

    pub fn request(&self, request_id: RequestId) -> Option<&RandomnessRequest> {
        self.requests.get(&request_id)
    }

    pub fn request_mut(&mut self, request_id: RequestId) -> Option<&mut RandomnessRequest> {
        self.requests.get_mut(&request_id)
    }

    pub fn insert_request(&mut self, request: RandomnessRequest) {
        self.requests.insert(request.request_id, request);
    }

    pub fn record_deposit(&mut self, lottery_id: u64, deposit: DepositId) {
        self.deposits.entry(lottery_id).or_default().push(deposit);
    }

    /// Deposits of the round still sitting in the vault.
    pub fn deposits(&self, lottery_id: u64) -> &[DepositId] {
        self.deposits
            .get(&lottery_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Marks `deposit` as withdrawn and adds what it returned to the round's total.
    pub fn record_withdrawal(
        &mut self,
        lottery_id: u64,
        deposit: DepositId,
        amount: u64,
    ) -> Result<()> {
        let total = self
            .withdrawn_total(lottery_id)
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        let deposits = self
            .deposits
            .get_mut(&lottery_id)
            .ok_or(LotteryError::UnknownDeposit)?;
        let index = deposits
            .iter()
            .position(|id| *id == deposit)
            .ok_or(LotteryError::UnknownDeposit)?;

        deposits.remove(index);
        self.withdrawn.insert(lottery_id, total);
        Ok(())
    }

    /// Principal plus yield withdrawn for the round so far.
    pub fn withdrawn_total(&self, lottery_id: u64) -> u64 {
        self.withdrawn.get(&lottery_id).copied().unwrap_or(0)
    }
}
