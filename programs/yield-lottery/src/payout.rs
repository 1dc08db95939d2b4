use anchor_lang::prelude::*;

use crate::{constants::BPS_DENOMINATOR, error::LotteryError};

/// How a settled round's withdrawn proceeds are divided.
///
/// The winning ticket is paid `winner_prize` in a single claim, which already
/// includes its own ticket price. Every other ticket is paid `refund`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payout {
    pub total_withdrawn: u64,
    pub principal: u64,
    pub yield_earned: u64,
    pub fee: u64,
    pub winner_prize: u64,
    pub refund: u64,
}

impl Payout {
    /// Fee plus every claim the round can ever pay out.
    pub fn total_committed(&self, ticket_count: u64) -> Result<u64> {
        let losers = ticket_count.saturating_sub(1);
        let refunds = self
            .refund
            .checked_mul(losers)
            .ok_or(LotteryError::Overflow)?;
        let winner = if ticket_count > 0 { self.winner_prize } else { 0 };

        self.fee
            .checked_add(winner)
            .and_then(|x| x.checked_add(refunds))
            .ok_or(LotteryError::Overflow.into())
    }
}

/// Splits `total_withdrawn` between the fee recipient, the winner and the losers.
///
/// With yield (`total_withdrawn >= principal`) losers get their ticket price
/// back, the fee recipient takes `fee_bps` of the yield and the winner takes
/// their ticket price plus the rest of the yield.
///
/// On a shortfall every ticket, the winner's included, gets an equal share
/// rounded down; the rounding remainder goes to the fee recipient so nothing
/// is left unclaimable.
pub fn split_proceeds(
    total_withdrawn: u64,
    ticket_price: u64,
    ticket_count: u64,
    fee_bps: u16,
) -> Result<Payout> {
    require!(ticket_count > 0, LotteryError::NoTickets);
    require!(fee_bps as u64 <= BPS_DENOMINATOR, LotteryError::InvalidFee);

    let principal = ticket_price
        .checked_mul(ticket_count)
        .ok_or(LotteryError::Overflow)?;

    if total_withdrawn < principal {
        let share = total_withdrawn / ticket_count;
        let dust = total_withdrawn - share * ticket_count;

        return Ok(Payout {
            total_withdrawn,
            principal,
            yield_earned: 0,
            fee: dust,
            winner_prize: share,
            refund: share,
        });
    }

    let yield_earned = total_withdrawn - principal;
    let fee = (yield_earned as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(LotteryError::Overflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(LotteryError::Overflow)? as u64;
    let winner_prize = ticket_price
        .checked_add(yield_earned - fee)
        .ok_or(LotteryError::Overflow)?;

    Ok(Payout {
        total_withdrawn,
        principal,
        yield_earned,
        fee,
        winner_prize,
        refund: ticket_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_yield() {
        // 4 tickets at 100, 40 of yield, 5% fee
        let payout = split_proceeds(440, 100, 4, 500).unwrap();
        assert_eq!(payout.principal, 400);
        assert_eq!(payout.yield_earned, 40);
        assert_eq!(payout.fee, 2);
        assert_eq!(payout.winner_prize, 138);
        assert_eq!(payout.refund, 100);
        assert_eq!(payout.total_committed(4).unwrap(), 440);
    }

    #[test]
    fn test_fee_rounds_down_in_favour_of_winner() {
        // 5% of 19 is 0.95, the fee floors to 0
        let payout = split_proceeds(219, 100, 2, 500).unwrap();
        assert_eq!(payout.fee, 0);
        assert_eq!(payout.winner_prize, 119);
        assert_eq!(payout.total_committed(2).unwrap(), 219);
    }

    #[test]
    fn test_split_without_yield() {
        let payout = split_proceeds(300, 100, 3, 500).unwrap();
        assert_eq!(payout.yield_earned, 0);
        assert_eq!(payout.fee, 0);
        assert_eq!(payout.winner_prize, 100);
        assert_eq!(payout.refund, 100);
    }

    #[test]
    fn test_split_on_shortfall() {
        // 3 tickets at 100 but only 290 came back
        let payout = split_proceeds(290, 100, 3, 500).unwrap();
        assert_eq!(payout.yield_earned, 0);
        assert_eq!(payout.refund, 96);
        assert_eq!(payout.winner_prize, 96);
        assert_eq!(payout.fee, 2);
        assert_eq!(payout.total_committed(3).unwrap(), 290);
    }

    #[test]
    fn test_single_ticket_takes_everything_but_fee() {
        let payout = split_proceeds(1_200, 1_000, 1, 500).unwrap();
        assert_eq!(payout.fee, 10);
        assert_eq!(payout.winner_prize, 1_190);
        assert_eq!(payout.total_committed(1).unwrap(), 1_200);
    }

    #[test]
    fn test_full_fee() {
        let payout = split_proceeds(150, 50, 2, 10_000).unwrap();
        assert_eq!(payout.fee, 50);
        assert_eq!(payout.winner_prize, 50);
        assert_eq!(payout.total_committed(2).unwrap(), 150);
    }

    #[test]
    fn test_never_exceeds_withdrawn() {
        for total in [0u64, 1, 99, 199, 200, 201, 333, 10_007] {
            for count in 1u64..=5 {
                for fee_bps in [0u16, 1, 500, 3_333, 10_000] {
                    let payout = split_proceeds(total, 40, count, fee_bps).unwrap();
                    assert!(payout.total_committed(count).unwrap() <= total);
                }
            }
        }
    }

    #[test]
    fn test_rejects_zero_tickets() {
        let err = split_proceeds(100, 10, 0, 500).unwrap_err();
        assert_eq!(err, anchor_lang::error::Error::from(LotteryError::NoTickets));
    }

    #[test]
    fn test_rejects_overflowing_principal() {
        let err = split_proceeds(100, u64::MAX, 2, 500).unwrap_err();
        assert_eq!(err, anchor_lang::error::Error::from(LotteryError::Overflow));
    }
}
