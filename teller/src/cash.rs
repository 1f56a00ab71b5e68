use std::fmt::Display;

use tracing::{debug, info};

use crate::error::{CashError, DenominationError, LedgerError};
use crate::ledger::{Amount, Bank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Denomination {
    One = 1,
    Two = 2,
    Five = 5,
    Ten = 10,
    Fifty = 50,
    Hundred = 100,
    FiveHundred = 500,
    TwoThousand = 2000,
}

impl Denomination {
    /// Every denomination, smallest first.
    pub const ALL: [Denomination; 8] = [
        Denomination::One,
        Denomination::Two,
        Denomination::Five,
        Denomination::Ten,
        Denomination::Fifty,
        Denomination::Hundred,
        Denomination::FiveHundred,
        Denomination::TwoThousand,
    ];

    pub fn value(self) -> Amount {
        self as Amount
    }

    pub fn is_coin(self) -> bool {
        self < Denomination::Ten
    }

    fn slot(self) -> usize {
        match self {
            Denomination::One => 0,
            Denomination::Two => 1,
            Denomination::Five => 2,
            Denomination::Ten => 3,
            Denomination::Fifty => 4,
            Denomination::Hundred => 5,
            Denomination::FiveHundred => 6,
            Denomination::TwoThousand => 7,
        }
    }
}

impl TryFrom<i64> for Denomination {
    type Error = DenominationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or(DenominationError::Unsupported(value))
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rs. {}/-", self.value())
    }
}

/// A cash withdrawal being split into coins and notes.
///
/// The caller picks which denominations to maximize, in its own order; each
/// one takes as many units as fit into what is still unallocated. Nothing
/// leaves the account until [`CashBreakdown::finalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashBreakdown {
    amount: Amount,
    remaining: Amount,
    counts: [u64; 8],
}

impl CashBreakdown {
    /// Checks the amount against the logged-in account without touching it.
    pub fn begin(bank: &Bank, amount: Amount) -> Result<Self, LedgerError> {
        let account = bank.current().ok_or(LedgerError::NoSession)?;
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        if amount > account.balance() {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: account.balance(),
            });
        }

        debug!(amount, "cash withdrawal started");
        Ok(Self {
            amount,
            remaining: amount,
            counts: [0; 8],
        })
    }

    pub fn remaining(&self) -> Amount {
        self.remaining
    }

    pub fn count(&self, denomination: Denomination) -> u64 {
        self.counts[denomination.slot()]
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Maximizes the denomination worth `value`; returns the units added.
    pub fn apply(&mut self, value: i64) -> Result<u64, DenominationError> {
        let denomination = Denomination::try_from(value)?;
        Ok(self.maximize(denomination))
    }

    pub fn maximize(&mut self, denomination: Denomination) -> u64 {
        let units = (self.remaining / denomination.value()).unsigned_abs();
        self.counts[denomination.slot()] += units;
        self.remaining %= denomination.value();
        units
    }

    /// Covers whatever is left with as few pieces as possible.
    pub fn fill_remaining(&mut self) {
        for denomination in Denomination::ALL.into_iter().rev() {
            self.maximize(denomination);
        }
    }

    pub fn finalize(self, bank: &mut Bank) -> Result<Withdrawal, CashError> {
        if !self.is_complete() {
            return Err(CashError::Incomplete {
                remaining: self.remaining,
            });
        }
        bank.withdraw(self.amount)?;

        let withdrawal = Withdrawal {
            amount: self.amount,
            counts: self.counts,
        };
        info!(
            amount = withdrawal.amount,
            pieces = withdrawal.total_pieces(),
            "cash withdrawn"
        );
        Ok(withdrawal)
    }
}

/// Cash that has left the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    amount: Amount,
    counts: [u64; 8],
}

impl Withdrawal {
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn count(&self, denomination: Denomination) -> u64 {
        self.counts[denomination.slot()]
    }

    /// Every denomination with its count, smallest first.
    pub fn pieces(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        Denomination::ALL.into_iter().map(|d| (d, self.count(d)))
    }

    pub fn total_pieces(&self) -> u64 {
        self.counts.iter().sum()
    }
}
