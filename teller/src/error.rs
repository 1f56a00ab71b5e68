//! Errors raised by the ledger and the cash desk.
//!
//! None of them is fatal: the interpreter reports them and waits for the next
//! command.
use thiserror::Error;

use crate::ledger::Amount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no account named \"{0}\"")]
    UnknownAccount(String),
    #[error("wrong PIN")]
    WrongCredential,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("an account named \"{0}\" already exists")]
    NameAlreadyExists(String),
    #[error("user name can't be empty")]
    EmptyName,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("login required")]
    NoSession,
    #[error("amount must be a positive number")]
    NonPositiveAmount,
    #[error("you don't have enough money: asked for {requested}, balance is {available}")]
    InsufficientFunds { requested: Amount, available: Amount },
    #[error("balance would overflow")]
    BalanceOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenominationError {
    #[error("denomination {0} doesn't exist")]
    Unsupported(i64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CashError {
    #[error("{remaining} is not covered by any denomination")]
    Incomplete { remaining: Amount },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
