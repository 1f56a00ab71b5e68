use std::fmt::Display;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AccountError, AuthError, LedgerError};

pub type Amount = i64;
pub type Pin = u64;

/// Position of an account in its bank, stable for the bank's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(usize);

impl AccountId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: AccountId,
    name: String,
    #[serde(skip)]
    pin: Pin,
    balance: Amount,
}

impl Account {
    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }
}

/// The in-memory ledger: every account plus the one logged-in session.
#[derive(Debug, Serialize)]
pub struct Bank {
    name: String,
    accounts: Vec<Account>,
    #[serde(skip)]
    session: Option<AccountId>,
}

impl Bank {
    /// Balance every new account opens with.
    pub const STARTING_GRANT: Amount = 3210;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accounts: vec![],
            session: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accounts(&self) -> impl ExactSizeIterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn find(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    pub fn session(&self) -> Option<AccountId> {
        self.session
    }

    pub fn current(&self) -> Option<&Account> {
        self.session.and_then(|id| self.accounts.get(id.0))
    }

    pub fn balance_of(&self, id: AccountId) -> Option<Amount> {
        self.accounts.get(id.0).map(Account::balance)
    }

    pub fn name_of(&self, id: AccountId) -> Option<&str> {
        self.accounts.get(id.0).map(Account::name)
    }

    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        pin: Pin,
    ) -> Result<AccountId, AccountError> {
        let name = name.into();
        if name.is_empty() {
            return Err(AccountError::EmptyName);
        }
        if self.find(&name).is_some() {
            return Err(AccountError::NameAlreadyExists(name));
        }

        let id = AccountId(self.accounts.len());
        info!(%id, %name, "opening account");
        self.accounts.push(Account {
            id,
            name,
            pin,
            balance: Self::STARTING_GRANT,
        });
        Ok(id)
    }

    /// Starts a session for `name`. Whatever session was open is closed
    /// first, even when the credentials turn out to be wrong.
    pub fn login(&mut self, name: &str, pin: Pin) -> Result<AccountId, AuthError> {
        self.logout();
        let account = self
            .find(name)
            .ok_or_else(|| AuthError::UnknownAccount(name.to_string()))?;
        if account.pin != pin {
            warn!(%name, "wrong PIN");
            return Err(AuthError::WrongCredential);
        }

        let id = account.id;
        info!(%id, %name, "logged in");
        self.session = Some(id);
        Ok(id)
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.session.take() {
            info!(%id, "logged out");
        }
    }

    /// Returns the new balance.
    pub fn deposit(&mut self, amount: Amount) -> Result<Amount, LedgerError> {
        let account = self.current_mut()?;
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        info!(id = %account.id, amount, balance = account.balance, "deposit");
        Ok(account.balance)
    }

    /// Returns the new balance.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Amount, LedgerError> {
        let account = self.current_mut()?;
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        info!(id = %account.id, amount, balance = account.balance, "withdrawal");
        Ok(account.balance)
    }

    fn current_mut(&mut self) -> Result<&mut Account, LedgerError> {
        let id = self.session.ok_or(LedgerError::NoSession)?;
        self.accounts.get_mut(id.0).ok_or(LedgerError::NoSession)
    }
}
