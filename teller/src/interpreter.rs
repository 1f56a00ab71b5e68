use std::io;

use ami::token::Annotated;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::cash::CashBreakdown;
use crate::console::Console;
use crate::display;
use crate::error::{AccountError, AuthError};
use crate::ledger::{AccountId, Amount, Bank, Pin};
use crate::parser::{Keyword, Word};

/// Whether the console should read another line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Terminate,
}

impl Signal {
    pub fn is_continue(self) -> bool {
        self == Signal::Continue
    }
}

/// Progress through a multi-word command. Lives for a single line.
#[derive(Debug)]
enum State {
    Idle,
    AwaitingDepositAmount,
    AwaitingWithdrawAmount,
    AwaitingCashAmount,
    AccumulatingCashDenominations(CashBreakdown),
}

impl State {
    fn usage(&self) -> Option<&'static str> {
        match self {
            State::Idle => None,
            State::AwaitingDepositAmount => Some("deposit (amount)"),
            State::AwaitingWithdrawAmount => Some("withdraw (amount)"),
            State::AwaitingCashAmount | State::AccumulatingCashDenominations(_) => {
                Some("withdraw cash (amount) (note-denom...) done")
            }
        }
    }
}

enum Step {
    Next(State),
    Exit,
}

#[derive(Debug, Error)]
enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("PINs don't match")]
    PinMismatch,
    #[error("input ended")]
    Cancelled,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Runs command lines against a bank, asking the console for anything a
/// command needs beyond its own words.
pub struct Interpreter<'a, C> {
    bank: &'a mut Bank,
    console: &'a mut C,
}

impl<'a, C: Console> Interpreter<'a, C> {
    pub fn new(bank: &'a mut Bank, console: &'a mut C) -> Self {
        Self { bank, console }
    }

    /// Executes every command on `line`. A command still waiting for words
    /// when the line ends is reported and dropped.
    pub fn interpret(&mut self, line: &str) -> io::Result<Signal> {
        let mut state = State::Idle;
        for token in Word::tokenize(line) {
            state = match self.step(state, &token)? {
                Step::Next(state) => state,
                Step::Exit => {
                    info!("exit requested");
                    return Ok(Signal::Terminate);
                }
            };
        }
        self.finish(state)?;
        Ok(Signal::Continue)
    }

    fn step(&mut self, state: State, token: &Annotated<Word>) -> io::Result<Step> {
        trace!(token = %token.describe(), ?state);
        let word = &token.token;
        let next = match state {
            State::Idle => match word.keyword() {
                Some(Keyword::Exit) => return Ok(Step::Exit),
                Some(Keyword::Help) => {
                    self.console.write_line(display::HELP)?;
                    State::Idle
                }
                Some(Keyword::Login) => {
                    self.login()?;
                    State::Idle
                }
                Some(Keyword::Logout) => {
                    self.bank.logout();
                    self.success("You have logged out of the account!")?;
                    State::Idle
                }
                Some(Keyword::Show) => {
                    self.console.write_line(&display::show(self.bank))?;
                    State::Idle
                }
                Some(Keyword::Deposit) => State::AwaitingDepositAmount,
                Some(Keyword::Withdraw) => State::AwaitingWithdrawAmount,
                _ => {
                    debug!("ignoring {}", token.describe());
                    State::Idle
                }
            },
            State::AwaitingDepositAmount if word.is_numeric() => {
                self.deposit(word)?;
                State::Idle
            }
            State::AwaitingWithdrawAmount if word.is_numeric() => {
                self.withdraw(word)?;
                State::Idle
            }
            State::AwaitingWithdrawAmount if word.keyword() == Some(Keyword::Cash) => {
                State::AwaitingCashAmount
            }
            State::AwaitingCashAmount if word.is_numeric() => self.begin_cash(word)?,
            State::AccumulatingCashDenominations(mut cash) if word.is_numeric() => {
                self.maximize(&mut cash, word)?;
                State::AccumulatingCashDenominations(cash)
            }
            State::AccumulatingCashDenominations(cash)
                if word.keyword() == Some(Keyword::Done) =>
            {
                self.withdraw_cash(cash)?;
                State::Idle
            }
            pending => {
                debug!("skipping {} while {:?}", token.describe(), pending);
                pending
            }
        };
        Ok(Step::Next(next))
    }

    fn finish(&mut self, state: State) -> io::Result<()> {
        let Some(usage) = state.usage() else {
            return Ok(());
        };
        debug!(?state, "dropping incomplete command");
        self.failure("Incomplete operation and command.")?;
        self.console.write_line(&format!("Usage $: {usage}"))
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        self.console.write_line(&format!("Success: {message}"))
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        self.console.write_line(&format!("Failure: {message}"))
    }

    /// Parses an amount, reporting the ones that don't fit.
    fn amount(&mut self, word: &Word) -> io::Result<Option<Amount>> {
        let amount = word.amount();
        if amount.is_none() {
            warn!("{word} is out of range");
            self.failure(&format!("Amount {} is too large. Try again.", word.text()))?;
        }
        Ok(amount)
    }

    fn deposit(&mut self, word: &Word) -> io::Result<()> {
        let Some(amount) = self.amount(word)? else {
            return Ok(());
        };
        match self.bank.deposit(amount) {
            Ok(_) => self.success("You have deposited into the account!"),
            Err(err) => self.failure(&format!("{err}. Try again.")),
        }
    }

    fn withdraw(&mut self, word: &Word) -> io::Result<()> {
        let Some(amount) = self.amount(word)? else {
            return Ok(());
        };
        match self.bank.withdraw(amount) {
            Ok(_) => self.success("You have withdrawn from the account!"),
            Err(err) => self.failure(&format!("{err}. Try again.")),
        }
    }

    fn begin_cash(&mut self, word: &Word) -> io::Result<State> {
        let Some(amount) = self.amount(word)? else {
            return Ok(State::Idle);
        };
        match CashBreakdown::begin(self.bank, amount) {
            Ok(cash) => Ok(State::AccumulatingCashDenominations(cash)),
            Err(err) => {
                self.failure(&format!("{err}. Try again."))?;
                Ok(State::Idle)
            }
        }
    }

    fn maximize(&mut self, cash: &mut CashBreakdown, word: &Word) -> io::Result<()> {
        let Some(value) = word.amount() else {
            return self.failure(&format!("denomination {} doesn't exist.", word.text()));
        };
        match cash.apply(value) {
            Ok(units) => self.success(&format!("Maximized Rs. {value}/- notes ({units} taken)!")),
            Err(err) => self.failure(&format!("{err}.")),
        }
    }

    fn withdraw_cash(&mut self, mut cash: CashBreakdown) -> io::Result<()> {
        cash.fill_remaining();
        match cash.finalize(self.bank) {
            Ok(withdrawal) => {
                self.success("You have withdrawn from the account!")?;
                self.console.write_line(&display::cash(&withdrawal))
            }
            Err(err) => self.failure(&format!("{err}. Try again.")),
        }
    }

    fn login(&mut self) -> io::Result<()> {
        match self.authenticate() {
            Ok(_) => self.success("You have logged into the account!"),
            Err(LoginError::Io(err)) => Err(err),
            Err(err) => {
                warn!(%err, "login failed");
                self.failure(&format!("Not logged in, {err}! Try again."))
            }
        }
    }

    /// Logs in with a name and PIN read from the console, opening the account
    /// when the name is new.
    fn authenticate(&mut self) -> Result<AccountId, LoginError> {
        self.bank.logout();
        let name = self
            .console
            .read_line("> Enter User Name (case sensitive) : ")?
            .ok_or(LoginError::Cancelled)?
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(AccountError::EmptyName.into());
        }

        if self.bank.find(&name).is_some() {
            let pin = self.read_pin("> Enter PIN: ")?;
            return Ok(self.bank.login(&name, pin)?);
        }

        self.console.write_line("Warning: Account doesn't exist!")?;
        self.console
            .write_line(&format!("Info: Creating new account with User Name {name}."))?;
        let pin = self.read_pin("> Enter PIN: ")?;
        let confirmation = self.read_pin("> Re-Enter PIN: ")?;
        if pin != confirmation {
            return Err(LoginError::PinMismatch);
        }
        self.bank.create_account(name.as_str(), pin)?;
        Ok(self.bank.login(&name, pin)?)
    }

    /// Asks again until the reply is a number.
    fn read_pin(&mut self, prompt: &str) -> Result<Pin, LoginError> {
        loop {
            let reply = self.console.read_line(prompt)?.ok_or(LoginError::Cancelled)?;
            match reply.trim().parse() {
                Ok(pin) => return Ok(pin),
                Err(_) => debug!("PIN reply is not a number"),
            }
        }
    }
}

/// Reads and runs lines until `exit` or the end of input.
pub fn run<C: Console>(bank: &mut Bank, console: &mut C) -> io::Result<()> {
    loop {
        let prompt = display::prompt(bank);
        let Some(line) = console.read_line(&prompt)? else {
            info!("input exhausted");
            return Ok(());
        };
        if !Interpreter::new(bank, console).interpret(&line)?.is_continue() {
            return Ok(());
        }
    }
}
