pub mod cash;
pub mod console;
pub mod display;
pub mod error;
pub mod interpreter;
pub mod ledger;
pub mod parser;

pub use interpreter::{run, Interpreter, Signal};
