mod token;

pub use token::{Keyword, Word};
