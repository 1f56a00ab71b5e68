use std::fmt::Display;

use ami::token::{Annotated, Class, TokenProducer, Tokenizer};

use crate::ledger::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Exit,
    Help,
    Login,
    Logout,
    Show,
    Deposit,
    Withdraw,
    Cash,
    Done,
}

impl Keyword {
    fn for_word(word: &str) -> Option<Keyword> {
        match word {
            "exit" => Some(Keyword::Exit),
            "help" => Some(Keyword::Help),
            "login" => Some(Keyword::Login),
            "logout" => Some(Keyword::Logout),
            "show" => Some(Keyword::Show),
            "deposit" => Some(Keyword::Deposit),
            "withdraw" => Some(Keyword::Withdraw),
            "cash" => Some(Keyword::Cash),
            "done" => Some(Keyword::Done),
            _ => None,
        }
    }
}

/// One lower-cased word of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    class: Class,
}

impl Word {
    pub fn tokenize(line: &str) -> Vec<Annotated<Word>> {
        Tokenizer::<Word>::new().tokenize(line).collect()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.class == Class::Numeric
    }

    pub fn is_alpha(&self) -> bool {
        self.class == Class::Alphabetic
    }

    pub fn keyword(&self) -> Option<Keyword> {
        if self.is_alpha() {
            Keyword::for_word(&self.text)
        } else {
            None
        }
    }

    /// The value of a numeric word, `None` when it is not numeric or too large.
    pub fn amount(&self) -> Option<Amount> {
        if self.is_numeric() {
            self.text.parse().ok()
        } else {
            None
        }
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.class {
            Class::Numeric => write!(f, "number `{}`", self.text),
            Class::Alphabetic => write!(f, "word `{}`", self.text),
            Class::Mixed => write!(f, "token `{}`", self.text),
        }
    }
}

impl TokenProducer for Word {
    type Token = Self;

    fn produce(text: String, class: Class) -> Self {
        Word { text, class }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(line: &str) -> Vec<(bool, bool)> {
        Word::tokenize(line)
            .into_iter()
            .map(|a| (a.token.is_alpha(), a.token.is_numeric()))
            .collect()
    }

    #[test]
    fn test_empty_line() {
        assert!(Word::tokenize("").is_empty());
    }

    #[test]
    fn test_cash_command() {
        let alpha = (true, false);
        let numeric = (false, true);
        assert_eq!(
            vec![alpha, alpha, numeric, numeric, alpha],
            flags("withdraw cash 300 100 done")
        );
    }

    #[test]
    fn test_mixed_words_are_neither() {
        assert_eq!(vec![(false, false)], flags("100rs"));
        let word = &Word::tokenize("100rs")[0].token;
        assert_eq!(None, word.amount());
        assert_eq!(None, word.keyword());
        assert_eq!("token `100rs`", word.to_string());
    }

    #[test]
    fn test_keywords_ignore_case() {
        let keywords: Vec<Option<Keyword>> = Word::tokenize("Withdraw CASH dOnE cashier")
            .into_iter()
            .map(|a| a.token.keyword())
            .collect();
        assert_eq!(
            vec![
                Some(Keyword::Withdraw),
                Some(Keyword::Cash),
                Some(Keyword::Done),
                None
            ],
            keywords
        );
    }

    #[test]
    fn test_amount() {
        let words = Word::tokenize("0042 99999999999999999999 exit");
        assert_eq!(Some(42), words[0].token.amount());
        assert_eq!(None, words[1].token.amount());
        assert_eq!(None, words[2].token.amount());
        assert_eq!("number `0042` at ln 1, col 1", words[0].describe());
    }
}
