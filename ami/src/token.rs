use std::{fmt::Display, iter::once, marker::PhantomData};

use itertools::Itertools;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Annotated<Token> {
    pub token: Token,
    pub row: usize,
    pub col: usize,
}

impl<T: Display> Annotated<T> {
    pub fn describe(&self) -> String {
        format!("{} at ln {}, col {}", self.token, self.row, self.col)
    }
}

/// What a word is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// ASCII digits only.
    Numeric,
    /// Letters only.
    Alphabetic,
    /// Anything else, e.g. `abc123`.
    Mixed,
}

impl Class {
    fn of(grapheme: &str) -> Self {
        if grapheme.chars().all(|c| c.is_ascii_digit()) {
            Class::Numeric
        } else if grapheme.chars().all(char::is_alphabetic) {
            Class::Alphabetic
        } else {
            Class::Mixed
        }
    }

    fn merge(self, other: Class) -> Self {
        if self == other {
            self
        } else {
            Class::Mixed
        }
    }
}

fn is_word(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_alphanumeric)
}

fn is_line_end(grapheme: &str) -> bool {
    grapheme == "\n" || grapheme == "\r\n"
}

#[derive(Default)]
struct Buffer {
    word: String,
    class: Option<Class>,
    pos: (usize, usize),
}

impl Buffer {
    fn push(&mut self, grapheme: &str, pos: (usize, usize)) {
        if self.class.is_none() {
            self.pos = pos;
        }
        let class = Class::of(grapheme);
        self.class = Some(self.class.map_or(class, |c| c.merge(class)));
        self.word.extend(grapheme.chars().flat_map(char::to_lowercase));
    }

    fn done<T>(&mut self, f: impl FnOnce(String, Class) -> T) -> Option<Annotated<T>> {
        let class = self.class.take()?;
        let (row, col) = self.pos;
        Some(Annotated {
            token: f(std::mem::take(&mut self.word), class),
            row,
            col,
        })
    }
}

/// Turns a finished word into a token.
pub trait TokenProducer {
    type Token;
    fn produce(word: String, class: Class) -> Self::Token;
}

/// Splits input into lower-cased words made of alphanumeric graphemes.
///
/// Every other grapheme separates words and is dropped, so runs of spaces or
/// punctuation never yield empty words.
pub struct Tokenizer<P> {
    producer: PhantomData<P>,
    buffer: Buffer,
    col: usize,
    row: usize,
}

impl<P> Default for Tokenizer<P>
where
    P: TokenProducer + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Tokenizer<P>
where
    P: TokenProducer + 'static,
{
    pub fn new() -> Self {
        Self {
            producer: PhantomData,
            buffer: Default::default(),
            col: 1,
            row: 1,
        }
    }

    fn advance(&mut self, grapheme: &str) -> (usize, usize) {
        let pos = (self.row, self.col);
        if is_line_end(grapheme) {
            self.col = 1;
            self.row += 1;
        } else {
            self.col += 1;
        }
        pos
    }

    pub fn tokenize(mut self, program: &str) -> impl Iterator<Item = Annotated<P::Token>> + '_ {
        program
            .graphemes(true)
            .map(Some)
            .chain(once(None))
            .tuple_windows()
            .filter_map(move |(cur, next)| {
                let cur = cur?;
                let pos = self.advance(cur);
                if !is_word(cur) {
                    return None;
                }
                self.buffer.push(cur, pos);
                if next.is_some_and(is_word) {
                    None
                } else {
                    self.buffer.done(P::produce)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Raw(String, Class);

    impl TokenProducer for Raw {
        type Token = Self;

        fn produce(word: String, class: Class) -> Self {
            Raw(word, class)
        }
    }

    fn raw(word: &str, class: Class, row: usize, col: usize) -> Annotated<Raw> {
        Annotated {
            token: Raw(word.to_owned(), class),
            row,
            col,
        }
    }

    fn tokenize(program: &str) -> Vec<Annotated<Raw>> {
        Tokenizer::<Raw>::new().tokenize(program).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ,;  ").is_empty());
    }

    #[test]
    fn test_classification() {
        let expected = vec![
            raw("withdraw", Class::Alphabetic, 1, 1),
            raw("300", Class::Numeric, 1, 10),
            raw("a1", Class::Mixed, 1, 14),
        ];
        assert_eq!(expected, tokenize("withdraw 300 a1"));
    }

    #[test]
    fn test_punctuation_splits_words() {
        let words: Vec<String> = tokenize("deposit,100!!done")
            .into_iter()
            .map(|a| a.token.0)
            .collect();
        assert_eq!(vec!["deposit", "100", "done"], words);

        let words: Vec<String> = tokenize("12.50").into_iter().map(|a| a.token.0).collect();
        assert_eq!(vec!["12", "50"], words);
    }

    #[test]
    fn test_lower_case() {
        assert_eq!(vec![raw("exit", Class::Alphabetic, 1, 3)], tokenize("  EXIT"));
        assert_eq!(vec![raw("élan", Class::Alphabetic, 1, 1)], tokenize("Élan"));
    }

    #[test]
    fn test_rows() {
        let expected = vec![
            raw("show", Class::Alphabetic, 1, 1),
            raw("exit", Class::Alphabetic, 2, 2),
        ];
        assert_eq!(expected, tokenize("show\n exit\n"));
    }

    #[test]
    fn test_non_ascii_digits_are_not_numeric() {
        assert_eq!(vec![raw("٣", Class::Mixed, 1, 1)], tokenize("٣"));
    }

    #[test]
    fn test_describe() {
        let token = Annotated {
            token: "word",
            row: 2,
            col: 7,
        };
        assert_eq!("word at ln 2, col 7", token.describe());
    }
}
