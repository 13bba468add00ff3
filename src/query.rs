//! Word arithmetic queries such as `king - man + woman`.
//!
//! Grammar, left-associative and whitespace-insensitive:
//!
//! ```text
//! expr := term (('+' | '-') term)*
//! term := WORD | '"' any text without quotes '"'
//! ```
//!
//! Bare words run until whitespace, an operator or a quote. Quoting lets a
//! vocabulary entry that contains `+` or `-` be named.

use crate::error::{Result, WordVecError};
use crate::storage::VectorStore;
use crate::vector::{self, Vector};
use std::fmt;
use tracing::debug;

/// Binary operator between two terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
        }
    }
}

/// Lexical token with its byte offset in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Op(Op),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Spanned {
    token: Token,
    position: usize,
}

fn describe(token: &Token) -> String {
    match token {
        Token::Word(word) => format!("word {:?}", word),
        Token::Op(op) => format!("'{}'", op.symbol()),
    }
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && c != '+' && c != '-' && c != '"'
}

fn tokenize_spanned(input: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' => {
                chars.next();
                let op = if c == '+' { Op::Add } else { Op::Sub };
                tokens.push(Spanned {
                    token: Token::Op(op),
                    position,
                });
            }
            '"' => {
                chars.next();
                let start = position + 1;
                let end = loop {
                    match chars.next() {
                        Some((i, '"')) => break i,
                        Some(_) => {}
                        None => {
                            return Err(WordVecError::Lexical {
                                position,
                                reason: "unterminated quoted word".to_string(),
                            })
                        }
                    }
                };
                if start == end {
                    return Err(WordVecError::Lexical {
                        position,
                        reason: "empty quoted word".to_string(),
                    });
                }
                tokens.push(Spanned {
                    token: Token::Word(input[start..end].to_string()),
                    position,
                });
            }
            _ => {
                let mut end = input.len();
                while let Some(&(i, c)) = chars.peek() {
                    if !is_word_char(c) {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                tokens.push(Spanned {
                    token: Token::Word(input[position..end].to_string()),
                    position,
                });
            }
        }
    }

    Ok(tokens)
}

/// Split a query into words and operators
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Ok(tokenize_spanned(input)?
        .into_iter()
        .map(|s| s.token)
        .collect())
}

/// One operand of an expression and the operator that folds it in.
/// The first term always carries `Op::Add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub op: Op,
    pub word: String,
}

/// A parsed, not yet resolved, query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Resolve every word against `store` and fold left to right.
    ///
    /// A single term resolves to the stored vector unchanged. The result is
    /// not normalized.
    pub fn evaluate(&self, store: &VectorStore) -> Result<Vector> {
        let mut acc: Option<Vector> = None;
        for term in &self.terms {
            let operand = store
                .find(&term.word)
                .ok_or_else(|| WordVecError::WordNotFound {
                    word: term.word.clone(),
                })?
                .clone();
            acc = match term.op {
                Op::Add => vector::add(acc, Some(operand)),
                Op::Sub => vector::sub(acc, Some(operand)),
            };
        }
        acc.ok_or_else(|| WordVecError::syntax("empty expression"))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", term.op.symbol())?;
            }
            write!(f, "{}", term.word)?;
        }
        Ok(())
    }
}

/// Parse a query into an [`Expression`]
pub fn parse(input: &str) -> Result<Expression> {
    let mut tokens = tokenize_spanned(input)?.into_iter();
    let mut terms = Vec::new();
    let mut op = Op::Add;

    loop {
        match tokens.next() {
            Some(Spanned {
                token: Token::Word(word),
                ..
            }) => terms.push(Term { op, word }),
            Some(Spanned { token, position }) => {
                return Err(WordVecError::syntax(format!(
                    "expected a word at offset {}, found {}",
                    position,
                    describe(&token)
                )))
            }
            None if terms.is_empty() => return Err(WordVecError::syntax("empty expression")),
            None => {
                return Err(WordVecError::syntax(format!(
                    "expression ends after '{}'",
                    op.symbol()
                )))
            }
        }

        match tokens.next() {
            Some(Spanned {
                token: Token::Op(next),
                ..
            }) => op = next,
            Some(Spanned { token, position }) => {
                return Err(WordVecError::syntax(format!(
                    "expected '+' or '-' at offset {}, found {}",
                    position,
                    describe(&token)
                )))
            }
            None => return Ok(Expression { terms }),
        }
    }
}

/// Evaluates queries against one store
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    store: &'a VectorStore,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a VectorStore) -> Self {
        Self { store }
    }

    /// Parse and evaluate `input`. Any lexical, syntax or lookup error fails
    /// the whole query; the store is never modified.
    pub fn evaluate(&self, input: &str) -> Result<Vector> {
        let expression = parse(input)?;
        debug!(query = %expression, "evaluating query");
        expression.evaluate(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> VectorStore {
        vec![
            Vector::new("king", vec![1.0, 1.0, 0.0]),
            Vector::new("man", vec![1.0, 0.0, 0.0]),
            Vector::new("woman", vec![0.0, 0.0, 1.0]),
            Vector::new("e-mail", vec![2.0, 2.0, 2.0]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("king-man +  woman").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Word("king".to_string()),
                Token::Op(Op::Sub),
                Token::Word("man".to_string()),
                Token::Op(Op::Add),
                Token::Word("woman".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_quoted() {
        let tokens = tokenize("\"e-mail\"+ 東京").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Word("e-mail".to_string()),
                Token::Op(Op::Add),
                Token::Word("東京".to_string()),
            ]
        );
    }

    #[test]
    fn test_lexical_errors() {
        assert!(matches!(
            tokenize("king + \"wom"),
            Err(WordVecError::Lexical { position: 7, .. })
        ));
        assert!(matches!(tokenize("\"\""), Err(WordVecError::Lexical { .. })));
    }

    #[test]
    fn test_parse_display() {
        let expr = parse("  king -man+woman ").unwrap();
        assert_eq!(expr.to_string(), "king - man + woman");
        assert_eq!(expr.terms().len(), 3);
        assert_eq!(expr.terms()[0].op, Op::Add);
        assert_eq!(expr.terms()[1].op, Op::Sub);
    }

    #[test]
    fn test_syntax_errors() {
        for input in ["", "   ", "+ king", "king +", "king man", "king + - man", "-king"] {
            assert!(
                matches!(parse(input), Err(WordVecError::Syntax { .. })),
                "{:?} should be a syntax error",
                input
            );
        }
    }

    #[test]
    fn test_single_word_is_stored_vector() {
        let store = store();
        let v = Evaluator::new(&store).evaluate("king").unwrap();
        assert_eq!(&v, store.find("king").unwrap());
    }

    #[test]
    fn test_fold_left_to_right() {
        let store = store();
        let v = Evaluator::new(&store).evaluate("king - man + woman").unwrap();
        assert_eq!(v.word(), "king - man + woman");
        assert_eq!(v.as_slice(), &[0.0, 1.0, 1.0]);
        for word in ["king", "man", "woman"] {
            assert!(v.derives_from(word));
        }
    }

    #[test]
    fn test_quoted_lookup() {
        let store = store();
        let v = Evaluator::new(&store).evaluate("\"e-mail\" - king").unwrap();
        assert_eq!(v.as_slice(), &[1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_unknown_word_aborts() {
        let store = store();
        let err = Evaluator::new(&store).evaluate("king + queen").unwrap_err();
        assert!(matches!(err, WordVecError::WordNotFound { ref word } if word == "queen"));
    }

    #[test]
    fn test_evaluation_does_not_touch_store() {
        let store = store();
        let before = store.find("king").unwrap().clone();
        let mut v = Evaluator::new(&store).evaluate("king").unwrap();
        v.normalize();
        assert_eq!(store.find("king").unwrap(), &before);
    }
}
