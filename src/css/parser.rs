//! Recursive descent selector parser.
//!
//! Parses selector groups such as `.nav-menu li a` or `a[href^="#"]` into a
//! [`SelectorList`]. Uses the logos-based tokenizer from
//! [`crate::css::tokenizer`].

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Tokenize input with spans, rejecting characters that do not lex.
fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, SelectorError> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    for (idx, (result, span)) in lexer.spanned().enumerate() {
        match result {
            Ok(token) => tokens.push(PToken {
                text: input[span.clone()].to_string(),
                token,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            }),
            Err(()) => {
                return Err(SelectorError::UnexpectedToken {
                    position: idx,
                    message: format!("unsupported selector syntax '{}'", &input[span]),
                })
            }
        }
    }

    Ok(tokens)
}

/// Parse a comma-separated selector group.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let tokens = tokenize_with_spans(input)?;
    if tokens.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];

    while parser.peek().is_some_and(|t| t.token == Token::Comma) {
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    if let Some(tok) = parser.peek() {
        return Err(SelectorError::UnexpectedToken {
            position: tok.pos,
            message: format!("trailing {:?} '{}'", tok.token, tok.text),
        });
    }

    Ok(SelectorList { selectors })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Consume an identifier, describing what was expected on failure.
    fn expect_ident(&mut self, what: &str) -> Result<String, SelectorError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(tok.text),
            Some(tok) => Err(SelectorError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, got {:?} '{}'", tok.token, tok.text),
            }),
            None => Err(SelectorError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    /// Parse one complex selector: compound selectors joined by combinators.
    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            match self.peek() {
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token here was not adjacent to the
                // previous compound, so whitespace separated them.
                Some(t)
                    if matches!(
                        t.token,
                        Token::Ident | Token::Hash | Token::Dot | Token::Star | Token::BracketOpen
                    ) =>
                {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector such as `a.active[href^="#"]`.
    ///
    /// After the first component only `.class`, `#id` and `[attr]` that touch
    /// the previous token extend the compound.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        match self.peek().map(|t| t.token.clone()) {
            Some(Token::Ident) => {
                let name = self.expect_ident("tag name")?;
                components.push(SelectorComponent::Type(name.to_ascii_lowercase()));
            }
            Some(Token::Star) => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some(Token::Dot | Token::Hash | Token::BracketOpen) => {
                components.push(self.parse_qualifier()?);
            }
            Some(_) => {
                return Err(SelectorError::UnexpectedToken {
                    position: self.current_pos(),
                    message: "expected selector part".into(),
                })
            }
            None => return Err(SelectorError::UnexpectedEof("expected selector part".into())),
        }

        while self.is_adjacent()
            && self
                .peek()
                .is_some_and(|t| matches!(t.token, Token::Dot | Token::Hash | Token::BracketOpen))
        {
            components.push(self.parse_qualifier()?);
        }

        Ok(CompoundSelector { components })
    }

    /// Parse `.class`, `#id` or an attribute selector.
    fn parse_qualifier(&mut self) -> Result<SelectorComponent, SelectorError> {
        let Some(tok) = self.advance() else {
            return Err(SelectorError::UnexpectedEof("expected selector part".into()));
        };
        match tok.token {
            Token::Dot => Ok(SelectorComponent::Class(self.expect_ident("class name")?)),
            Token::Hash => Ok(SelectorComponent::Id(self.expect_ident("id name")?)),
            Token::BracketOpen => self.parse_attribute(),
            _ => Err(SelectorError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected '.', '#' or '[', got '{}'", tok.text),
            }),
        }
    }

    /// Parse the remainder of `[name]` or `[name op value]` after `[`.
    fn parse_attribute(&mut self) -> Result<SelectorComponent, SelectorError> {
        let name = self.expect_ident("attribute name")?.to_ascii_lowercase();

        let operator = match self.advance() {
            Some(tok) => match tok.token {
                Token::BracketClose => {
                    return Ok(SelectorComponent::Attribute(AttributeSelector {
                        name,
                        matcher: None,
                    }))
                }
                Token::Equals => AttrOperator::Equals,
                Token::PrefixMatch => AttrOperator::Prefix,
                Token::SuffixMatch => AttrOperator::Suffix,
                Token::SubstringMatch => AttrOperator::Substring,
                other => {
                    return Err(SelectorError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("expected attribute operator, got {other:?}"),
                    })
                }
            },
            None => return Err(SelectorError::UnexpectedEof("expected ']'".into())),
        };

        let value = match self.advance() {
            Some(tok) => match tok.token {
                Token::StringLiteral | Token::StringLiteralSingle => {
                    tok.text[1..tok.text.len() - 1].to_string()
                }
                Token::Ident => tok.text,
                other => {
                    return Err(SelectorError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("expected attribute value, got {other:?}"),
                    })
                }
            },
            None => return Err(SelectorError::UnexpectedEof("expected attribute value".into())),
        };

        match self.advance() {
            Some(tok) if tok.token == Token::BracketClose => {}
            Some(tok) => {
                return Err(SelectorError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("expected ']', got '{}'", tok.text),
                })
            }
            None => return Err(SelectorError::UnexpectedEof("expected ']'".into())),
        }

        Ok(SelectorComponent::Attribute(AttributeSelector {
            name,
            matcher: Some((operator, value)),
        }))
    }
}
