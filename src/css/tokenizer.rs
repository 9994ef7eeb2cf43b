//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `^=` beats nothing, `*=` beats `*`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Whitespace is skipped; the parser recovers descendant combinators from the
//! byte spans of adjacent tokens.

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Attribute operators (two characters, defined first) ──────────

    /// `^=` prefix match.
    #[token("^=")]
    PrefixMatch,

    /// `$=` suffix match.
    #[token("$=")]
    SuffixMatch,

    /// `*=` substring match.
    #[token("*=")]
    SubstringMatch,

    /// `=` exact match.
    #[token("=")]
    Equals,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Identifier: tag names, class names, ids, attribute names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,
}

/// Tokenize a selector string into `(Token, text)` pairs.
///
/// Characters that do not form a token are dropped; the parser works on the
/// spanned lexer directly and rejects them instead.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|token| (token, input[span].to_string()))
        })
        .collect()
}
