//! Raw tokens for the scanned surface language.
//!
//! The scanner only needs to recognize raise constructs, handler bindings,
//! and simple alias assignments; everything else in the source is noise.
//! Strings (including triple-quoted ones) and comments are consumed as
//! whole tokens so that raise-like text inside them is never mistaken for
//! a declaration.

use logos::Logos;

/// Raw token from logos.
///
/// Tokens the collector does not care about still lex (or fail to lex)
/// into something, keeping the stream aligned with the source; lex errors
/// are folded into [`RawToken::Junk`] by the driver.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")] // Horizontal whitespace
#[logos(skip r"\\\r?\n")] // Explicit line continuation
#[logos(skip r"#[^\n]*")] // Comments
pub enum RawToken {
    #[token("raise")]
    Raise,
    #[token("except")]
    Except,
    #[token("as")]
    As,
    #[token("from")]
    From,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,

    #[regex(r"\n")]
    Newline,

    // Triple-quoted strings may span lines; the short forms may not.
    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    #[regex(r"'''([^']|'[^']|''[^'])*'''")]
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    #[regex(r"'([^'\\\n\r]|\\.)*'")]
    Str,

    /// Catch-all for bytes the collector has no use for; lowest priority
    /// so every real pattern outranks it.
    #[regex(r".", priority = 0)]
    Junk,
}

impl RawToken {
    /// Whether this token ends a simple statement.
    pub fn ends_statement(self) -> bool {
        matches!(self, RawToken::Newline)
    }
}
