use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind};
use logos::Logos;

use std::fmt;
use std::ops::Range;


#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\n\r\f\x0B]+")] // isspace
pub enum TokenKind {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("%")]
    Mod,

    #[token("&&")]
    And,

    #[token("||")]
    Or,

    #[token("==")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("!")]
    Not,

    #[token("if")]
    KeywordIf,

    // Never starts with `if`: a word such as `iffy` lexes as `if` then `fy`.
    #[regex(r"[a-hj-zA-Z][a-zA-Z]*|i([a-eg-zA-Z][a-zA-Z]*)?")]
    Identifier,

    #[regex(r"[0-9]+")]
    Number,
}

impl TokenKind {
    /// Literal text of a fixed symbol, or the name of the lexical class.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Mod => "%",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Not => "!",
            TokenKind::KeywordIf => "if",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub span: Range<usize>,
    pub found: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognised character sequence `{}` at offset {}",
            self.found, self.span.start
        )
    }
}

impl std::error::Error for LexError {}

impl LexError {
    pub fn report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        Report::build(ReportKind::Error, (file.to_string(), self.span.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_code("Lexical Error")
            .with_message(format!(
                "unrecognised character sequence `{}`",
                Fmt::fg(&self.found, Color::Red)
            ))
            .with_label(
                Label::new((file.to_string(), self.span.clone()))
                    .with_message("no token starts here")
                    .with_color(Color::Red),
            )
            .with_note(
                "tokens are the symbols ( ) { } * / + - % && || == != < > ; , !, \
                 the keyword `if`, identifiers made of letters and numbers made of digits",
            )
            .finish()
    }
}

/// Decodes raw source bytes. Bytes that are not UTF-8 cannot start any token,
/// so they fail the same way a stray character does.
pub fn decode(bytes: &[u8]) -> Result<&str, LexError> {
    std::str::from_utf8(bytes).map_err(|error| {
        let start = error.valid_up_to();
        let end = start + error.error_len().unwrap_or(bytes.len() - start);
        LexError {
            found: bytes[start..end]
                .iter()
                .map(|byte| format!("\\x{:02X}", byte))
                .collect(),
            span: start..end,
        }
    })
}

/// `bytes` with every invalid UTF-8 byte replaced by `?`, so byte offsets
/// still line up with the file when a report is printed.
pub fn printable(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        text.extend(chunk.invalid().iter().map(|_| '?'));
    }
    text
}

/// Splits `source` into tokens. The first unrecognised character aborts the
/// whole run.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = vec![];

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        match kind {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice().to_string(),
                span,
            }),
            Err(()) => {
                return Err(LexError {
                    found: lexer.slice().to_string(),
                    span,
                });
            }
        }
    }

    Ok(tokens)
}
