pub mod expression;
pub mod function;

#[cfg(test)]
pub mod test;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::lexer::{Token, TokenKind};

use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind};

use std::fmt;
use std::ops::Range;

/// A grammar rule: succeeds with the id of the node it built, or fails
/// leaving the cursor where it found it.
pub type Rule<'a> = fn(&mut Parser<'a>) -> Option<NodeId>;

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    pos: usize,
    nodes: usize,
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    ast: Ast,
    furthest: usize,
    expected: Vec<TokenKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub span: Range<usize>,
    pub found: Option<Token>,
    pub expected: Vec<TokenKind>,
}

impl ParseError {
    fn expected_list(&self) -> String {
        self.expected
            .iter()
            .map(|kind| format!("`{}`", kind.describe()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        let found = match &self.found {
            Some(token) => format!("found `{}`", Fmt::fg(&token.text, Color::Red)),
            None => "reached end of file".to_string(),
        };

        Report::build(ReportKind::Error, (file.to_string(), self.span.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_code("Syntax Error")
            .with_message(format!("unexpected input while parsing: {}", found))
            .with_label(
                Label::new((file.to_string(), self.span.clone()))
                    .with_message(format!("expected one of {}", self.expected_list()))
                    .with_color(Color::Red),
            )
            .with_note(function_syntax())
            .finish()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(token) => write!(
                f,
                "syntax error at `{}` (offset {}), expected one of {}",
                token.text,
                token.span.start,
                self.expected_list()
            ),
            None => write!(
                f,
                "syntax error at end of file, expected one of {}",
                self.expected_list()
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub fn function_syntax() -> String {
    format!(
        "a program is one or more functions: {}({}, {}) {{ expression; expression; }}",
        Fmt::fg("name", Color::Yellow),
        Fmt::fg("arg1", Color::Rgb(150, 200, 100)),
        Fmt::fg("arg2", Color::Rgb(150, 200, 100)),
    )
}

macro_rules! terminals {
    ($($rule:ident => $kind:ident),* $(,)?) => {
        impl<'a> Parser<'a> {
            $(
                pub(crate) fn $rule(&mut self) -> Option<NodeId> {
                    self.terminal(TokenKind::$kind)
                }
            )*
        }
    };
}

terminals! {
    lparen => LParen,
    rparen => RParen,
    lbrace => LBrace,
    rbrace => RBrace,
    times => Mul,
    slash => Div,
    plus => Plus,
    minus => Minus,
    percent => Mod,
    and => And,
    or => Or,
    eql => Eq,
    neq => NotEq,
    lss => Less,
    gtr => Greater,
    semicolon => Semicolon,
    comma => Comma,
    not => Not,
    if_keyword => KeywordIf,
    identifier => Identifier,
    number => Number,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            ast: Ast::new(),
            furthest: 0,
            expected: vec![],
        }
    }

    /// program := function+
    ///
    /// Every token has to be consumed.
    pub fn parse_program(mut self) -> Result<Ast, ParseError> {
        let mut functions = vec![];
        while !self.at_end() {
            match self.parse_function() {
                Some(function) => functions.push(function),
                None => break,
            }
        }

        if functions.is_empty() || !self.at_end() {
            return Err(self.error());
        }

        let root = self.ast.push(NodeKind::Program, functions, None);
        self.ast.set_root(root);
        Ok(self.ast)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            nodes: self.ast.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.ast.truncate(checkpoint.nodes);
    }

    fn expect(&mut self, kind: TokenKind) {
        if self.pos > self.furthest {
            self.furthest = self.pos;
            self.expected.clear();
        }
        if self.pos == self.furthest && !self.expected.contains(&kind) {
            self.expected.push(kind);
        }
    }

    fn error(&self) -> ParseError {
        let at = self.furthest.max(self.pos);
        let mut expected = self.expected.clone();
        if self.tokens.is_empty() {
            expected = vec![TokenKind::Identifier];
        }

        match self.tokens.get(at) {
            Some(token) => ParseError {
                span: token.span.clone(),
                found: Some(token.clone()),
                expected,
            },
            None => {
                let end = self.tokens.last().map(|token| token.span.end).unwrap_or(0);
                ParseError {
                    span: end..end,
                    found: None,
                    expected,
                }
            }
        }
    }

    pub(crate) fn node(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        self.ast.push(kind, children, None)
    }

    /// Appends `child` to `children`, or its own children when it is a
    /// `Generic` list. A spliced list is always the newest node, so it is
    /// dropped from the arena.
    fn splice(&mut self, child: NodeId, children: &mut Vec<NodeId>) {
        if self.ast.kind(child) != NodeKind::Generic {
            children.push(child);
            return;
        }
        children.extend_from_slice(self.ast.children(child));
        if child.0 + 1 == self.ast.len() {
            self.ast.truncate(child.0);
        }
    }

    /// Consumes one token iff it has the expected kind.
    pub(crate) fn terminal(&mut self, kind: TokenKind) -> Option<NodeId> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == kind => {
                let node_kind = match kind {
                    TokenKind::Identifier | TokenKind::Number => NodeKind::BasicValue,
                    _ => NodeKind::Terminal,
                };
                self.pos += 1;
                Some(self.ast.push(node_kind, vec![], Some(token.clone())))
            }
            _ => {
                self.expect(kind);
                None
            }
        }
    }

    /// All-of: runs every rule in order and collects their nodes. `Generic`
    /// results are spliced in place. On any failure the cursor and the arena
    /// go back to where they were.
    pub(crate) fn sequence(&mut self, rules: &[Rule<'a>]) -> Option<Vec<NodeId>> {
        let checkpoint = self.checkpoint();
        let mut children = vec![];

        for rule in rules {
            let Some(child) = rule(self) else {
                self.restore(checkpoint);
                return None;
            };
            self.splice(child, &mut children);
        }

        Some(children)
    }

    /// First-of: the first rule that succeeds wins.
    pub(crate) fn alternative(&mut self, rules: &[Rule<'a>]) -> Option<NodeId> {
        rules.iter().find_map(|rule| rule(self))
    }

    /// Zero or more `rule`s, flattening `Generic` results.
    pub(crate) fn repeat(&mut self, rule: Rule<'a>) -> Vec<NodeId> {
        let mut children = vec![];
        while let Some(child) = rule(self) {
            self.splice(child, &mut children);
        }
        children
    }

    /// `(rule (separator rule)*)?` with the separators kept as children. A
    /// dangling separator is left unconsumed.
    pub(crate) fn separated(&mut self, rule: Rule<'a>, separator: Rule<'a>) -> Vec<NodeId> {
        let mut children = vec![];
        let Some(first) = rule(self) else {
            return children;
        };
        children.push(first);

        loop {
            let checkpoint = self.checkpoint();
            let Some(sep) = separator(self) else {
                break;
            };
            let Some(next) = rule(self) else {
                self.restore(checkpoint);
                break;
            };
            children.push(sep);
            children.push(next);
        }

        children
    }
}
