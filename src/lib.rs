pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod stdlib;

use crate::ast::Ast;
use crate::codegen::CodegenFailure;
use crate::lexer::LexError;
use crate::parser::{ParseError, Parser};

use ariadne::Report;

use std::fmt;
use std::ops::Range;

/// Failure of one pipeline stage. Each stage is terminal for the run.
#[derive(Debug)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Semantic(CodegenFailure),
}

impl CompileError {
    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::Lex(_) => "lexical analysis",
            CompileError::Parse(_) => "syntax analysis",
            CompileError::Semantic(_) => "semantic analysis",
        }
    }

    /// Process exit status for this failure; each stage gets its own.
    pub fn exit_code(&self) -> u8 {
        match self {
            CompileError::Lex(_) => 2,
            CompileError::Parse(_) => 3,
            CompileError::Semantic(_) => 4,
        }
    }

    pub fn reports(&self, file: &str) -> Vec<Report<'static, (String, Range<usize>)>> {
        match self {
            CompileError::Lex(error) => vec![error.report(file)],
            CompileError::Parse(error) => vec![error.report(file)],
            CompileError::Semantic(failure) => failure.reports(file),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(error) => write!(f, "{} failed: {}", self.stage(), error),
            CompileError::Parse(error) => write!(f, "{} failed: {}", self.stage(), error),
            CompileError::Semantic(failure) => write!(f, "{} failed: {}", self.stage(), failure),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Lex(error) => Some(error),
            CompileError::Parse(error) => Some(error),
            CompileError::Semantic(failure) => Some(failure),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(error: LexError) -> Self {
        CompileError::Lex(error)
    }
}

impl From<ParseError> for CompileError {
    fn from(error: ParseError) -> Self {
        CompileError::Parse(error)
    }
}

impl From<CodegenFailure> for CompileError {
    fn from(failure: CodegenFailure) -> Self {
        CompileError::Semantic(failure)
    }
}

/// Tokenizes and parses `source`.
pub fn parse_source(source: &str) -> Result<Ast, CompileError> {
    let tokens = lexer::tokenize(source)?;
    Ok(Parser::new(&tokens).parse_program()?)
}

/// Runs the whole pipeline and returns the generated C++ program.
pub fn compile_source(source: &str) -> Result<String, CompileError> {
    let ast = parse_source(source)?;
    Ok(codegen::compile(&ast)?)
}

/// Like [`compile_source`], for a file read as raw bytes.
pub fn compile_bytes(bytes: &[u8]) -> Result<String, CompileError> {
    compile_source(lexer::decode(bytes)?)
}
