use crate::ast::{Ast, NodeId};
use crate::stdlib;

use std::collections::{HashMap, HashSet};
use std::ops::Range;

pub mod error;
pub mod expression;
pub mod function;


pub use error::{CodegenFailure, SemanticError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub arity: usize,
    /// Where the function is declared; `None` for built-ins.
    pub span: Option<Range<usize>>,
}

/// State of one compilation run. A fresh `Compiler` starts with only the
/// built-ins registered.
pub struct Compiler<'t> {
    ast: &'t Ast,
    functions: HashMap<String, Signature>,
    variables: HashSet<String>,
    current_function: String,
    output: String,
    errors: Vec<SemanticError>,
}

impl<'t> Compiler<'t> {
    pub fn new(ast: &'t Ast) -> Self {
        let mut compiler = Compiler {
            ast,
            functions: HashMap::new(),
            variables: HashSet::new(),
            current_function: String::new(),
            output: String::from(stdlib::HEADER),
            errors: vec![],
        };

        stdlib::add_stdlib_to_env(&mut compiler);
        compiler
    }

    pub fn insert_builtin(&mut self, name: &str, arity: usize, definition: &str) {
        self.functions
            .insert(name.to_string(), Signature { arity, span: None });
        self.output.push('\n');
        self.output.push_str(definition);
    }

    pub fn get_function(&self, name: &str) -> Option<&Signature> {
        self.functions.get(name)
    }

    pub fn function_exists(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    /// Compiles every function in source order. Later functions are still
    /// checked after an earlier one failed, but the program is only handed
    /// out if all of them succeeded.
    pub fn compile(mut self) -> Result<String, CodegenFailure> {
        let ast = self.ast;
        let mut res = true;

        let functions = ast.root().map(|root| ast.children(root)).unwrap_or_default();
        if functions.is_empty() {
            self.errors.push(SemanticError::EmptyProgram);
            res = false;
        }
        for function in functions {
            res &= self.compile_function(*function);
        }

        if res {
            Ok(self.output)
        } else {
            Err(CodegenFailure {
                errors: self.errors,
                partial: self.output,
            })
        }
    }

    fn emit(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn text(&self, id: NodeId) -> &'t str {
        self.ast
            .token(id)
            .map(|token| token.text.as_str())
            .unwrap_or_default()
    }

    fn span(&self, id: NodeId) -> Range<usize> {
        self.ast
            .token(id)
            .map(|token| token.span.clone())
            .unwrap_or_default()
    }
}

pub fn compile(ast: &Ast) -> Result<String, CodegenFailure> {
    Compiler::new(ast).compile()
}
