use crate::ast::{NodeId, NodeKind};
use crate::codegen::{Compiler, SemanticError, Signature};
use crate::stdlib::NUMBER_TYPE;

impl Compiler<'_> {
    /// Registers the function, then its parameters, then emits
    ///
    /// ```text
    /// number name(number a, number b) {
    ///     return <body>;
    /// }
    /// ```
    ///
    /// `main` returns `int` and yields `0` after its body.
    pub fn compile_function(&mut self, function: NodeId) -> bool {
        let ast = self.ast;
        let errors_before = self.errors.len();

        let &[name, params, body] = ast.children(function) else {
            unreachable!("function nodes are name, params, body")
        };

        let name_text = self.text(name);
        let params: Vec<NodeId> = ast.children_of_kind(params, NodeKind::BasicValue).collect();

        self.variables.clear();
        self.current_function = name_text.to_string();

        // registered before the body so the function can call itself
        self.declare_function(name, params.len());

        let is_main = name_text == "main";
        if is_main {
            self.emit("\nint main(");
        } else {
            self.emit(&format!("\n{} {}(", NUMBER_TYPE, name_text));
        }

        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.declare_variable(*param);
            self.emit(&format!("{} {}", NUMBER_TYPE, self.text(*param)));
        }
        self.emit(") {\n    return ");

        if is_main {
            self.emit("(");
            self.compile_body(body);
            self.emit(", 0)");
        } else {
            self.compile_body(body);
        }
        self.emit(";\n}\n");

        self.variables.clear();
        self.errors.len() == errors_before
    }

    fn declare_function(&mut self, name: NodeId, arity: usize) {
        let text = self.text(name);
        let span = self.span(name);

        if text == NUMBER_TYPE {
            self.errors.push(SemanticError::ReservedName {
                name: text.to_string(),
                span,
            });
            return;
        }

        if let Some(previous) = self.get_function(text) {
            let previous = previous.span.clone();
            self.errors.push(SemanticError::DuplicateFunction {
                name: text.to_string(),
                span,
                previous,
            });
            return;
        }

        self.functions.insert(
            text.to_string(),
            Signature {
                arity,
                span: Some(span),
            },
        );
    }

    fn declare_variable(&mut self, param: NodeId) {
        let text = self.text(param);
        let span = self.span(param);

        if text == NUMBER_TYPE {
            self.errors.push(SemanticError::ReservedName {
                name: text.to_string(),
                span,
            });
        } else if self.variables.contains(text) {
            self.errors.push(SemanticError::DuplicateParameter {
                name: text.to_string(),
                span,
                function: self.current_function.clone(),
            });
        } else if self.function_exists(text) {
            self.errors.push(SemanticError::NameClash {
                name: text.to_string(),
                span,
            });
        }

        self.variables.insert(text.to_string());
    }

    /// Whether a function called `name` appears anywhere in the program.
    pub(crate) fn declared_in_source(&self, name: &str) -> bool {
        let ast = self.ast;
        let Some(root) = ast.root() else {
            return false;
        };

        ast.children(root).iter().any(|function| {
            ast.children(*function)
                .first()
                .is_some_and(|name_node| self.text(*name_node) == name)
        })
    }
}
