use crate::ast::{NodeId, NodeKind};
use crate::codegen::{Compiler, SemanticError};
use crate::lexer::TokenKind;
use crate::stdlib::NUMBER_TYPE;

impl Compiler<'_> {
    /// `{ e1; e2; e3; }` becomes `(e1, e2, e3)`, which evaluates to `e3`.
    pub fn compile_body(&mut self, body: NodeId) -> bool {
        let ast = self.ast;
        let mut res = true;

        self.emit("(");
        for (i, expression) in ast.children_of_kind(body, NodeKind::Expression).enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            res &= self.compile_expression(expression);
        }
        self.emit(")");

        res
    }

    /// `a - b - c` becomes `(a - (b - c))`. The right-nested chain is
    /// walked in a loop.
    pub fn compile_expression(&mut self, expression: NodeId) -> bool {
        let ast = self.ast;
        let mut res = true;
        let mut open = 0;
        let mut current = expression;

        loop {
            match ast.children(current) {
                &[primary] => {
                    res &= self.compile_primary(primary);
                    break;
                }
                &[primary, operation] => {
                    let &[operator, rhs] = ast.children(operation) else {
                        unreachable!("binary operations are operator, expression")
                    };

                    self.emit("(");
                    res &= self.compile_primary(primary);
                    self.emit(&format!(" {} ", self.text(operator)));
                    open += 1;
                    current = rhs;
                }
                _ => unreachable!("expressions are a primary and an optional operation"),
            }
        }

        self.emit(&")".repeat(open));
        res
    }

    fn compile_primary(&mut self, primary: NodeId) -> bool {
        let ast = self.ast;

        match ast.kind(primary) {
            NodeKind::Body => self.compile_body(primary),
            NodeKind::Group => {
                let mut res = true;
                self.emit("(");
                for expression in ast.children_of_kind(primary, NodeKind::Expression) {
                    res &= self.compile_expression(expression);
                }
                self.emit(")");
                res
            }
            NodeKind::FunctionCall => self.compile_function_call(primary),
            NodeKind::ConditionalExpression => self.compile_conditional(primary),
            NodeKind::BasicValue => self.compile_value(primary),
            kind => unreachable!("{:?} is not a primary expression", kind),
        }
    }

    fn compile_value(&mut self, value: NodeId) -> bool {
        let text = self.text(value);

        if self.ast.node(value).is_token(TokenKind::Number) {
            self.emit(&format!("({}){}", NUMBER_TYPE, text));
            return true;
        }

        self.emit(text);
        if self.variables.contains(text) {
            return true;
        }

        self.errors.push(SemanticError::UndeclaredVariable {
            name: text.to_string(),
            span: self.span(value),
            function: self.current_function.clone(),
            is_function: self.function_exists(text),
        });
        false
    }

    /// Checks the callee and the argument count, then emits `name(a, b)`.
    fn compile_function_call(&mut self, call: NodeId) -> bool {
        let ast = self.ast;

        let Some(callee) = ast.children_of_kind(call, NodeKind::BasicValue).next() else {
            unreachable!("calls start with the callee name")
        };
        let arguments: Vec<NodeId> = ast
            .children_of_kind(call, NodeKind::Arguments)
            .flat_map(|arguments| ast.children_of_kind(arguments, NodeKind::Expression))
            .collect();

        let name = self.text(callee);
        let span = self.span(callee);
        let mut res = true;

        match self.get_function(name) {
            None => {
                let declared_later = self.declared_in_source(name);
                self.errors.push(SemanticError::UndeclaredFunction {
                    name: name.to_string(),
                    span,
                    declared_later,
                });
                res = false;
            }
            Some(signature) if signature.arity != arguments.len() => {
                let error = SemanticError::ArityMismatch {
                    name: name.to_string(),
                    span,
                    expected: signature.arity,
                    found: arguments.len(),
                    declaration: signature.span.clone(),
                };
                self.errors.push(error);
                res = false;
            }
            Some(_) => {}
        }

        self.emit(name);
        self.emit("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            res &= self.compile_expression(*argument);
        }
        self.emit(")");

        res
    }

    /// `if (c) { a; } { b; }` becomes `(c ? (a) : (b))`.
    fn compile_conditional(&mut self, conditional: NodeId) -> bool {
        let ast = self.ast;

        let Some(condition) = ast.children_of_kind(conditional, NodeKind::Condition).next() else {
            unreachable!("conditionals carry a condition")
        };
        let bodies: Vec<NodeId> = ast.children_of_kind(conditional, NodeKind::Body).collect();
        let &[then_body, else_body] = bodies.as_slice() else {
            unreachable!("conditionals carry two bodies")
        };

        self.emit("(");
        let mut res = self.compile_condition(condition);
        self.emit(" ? ");
        res &= self.compile_body(then_body);
        self.emit(" : ");
        res &= self.compile_body(else_body);
        self.emit(")");

        res
    }

    /// `!`? expression (`&&` | `||` expression)?
    fn compile_condition(&mut self, condition: NodeId) -> bool {
        let ast = self.ast;
        let mut res = true;

        for part in ast.children(condition) {
            match ast.kind(*part) {
                NodeKind::Terminal if ast.node(*part).is_token(TokenKind::Not) => self.emit("!"),
                NodeKind::Expression => res &= self.compile_expression(*part),
                NodeKind::LogicalOperator => {
                    let &[operator, rhs] = ast.children(*part) else {
                        unreachable!("logical operations are operator, expression")
                    };
                    self.emit(&format!(" {} ", self.text(operator)));
                    res &= self.compile_expression(rhs);
                }
                kind => unreachable!("{:?} cannot appear in a condition", kind),
            }
        }

        res
    }
}
