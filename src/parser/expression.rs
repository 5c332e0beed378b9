use crate::ast::{NodeId, NodeKind};
use crate::parser::{Parser, Rule};

impl<'a> Parser<'a> {
    /// expression := primary binary_operation?
    ///
    /// The right-hand side of a binary operation is a whole expression, so
    /// every operator associates to the right: `a - b - c` is `a - (b - c)`.
    /// The chain is read in a loop and nested afterwards, so long chains do
    /// not grow the stack.
    pub fn parse_expression(&mut self) -> Option<NodeId> {
        let first = self.parse_primary()?;
        let mut links = vec![];

        loop {
            let checkpoint = self.checkpoint();
            let Some(operator) = self.parse_binary_operator() else {
                break;
            };
            let Some(operand) = self.parse_primary() else {
                self.restore(checkpoint);
                break;
            };
            links.push((operator, operand));
        }

        // innermost first: `c`, then `b (- c)`, then `a (- (b (- c)))`
        let mut operands = vec![first];
        operands.extend(links.iter().map(|(_, operand)| *operand));
        let mut expression = None;
        for (i, operand) in operands.into_iter().enumerate().rev() {
            let mut children = vec![operand];
            if let Some(rhs) = expression {
                let (operator, _) = links[i];
                children.push(self.node(NodeKind::BinaryOperator, vec![operator, rhs]));
            }
            expression = Some(self.node(NodeKind::Expression, children));
        }
        expression
    }

    /// primary := body | group | function_call | conditional_expression
    ///          | numeric-literal | identifier
    fn parse_primary(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 6] = [
            Self::parse_body,
            Self::parse_group,
            Self::parse_function_call,
            Self::parse_conditional_expression,
            Self::number,
            Self::identifier,
        ];
        self.alternative(&rules)
    }

    /// group := '(' expression ')'
    fn parse_group(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 3] = [Self::lparen, Self::parse_expression, Self::rparen];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::Group, children))
    }

    /// function_call := identifier '(' params_call ')'
    fn parse_function_call(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 4] = [
            Self::identifier,
            Self::lparen,
            Self::parse_params_call,
            Self::rparen,
        ];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::FunctionCall, children))
    }

    /// params_call := (expression (',' expression)*)?
    ///
    /// Kept flat: expression, comma, expression, ...
    fn parse_params_call(&mut self) -> Option<NodeId> {
        let children = self.separated(Self::parse_expression, Self::comma);
        Some(self.node(NodeKind::Arguments, children))
    }

    /// binary_operator := '*' | '/' | '+' | '-' | '%' | '==' | '!=' | '<' | '>'
    fn parse_binary_operator(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 9] = [
            Self::times,
            Self::slash,
            Self::plus,
            Self::minus,
            Self::percent,
            Self::eql,
            Self::neq,
            Self::lss,
            Self::gtr,
        ];
        self.alternative(&rules)
    }

    /// conditional_expression := 'if' '(' condition ')' body body
    fn parse_conditional_expression(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 6] = [
            Self::if_keyword,
            Self::lparen,
            Self::parse_condition,
            Self::rparen,
            Self::parse_body,
            Self::parse_body,
        ];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::ConditionalExpression, children))
    }

    /// condition := '!'? expression logical_operation?
    fn parse_condition(&mut self) -> Option<NodeId> {
        let checkpoint = self.checkpoint();
        let mut children = vec![];

        if let Some(not) = self.not() {
            children.push(not);
        }

        let Some(expression) = self.parse_expression() else {
            self.restore(checkpoint);
            return None;
        };
        children.push(expression);

        if let Some(operation) = self.parse_logical_operation() {
            children.push(operation);
        }

        Some(self.node(NodeKind::Condition, children))
    }

    /// logical_operation := ('&&' | '||') expression
    fn parse_logical_operation(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 2] = [Self::parse_logical_operator, Self::parse_expression];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::LogicalOperator, children))
    }

    fn parse_logical_operator(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 2] = [Self::and, Self::or];
        self.alternative(&rules)
    }
}
