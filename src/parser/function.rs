use crate::ast::{NodeId, NodeKind};
use crate::parser::{Parser, Rule};

impl<'a> Parser<'a> {
    /// function := identifier params body
    pub fn parse_function(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 3] = [Self::identifier, Self::parse_params, Self::parse_body];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::Function, children))
    }

    /// params := '(' (identifier (',' identifier)*)? ')' | identifier*
    pub fn parse_params(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 2] = [Self::parse_parenthesized_params, Self::parse_bare_params];
        self.alternative(&rules)
    }

    fn parse_parenthesized_params(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 3] = [Self::lparen, Self::parse_param_list, Self::rparen];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::Params, children))
    }

    fn parse_param_list(&mut self) -> Option<NodeId> {
        let children = self.separated(Self::identifier, Self::comma);
        Some(self.node(NodeKind::Generic, children))
    }

    fn parse_bare_params(&mut self) -> Option<NodeId> {
        let children = self.repeat(Self::identifier);
        Some(self.node(NodeKind::Params, children))
    }

    /// body := '{' body_inner '}'
    pub fn parse_body(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 3] = [Self::lbrace, Self::parse_body_inner, Self::rbrace];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::Body, children))
    }

    /// body_inner := (expression ';')+
    fn parse_body_inner(&mut self) -> Option<NodeId> {
        let children = self.repeat(Self::parse_statement);
        if children.is_empty() {
            return None;
        }
        Some(self.node(NodeKind::Generic, children))
    }

    fn parse_statement(&mut self) -> Option<NodeId> {
        let rules: [Rule<'a>; 2] = [Self::parse_expression, Self::semicolon];
        let children = self.sequence(&rules)?;
        Some(self.node(NodeKind::Generic, children))
    }
}
