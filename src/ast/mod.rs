use crate::lexer::{Token, TokenKind};

/// Index of a node inside its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Generic, // list produced by a repetition, spliced into its parent
    Program,
    Function,
    Params,
    Body,
    Expression,
    Group,
    FunctionCall,
    Arguments,
    ConditionalExpression,
    Condition,
    BinaryOperator,
    LogicalOperator,
    BasicValue,
    Terminal,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
    pub token: Option<Token>,
}

impl Node {
    pub fn is_token(&self, kind: TokenKind) -> bool {
        matches!(&self.token, Some(token) if token.kind == kind)
    }
}

/// Arena holding every node of one parse. Children are always allocated
/// before their parent. Only the parser builds one.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub(crate) fn new() -> Self {
        Ast {
            nodes: vec![],
            root: None,
        }
    }

    pub(crate) fn push(&mut self, kind: NodeKind, children: Vec<NodeId>, token: Option<Token>) -> NodeId {
        self.nodes.push(Node {
            kind,
            children,
            token,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node allocated after the arena had `len` nodes.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn token(&self, id: NodeId) -> Option<&Token> {
        self.node(id).token.as_ref()
    }

    /// Children of `id` that have the given kind, in order.
    pub fn children_of_kind(&self, id: NodeId, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.kind(*child) == kind)
    }

    /// Indented, one-node-per-line rendering of the tree below the root.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(NodeId, usize)> = self.root.into_iter().map(|root| (root, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            out.push_str(&"  ".repeat(depth));
            match &node.token {
                Some(token) => out.push_str(&format!("{:?} `{}`\n", node.kind, token.text)),
                None => out.push_str(&format!("{:?}\n", node.kind)),
            }
            stack.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
        }

        out
    }
}
