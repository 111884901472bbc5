//! Concrete parse tree produced by the parser.
//!
//! Internal nodes are labelled with the name of a grammar production and
//! leaves with the kind of the token they matched. Children are owned by
//! their parent, so dropping a node releases its whole subtree.

use crate::frontend::Token;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTreeNode {
    id: usize,
    parent_id: Option<usize>,
    label: String,
    /// The matched token for terminal nodes.
    token: Option<Token>,
    children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    pub fn new(id: usize, label: &str) -> Self {
        ParseTreeNode {
            id,
            parent_id: None,
            label: label.to_string(),
            token: None,
            children: vec![],
        }
    }
    pub fn terminal(id: usize, label: &str, token: Token) -> Self {
        ParseTreeNode {
            token: Some(token),
            ..ParseTreeNode::new(id, label)
        }
    }
    pub fn id(&self) -> usize {
        self.id
    }
    pub fn parent_id(&self) -> Option<usize> {
        self.parent_id
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }
    pub fn children(&self) -> &[ParseTreeNode] {
        &self.children
    }
    pub fn child(&self, index: usize) -> Option<&ParseTreeNode> {
        self.children.get(index)
    }
    pub fn is_terminal(&self) -> bool {
        self.token.is_some()
    }
    /// Append `child` and take ownership of it.
    pub fn attach(&mut self, child: ParseTreeNode) {
        let mut child = child;
        child.parent_id = Some(self.id);
        self.children.push(child);
    }
    /// Drop this node and everything below it.
    ///
    /// Returns the number of nodes that were released.
    pub fn release(self) -> usize {
        self.node_count()
    }
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }
    /// Labels of the direct children, handy for checking the shape of a node.
    pub fn child_labels(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.label()).collect()
    }
    fn preorder<'a>(&'a self, nodes: &mut Vec<&'a ParseTreeNode>) {
        nodes.push(self);
        for child in &self.children {
            child.preorder(nodes);
        }
    }
    fn write_parenthesized(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        out.push_str(&format!("{indent}({}", self.label));
        if self.children.is_empty() {
            out.push_str(")\n");
        } else {
            out.push('\n');
            for child in &self.children {
                child.write_parenthesized(depth + 1, out);
            }
            out.push_str(&format!("{indent})\n"));
        }
    }
}

/// One row of the flat pre-order listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatNode {
    pub id: usize,
    pub parent_id: Option<usize>,
    pub label: String,
}

impl Display for FlatNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parent = self
            .parent_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        write!(f, "{},{},{}", self.id, parent, self.label)
    }
}

/// A parse tree for a complete program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTree {
    root: ParseTreeNode,
}

impl ParseTree {
    pub fn new(root: ParseTreeNode) -> Self {
        ParseTree { root }
    }
    pub fn root(&self) -> &ParseTreeNode {
        &self.root
    }
    pub fn into_root(self) -> ParseTreeNode {
        self.root
    }
    pub fn release(self) -> usize {
        self.root.release()
    }
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
    pub fn nodes(&self) -> Vec<&ParseTreeNode> {
        let mut nodes = vec![];
        self.root.preorder(&mut nodes);
        nodes
    }
    /// `(id, parent_id, label)` for every node in pre-order.
    pub fn flat(&self) -> Vec<FlatNode> {
        self.nodes()
            .iter()
            .map(|node| FlatNode {
                id: node.id,
                parent_id: node.parent_id,
                label: node.label.clone(),
            })
            .collect()
    }
    /// Terminal nodes in pre-order, which is the order in which their tokens
    /// were consumed.
    pub fn terminals(&self) -> Vec<&Token> {
        self.nodes()
            .iter()
            .filter_map(|node| node.token.as_ref())
            .collect()
    }
    pub fn terminal_lexemes(&self) -> Vec<&str> {
        self.terminals()
            .iter()
            .map(|token| token.lexeme.as_str())
            .collect()
    }
    /// Flat listing without header, one `id,parent,label` line per node.
    pub fn to_listing(&self) -> String {
        let mut out = String::new();
        for row in self.flat() {
            out.push_str(&format!("{row}\n"));
        }
        out
    }
    pub fn to_csv(&self) -> String {
        format!("NodeID,ParentID,Value\n{}", self.to_listing())
    }
    pub fn to_parenthesized(&self) -> String {
        let mut out = String::new();
        self.root.write_parenthesized(0, &mut out);
        out
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_parenthesized())
    }
}
