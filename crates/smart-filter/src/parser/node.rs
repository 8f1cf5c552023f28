use std::fmt;

/// Boolean expression tree over raw, unparsed filter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl Node {
    pub fn leaf(value: &str) -> Self {
        Node::Leaf(value.to_string())
    }

    pub fn and(left: Node, right: Node) -> Self {
        Node::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::Or(Box::new(left), Box::new(right))
    }

    /// True when any leaf value satisfies `test`.
    pub fn any_leaf(&self, test: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Node::Leaf(v) => test(v),
            Node::And(l, r) | Node::Or(l, r) => l.any_leaf(test) || r.any_leaf(test),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(v) => write!(f, "{v}"),
            Node::And(l, r) => write!(f, "({l} && {r})"),
            Node::Or(l, r) => write!(f, "({l} || {r})"),
        }
    }
}
