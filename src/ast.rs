use crate::token::{Category, TokenKind};

pub(crate) type NodeId = usize;

/// Payload of a tree node. `Num` nodes hold a literal in the arithmetic
/// type the tree was built with; `Var` nodes hold the zero-based variable
/// index; operator nodes hold nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Payload {
    None,
    Long(i64),
    Double(f64),
    Var(i64),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) kind: TokenKind,
    pub(crate) value: Payload,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

/// Arena-backed binary tree. Nodes link to each other by index; the parent
/// link is a back-reference used for the precedence climb during insertion.
/// Splicing a parenthesis leaves its old child slot orphaned in the arena,
/// so traversals must start from `root` rather than sweep the backing
/// vector.
#[derive(Clone, Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// A tree holding only the placeholder root.
    pub(crate) fn new() -> Self {
        Tree {
            nodes: vec![Node {
                kind: TokenKind::Undef,
                value: Payload::None,
                parent: None,
                left: None,
                right: None,
            }],
            root: 0,
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    /// Number of filled child slots of `id`.
    pub(crate) fn filled(&self, id: NodeId) -> u8 {
        let node = &self.nodes[id];
        node.left.is_some() as u8 + node.right.is_some() as u8
    }

    /// Follows parent links from `id` up to the root.
    pub(crate) fn top(&self, mut id: NodeId) -> NodeId {
        while let Some(p) = self.nodes[id].parent {
            id = p;
        }
        id
    }

    /// Re-anchors `root` from an arbitrary node of the finished tree.
    pub(crate) fn finish(&mut self, id: NodeId) {
        self.root = self.top(id);
    }

    fn push(&mut self, kind: TokenKind, value: Payload) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            value,
            parent: None,
            left: None,
            right: None,
        });
        id
    }

    /// Inserts a token into the tree relative to the current node and
    /// returns the id of the inserted node.
    ///
    /// The first token replaces the placeholder root in place. A binary
    /// operator climbs the parent chain past every ancestor of equal or
    /// higher precedence (operators are left-associative), stopping at an
    /// open parenthesis or a function scope, and grafts itself above the
    /// stopping node. Anything else becomes a child of the current node:
    /// left slot first, then right.
    pub(crate) fn insert(&mut self, current: NodeId, kind: TokenKind, value: Payload) -> NodeId {
        if self.nodes[current].kind == TokenKind::Undef {
            self.nodes[current].kind = kind;
            self.nodes[current].value = value;
            return current;
        }

        let id = self.push(kind, value);
        if kind.category() == Category::BinaryOp {
            let mut at = current;
            while let Some(p) = self.nodes[at].parent {
                let parent = &self.nodes[p];
                if parent.kind == TokenKind::ParenLeft
                    || parent.kind.category() == Category::Func
                    || parent.kind.precedence() < kind.precedence()
                {
                    break;
                }
                at = p;
            }
            let grand = self.nodes[at].parent;
            self.nodes[id].left = Some(at);
            self.nodes[id].parent = grand;
            self.nodes[at].parent = Some(id);
            if let Some(g) = grand {
                if self.nodes[g].left == Some(at) {
                    self.nodes[g].left = Some(id);
                } else {
                    self.nodes[g].right = Some(id);
                }
            }
        } else {
            if self.nodes[current].left.is_none() {
                self.nodes[current].left = Some(id);
            } else {
                self.nodes[current].right = Some(id);
            }
            self.nodes[id].parent = Some(current);
        }
        id
    }

    /// Removes a matched `(` from the tree by overwriting it with its single
    /// child and adopting the child's children. The paren node id survives,
    /// so the caller can keep using it as the current node.
    pub(crate) fn splice(&mut self, paren: NodeId) {
        let Some(child) = self.nodes[paren].left else {
            return;
        };
        let Node {
            kind,
            value,
            left,
            right,
            ..
        } = self.nodes[child].clone();
        let node = &mut self.nodes[paren];
        node.kind = kind;
        node.value = value;
        node.left = left;
        node.right = right;
        for adopted in [left, right].into_iter().flatten() {
            self.nodes[adopted].parent = Some(paren);
        }
        // The old child slot stays in the arena, unreachable from the root.
        self.nodes[child].parent = None;
        self.nodes[child].left = None;
        self.nodes[child].right = None;
    }
}
