use std::fmt;

use crate::ast::{NodeId, Payload, Tree};
use crate::lexer::{VAR_END, VAR_FLAG, VAR_START};
use crate::token::TokenKind;

/// Renders a finished tree as an indented branch diagram, one node per
/// line:
///
/// ```text
/// *
/// |-- +
/// |   |-- 2
/// |   `-- 3
/// `-- 4
/// ```
///
/// Numbers print in the tree's arithmetic type and variables in their
/// written form (`$2`, `${12}`). A node with a single child draws it as the
/// last branch.
pub struct TreeDisplay<'a> {
    tree: &'a Tree,
}

impl<'a> TreeDisplay<'a> {
    pub(crate) fn new(tree: &'a Tree) -> Self {
        TreeDisplay { tree }
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        prefix: &str,
        branch: Option<bool>,
    ) -> fmt::Result {
        match branch {
            None => {
                self.fmt_label(f, id)?;
                f.write_str("\n")?;
            }
            Some(last) => {
                write!(f, "{prefix}{} ", if last { "`--" } else { "|--" })?;
                self.fmt_label(f, id)?;
                f.write_str("\n")?;
            }
        }

        let below = match branch {
            None => String::new(),
            Some(last) => format!("{prefix}{}", if last { "    " } else { "|   " }),
        };
        let node = self.tree.node(id);
        match (node.left, node.right) {
            (Some(left), Some(right)) => {
                self.fmt_node(f, left, &below, Some(false))?;
                self.fmt_node(f, right, &below, Some(true))
            }
            (Some(left), None) => self.fmt_node(f, left, &below, Some(true)),
            _ => Ok(()),
        }
    }

    fn fmt_label(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = self.tree.node(id);
        match (node.kind, node.value) {
            (TokenKind::Num, Payload::Long(v)) => write!(f, "{v}"),
            (TokenKind::Num, Payload::Double(v)) => write!(f, "{v}"),
            (TokenKind::Var, Payload::Var(idx)) => {
                let written = idx + 1;
                if written <= 9 {
                    write!(f, "{VAR_FLAG}{written}")
                } else {
                    write!(f, "{VAR_FLAG}{VAR_START}{written}{VAR_END}")
                }
            }
            (kind, _) => f.write_str(kind.symbol()),
        }
    }
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.tree.root(), "", None)
    }
}
