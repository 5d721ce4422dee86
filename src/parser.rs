use crate::ast::{Payload, Tree};
use crate::engine::DataType;
use crate::error::ArborError;
use crate::lexer::{Lexer, Token};
use crate::token::{Category, TokenKind};
use crate::vars::VarSet;

/// Builds the syntax tree one token at a time.
///
/// The builder keeps a single "current" node, the one most recently
/// inserted; the growing tree is always reachable from it through parent
/// links. Each token is first classified against the current node's filled
/// operand slots, then either closes a parenthesis/function scope or is
/// inserted into the tree.
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    tree: Tree,
    vars: VarSet,
    current: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str, dtype: DataType) -> Self {
        Self {
            lexer: Lexer::new(src, dtype),
            tree: Tree::new(),
            vars: VarSet::new(),
            current: 0,
        }
    }

    /// True while the current node still has an empty operand slot, i.e.
    /// the next token must be value-like.
    fn operand_expected(&self) -> bool {
        let node = self.tree.node(self.current);
        self.tree.filled(self.current) < node.kind.arity()
    }

    pub(crate) fn parse(mut self) -> Result<(Tree, VarSet), ArborError> {
        loop {
            let operand_expected = self.operand_expected();
            let tok = match self.lexer.next_token(operand_expected)? {
                Some(tok) => tok,
                None => break,
            };

            if tok.kind == TokenKind::ParenRight {
                self.close_scope(&tok, operand_expected)?;
                continue;
            }

            self.classify(&tok, operand_expected)?;
            self.current = self.tree.insert(self.current, tok.kind, tok.value);
            if let Payload::Var(idx) = tok.value {
                self.vars.record(idx)?;
            }
        }
        self.finish()
    }

    /// Rejects a token that cannot appear in the current state: once the
    /// current node is saturated only an operator or a closing parenthesis
    /// may follow, and while an operand slot is open only value-like tokens
    /// may fill it.
    fn classify(&self, tok: &Token, operand_expected: bool) -> Result<(), ArborError> {
        let cat = tok.kind.category();
        if !operand_expected {
            let value_like = tok.kind == TokenKind::ParenLeft
                || matches!(cat, Category::UnaryOp | Category::Func | Category::Value);
            if value_like {
                return Err(ArborError::Token {
                    msg: "missing operator",
                    pos: tok.pos,
                });
            }
        } else if cat == Category::BinaryOp {
            return Err(ArborError::Token {
                msg: "missing value",
                pos: tok.pos,
            });
        }
        Ok(())
    }

    /// Handles a right parenthesis: finds the innermost open `(` or
    /// function among the ancestors, splices a `(` out of the tree, and
    /// re-anchors the current node on the surviving scope node.
    ///
    /// The diagnostics layer in a fixed order: a `)` that lands on an open
    /// operand slot is a missing value, a `)` whose current node is a bare
    /// `(` is an empty parenthesis, and a `)` with no enclosing scope is an
    /// unbalanced parenthesis, the later checks overriding the earlier.
    fn close_scope(&mut self, tok: &Token, operand_expected: bool) -> Result<(), ArborError> {
        let mut msg = operand_expected.then_some("missing value");
        if self.tree.node(self.current).kind == TokenKind::ParenLeft {
            msg = Some("empty parenthesis");
        } else {
            let mut at = self.tree.node(self.current).parent;
            while let Some(id) = at {
                let kind = self.tree.node(id).kind;
                if kind == TokenKind::ParenLeft || kind.category() == Category::Func {
                    break;
                }
                at = self.tree.node(id).parent;
            }
            match at {
                None => msg = Some("unbalanced parenthesis"),
                Some(id) => {
                    if msg.is_none() {
                        if self.tree.node(id).kind == TokenKind::ParenLeft {
                            self.tree.splice(id);
                        }
                        self.current = id;
                    }
                }
            }
        }
        match msg {
            Some(msg) => Err(ArborError::Token { msg, pos: tok.pos }),
            None => Ok(()),
        }
    }

    /// End-of-input checks. An operator left short of operands is an
    /// incomplete expression; an ancestor scope still open overrides that
    /// with the unclosed-parenthesis diagnostic, matching the walk from the
    /// current node upward.
    fn finish(mut self) -> Result<(Tree, VarSet), ArborError> {
        let mut msg = None;
        if self.operand_expected() {
            msg = Some("incomplete expression");
        }
        let mut at = self.tree.node(self.current).parent;
        while let Some(id) = at {
            let kind = self.tree.node(id).kind;
            if kind == TokenKind::ParenLeft || kind.category() == Category::Func {
                msg = Some("unclosed parenthesis");
                break;
            }
            at = self.tree.node(id).parent;
        }
        if let Some(msg) = msg {
            return Err(ArborError::Token {
                msg,
                pos: self.lexer.pos(),
            });
        }
        self.tree.finish(self.current);
        Ok((self.tree, self.vars))
    }
}
