use std::fmt;
use std::io;

use log::debug;

use crate::ast::Tree;
use crate::dump::TreeDisplay;
use crate::error::ArborError;
use crate::eval;
use crate::parser::Parser;
use crate::vars::VarSet;

/// Arithmetic mode of a tree, chosen at build time.
///
/// The mode decides how number literals are parsed, which evaluator runs,
/// and which eval entry point is valid for the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// Signed 64-bit integer arithmetic.
    Long,
    /// IEEE-754 double arithmetic.
    Double,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataType::Long => "LONG",
            DataType::Double => "DOUBLE",
        })
    }
}

/// A parse-and-evaluate handle.
///
/// A handle is built at most once. After a successful [`build`] it owns the
/// syntax tree and the set of distinct variable indices the expression
/// references, and can be evaluated any number of times against value
/// slices.
///
/// The first error raised by any operation is recorded on the handle and is
/// sticky: every later operation returns a copy of it without doing any
/// work. [`write_error`] renders the recorded error, with a caret marking
/// the offending character for tokenization failures.
///
/// A handle is single-threaded; separate handles are fully independent.
///
/// [`build`]: Arbor::build
/// [`write_error`]: Arbor::write_error
///
/// # Examples
///
/// ```
/// use arbor::{Arbor, DataType};
///
/// let mut ast = Arbor::new();
/// ast.build("$1 + 2*$2", DataType::Double).unwrap();
/// assert_eq!(ast.eval_double(&[1.0, 3.0]).unwrap(), 7.0);
/// ```
#[derive(Debug, Default)]
pub struct Arbor {
    dtype: Option<DataType>,
    tree: Option<Tree>,
    vars: VarSet,
    expr: Option<String>,
    error: Option<ArborError>,
}

impl Arbor {
    /// Creates an empty handle with no tree and a clear error state.
    pub fn new() -> Self {
        Arbor::default()
    }

    fn check_sticky(&self) -> Result<(), ArborError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn fail<T>(&mut self, e: ArborError) -> Result<T, ArborError> {
        self.error = Some(e.clone());
        Err(e)
    }

    /// Parses `expr` into a syntax tree in the given arithmetic mode.
    ///
    /// Fails with [`ArborError::AlreadyBuilt`] if the handle already owns a
    /// tree, with [`ArborError::InvalidString`] if `expr` is empty or
    /// whitespace-only, and with [`ArborError::Token`] on any tokenization
    /// or structure error. On success the handle records every distinct
    /// variable index the expression references.
    pub fn build(&mut self, expr: &str, dtype: DataType) -> Result<(), ArborError> {
        self.check_sticky()?;
        if self.tree.is_some() {
            return self.fail(ArborError::AlreadyBuilt);
        }
        self.expr = Some(expr.to_owned());
        if expr.trim_start().is_empty() {
            return self.fail(ArborError::InvalidString);
        }
        match Parser::new(expr, dtype).parse() {
            Ok((tree, vars)) => {
                debug!(
                    "built {dtype} tree for {expr:?}: {} distinct variables",
                    vars.len()
                );
                self.dtype = Some(dtype);
                self.tree = Some(tree);
                self.vars = vars;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn check_eval(&mut self, requested: DataType, got: usize) -> Result<(), ArborError> {
        self.check_sticky()?;
        let built = match self.dtype {
            Some(d) => d,
            None => return self.fail(ArborError::NotBuilt),
        };
        if built != requested {
            return self.fail(ArborError::DataType { built, requested });
        }
        if let Some(max) = self.vars.max() {
            if got as i64 <= max {
                return self.fail(ArborError::ValuesLen {
                    expected: max as usize + 1,
                    got,
                });
            }
        }
        Ok(())
    }

    /// Evaluates a double-mode tree against `values`, where `values[i]`
    /// supplies the variable written `$i+1`.
    ///
    /// Fails with [`ArborError::ValuesLen`] when `values` does not cover
    /// the largest referenced index, and with [`ArborError::DataType`] on a
    /// long-mode handle.
    pub fn eval_double(&mut self, values: &[f64]) -> Result<f64, ArborError> {
        self.check_eval(DataType::Double, values.len())?;
        let mut err = false;
        let v = match &self.tree {
            Some(tree) => eval::eval_double(tree, tree.root(), values, &mut err),
            None => return self.fail(ArborError::NotBuilt),
        };
        if err {
            return self.fail(ArborError::Eval);
        }
        Ok(v)
    }

    /// Evaluates a long-mode tree against `values`.
    ///
    /// Division by zero inside the expression is not guarded and panics;
    /// see the crate documentation.
    pub fn eval_long(&mut self, values: &[i64]) -> Result<i64, ArborError> {
        self.check_eval(DataType::Long, values.len())?;
        let mut err = false;
        let v = match &self.tree {
            Some(tree) => eval::eval_long(tree, tree.root(), values, &mut err),
            None => return self.fail(ArborError::NotBuilt),
        };
        if err {
            return self.fail(ArborError::Eval);
        }
        Ok(v)
    }

    /// Arithmetic mode of the built tree, or `None` before a build.
    pub fn data_type(&self) -> Option<DataType> {
        self.dtype
    }

    /// Distinct zero-based variable indices referenced by the expression,
    /// in ascending order.
    pub fn var_indices(&self) -> &[i64] {
        self.vars.indices()
    }

    /// Number of distinct variables referenced by the expression.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// The recorded error, if any operation on this handle has failed.
    pub fn last_error(&self) -> Option<&ArborError> {
        self.error.as_ref()
    }

    /// A displayable rendering of the built tree, or `None` before a
    /// successful build.
    pub fn render_tree(&self) -> Option<TreeDisplay<'_>> {
        self.tree.as_ref().map(TreeDisplay::new)
    }

    /// Writes a one-line description of the recorded error to `w`,
    /// prefixed by `prefix` when non-empty. Token errors additionally get
    /// the expression echoed back with a caret under the offending
    /// character. Writes nothing when no error is recorded.
    pub fn write_error<W: io::Write>(&self, mut w: W, prefix: &str) -> io::Result<()> {
        let err = match &self.error {
            Some(e) => e,
            None => return Ok(()),
        };
        if prefix.is_empty() {
            writeln!(w, "{err}.")?;
        } else {
            writeln!(w, "{prefix} {err}.")?;
        }
        if let (ArborError::Token { pos, .. }, Some(expr)) = (err, &self.expr) {
            let width = *pos;
            writeln!(w, "{expr}")?;
            writeln!(w, "{:width$}^", "")?;
        }
        Ok(())
    }
}
