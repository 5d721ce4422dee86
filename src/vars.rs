use crate::error::ArborError;

/// The sorted, duplicate-free set of zero-based variable indices referenced
/// by an expression. Element `i` is the written index of the `i`-th
/// distinct variable in ascending order.
#[derive(Clone, Debug, Default)]
pub(crate) struct VarSet {
    idx: Vec<i64>,
}

impl VarSet {
    pub(crate) fn new() -> Self {
        VarSet::default()
    }

    /// Records a variable index, keeping the set sorted and de-duplicated.
    pub(crate) fn record(&mut self, var: i64) -> Result<(), ArborError> {
        match self.idx.binary_search(&var) {
            Ok(_) => Ok(()),
            Err(pos) => {
                if self.idx.len() >= i32::MAX as usize {
                    return Err(ArborError::TooManyVars);
                }
                self.idx.insert(pos, var);
                Ok(())
            }
        }
    }

    pub(crate) fn indices(&self) -> &[i64] {
        &self.idx
    }

    pub(crate) fn len(&self) -> usize {
        self.idx.len()
    }

    /// Largest recorded index, if any. The set is sorted, so this is the
    /// last element.
    pub(crate) fn max(&self) -> Option<i64> {
        self.idx.last().copied()
    }
}
