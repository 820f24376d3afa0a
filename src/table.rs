use miette::Diagnostic;
use thiserror::Error;

use crate::{
    eval::{Assignment, UnboundVariable},
    parse::Formula,
};

pub const DEFAULT_MAX_VARIABLES: usize = 16;

/// Above this a row index no longer fits the shift used to enumerate rows.
const HARD_MAX_VARIABLES: usize = usize::BITS as usize - 1;

#[derive(Error, Debug, Diagnostic)]
pub enum TableError {
    #[error("{count} variables would need 2^{count} rows, the limit is {limit} variables")]
    #[diagnostic(
        code(truthtable::too_many_variables),
        help("split the formula or raise `--max-variables`")
    )]
    TooManyVariables { count: usize, limit: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unbound(#[from] UnboundVariable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// One value per variable, in the table's variable order.
    pub values: Vec<bool>,
    pub result: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable<'de> {
    pub variables: Vec<&'de str>,
    pub rows: Vec<Row>,
}

impl<'de> TruthTable<'de> {
    /// Evaluates `formula` under every assignment of its free variables.
    pub fn build(formula: &Formula<'de>, max_variables: usize) -> Result<Self, TableError> {
        enumerate(formula.free_variables(), formula, max_variables)
    }

    pub fn assignment(&self, row: usize) -> Option<Assignment<'de>> {
        let row = self.rows.get(row)?;
        Some(
            self.variables
                .iter()
                .copied()
                .zip(row.values.iter().copied())
                .collect(),
        )
    }
}

/// Row `r` gives variable `i` bit `n - 1 - i` of `r`, so the first variable
/// changes slowest.
pub fn enumerate<'de>(
    variables: Vec<&'de str>,
    formula: &Formula<'de>,
    max_variables: usize,
) -> Result<TruthTable<'de>, TableError> {
    let count = variables.len();
    let limit = max_variables.min(HARD_MAX_VARIABLES);
    if count > limit {
        return Err(TableError::TooManyVariables { count, limit });
    }

    let rows = (0..1usize << count)
        .map(|index| -> Result<Row, TableError> {
            let values: Vec<bool> = (0..count)
                .map(|i| index & (1 << (count - 1 - i)) != 0)
                .collect();
            let assignment: Assignment = variables
                .iter()
                .copied()
                .zip(values.iter().copied())
                .collect();
            let result = formula.evaluate(&assignment)?;
            Ok(Row { values, result })
        })
        .collect::<Result<Vec<_>, TableError>>()?;

    log::debug!("enumerated {} rows over {count} variables", rows.len());

    Ok(TruthTable { variables, rows })
}

/// The reduced variant: one evaluation with no variables defined.
pub fn evaluate_closed(formula: &Formula<'_>) -> Result<bool, UnboundVariable> {
    formula.evaluate(&Assignment::new())
}
