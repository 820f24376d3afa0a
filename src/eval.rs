use std::collections::HashMap;

use miette::Diagnostic;
use thiserror::Error;

use crate::parse::Formula;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("variable `{name}` has no value")]
#[diagnostic(
    code(truthtable::unbound_variable),
    help("every variable the formula mentions needs a value")
)]
pub struct UnboundVariable {
    pub name: String,
}

/// Values for the free variables of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment<'de> {
    values: HashMap<&'de str, bool>,
}

impl<'de> Assignment<'de> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    pub fn define(&mut self, name: &'de str, value: bool) {
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'de> FromIterator<(&'de str, bool)> for Assignment<'de> {
    fn from_iter<T: IntoIterator<Item = (&'de str, bool)>>(iter: T) -> Self {
        Assignment {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'de> Formula<'de> {
    pub fn evaluate(&self, assignment: &Assignment<'_>) -> Result<bool, UnboundVariable> {
        Ok(match self {
            Formula::Constant(value) => *value,
            Formula::Variable(name) => assignment.get(name).ok_or_else(|| UnboundVariable {
                name: name.to_string(),
            })?,
            Formula::Not(operand) => !operand.evaluate(assignment)?,
            Formula::Binary(op, lhs, rhs) => {
                op.apply(lhs.evaluate(assignment)?, rhs.evaluate(assignment)?)
            }
        })
    }

    /// Every variable occurrence in pre-order, duplicates included.
    pub fn variables(&self) -> Vec<&'de str> {
        fn explore<'de>(formula: &Formula<'de>, found: &mut Vec<&'de str>) {
            match formula {
                Formula::Constant(_) => {}
                Formula::Variable(name) => found.push(*name),
                Formula::Not(operand) => explore(operand, found),
                Formula::Binary(_, lhs, rhs) => {
                    explore(lhs, found);
                    explore(rhs, found);
                }
            }
        }

        let mut found = Vec::new();
        explore(self, &mut found);
        found
    }

    /// Distinct variable names in order of first occurrence.
    pub fn free_variables(&self) -> Vec<&'de str> {
        let mut free: Vec<&'de str> = Vec::new();
        for name in self.variables() {
            if !free.contains(&name) {
                free.push(name);
            }
        }
        free
    }
}
