use thiserror::Error;

use crate::glyph::{CLOSE, OPEN};

/// Offsets are byte offsets into the checked text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imbalance {
    #[error("`(` at byte {at} is never closed")]
    UnmatchedOpen { at: usize },
    #[error("`)` at byte {at} closes nothing")]
    UnmatchedClose { at: usize },
}

impl Imbalance {
    pub fn offset(&self) -> usize {
        match self {
            Imbalance::UnmatchedOpen { at } | Imbalance::UnmatchedClose { at } => *at,
        }
    }
}

pub fn check(text: &str) -> Result<(), Imbalance> {
    let mut open = Vec::new();

    for (at, c) in text.char_indices() {
        match c {
            OPEN => open.push(at),
            CLOSE => {
                if open.pop().is_none() {
                    return Err(Imbalance::UnmatchedClose { at });
                }
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(at) => Err(Imbalance::UnmatchedOpen { at }),
        None => Ok(()),
    }
}
