use std::{fmt::Display, ops::Range};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{
    balance::{self, Imbalance},
    glyph::{self, BinaryOp, CLOSE, FALSE, NOT, OPEN, QUOTE, TRUE},
};

/// Limit on recursive parse steps, which is also the deepest tree `parse` builds.
/// Every operand counts, so `A∨B∨C` is three levels deep just like `(A∨(B∨C))`.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula<'de> {
    Constant(bool),
    Variable(&'de str),
    Not(Box<Formula<'de>>),
    Binary(BinaryOp, Box<Formula<'de>>, Box<Formula<'de>>),
}

impl Display for Formula<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Constant(true) => write!(f, "{TRUE}"),
            Formula::Constant(false) => write!(f, "{FALSE}"),
            Formula::Variable(name) => write!(f, "{name}"),
            Formula::Not(operand) => write!(f, "{NOT}{operand}"),
            Formula::Binary(op, lhs, rhs) => write!(f, "({lhs} {op} {rhs})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    /// The only operand of a unary glyph.
    Sole,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left operand"),
            Side::Right => write!(f, "right operand"),
            Side::Sole => write!(f, "operand"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    #[error("there is nothing to parse")]
    Empty,
    #[error("`{op}` is missing its {side}")]
    MissingOperand { op: char, side: Side },
    #[error("`{op}` has an invalid {side}")]
    InvalidOperand { op: char, side: Side },
    #[error("names containing whitespace must be quoted with backticks")]
    UnquotedWhitespace,
    #[error("unexpected `{0}` inside a name")]
    StrayDelimiter(char),
    #[error("`{0}` cannot be part of a name")]
    ReservedGlyph(char),
    #[error("unexpected text before `¬`")]
    TextBeforeNegation,
}

#[derive(Error, Debug, Diagnostic)]
pub enum ParseError {
    #[error("unmatched `(`")]
    #[diagnostic(
        code(truthtable::unmatched_open),
        help("close the group with `)` or remove the `(`")
    )]
    UnmatchedOpen {
        #[source_code]
        src: NamedSource<String>,
        #[label("this group is never closed")]
        at: SourceSpan,
    },

    #[error("unmatched `)`")]
    #[diagnostic(
        code(truthtable::unmatched_close),
        help("remove the `)` or open a group before it")
    )]
    UnmatchedClose {
        #[source_code]
        src: NamedSource<String>,
        #[label("nothing to close here")]
        at: SourceSpan,
    },

    #[error("malformed formula `{text}`: {reason}")]
    #[diagnostic(code(truthtable::malformed_formula))]
    MalformedFormula {
        reason: Malformation,
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
        /// Why the operand of an `InvalidOperand` failed.
        #[source]
        cause: Option<Box<ParseError>>,
    },

    #[error("formula nests deeper than {limit} levels")]
    #[diagnostic(
        code(truthtable::nesting_too_deep),
        help("remove redundant parentheses or raise `--max-depth`")
    )]
    NestingTooDeep {
        limit: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("limit reached inside this part")]
        at: SourceSpan,
    },
}

impl ParseError {
    pub fn malformation(&self) -> Option<&Malformation> {
        match self {
            ParseError::MalformedFormula { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// The error of the operand an `InvalidOperand` is about.
    pub fn cause(&self) -> Option<&ParseError> {
        match self {
            ParseError::MalformedFormula { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }
}

/// Recursive-descent parser over normalized formula text.
///
/// Works on byte ranges of the one input buffer: every step balance-checks its
/// range, strips a redundant pair of enclosing parentheses, splits at the
/// loosest-binding operator found outside any group, and only then tries
/// negation and finally a leaf.
pub struct Parser<'de> {
    filename: Option<&'de str>,
    whole: &'de str,
    max_depth: usize,
}

impl<'de> Parser<'de> {
    pub fn new(filename: Option<&'de str>, whole: &'de str) -> Self {
        Parser {
            filename,
            whole,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(self) -> Result<Formula<'de>, ParseError> {
        self.parse_within(0, self.whole.len(), 0)
    }

    fn parse_within(
        &self,
        start: usize,
        end: usize,
        depth: usize,
    ) -> Result<Formula<'de>, ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                src: self.source(),
                at: SourceSpan::from(start..end),
            });
        }

        let text = &self.whole[start..end];
        balance::check(text).map_err(|imbalance| self.imbalance(start, imbalance))?;

        let start = start + (text.len() - text.trim_start().len());
        let end = start + text.trim().len();
        let trimmed = &self.whole[start..end];

        if trimmed.is_empty() {
            return Err(self.malformed(Malformation::Empty, text, start..end));
        }

        if trimmed.starts_with(OPEN) && trimmed.ends_with(CLOSE) {
            let (inner_start, inner_end) = (start + OPEN.len_utf8(), end - CLOSE.len_utf8());
            match balance::check(&self.whole[inner_start..inner_end]) {
                Ok(()) => return self.parse_within(inner_start, inner_end, depth + 1),
                Err(imbalance) => {
                    log::trace!("`{trimmed}` is not a single group ({imbalance}), keeping it whole")
                }
            }
        }

        let top_level = self.top_level(start, end);

        for &strength in glyph::BINARY_STRENGTHS.iter() {
            let split = top_level.iter().find_map(|&(at, c)| match glyph::binary_op(c) {
                Some((op, s)) if s == strength => Some((at, op)),
                _ => None,
            });

            if let Some((at, op)) = split {
                log::trace!("splitting `{trimmed}` at `{op}` (byte {at})");
                let glyph = op.glyph();
                let glyph_span = at..at + glyph.len_utf8();
                let lhs =
                    self.operand(trimmed, (glyph, Side::Left), start..at, &glyph_span, depth)?;
                let rhs = self.operand(
                    trimmed,
                    (glyph, Side::Right),
                    glyph_span.end..end,
                    &glyph_span,
                    depth,
                )?;
                return Ok(Formula::Binary(op, Box::new(lhs), Box::new(rhs)));
            }
        }

        if let Some(&(at, _)) = top_level.iter().find(|&&(_, c)| c == NOT) {
            if at != start {
                return Err(self.malformed(Malformation::TextBeforeNegation, trimmed, start..at));
            }
            let glyph_span = at..at + NOT.len_utf8();
            let operand = self.operand(
                trimmed,
                (NOT, Side::Sole),
                glyph_span.end..end,
                &glyph_span,
                depth,
            )?;
            return Ok(Formula::Not(Box::new(operand)));
        }

        self.leaf(start, end)
    }

    /// Characters of `start..end` that sit outside every group, with their
    /// absolute offsets. Delimiters themselves are not reported.
    fn top_level(&self, start: usize, end: usize) -> Vec<(usize, char)> {
        let mut depth = 0usize;
        let mut found = Vec::new();
        for (offset, c) in self.whole[start..end].char_indices() {
            match c {
                OPEN => depth += 1,
                // the range is balanced, so this never goes below zero
                CLOSE => depth = depth.saturating_sub(1),
                _ if depth == 0 => found.push((start + offset, c)),
                _ => {}
            }
        }
        found
    }

    fn operand(
        &self,
        formula: &str,
        (op, side): (char, Side),
        range: Range<usize>,
        glyph_span: &Range<usize>,
        depth: usize,
    ) -> Result<Formula<'de>, ParseError> {
        if self.whole[range.clone()].trim().is_empty() {
            return Err(self.malformed(
                Malformation::MissingOperand { op, side },
                formula,
                glyph_span.clone(),
            ));
        }
        self.parse_within(range.start, range.end, depth + 1)
            .map_err(|cause| match cause {
                ParseError::NestingTooDeep { .. } => cause,
                cause => ParseError::MalformedFormula {
                    reason: Malformation::InvalidOperand { op, side },
                    text: formula.to_string(),
                    src: self.source(),
                    span: SourceSpan::from(glyph_span.clone()),
                    cause: Some(Box::new(cause)),
                },
            })
    }

    fn leaf(&self, start: usize, end: usize) -> Result<Formula<'de>, ParseError> {
        let text = &self.whole[start..end];

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(TRUE), None) => return Ok(Formula::Constant(true)),
            (Some(FALSE), None) => return Ok(Formula::Constant(false)),
            _ => {}
        }

        let quoted = text.len() >= 2 && text.starts_with(QUOTE) && text.ends_with(QUOTE);
        if !quoted {
            for (offset, c) in text.char_indices() {
                let at = start + offset..start + offset + c.len_utf8();
                let reason = if c.is_whitespace() {
                    Malformation::UnquotedWhitespace
                } else if c == OPEN || c == CLOSE {
                    Malformation::StrayDelimiter(c)
                } else if glyph::is_reserved(c) {
                    Malformation::ReservedGlyph(c)
                } else {
                    continue;
                };
                return Err(self.malformed(reason, text, at));
            }
        }

        Ok(Formula::Variable(text))
    }

    fn source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename.unwrap_or("<input>"), self.whole.to_string())
    }

    fn imbalance(&self, base: usize, imbalance: Imbalance) -> ParseError {
        let at = base + imbalance.offset();
        let at = SourceSpan::from(at..at + 1);
        match imbalance {
            Imbalance::UnmatchedOpen { .. } => ParseError::UnmatchedOpen {
                src: self.source(),
                at,
            },
            Imbalance::UnmatchedClose { .. } => ParseError::UnmatchedClose {
                src: self.source(),
                at,
            },
        }
    }

    fn malformed(&self, reason: Malformation, text: &str, span: Range<usize>) -> ParseError {
        ParseError::MalformedFormula {
            reason,
            text: text.to_string(),
            src: self.source(),
            span: SourceSpan::from(span),
            cause: None,
        }
    }
}

/// Parses one normalized formula with the default nesting limit.
pub fn parse(text: &str) -> Result<Formula<'_>, ParseError> {
    Parser::new(None, text).parse()
}
