use std::{fmt::Display, sync::LazyLock};

pub const OPEN: char = '(';
pub const CLOSE: char = ')';
pub const QUOTE: char = '`';
pub const NOT: char = '¬';
pub const TRUE: char = '⊤';
pub const FALSE: char = '⊥';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Implies,
    Equals,
    NotEquals,
}

impl BinaryOp {
    pub fn glyph(self) -> char {
        match self {
            BinaryOp::And => '∧',
            BinaryOp::Or => '∨',
            BinaryOp::Xor => '⊕',
            BinaryOp::Implies => '→',
            BinaryOp::Equals => '=',
            BinaryOp::NotEquals => '≠',
        }
    }

    pub fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BinaryOp::And => lhs && rhs,
            BinaryOp::Or => lhs || rhs,
            BinaryOp::Xor | BinaryOp::NotEquals => lhs != rhs,
            BinaryOp::Implies => !lhs || rhs,
            BinaryOp::Equals => lhs == rhs,
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meaning {
    Constant(bool),
    Not,
    Binary(BinaryOp),
}

/// One reserved glyph of the normalized formula alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    /// Higher strength is split first, so it ends up as the outer operator.
    pub binding_strength: u8,
    pub meaning: Meaning,
}

impl Glyph {
    pub fn arity(&self) -> usize {
        match self.meaning {
            Meaning::Constant(_) => 0,
            Meaning::Not => 1,
            Meaning::Binary(_) => 2,
        }
    }
}

const fn binary(op: BinaryOp, symbol: char, binding_strength: u8) -> Glyph {
    Glyph {
        symbol,
        binding_strength,
        meaning: Meaning::Binary(op),
    }
}

pub static GLYPHS: [Glyph; 9] = [
    Glyph {
        symbol: TRUE,
        binding_strength: 1,
        meaning: Meaning::Constant(true),
    },
    Glyph {
        symbol: FALSE,
        binding_strength: 1,
        meaning: Meaning::Constant(false),
    },
    Glyph {
        symbol: NOT,
        binding_strength: 0,
        meaning: Meaning::Not,
    },
    binary(BinaryOp::And, '∧', 0b0010),
    binary(BinaryOp::Or, '∨', 0b0100),
    binary(BinaryOp::Xor, '⊕', 0b0100),
    binary(BinaryOp::Implies, '→', 0b0100),
    binary(BinaryOp::Equals, '=', 0b1000),
    binary(BinaryOp::NotEquals, '≠', 0b1000),
];

/// Distinct binding strengths of the binary glyphs, loosest binding first.
pub static BINARY_STRENGTHS: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let mut strengths: Vec<u8> = GLYPHS
        .iter()
        .filter(|glyph| glyph.arity() == 2)
        .map(|glyph| glyph.binding_strength)
        .collect();
    strengths.sort_unstable_by(|a, b| b.cmp(a));
    strengths.dedup();
    strengths
});

pub fn lookup(symbol: char) -> Option<&'static Glyph> {
    GLYPHS.iter().find(|glyph| glyph.symbol == symbol)
}

/// The operator `symbol` stands for and its binding strength, if it is binary.
pub fn binary_op(symbol: char) -> Option<(BinaryOp, u8)> {
    match lookup(symbol)? {
        Glyph {
            meaning: Meaning::Binary(op),
            binding_strength,
            ..
        } => Some((*op, *binding_strength)),
        _ => None,
    }
}

pub fn is_reserved(c: char) -> bool {
    c == OPEN || c == CLOSE || lookup(c).is_some()
}

/// Words the normalizer replaces, matched case-insensitively as whole words.
pub static KEYWORDS: [(&str, char); 10] = [
    ("and", '∧'),
    ("not", NOT),
    ("or", '∨'),
    ("xor", '⊕'),
    ("imply", '→'),
    ("implies", '→'),
    ("equals", '='),
    ("notequals", '≠'),
    ("true", TRUE),
    ("false", FALSE),
];

pub fn keyword(word: &str) -> Option<char> {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| keyword.eq_ignore_ascii_case(word))
        .map(|(_, glyph)| *glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_binary_op_has_a_glyph_entry() {
        for op in [
            BinaryOp::And,
            BinaryOp::Or,
            BinaryOp::Xor,
            BinaryOp::Implies,
            BinaryOp::Equals,
            BinaryOp::NotEquals,
        ] {
            let (found, _) = binary_op(op.glyph()).expect("glyph in table");
            assert_eq!(found, op);
        }
    }

    #[test]
    fn equality_binds_loosest_and_conjunction_tightest() {
        let strength = |c| binary_op(c).map(|(_, s)| s).unwrap();
        assert!(strength('=') > strength('∨'));
        assert_eq!(strength('∨'), strength('→'));
        assert_eq!(strength('∨'), strength('⊕'));
        assert!(strength('∨') > strength('∧'));
        assert_eq!(strength('='), strength('≠'));
    }

    #[test]
    fn strengths_are_tried_loosest_first() {
        assert_eq!(*BINARY_STRENGTHS, vec![0b1000, 0b0100, 0b0010]);
    }

    #[test]
    fn arities() {
        assert_eq!(lookup(TRUE).unwrap().arity(), 0);
        assert_eq!(lookup(NOT).unwrap().arity(), 1);
        assert_eq!(lookup('→').unwrap().arity(), 2);
        assert!(lookup('A').is_none());
    }

    #[test]
    fn implication_truth() {
        assert!(BinaryOp::Implies.apply(false, false));
        assert!(BinaryOp::Implies.apply(false, true));
        assert!(!BinaryOp::Implies.apply(true, false));
        assert!(BinaryOp::Implies.apply(true, true));
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(keyword("AND"), Some('∧'));
        assert_eq!(keyword("Implies"), Some('→'));
        assert_eq!(keyword("NotEquals"), Some('≠'));
        assert_eq!(keyword("nand"), None);
    }
}
