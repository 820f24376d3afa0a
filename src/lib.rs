pub mod balance;
pub mod driver;
pub mod eval;
pub mod glyph;
pub mod normalize;
pub mod parse;
pub mod render;
pub mod table;

pub use eval::Assignment;
pub use parse::{Formula, Parser, parse};
pub use table::TruthTable;
