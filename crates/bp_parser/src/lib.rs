//! Parser boundary for backport.
//!
//! Wraps the standard SWC parser. The lowering passes never parse user
//! source themselves; they consume the tree produced here and, through
//! [`parse_expression`], materialize developer-authored runtime helper text
//! into expression trees.

pub mod parse;

pub use parse::{parse_expression, parse_program, ParseResult};
