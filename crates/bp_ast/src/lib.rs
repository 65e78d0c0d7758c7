//! ECMAScript tree model for backport.
//!
//! Re-exports the standard SWC AST and adds the pieces the lowering passes
//! share:
//! - `build`: constructors for the handful of node shapes passes synthesize
//! - `scope`: direct-binding analysis for blocks and functions
//!
//! Nodes are immutable once constructed; passes always produce new nodes via
//! `swc_ecma_visit::Fold` rather than mutating in place. Optional children
//! are plain `Option`s, with no "absent node" sentinel value.

pub use swc_ecma_ast::*;

pub mod build;
pub mod scope;
