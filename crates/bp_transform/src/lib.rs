//! Lowering passes that rewrite modern JavaScript trees into ES5 trees.
//!
//! Transforms:
//! - `for (k in obj) body` → snapshot-driven counted loop (restartable, a
//!   prerequisite for lowering loops whose bodies may suspend)
//! - `[a, ...b, c]`        → call to the shared `spread` runtime helper
//! - alpha-renaming of free identifiers, used by other passes that need to
//!   move code across scope boundaries hygienically
//!
//! Every pass is a pure tree-to-tree function built on `swc_ecma_visit::Fold`
//! default recursion. Per compilation unit the pipeline owns one
//! [`UniqueNamer`] and one [`RuntimeRegistry`]; neither may be reused across
//! unrelated programs.

pub mod error;
pub mod for_in;
pub mod namer;
pub mod pipeline;
pub mod rename;
pub mod runtime;
pub mod spread;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::TransformError;
pub use for_in::desugar_for_in;
pub use namer::UniqueNamer;
pub use pipeline::{lower_program, lower_with, LowerOptions};
pub use rename::{alpha_rename, AlphaRenamer};
pub use runtime::RuntimeRegistry;
pub use spread::desugar_spread;
