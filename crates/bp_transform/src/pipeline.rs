//! Pipeline driver: applies the lowering passes in sequence over one
//! program tree and injects the runtime helpers they requested.

use serde::{Deserialize, Serialize};
use swc_ecma_ast::Program;

use crate::error::TransformError;
use crate::for_in::desugar_for_in;
use crate::namer::UniqueNamer;
use crate::runtime::RuntimeRegistry;
use crate::spread::desugar_spread;

/// Feature flags controlling which lowering passes run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowerOptions {
    pub spread: bool,
    pub for_in: bool,
}

impl Default for LowerOptions {
    fn default() -> Self {
        Self {
            spread: true,
            for_in: true,
        }
    }
}

/// Lower `program` with a fresh namer and registry.
///
/// The namer is seeded with every identifier in the program, so generated
/// temporaries cannot collide with user names.
pub fn lower_program(
    program: Program,
    options: &LowerOptions,
) -> Result<Program, TransformError> {
    let mut namer = UniqueNamer::for_program(&program);
    let mut registry = RuntimeRegistry::new();
    lower_with(program, options, &mut namer, &mut registry)
}

/// Lower `program` with caller-owned collaborators.
///
/// Both must be freshly constructed for this compilation unit; reusing
/// either across unrelated programs leaks naming and helper state.
pub fn lower_with(
    mut program: Program,
    options: &LowerOptions,
    namer: &mut UniqueNamer,
    registry: &mut RuntimeRegistry,
) -> Result<Program, TransformError> {
    if options.spread {
        program = desugar_spread(program, namer, registry)?;
    }
    if options.for_in {
        program = desugar_for_in(program, namer)?;
    }
    Ok(registry.finalize(program))
}
