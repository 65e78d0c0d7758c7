//! Spread desugaring for array literals.
//!
//! `[a, ...b, c]` → `$__spread([a], b, [c])`
//!
//! Runs of ordinary elements are wrapped into plain array literals and the
//! shared `spread` runtime helper concatenates the segments at run time.
//! Elisions inside a run are preserved. Spread in call and `new` argument
//! position is not handled by this pass.

use bp_ast::build;
use swc_ecma_ast::*;
use swc_ecma_visit::{Fold, FoldWith};

use crate::error::TransformError;
use crate::namer::UniqueNamer;
use crate::runtime::RuntimeRegistry;

/// Desugar every spread-bearing array literal in `program`, bottom-up.
pub fn desugar_spread(
    program: Program,
    namer: &mut UniqueNamer,
    registry: &mut RuntimeRegistry,
) -> Result<Program, TransformError> {
    let mut pass = SpreadDesugar {
        namer,
        registry,
        error: None,
    };
    let program = program.fold_with(&mut pass);
    match pass.error {
        Some(error) => Err(error),
        None => Ok(program),
    }
}

struct SpreadDesugar<'a> {
    namer: &'a mut UniqueNamer,
    registry: &'a mut RuntimeRegistry,
    error: Option<TransformError>,
}

impl Fold for SpreadDesugar<'_> {
    fn fold_expr(&mut self, expr: Expr) -> Expr {
        let expr = expr.fold_children_with(self);
        match expr {
            Expr::Array(array) if contains_spread(&array) => {
                match self.registry.get(self.namer, "spread", None) {
                    Ok(helper) => rewrite_array(helper, array),
                    Err(error) => {
                        self.error.get_or_insert(error);
                        Expr::Array(array)
                    }
                }
            }
            other => other,
        }
    }
}

fn contains_spread(array: &ArrayLit) -> bool {
    array
        .elems
        .iter()
        .any(|elem| elem.as_ref().is_some_and(|e| e.spread.is_some()))
}

fn rewrite_array(helper: Expr, array: ArrayLit) -> Expr {
    let span = array.span;
    let mut args: Vec<Expr> = Vec::new();
    let mut run: Vec<Option<ExprOrSpread>> = Vec::new();
    for elem in array.elems {
        match elem {
            Some(elem) if elem.spread.is_some() => {
                if !run.is_empty() {
                    args.push(build::array_lit(std::mem::take(&mut run), span));
                }
                args.push(*elem.expr);
            }
            other => run.push(other),
        }
    }
    if !run.is_empty() {
        args.push(build::array_lit(run, span));
    }
    build::call(helper, args, span)
}
