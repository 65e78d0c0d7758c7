//! Unique identifier generation.
//!
//! One [`UniqueNamer`] serves one compilation unit. Reusing it across
//! unrelated programs would leak the taken-name set and the counter.

use std::collections::HashSet;

use swc_common::DUMMY_SP;
use swc_ecma_ast::{Ident, Program};
use swc_ecma_visit::{Visit, VisitWith};

/// Hands out `$__N` identifiers guaranteed not to collide with any
/// identifier in the seed program or any name generated earlier.
#[derive(Debug, Default)]
pub struct UniqueNamer {
    taken: HashSet<String>,
    next: u32,
}

impl UniqueNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the taken-name set with every identifier occurring in `program`.
    pub fn for_program(program: &Program) -> Self {
        let mut taken = HashSet::new();
        program.visit_with(&mut IdentCollector { taken: &mut taken });
        Self { taken, next: 0 }
    }

    /// Mark a name as taken, e.g. one minted by an earlier stage.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    pub fn fresh_name(&mut self) -> String {
        loop {
            let candidate = format!("$__{}", self.next);
            self.next += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn fresh(&mut self) -> Ident {
        Ident::new_no_ctxt(self.fresh_name().into(), DUMMY_SP)
    }
}

struct IdentCollector<'a> {
    taken: &'a mut HashSet<String>,
}

impl Visit for IdentCollector<'_> {
    fn visit_ident(&mut self, node: &Ident) {
        self.taken.insert(node.sym.to_string());
    }
}
