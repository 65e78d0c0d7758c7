//! Direct-binding analysis for blocks and functions.
//!
//! Answers exactly one question per scope: which names does this block (or
//! this function) bind *directly*? Names bound in nested scopes are never
//! included. Results are computed on demand from the tree and must not be
//! cached across passes: a pass that moves code would otherwise consult a
//! stale answer.

use std::collections::HashSet;

use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};

/// Names declared by direct statements of `block`: `var`/`let`/`const`
/// declarator patterns, function declaration names, and class declaration
/// names. Declarations inside nested blocks, functions, or catch clauses do
/// not count.
pub fn bound_in_block(block: &BlockStmt) -> HashSet<String> {
    let mut names = HashSet::new();
    for stmt in &block.stmts {
        match stmt {
            Stmt::Decl(Decl::Var(var)) => {
                for decl in &var.decls {
                    pattern_names(&decl.name, &mut names);
                }
            }
            Stmt::Decl(Decl::Fn(func)) => {
                names.insert(func.ident.sym.to_string());
            }
            Stmt::Decl(Decl::Class(class)) => {
                names.insert(class.ident.sym.to_string());
            }
            _ => {}
        }
    }
    names
}

/// Names bound by `func` itself: formal parameters plus every `var`-declared
/// name anywhere in the body, at any block depth, excluding nested function
/// and arrow bodies. This matches `var` hoisting: the declarations are
/// function-scoped no matter how deeply they sit inside blocks or loops.
pub fn bound_in_function(func: &Function) -> HashSet<String> {
    let mut names = HashSet::new();
    for param in &func.params {
        pattern_names(&param.pat, &mut names);
    }
    if let Some(body) = &func.body {
        collect_hoisted_vars(body, &mut names);
    }
    names
}

/// The same contract as [`bound_in_function`], for arrow functions.
pub fn bound_in_arrow(arrow: &ArrowExpr) -> HashSet<String> {
    let mut names = HashSet::new();
    for pat in &arrow.params {
        pattern_names(pat, &mut names);
    }
    if let BlockStmtOrExpr::BlockStmt(body) = &*arrow.body {
        collect_hoisted_vars(body, &mut names);
    }
    names
}

/// Every name bound by a (possibly destructuring) pattern.
pub fn pattern_names(pat: &Pat, names: &mut HashSet<String>) {
    match pat {
        Pat::Ident(binding) => {
            names.insert(binding.id.sym.to_string());
        }
        Pat::Array(array) => {
            for elem in array.elems.iter().flatten() {
                pattern_names(elem, names);
            }
        }
        Pat::Rest(rest) => pattern_names(&rest.arg, names),
        Pat::Object(object) => {
            for prop in &object.props {
                match prop {
                    ObjectPatProp::KeyValue(kv) => pattern_names(&kv.value, names),
                    ObjectPatProp::Assign(assign) => {
                        names.insert(assign.key.id.sym.to_string());
                    }
                    ObjectPatProp::Rest(rest) => pattern_names(&rest.arg, names),
                }
            }
        }
        Pat::Assign(assign) => pattern_names(&assign.left, names),
        // An expression in pattern position (for-in/for-of heads) is a
        // reference, not a binding.
        Pat::Expr(_) | Pat::Invalid(_) => {}
    }
}

fn collect_hoisted_vars(body: &BlockStmt, names: &mut HashSet<String>) {
    let mut collector = HoistedVarCollector { names };
    body.visit_with(&mut collector);
}

struct HoistedVarCollector<'a> {
    names: &'a mut HashSet<String>,
}

impl Visit for HoistedVarCollector<'_> {
    fn visit_var_decl(&mut self, node: &VarDecl) {
        if node.kind == VarDeclKind::Var {
            for decl in &node.decls {
                pattern_names(&decl.name, self.names);
            }
        }
        node.visit_children_with(self);
    }

    // `var` declarations inside these belong to the nested scope.
    fn visit_function(&mut self, _: &Function) {}
    fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}
    fn visit_constructor(&mut self, _: &Constructor) {}
}
