//! For-in desugaring.
//!
//! Rewrites
//!
//! ```javascript
//! for (var k in obj) { body; }
//! ```
//!
//! into
//!
//! ```javascript
//! {
//!     var $__0 = [];
//!     var $__1 = obj;
//!     for (var $__2 in $__1) $__0.push($__2);
//!     for (var $__3 = 0; $__3 < $__0.length; $__3++) {
//!         var k = $__0[$__3];
//!         if (!(k in $__1)) continue;
//!         body;
//!     }
//! }
//! ```
//!
//! The counted form is restartable, which native enumerate-in-place loops
//! are not once a loop body can suspend execution. The rewrite keeps the
//! source semantics: the collection expression is evaluated exactly once,
//! keys are visited in whatever order the host enumerates them, and the
//! `in` guard skips keys deleted between snapshot and use. Body statements
//! are inlined rather than re-wrapped, so `break` and `continue` inside
//! them keep their original target.

use bp_ast::build;
use swc_ecma_ast::*;
use swc_ecma_visit::{Fold, FoldWith};

use crate::error::TransformError;
use crate::namer::UniqueNamer;

/// Desugar every for-in statement in `program`, bottom-up.
pub fn desugar_for_in(
    program: Program,
    namer: &mut UniqueNamer,
) -> Result<Program, TransformError> {
    let mut pass = ForInDesugar { namer, error: None };
    let program = program.fold_with(&mut pass);
    match pass.error {
        Some(error) => Err(error),
        None => Ok(program),
    }
}

struct ForInDesugar<'a> {
    namer: &'a mut UniqueNamer,
    error: Option<TransformError>,
}

/// Where the enumerated key lands on each iteration.
#[derive(Debug)]
enum KeyTarget {
    /// `for (var k in ...)`: redeclared inside the counted loop with the
    /// original declaration kind.
    Decl { kind: VarDeclKind, name: Ident },
    /// `for (k in ...)`: plain assignment to the existing binding.
    Assign(Ident),
}

impl Fold for ForInDesugar<'_> {
    fn fold_stmt(&mut self, stmt: Stmt) -> Stmt {
        // Children first: a nested for-in inside the body is rewritten
        // before the enclosing loop is.
        let stmt = stmt.fold_children_with(self);
        match stmt {
            Stmt::ForIn(loop_stmt) => match classify_target(&loop_stmt.left) {
                Ok(target) => self.rewrite(loop_stmt, target),
                Err(error) => {
                    self.error.get_or_insert(error);
                    Stmt::ForIn(loop_stmt)
                }
            },
            other => other,
        }
    }
}

impl ForInDesugar<'_> {
    fn rewrite(&mut self, loop_stmt: ForInStmt, target: KeyTarget) -> Stmt {
        let ForInStmt {
            span, right, body, ..
        } = loop_stmt;

        let keys = self.namer.fresh();
        let collection = self.namer.fresh();
        let probe = self.namer.fresh();
        let idx = self.namer.fresh();

        let mut stmts = Vec::with_capacity(4);

        // var $keys = [];
        stmts.push(build::var_stmt(
            VarDeclKind::Var,
            keys.clone(),
            Some(build::array_lit(vec![], span)),
            span,
        ));

        // var $collection = <right>; the collection expression runs once.
        stmts.push(build::var_stmt(
            VarDeclKind::Var,
            collection.clone(),
            Some(*right),
            span,
        ));

        // for (var $probe in $collection) $keys.push($probe);
        stmts.push(Stmt::ForIn(ForInStmt {
            span,
            left: ForHead::VarDecl(Box::new(build::var_decl(
                VarDeclKind::Var,
                probe.clone(),
                None,
                span,
            ))),
            right: Box::new(build::ident_expr(&collection)),
            body: Box::new(build::expr_stmt(
                build::call(
                    build::member(build::ident_expr(&keys), "push", span),
                    vec![Expr::Ident(probe)],
                    span,
                ),
                span,
            )),
        }));

        // var k = $keys[$idx];   or   k = $keys[$idx];
        let lookup = build::index(build::ident_expr(&keys), build::ident_expr(&idx), span);
        let (bind_key, key) = match target {
            KeyTarget::Decl { kind, name } => (
                build::var_stmt(kind, name.clone(), Some(lookup), span),
                name,
            ),
            KeyTarget::Assign(name) => (build::assign_stmt(name.clone(), lookup, span), name),
        };

        // if (!(k in $collection)) continue; the snapshot can go stale.
        let guard = Stmt::If(IfStmt {
            span,
            test: Box::new(build::not(
                build::bin(
                    BinaryOp::In,
                    Expr::Ident(key),
                    build::ident_expr(&collection),
                    span,
                ),
                span,
            )),
            cons: Box::new(Stmt::Continue(ContinueStmt { span, label: None })),
            alt: None,
        });

        let mut inner = vec![bind_key, guard];
        match *body {
            Stmt::Block(body_block) => inner.extend(body_block.stmts),
            other => inner.push(other),
        }

        // for (var $idx = 0; $idx < $keys.length; $idx++) { ... }
        stmts.push(Stmt::For(ForStmt {
            span,
            init: Some(VarDeclOrExpr::VarDecl(Box::new(build::var_decl(
                VarDeclKind::Var,
                idx.clone(),
                Some(build::num(0.0, span)),
                span,
            )))),
            test: Some(Box::new(build::bin(
                BinaryOp::Lt,
                build::ident_expr(&idx),
                build::member(build::ident_expr(&keys), "length", span),
                span,
            ))),
            update: Some(Box::new(build::post_inc(idx, span))),
            body: Box::new(build::block(inner, span)),
        }));

        build::block(stmts, span)
    }
}

fn classify_target(left: &ForHead) -> Result<KeyTarget, TransformError> {
    match left {
        ForHead::VarDecl(var) => {
            if var.decls.len() != 1 {
                return Err(unsupported(format!(
                    "declaration list with {} declarators",
                    var.decls.len()
                )));
            }
            let decl = &var.decls[0];
            if decl.init.is_some() {
                return Err(unsupported("declaration with an initializer".to_string()));
            }
            match &decl.name {
                Pat::Ident(binding) => Ok(KeyTarget::Decl {
                    kind: var.kind,
                    name: binding.id.clone(),
                }),
                _ => Err(unsupported("destructuring declaration".to_string())),
            }
        }
        ForHead::Pat(pat) => match &**pat {
            Pat::Ident(binding) => Ok(KeyTarget::Assign(binding.id.clone())),
            Pat::Expr(expr) => match &**expr {
                Expr::Ident(ident) => Ok(KeyTarget::Assign(ident.clone())),
                _ => Err(unsupported("non-identifier assignment target".to_string())),
            },
            _ => Err(unsupported("destructuring assignment target".to_string())),
        },
        ForHead::UsingDecl(_) => Err(unsupported("using declaration".to_string())),
    }
}

fn unsupported(found: String) -> TransformError {
    TransformError::UnsupportedForInTarget { found }
}
