//! Hygienic alpha-renaming.
//!
//! Rewrites every *free* occurrence of one name to another within a subtree.
//! A scope that rebinds the name (a block declaring it, a function whose
//! parameters or hoisted `var`s include it, a catch clause catching it) is
//! left untouched, because every occurrence inside refers to that inner
//! binding.
//!
//! Renaming `old` to `new` and then `new` back to `old` reproduces the
//! original tree, provided `new` did not already occur free in it. Callers
//! uphold that precondition by sourcing `new` from [`crate::UniqueNamer`].

use bp_ast::scope;
use swc_ecma_ast::*;
use swc_ecma_visit::{Fold, FoldWith};

/// Rename all free occurrences of `old_name` to `new_name` in `node`.
pub fn alpha_rename<N>(node: N, old_name: &str, new_name: &str) -> N
where
    N: FoldWith<AlphaRenamer>,
{
    node.fold_with(&mut AlphaRenamer::new(old_name, new_name))
}

pub struct AlphaRenamer {
    old: String,
    new: String,
}

impl AlphaRenamer {
    pub fn new(old_name: &str, new_name: &str) -> Self {
        Self {
            old: old_name.to_string(),
            new: new_name.to_string(),
        }
    }

    fn matches(&self, ident: &Ident) -> bool {
        &*ident.sym == self.old.as_str()
    }

    fn renamed(&self, ident: Ident) -> Ident {
        Ident {
            sym: self.new.clone().into(),
            ..ident
        }
    }

    /// `this` and `arguments` are implicitly rebound by every non-arrow
    /// function, so a rename targeting either never crosses into one.
    fn is_implicit_binding(&self) -> bool {
        self.old == "this" || self.old == "arguments"
    }
}

impl Fold for AlphaRenamer {
    fn fold_block_stmt(&mut self, block: BlockStmt) -> BlockStmt {
        if scope::bound_in_block(&block).contains(self.old.as_str()) {
            return block;
        }
        block.fold_children_with(self)
    }

    fn fold_expr(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Ident(ident) if self.matches(&ident) => Expr::Ident(self.renamed(ident)),
            Expr::This(this) if self.old == "this" => {
                Expr::Ident(Ident::new_no_ctxt(self.new.clone().into(), this.span))
            }
            other => other.fold_children_with(self),
        }
    }

    fn fold_simple_assign_target(&mut self, target: SimpleAssignTarget) -> SimpleAssignTarget {
        match target {
            SimpleAssignTarget::Ident(binding) if self.matches(&binding.id) => {
                SimpleAssignTarget::Ident(BindingIdent {
                    id: self.renamed(binding.id),
                    type_ann: binding.type_ann,
                })
            }
            other => other.fold_children_with(self),
        }
    }

    fn fold_prop(&mut self, prop: Prop) -> Prop {
        // `{ x }` is a reference to `x`; renaming it forces the longhand
        // `{ x: y }` so the property key survives.
        match prop {
            Prop::Shorthand(ident) if self.matches(&ident) => Prop::KeyValue(KeyValueProp {
                key: PropName::Ident(IdentName {
                    span: ident.span,
                    sym: ident.sym.clone(),
                }),
                value: Box::new(Expr::Ident(self.renamed(ident))),
            }),
            other => other.fold_children_with(self),
        }
    }

    fn fold_fn_decl(&mut self, mut decl: FnDecl) -> FnDecl {
        // The declared name is a definition site: rewritten unconditionally,
        // independent of whether the body is entered.
        if self.matches(&decl.ident) {
            decl.ident.sym = self.new.clone().into();
        }
        decl.fold_children_with(self)
    }

    fn fold_fn_expr(&mut self, expr: FnExpr) -> FnExpr {
        // A named function expression rebinds its own name inside the body.
        if expr.ident.as_ref().is_some_and(|id| self.matches(id)) {
            return expr;
        }
        expr.fold_children_with(self)
    }

    fn fold_function(&mut self, func: Function) -> Function {
        if self.is_implicit_binding()
            || scope::bound_in_function(&func).contains(self.old.as_str())
        {
            return func;
        }
        func.fold_children_with(self)
    }

    fn fold_arrow_expr(&mut self, arrow: ArrowExpr) -> ArrowExpr {
        // Arrows rebind neither `this` nor `arguments`, so those renames
        // propagate through; only the arrow's own bindings stop one.
        if !self.is_implicit_binding()
            && scope::bound_in_arrow(&arrow).contains(self.old.as_str())
        {
            return arrow;
        }
        arrow.fold_children_with(self)
    }

    fn fold_catch_clause(&mut self, clause: CatchClause) -> CatchClause {
        // A plain-name catch binding shadows the name for the whole clause.
        // Destructuring catch patterns are not analyzed for shadowing.
        if let Some(Pat::Ident(binding)) = &clause.param {
            if self.matches(&binding.id) {
                return clause;
            }
        }
        clause.fold_children_with(self)
    }
}
