//! Constructors for the node shapes the lowering passes synthesize.
//!
//! Spans are threaded through from the construct being rewritten so the
//! generated code keeps pointing at its origin.

use swc_common::{Span, SyntaxContext};
use swc_ecma_ast::*;

pub fn ident(name: &str, span: Span) -> Ident {
    Ident::new_no_ctxt(name.into(), span)
}

pub fn ident_expr(id: &Ident) -> Expr {
    Expr::Ident(id.clone())
}

/// Build `obj.prop`.
pub fn member(obj: Expr, prop: &str, span: Span) -> Expr {
    Expr::Member(MemberExpr {
        span,
        obj: Box::new(obj),
        prop: MemberProp::Ident(IdentName {
            span,
            sym: prop.into(),
        }),
    })
}

/// Build `obj[index]`.
pub fn index(obj: Expr, idx: Expr, span: Span) -> Expr {
    Expr::Member(MemberExpr {
        span,
        obj: Box::new(obj),
        prop: MemberProp::Computed(ComputedPropName {
            span,
            expr: Box::new(idx),
        }),
    })
}

/// Build `callee(args...)` with no spread arguments.
pub fn call(callee: Expr, args: Vec<Expr>, span: Span) -> Expr {
    Expr::Call(CallExpr {
        span,
        callee: Callee::Expr(Box::new(callee)),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread {
                spread: None,
                expr: Box::new(expr),
            })
            .collect(),
        type_args: None,
        ..Default::default()
    })
}

/// Build a single-declarator `kind name = init` declaration.
pub fn var_decl(kind: VarDeclKind, name: Ident, init: Option<Expr>, span: Span) -> VarDecl {
    VarDecl {
        span,
        ctxt: SyntaxContext::empty(),
        kind,
        declare: false,
        decls: vec![VarDeclarator {
            span,
            name: Pat::Ident(name.into()),
            init: init.map(Box::new),
            definite: false,
        }],
    }
}

/// Build a single-declarator `kind name = init;` statement.
pub fn var_stmt(kind: VarDeclKind, name: Ident, init: Option<Expr>, span: Span) -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(var_decl(kind, name, init, span))))
}

/// Build `target = value;`.
pub fn assign_stmt(target: Ident, value: Expr, span: Span) -> Stmt {
    expr_stmt(
        Expr::Assign(AssignExpr {
            span,
            op: AssignOp::Assign,
            left: AssignTarget::Simple(SimpleAssignTarget::Ident(target.into())),
            right: Box::new(value),
        }),
        span,
    )
}

pub fn expr_stmt(expr: Expr, span: Span) -> Stmt {
    Stmt::Expr(ExprStmt {
        span,
        expr: Box::new(expr),
    })
}

pub fn block(stmts: Vec<Stmt>, span: Span) -> Stmt {
    Stmt::Block(BlockStmt {
        span,
        ctxt: SyntaxContext::empty(),
        stmts,
    })
}

pub fn array_lit(elems: Vec<Option<ExprOrSpread>>, span: Span) -> Expr {
    Expr::Array(ArrayLit { span, elems })
}

pub fn num(value: f64, span: Span) -> Expr {
    Expr::Lit(Lit::Num(Number {
        span,
        value,
        raw: None,
    }))
}

/// Build `!arg`.
pub fn not(arg: Expr, span: Span) -> Expr {
    Expr::Unary(UnaryExpr {
        span,
        op: UnaryOp::Bang,
        arg: Box::new(arg),
    })
}

pub fn bin(op: BinaryOp, left: Expr, right: Expr, span: Span) -> Expr {
    Expr::Bin(BinExpr {
        span,
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Build `id++`.
pub fn post_inc(id: Ident, span: Span) -> Expr {
    Expr::Update(UpdateExpr {
        span,
        op: UpdateOp::PlusPlus,
        prefix: false,
        arg: Box::new(Expr::Ident(id)),
    })
}
