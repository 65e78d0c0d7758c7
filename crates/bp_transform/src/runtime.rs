//! Runtime helper inlining.
//!
//! Passes that need a small fixed support function at run time request it
//! here by name instead of duplicating its definition. Each distinct helper
//! is registered once, bound to a fresh unique identifier, and injected into
//! the program exactly once by [`RuntimeRegistry::finalize`].
//!
//! Helper definition text may reference other *shared* helpers with `%name`
//! placeholders; registration resolves those dependencies first and splices
//! in their unique identifiers before the text is parsed. Shared definitions
//! must be acyclic: a helper whose expansion reaches itself recurses
//! forever and is unsupported.

use swc_common::{SyntaxContext, DUMMY_SP};
use swc_ecma_ast::*;

use crate::error::TransformError;
use crate::namer::UniqueNamer;

/// The shared helper pool. Definitions are function expressions;
/// `%name` references another member of the pool.
const SHARED_HELPERS: &[(&str, &str)] = &[
    (
        "toObject",
        "function(value) {
    if (value == null) throw new TypeError('cannot convert ' + value + ' to object');
    return Object(value);
}",
    ),
    (
        "checkObjectCoercible",
        "function(value) {
    if (value == null) throw new TypeError('value expected, got ' + value);
    return value;
}",
    ),
    (
        "spread",
        "function() {
    var rv = [], k = 0;
    for (var i = 0; i < arguments.length; i++) {
        var value = %toObject(arguments[i]);
        for (var j = 0; j < value.length; j++) {
            rv[k++] = value[j];
        }
    }
    return rv;
}",
    ),
];

fn shared_source(name: &str) -> Option<&'static str> {
    SHARED_HELPERS
        .iter()
        .find(|(helper, _)| *helper == name)
        .map(|(_, source)| *source)
}

struct RegistryEntry {
    ident: Ident,
    def: Box<Expr>,
    inserted: bool,
}

/// Per-compilation-unit helper registry. Construct one per program; reusing
/// it across units would leak helper state between them.
#[derive(Default)]
pub struct RuntimeRegistry {
    // Registration order; dependencies land before their dependents.
    entries: Vec<(String, RegistryEntry)>,
}

impl RuntimeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, entry)| entry)
    }

    /// Register `source` under `name`. A second registration of the same
    /// name is a no-op.
    pub fn register(
        &mut self,
        namer: &mut UniqueNamer,
        name: &str,
        source: &str,
    ) -> Result<(), TransformError> {
        if self.find(name).is_some() {
            return Ok(());
        }
        let expanded = self.expand(namer, source)?;
        let def = bp_parser::parse_expression(&expanded, &format!("<runtime helper {name}>"))
            .map_err(|e| TransformError::HelperParse {
                name: name.to_string(),
                message: format!("{e:#}"),
            })?;
        let ident = namer.fresh();
        self.entries.push((
            name.to_string(),
            RegistryEntry {
                ident,
                def,
                inserted: false,
            },
        ));
        Ok(())
    }

    /// A reference expression for helper `name`, registering it on first
    /// use from `source` if given, else from the shared pool. A helper
    /// with neither is a pass-author error.
    pub fn get(
        &mut self,
        namer: &mut UniqueNamer,
        name: &str,
        source: Option<&str>,
    ) -> Result<Expr, TransformError> {
        if self.find(name).is_none() {
            let def = source.or_else(|| shared_source(name)).ok_or_else(|| {
                TransformError::UnknownHelper {
                    name: name.to_string(),
                }
            })?;
            self.register(namer, name, def)?;
        }
        match self.find(name) {
            Some(entry) => Ok(Expr::Ident(entry.ident.clone())),
            None => Err(TransformError::UnknownHelper {
                name: name.to_string(),
            }),
        }
    }

    /// Replace each `%name` placeholder with the unique identifier of the
    /// referenced helper, registering shared helpers on first reference.
    /// This runs only over helper definition text, never user source. A
    /// `%` not followed by an identifier, or naming nothing known, is left
    /// as-is for the parser to judge.
    fn expand(
        &mut self,
        namer: &mut UniqueNamer,
        source: &str,
    ) -> Result<String, TransformError> {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
                .unwrap_or(after.len());
            let name = &after[..end];
            if name.is_empty() {
                out.push('%');
                rest = after;
                continue;
            }
            if self.find(name).is_none() {
                if let Some(def) = shared_source(name) {
                    self.register(namer, name, def)?;
                }
            }
            match self.find(name) {
                Some(entry) => out.push_str(&entry.ident.sym),
                None => {
                    out.push('%');
                    out.push_str(name);
                }
            }
            rest = &after[end..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Prepend one `var` statement declaring every helper not yet inserted,
    /// and mark them inserted. Idempotent: a second call with no new
    /// registrations returns the program unchanged.
    pub fn finalize(&mut self, program: Program) -> Program {
        let mut decls = Vec::new();
        for (_, entry) in &mut self.entries {
            if entry.inserted {
                continue;
            }
            entry.inserted = true;
            decls.push(VarDeclarator {
                span: DUMMY_SP,
                name: Pat::Ident(entry.ident.clone().into()),
                init: Some(entry.def.clone()),
                definite: false,
            });
        }
        if decls.is_empty() {
            return program;
        }
        let stmt = Stmt::Decl(Decl::Var(Box::new(VarDecl {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            kind: VarDeclKind::Var,
            declare: false,
            decls,
        })));
        match program {
            Program::Script(mut script) => {
                script.body.insert(0, stmt);
                Program::Script(script)
            }
            Program::Module(mut module) => {
                module.body.insert(0, ModuleItem::Stmt(stmt));
                Program::Module(module)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{emit, parse_script};

    #[test]
    fn registration_is_idempotent() {
        let mut namer = UniqueNamer::new();
        let mut registry = RuntimeRegistry::new();
        registry
            .register(&mut namer, "double", "function(x) { return x * 2; }")
            .unwrap();
        registry
            .register(&mut namer, "double", "function(x) { return x * 3; }")
            .unwrap();
        assert_eq!(registry.entries.len(), 1);

        let finalized = registry.finalize(parse_script("run();"));
        let printed = emit(&finalized);
        assert_eq!(printed.matches("function").count(), 1, "{printed}");
        assert!(printed.contains("x * 2"), "{printed}");
    }

    #[test]
    fn shared_dependencies_register_first_and_substitute() {
        let mut namer = UniqueNamer::new();
        let mut registry = RuntimeRegistry::new();
        let helper = registry.get(&mut namer, "spread", None).unwrap();

        // toObject was pulled in first, so it owns $__0.
        assert_eq!(registry.entries[0].0, "toObject");
        assert_eq!(&*registry.entries[0].1.ident.sym, "$__0");
        assert!(matches!(&helper, Expr::Ident(id) if &*id.sym == "$__1"));

        let finalized = registry.finalize(parse_script("run();"));
        let printed = emit(&finalized);
        assert!(printed.contains("$__0(arguments[i])"), "{printed}");
    }

    #[test]
    fn get_registers_explicit_source_once() {
        let mut namer = UniqueNamer::new();
        let mut registry = RuntimeRegistry::new();
        let first = registry
            .get(&mut namer, "half", Some("function(x) { return x / 2; }"))
            .unwrap();
        let second = registry.get(&mut namer, "half", None).unwrap();
        assert_eq!(emit_expr(&first), emit_expr(&second));
        assert_eq!(registry.entries.len(), 1);
    }

    #[test]
    fn unknown_helper_is_an_internal_error() {
        let mut namer = UniqueNamer::new();
        let mut registry = RuntimeRegistry::new();
        let err = registry.get(&mut namer, "nonsense", None).unwrap_err();
        assert!(matches!(err, TransformError::UnknownHelper { .. }));
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut namer = UniqueNamer::new();
        let mut registry = RuntimeRegistry::new();
        registry.get(&mut namer, "toObject", None).unwrap();

        let once = registry.finalize(parse_script("run();"));
        let printed_once = emit(&once);
        let twice = registry.finalize(once);
        assert_eq!(emit(&twice), printed_once);
    }

    #[test]
    fn finalize_without_entries_leaves_program_alone() {
        let mut registry = RuntimeRegistry::new();
        let program = parse_script("run();");
        let printed = emit(&program);
        assert_eq!(emit(&registry.finalize(program)), printed);
    }

    #[test]
    fn percent_without_identifier_is_left_for_the_parser() {
        let mut namer = UniqueNamer::new();
        let mut registry = RuntimeRegistry::new();
        registry
            .register(&mut namer, "mod", "function(a, b) { return a % b; }")
            .unwrap();
        let finalized = registry.finalize(parse_script("run();"));
        assert!(emit(&finalized).contains("a % b"));
    }

    fn emit_expr(expr: &Expr) -> String {
        match expr {
            Expr::Ident(id) => id.sym.to_string(),
            other => panic!("expected an identifier, got {other:?}"),
        }
    }
}
