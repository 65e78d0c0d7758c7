use anyhow::Result;
use swc_common::{
    comments::SingleThreadedComments, errors::Handler, sync::Lrc, FileName, SourceMap,
};
use swc_ecma_ast::{EsVersion, Expr, Program};
use swc_ecma_parser::{EsSyntax, Syntax};

/// Result of parsing one source file.
pub struct ParseResult {
    pub program: Program,
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

/// Parse a JavaScript source string into a program tree.
///
/// `module` selects module parsing; otherwise the source is parsed as a
/// classic script. Diagnostics are emitted to stderr before the error is
/// returned.
pub fn parse_program(source: &str, filename: &str, module: bool) -> Result<ParseResult> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();

    let handler =
        Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let syntax = Syntax::Es(EsSyntax::default());

    let program = if module {
        swc_ecma_parser::parse_file_as_module(
            &source_file,
            syntax,
            EsVersion::latest(),
            Some(&comments),
            &mut vec![],
        )
        .map(Program::Module)
    } else {
        swc_ecma_parser::parse_file_as_script(
            &source_file,
            syntax,
            EsVersion::latest(),
            Some(&comments),
            &mut vec![],
        )
        .map(Program::Script)
    }
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow::anyhow!("failed to parse {filename}")
    })?;

    Ok(ParseResult {
        program,
        comments,
        source_map,
    })
}

/// Parse a single expression, e.g. a runtime helper definition.
///
/// `context` labels the synthetic file in diagnostics. Helper text is
/// developer-authored, so a failure here is an internal error of the
/// compiler, not bad user input.
pub fn parse_expression(source: &str, context: &str) -> Result<Box<Expr>> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(context.to_string())),
        source.to_string(),
    );

    let handler =
        Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    swc_ecma_parser::parse_file_as_expr(
        &source_file,
        Syntax::Es(EsSyntax::default()),
        EsVersion::latest(),
        None,
        &mut vec![],
    )
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow::anyhow!("failed to parse expression in {context}")
    })
}
