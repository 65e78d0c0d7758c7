//! Shared helpers for pass tests: parse snippets, emit trees, and compare
//! programs modulo formatting by printing both through the same emitter.

use swc_common::{sync::Lrc, SourceMap};
use swc_ecma_ast::{EsVersion, Program};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

pub(crate) fn parse_script(source: &str) -> Program {
    bp_parser::parse_program(source, "test.js", false)
        .expect("test source must parse")
        .program
}

pub(crate) fn emit(program: &Program) -> String {
    let source_map: Lrc<SourceMap> = Default::default();
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default().with_target(EsVersion::Es5),
            cm: source_map,
            comments: None,
            wr: writer,
        };
        program.emit_with(&mut emitter).expect("emit cannot fail");
    }
    String::from_utf8(buf).expect("emitter produces UTF-8")
}

/// Parse `source` and print it back, normalizing formatting.
pub(crate) fn norm(source: &str) -> String {
    emit(&parse_script(source))
}

/// Assert two programs print identically.
pub(crate) fn assert_program_eq(actual: &Program, expected_source: &str) {
    assert_eq!(emit(actual).trim(), norm(expected_source).trim());
}
