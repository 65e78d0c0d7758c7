use std::path::PathBuf;

use anyhow::{Context, Result};
use bp_parser::parse_program;
use bp_transform::{lower_program, LowerOptions};
use clap::{Parser, Subcommand};
use swc_common::{sync::Lrc, SourceMap};
use swc_ecma_ast::{EsVersion, Program};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

#[derive(Parser)]
#[command(name = "bp", about = "backport — compile modern JavaScript down to ES5")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, lower, and emit ES5.
    Compile {
        /// Input .js file.
        input: PathBuf,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Parse the input as a module instead of a classic script.
        #[arg(long)]
        module: bool,
    },
    /// Parse the file and report any syntax errors.
    Check {
        input: PathBuf,
        #[arg(long)]
        module: bool,
    },
    /// Parse and dump the AST.
    Parse {
        input: PathBuf,
        /// Dump as JSON instead of the debug representation.
        #[arg(long)]
        ast: bool,
        #[arg(long)]
        module: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            module,
        } => {
            let source = std::fs::read_to_string(&input)?;
            let filename = input.display().to_string();

            let parsed = parse_program(&source, &filename, module)?;
            let lowered = lower_program(parsed.program, &LowerOptions::default())
                .with_context(|| format!("failed to lower {filename}"))?;

            let output_str = emit_es5(&lowered, parsed.source_map)?;

            match &output {
                Some(path) => std::fs::write(path, &output_str)?,
                None => print!("{output_str}"),
            }
        }
        Commands::Check { input, module } => {
            let source = std::fs::read_to_string(&input)?;
            let filename = input.display().to_string();

            parse_program(&source, &filename, module)?;
            eprintln!("OK: {filename}");
        }
        Commands::Parse { input, ast, module } => {
            let source = std::fs::read_to_string(&input)?;
            let filename = input.display().to_string();

            let parsed = parse_program(&source, &filename, module)?;

            if ast {
                let json = serde_json::to_string_pretty(&parsed.program)?;
                println!("{json}");
            } else {
                println!("{:#?}", parsed.program);
            }
        }
    }

    Ok(())
}

fn emit_es5(program: &Program, source_map: Lrc<SourceMap>) -> Result<String> {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default().with_target(EsVersion::Es5),
            cm: source_map,
            comments: None,
            wr: writer,
        };
        program.emit_with(&mut emitter)?;
    }
    String::from_utf8(buf).context("emitter produced invalid UTF-8")
}
