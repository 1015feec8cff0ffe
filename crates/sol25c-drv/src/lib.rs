//! sol25c-drv - Compiler driver.
//!
//! The driver owns everything outside the pipeline proper: command-line
//! interpretation, reading the source from standard input, running the
//! phases in order, writing the XML document to standard output, and
//! mapping every outcome to a process exit code. Nothing reaches standard
//! output unless all phases succeed.

pub mod logging;

use std::io::{self, Read, Write};
use std::panic;

use anyhow::Context;
use log::debug;

use sol25c_util::{codes, Result};

/// Interpret `args` (without the program name) and run.
///
/// Returns the process exit code: `0` on success or after `-h`/`--help`,
/// `10` for any other argument shape, and the documented codes for input,
/// output, and pipeline failures.
pub fn run(args: &[String]) -> i32 {
    match args {
        [] => {},
        [flag] if flag == "-h" || flag == "--help" => {
            // the process exits right after this, so flush explicitly
            return match write_stdout_raw(usage()) {
                Ok(()) => codes::OK,
                Err(err) => {
                    eprintln!("error: {err:#}");
                    codes::OPEN_OUTPUT
                },
            };
        },
        _ => {
            eprintln!("error: invalid arguments, try 'sol25c --help'");
            return codes::MISSING_PARAM;
        },
    }

    let source = match read_stdin() {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err:#}");
            return codes::OPEN_INPUT;
        },
    };

    // A panic inside the pipeline is a compiler bug, not a user error.
    match panic::catch_unwind(|| compile(&source)) {
        Ok(Ok(xml)) => match write_stdout(&xml) {
            Ok(()) => codes::OK,
            Err(err) => {
                eprintln!("error: {err:#}");
                codes::OPEN_OUTPUT
            },
        },
        Ok(Err(diagnostic)) => {
            eprintln!("{diagnostic}");
            diagnostic.exit_code()
        },
        Err(_) => {
            eprintln!("internal error: unexpected panic in the compiler pipeline");
            codes::INTERNAL
        },
    }
}

/// Run the pipeline over `source`: tokens, AST, semantic checks, XML.
/// The first failing phase short-circuits.
pub fn compile(source: &str) -> Result<String> {
    let tokens = sol25c_lex::tokenize(source)?;
    debug!("lexed {} tokens", tokens.len());

    let program = sol25c_par::parse(tokens)?;
    debug!(
        "parsed {} classes{}",
        program.classes.len(),
        if program.description.is_some() {
            " (with description)"
        } else {
            ""
        }
    );

    sol25c_sem::analyze(&program)?;
    debug!("semantic analysis passed");

    Ok(sol25c_xml::emit(&program))
}

fn usage() -> &'static str {
    "Usage: sol25c [-h | --help]\n\
     \n\
     Reads SOL25 source code from standard input, performs lexical,\n\
     syntactic, and semantic analysis, and writes an XML rendition of the\n\
     abstract syntax tree to standard output.\n"
}

fn read_stdin() -> anyhow::Result<String> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("failed to read standard input")?;
    Ok(source)
}

fn write_stdout(xml: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(xml.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
        .context("failed to write standard output")?;
    Ok(())
}

fn write_stdout_raw(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write standard output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sol25c_util::ErrorKind;

    #[test]
    fn test_compile_minimal_program() {
        let xml = compile("class Main : Object { run [|]}").unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.ends_with("</program>"));
    }

    #[test]
    fn test_compile_error_kinds_per_phase() {
        assert_eq!(
            compile("class Main : Object { run [| x := @. ]}").unwrap_err().kind,
            ErrorKind::Lexical
        );
        assert_eq!(
            compile("class Main : Object { run [| }").unwrap_err().kind,
            ErrorKind::Syntactic
        );
        assert_eq!(
            compile("class Foo : Object { run [|]}").unwrap_err().kind,
            ErrorKind::MissingMain
        );
    }

    #[test]
    fn test_run_rejects_extra_arguments() {
        assert_eq!(run(&["input.sol25".to_string()]), codes::MISSING_PARAM);
        assert_eq!(
            run(&["-h".to_string(), "extra".to_string()]),
            codes::MISSING_PARAM
        );
    }

    #[test]
    fn test_usage_mentions_binary() {
        assert!(usage().contains("sol25c"));
    }
}
