//! CLI entry point for the fiscsim simulator binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;

use fisc_core::DEFAULT_CYCLE_BUDGET;
use fisc_sim::loader::load_program;
use fisc_sim::runner::run_program;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: fiscsim <object file> [cycles] [-d]

Options:
  -d          Print a disassembly listing with each cycle
  -h, --help  Show this help message

If cycles are unspecified the CPU will run for 20 cycles.
";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    object: PathBuf,
    cycles: u32,
    disassembly: bool,
}

#[derive(Debug)]
enum ParseResult {
    Args(CliArgs),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut object: Option<PathBuf> = None;
    let mut cycles: Option<u32> = None;
    let mut disassembly = false;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "-d" {
            disassembly = true;
            continue;
        }

        if object.is_none() {
            object = Some(PathBuf::from(arg));
            continue;
        }

        let text = arg.to_string_lossy();
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if cycles.is_some() {
                return Err("too many arguments".to_string());
            }
            cycles = text
                .parse()
                .map(Some)
                .map_err(|_| format!("cycle count out of range: {text}"))?;
        } else {
            return Err(format!("unknown parameter: {text}"));
        }
    }

    let object = object.ok_or_else(|| "missing object file path".to_string())?;

    Ok(ParseResult::Args(CliArgs {
        object,
        cycles: cycles.unwrap_or(DEFAULT_CYCLE_BUDGET),
        disassembly,
    }))
}

fn run(args: &CliArgs) -> Result<(), i32> {
    let text = match fs::read_to_string(&args.object) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot open {}: {e}", args.object.display());
            return Err(1);
        }
    };

    let program = match load_program(&text) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    let stdout = io::stdout();
    if let Err(e) = run_program(&program, args.cycles, args.disassembly, stdout.lock()) {
        eprintln!("error: {e}");
        return Err(1);
    }

    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Args(args)) => match run(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
