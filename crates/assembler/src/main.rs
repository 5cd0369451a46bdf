//! CLI entry point for the fiscas assembler binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use fisc_asm::assembler::{assemble_source, render_listing};
use fisc_core as _;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: fiscas <source file> <object file> [-l]

Options:
  -l          Print the listing after a successful assembly
  -h, --help  Show this help message

Examples:
  fiscas program.fisc program.hex
  fiscas program.fisc program.hex -l
";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    source: PathBuf,
    object: PathBuf,
    listing: bool,
}

#[derive(Debug)]
enum ParseResult {
    Args(CliArgs),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut listing = false;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "-l" {
            listing = true;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        positional.push(PathBuf::from(arg));
    }

    if positional.len() > 2 {
        return Err("too many arguments".to_string());
    }

    let (object, source) = match (positional.pop(), positional.pop()) {
        (Some(object), Some(source)) => (object, source),
        _ => return Err("missing source and object file paths".to_string()),
    };

    Ok(ParseResult::Args(CliArgs {
        source,
        object,
        listing,
    }))
}

fn run(args: &CliArgs) -> Result<(), i32> {
    let source = match fs::read_to_string(&args.source) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot open {}: {e}", args.source.display());
            return Err(1);
        }
    };

    let output = match assemble_source(&source) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    if let Err(e) = fs::write(&args.object, output.object_text()) {
        eprintln!("error: failed to write {}: {e}", args.object.display());
        return Err(1);
    }

    if args.listing {
        print!("{}", render_listing(&output));
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
