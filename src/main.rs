use std::fs;

use clap::Parser;
use numera::run_source;

/// numera is a small calculator language with variables, control flow and
/// user-defined functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treats the input as a path and runs the script found in that file.
    #[arg(short, long)]
    file: bool,

    /// Prints the value of the last statement once the script finishes,
    /// which makes numera usable in pipes.
    #[arg(short, long)]
    result: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if let Err(e) = run_source(&script, args.result) {
        eprintln!("{e}");
    }
}
