//! IPPcode24 CLI: check, list and run programs.
//!
//! Exit codes:
//! - 0-9: Program finished (EXIT code, or 0 when it ran off the end)
//! - 10: Bad command-line arguments
//! - 11: Unreadable source or input file
//! - 12: Output failure
//! - 21-23: Source text errors (header, opcode, syntax)
//! - 32-58: Build and runtime errors
//! - 99: Internal error

mod commands;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(10);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "list" => commands::list(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(10);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Diagnostics go to stderr; stdout belongs to the program. `RUST_LOG`
/// overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_usage() {
    eprintln!("Usage: ippcode <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <source> [--input <file>]   Execute a program");
    eprintln!("  check <source>                  Parse and build without executing");
    eprintln!("  list <source> [--source]        Print the program in execution order");
    eprintln!();
    eprintln!("<source> may be '-' to read the program from stdin.");
}
