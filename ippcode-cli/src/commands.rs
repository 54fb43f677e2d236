//! CLI command implementations.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read};

use ippcode_common::Program;
use ippcode_vm::{Halt, LineInput, WriterOutput};
use tracing::debug;

/// Parse, build and execute a program.
pub fn run(args: &[String]) -> Result<(), i32> {
    let (source, input_path) = match args {
        [source] => (source, None),
        [source, flag, path] if flag == "--input" => (source, Some(path)),
        _ => {
            eprintln!("error: run requires a source file");
            eprintln!("Usage: ippcode run <source> [--input <file>]");
            return Err(10);
        }
    };

    let program = load_program(source)?;

    let reader: Box<dyn BufRead> = match input_path {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                eprintln!("error: cannot read '{path}': {e}");
                11
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let mut input = LineInput::new(reader);
    let mut output = WriterOutput::new(BufWriter::new(io::stdout().lock()));

    match ippcode_vm::run(&program, &mut input, &mut output) {
        Ok(Halt::Completed) | Ok(Halt::Exit(0)) => Ok(()),
        Ok(halt) => Err(halt.code()),
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(e.exit_code())
        }
    }
}

/// Parse and build only.
pub fn check(args: &[String]) -> Result<(), i32> {
    let [source] = args else {
        eprintln!("error: check requires a source file");
        eprintln!("Usage: ippcode check <source>");
        return Err(10);
    };

    let program = load_program(source)?;
    println!(
        "OK: {source} ({} instructions, {} labels)",
        program.len(),
        program.labels.len()
    );
    Ok(())
}

/// Print the built program: an indexed listing, or canonical source text
/// with `--source`.
pub fn list(args: &[String]) -> Result<(), i32> {
    let (source, as_source) = match args {
        [source] => (source, false),
        [source, flag] if flag == "--source" => (source, true),
        _ => {
            eprintln!("error: list requires a source file");
            eprintln!("Usage: ippcode list <source> [--source]");
            return Err(10);
        }
    };

    let program = load_program(source)?;
    if as_source {
        print!("{}", ippcode_assembler::render(&program));
    } else {
        for (index, instr) in program.instructions.iter().enumerate() {
            println!("{index:>5}  {:>5}  {instr}", instr.order);
        }
    }
    Ok(())
}

/// Read, assemble and build. `-` reads the source from stdin.
fn load_program(source: &str) -> Result<Program, i32> {
    let text = read_source(source).map_err(|e| {
        eprintln!("error: cannot read '{source}': {e}");
        11
    })?;

    let records = ippcode_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        e.exit_code()
    })?;

    let program = Program::build(records).map_err(|e| {
        eprintln!("error: {e}");
        e.exit_code()
    })?;

    debug!(
        source,
        instructions = program.len(),
        labels = program.labels.len(),
        "program loaded"
    );
    Ok(program)
}

fn read_source(source: &str) -> io::Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(source)
    }
}
