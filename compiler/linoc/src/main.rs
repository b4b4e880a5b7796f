//! Lino CLI
//!
//! Line-oriented scripting language interpreter.

use linoc::commands::{check_file, lex_file, run_file, CliError};
use linoc::tracing_setup::init_tracing;
use linoc::{parse_run_args, RunConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "run" => {
            let (path, config) = match parse_run_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!("Usage: lino run <file.lino> [-v] [-d] [-t] [--time] [-p]");
                    std::process::exit(1);
                }
            };
            init_tracing(&config);
            run_file(&path, &config)
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: lino check <file.lino>");
                std::process::exit(1);
            }
            init_tracing(&RunConfig::default());
            check_file(&args[2]).map(|count| println!("ok: {count} statements"))
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: lino lex <file.lino>");
                std::process::exit(1);
            }
            init_tracing(&RunConfig::default());
            lex_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" => {
            println!("Lino {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            // A bare `.lino` path runs the file
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lino"))
            {
                let config = RunConfig::default();
                init_tracing(&config);
                run_file(command, &config)
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    };

    if let Err(err) = result {
        report(&err);
        std::process::exit(1);
    }
}

fn report(err: &CliError) {
    eprintln!("Error: {err}");
    if let CliError::Runtime(runtime) = err {
        for site in &runtime.backtrace {
            eprintln!("  called from {site}");
        }
    }
}

fn print_usage() {
    println!("Lino interpreter");
    println!();
    println!("Usage: lino <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.lino>      Run a Lino program");
    println!("  check <file.lino>    Tokenize and link a file (no execution)");
    println!("  lex <file.lino>      Show tokenized statement lines");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  -v, --verbose        Log phase progress");
    println!("  -d, --debug          Pause before each statement");
    println!("  -t, --trace          Trace every executed statement");
    println!("  --time               Print per-statement timings");
    println!("  -p, --dump           Print visible variables after the run");
    println!("  --max-depth=<n>      Limit nested calls");
    println!();
    println!("A bare path ending in .lino is run directly.");
    println!("RUST_LOG overrides the log filter.");
}
