use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use cscan::{
    errors::errors::ConsoleSink,
    lexer::lexer::Scanner,
    render_error,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Scan a C-subset source file and print its tokens.
#[derive(Parser, Debug)]
#[command(name = "cscan", version)]
struct Args {
    /// Source file to scan.
    file: PathBuf,

    /// Exit with a non-zero status if any scan error was reported.
    #[arg(long)]
    fail_on_error: bool,

    /// Only report diagnostics, do not print tokens.
    #[arg(short, long)]
    quiet: bool,
}

/// `CSCAN_LOG` takes precedence over `RUST_LOG`; both use the `RUST_LOG` syntax.
fn init_tracing() {
    let filter = match std::env::var("CSCAN_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let file_name = args.file.display().to_string();
    let mut scanner = match Scanner::open(&args.file, ConsoleSink::new(file_name.clone())) {
        Ok(scanner) => scanner,
        Err(error) => {
            eprintln!("{}", render_error(&error, &file_name));
            return ExitCode::FAILURE;
        }
    };

    let mut count = 0usize;
    loop {
        match scanner.next_token() {
            Ok(token) if token.is_eof() => break,
            Ok(token) => {
                count += 1;
                if !args.quiet {
                    println!("{}", token);
                }
            }
            Err(e) => {
                error!(error = %e, "scan aborted");
                eprintln!("{}", render_error(&e, &file_name));
                return ExitCode::FAILURE;
            }
        }
    }

    let reported = scanner.sink().reported();
    debug!(tokens = count, errors = reported, "scan finished");

    if args.fail_on_error && reported > 0 {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
