//! ATM Ledger CLI
//!
//! Replays a CSV script of account operations through a single terminal and
//! prints the final account states.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > accounts.csv
//! cargo run -- --history            # built-in demo, plus transaction history
//! cargo run -- script.csv --journal journal.csv --sequential
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` to see every logged transaction, `debug` for
//!   terminal decisions, `warn` for skipped rows

use atm_ledger::{CsvJournal, Ledger, LedgerError, Result, Terminal};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[derive(Default)]
struct Options {
    script: Option<String>,
    journal: Option<String>,
    history: bool,
    sequential: bool,
}

fn parse_args() -> Result<Options> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--history" => options.history = true,
            "--sequential" => options.sequential = true,
            "--journal" => {
                let path = args.next().ok_or_else(|| {
                    LedgerError::Usage("--journal requires a file path".to_string())
                })?;
                options.journal = Some(path);
            }
            _ if options.script.is_none() => options.script = Some(arg),
            _ => return Err(LedgerError::Usage(format!("unexpected argument '{arg}'"))),
        }
    }

    Ok(options)
}

fn run() -> Result<()> {
    let options = parse_args()?;

    let mut ledger =
        Ledger::new(Terminal::new("Delhi", "ATM001")).with_sequential_ids(options.sequential);

    if let Some(path) = &options.journal {
        let journal = CsvJournal::new(File::create(path)?);
        ledger.terminal_mut().register_logger(Box::new(journal));
    }

    match &options.script {
        Some(path) => {
            let file = File::open(path)?;
            ledger.run_script(BufReader::new(file))?;
        }
        None => ledger.run_demo()?,
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    ledger.write_summary(&mut handle)?;
    if options.history {
        writeln!(handle)?;
        ledger.write_history(&mut handle)?;
    }

    Ok(())
}
