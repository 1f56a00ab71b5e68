use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use teller::console::{Console, LineConsole};
use teller::display;
use teller::ledger::Bank;

#[derive(Parser)]
#[command(version, about = "Transaction console for a small in-memory bank")]
struct CliArgs {
    /// Run the commands in this file instead of reading the terminal
    script: Option<PathBuf>,
    /// Name of the bank; asked on startup when missing
    #[arg(short, long)]
    bank: Option<String>,
    /// Print the ledger as JSON once the session is over
    #[arg(long)]
    dump: bool,
    #[arg(short, long, requires = "dump")]
    pretty: bool,
    /// A level for this program's logs, or a full tracing filter directive
    #[arg(long, env = "TELLER_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&args.log_level)?)
        .with_writer(io::stderr)
        .init();

    let bank = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Cannot open script {}: {}", path.display(), e))?;
            let mut console = LineConsole::new(BufReader::new(file), io::stdout()).echoing();
            session(args.bank, &mut console)?
        }
        None => {
            let mut console = LineConsole::new(io::stdin().lock(), io::stdout());
            session(args.bank, &mut console)?
        }
    };

    if let Some(bank) = bank.filter(|_| args.dump) {
        let json = if args.pretty {
            serde_json::to_string_pretty(&bank)?
        } else {
            serde_json::to_string(&bank)?
        };
        println!("{json}");
    }

    Ok(())
}

/// A bare level such as `debug` applies to this program's own targets;
/// anything else is taken as an `EnvFilter` directive.
fn log_filter(level: &str) -> Result<EnvFilter, ParseError> {
    if level.contains(['=', ',']) {
        EnvFilter::try_new(level)
    } else {
        EnvFilter::try_new(format!("teller={level},ami={level}"))
    }
}

/// Opens the bank and serves commands until the user leaves. `None` when the
/// input ends before the bank has a name.
fn session(name: Option<String>, console: &mut impl Console) -> io::Result<Option<Bank>> {
    console.write_line(display::ICON)?;
    let name = match name {
        Some(name) => name,
        None => match console.read_line("\tEnter Bank name: ")? {
            Some(name) => name.trim().to_string(),
            None => return Ok(None),
        },
    };
    console.write_line(display::HEADER)?;

    let mut bank = Bank::new(name);
    teller::run(&mut bank, console)?;
    Ok(Some(bank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter() {
        let bare = log_filter("debug").unwrap().to_string();
        assert!(bare.contains("teller=debug"));
        assert!(bare.contains("ami=debug"));

        let directive = log_filter("teller=trace").unwrap().to_string();
        assert!(directive.contains("teller=trace"));
        assert!(!directive.contains("teller=teller"));

        assert!(log_filter("teller=loud").is_err());
    }
}
