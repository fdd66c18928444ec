use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wfm_client::{Command, Options};
use wfm_http::MatchMode;

/// wfm - Browse and download files from web file manager servers
#[derive(Parser, Debug)]
#[command(name = "wfm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration directory (defaults to $WFM_CONFIG_DIR, then the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Request timeout in seconds; 0 waits forever
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Only nest paths under a parent at `/` boundaries
    #[arg(long, global = true)]
    strict_paths: bool,

    /// Never color output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("WFM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let options = Options {
        config_dir: args.config_dir,
        timeout: (args.timeout > 0).then(|| Duration::from_secs(args.timeout)),
        match_mode: if args.strict_paths {
            MatchMode::Segment
        } else {
            MatchMode::Prefix
        },
        color: !args.no_color && std::io::stdout().is_terminal(),
    };

    match wfm_client::run(options, args.command) {
        Ok(output) => {
            eprint!("{}", output.warnings);
            if !output.display.is_empty() {
                if output.display.ends_with('\n') {
                    print!("{}", output.display);
                } else {
                    println!("{}", output.display);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
