use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use vitrina::catalog::{JsonCatalog, MemoryCatalog, ProductSource};
use vitrina::config::Config;
use vitrina::logging::{LogConfig, init_logging};
use vitrina::routing::{Location, MemoryHistory};
use vitrina::terminal::Terminal;
use vitrina::{Runtime, Storefront};

/// Terminal storefront with URL-synchronized product search.
#[derive(Debug, Parser)]
#[command(name = "vitrina", version)]
struct Args {
    /// JSON array of products. The bundled demo catalog is used when omitted.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Location to open, such as `/products?q=phone`.
    #[arg(long, value_name = "URL", default_value = "/")]
    route: String,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_config = LogConfig::from_verbosity(args.verbose).with_log_file(args.log_file.clone());
    if let Err(err) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "storefront failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> vitrina::Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let location = Location::parse(&args.route)?;
    info!(route = %location, "starting storefront");

    match args.catalog {
        Some(path) => serve(&config, JsonCatalog::new(path), location),
        None => serve(&config, MemoryCatalog::demo()?, location),
    }
}

fn serve<S: ProductSource>(config: &Config, source: S, location: Location) -> vitrina::Result<()> {
    let storefront = Storefront::new(config, source, MemoryHistory::new(location))?;
    let terminal = Terminal::new()?;
    Runtime::new(storefront, terminal).run()?;
    Ok(())
}
