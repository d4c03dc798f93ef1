mod profile;

use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "sitepro";
}

fn build_parser() -> Command {
    profile::cli::create_profile_cli(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
}

///
/// Install the log formatter. `RUST_LOG` wins over the verbosity flags.
///
fn init_logging(matches: &ArgMatches) {
    let level = match (matches.get_flag("quiet"), matches.get_count("verbose")) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let mut app = build_parser();
    let matches = app.clone().get_matches();

    if !profile::handlers::has_inputs(&matches) {
        app.print_help()?;
        std::process::exit(2);
    }

    init_logging(&matches);

    profile::handlers::run_profile(&matches)?;

    Ok(())
}
