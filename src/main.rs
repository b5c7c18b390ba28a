//! tl entry point.

use std::process;

use log::debug;

use tierlist::cli::{self, Cli};
use tierlist::ui::output::{self, Verbosity};

fn main() {
    let cli = Cli::parse_args();

    // RUST_LOG, when set, overrides the level implied by the flags.
    let level = Verbosity::from_flags(cli.quiet, cli.debug).log_level();
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .init();

    debug!(command:? = cli.command; "starting");

    if let Err(err) = cli::run(cli) {
        output::error(format!("{err:#}"));
        process::exit(1);
    }
}
