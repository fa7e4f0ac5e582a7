mod cli;
mod commands;
mod output;

use clap::Parser;
use commands::AppContext;
use log::debug;
use markport::config::Config;
use markport::error::Result;
use markport::messaging::LocalBus;
use markport::responder::BookmarkResponder;
use markport::store::LazyStore;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger; RUST_LOG still wins
    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.version {
        println!("markport {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let mut cfg = if let Some(config_path) = &args.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load()
    };
    args.apply_overrides(&mut cfg);

    let command = cli::build_command(args.command);

    // The store is resolved when the tree is first requested, so count and
    // send work without a detectable browser profile.
    let mut bus = LocalBus::new();
    let source = LazyStore::new(
        cfg.bookmarks_path.as_deref(),
        cfg.browser.as_deref(),
        cfg.profile.as_deref(),
    );
    BookmarkResponder::install(&mut bus, source);

    let ctx = AppContext {
        bus: &bus,
        config: &cfg,
        no_color: args.nc,
    };
    let result = command.execute(&ctx);

    let drained = bus.drain();
    debug!("Joined {} outstanding responder task(s)", drained);

    result
}
