use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use treemaze::app::{App, AppConfig};

/// Log to a file, since the terminal belongs to the game.
/// Set `DEBUG=1` to include every step of the game in the log.
fn init_logging(log_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(log_dir, "treemaze.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let level = match std::env::var("DEBUG") {
        Ok(val) if val == "1" => tracing::Level::DEBUG,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("{}", AppConfig::USAGE);
            std::process::exit(2);
        }
    };
    // Keep the guard alive so buffered logs are flushed on exit
    let _guard = init_logging(&config.log_dir);

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::new(config).run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!("App exited with error: {}", e);
    }
    result
}
