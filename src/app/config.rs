use std::{path::PathBuf, time::Duration};

/// Runtime settings, from command-line arguments or defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Maze width in cells. Prompted for when missing.
    pub width: Option<i32>,
    /// Maze height in cells. Prompted for when missing.
    pub height: Option<i32>,
    /// Seed for maze generation, for reproducible mazes
    pub seed: Option<u64>,
    /// Time between two steps of an automated search
    pub tick_interval: Duration,
    /// Directory of the log file. The terminal itself is taken by the game.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            seed: None,
            tick_interval: Duration::from_millis(100),
            log_dir: std::env::temp_dir(),
        }
    }
}

impl AppConfig {
    pub const USAGE: &'static str =
        "Usage: treemaze [WIDTH HEIGHT [SEED]] [--tick-ms MILLIS] [--log-dir DIR]";

    /// Parses arguments, not including the executable name.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut config = AppConfig::default();
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--tick-ms" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "--tick-ms needs a value".to_string())?;
                    let millis = value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid tick interval: {}", value))?;
                    // A zero interval would spin the input poll
                    config.tick_interval = Duration::from_millis(millis.max(1));
                }
                "--log-dir" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "--log-dir needs a value".to_string())?;
                    config.log_dir = PathBuf::from(value);
                }
                _ => positional.push(arg),
            }
        }

        let parse_dimension = |s: &String| {
            s.parse::<i32>()
                .map_err(|_| format!("Invalid maze dimension: {}", s))
        };
        match positional.as_slice() {
            [] => {}
            [width, height, rest @ ..] if rest.len() <= 1 => {
                config.width = Some(parse_dimension(width)?);
                config.height = Some(parse_dimension(height)?);
                if let Some(seed) = rest.first() {
                    config.seed = Some(
                        seed.parse::<u64>()
                            .map_err(|_| format!("Invalid seed: {}", seed))?,
                    );
                }
            }
            _ => return Err(format!("Unexpected arguments: {}", positional.join(" "))),
        }
        Ok(config)
    }
}
