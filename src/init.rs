use std::path::PathBuf;

use crate::config::{self, Config};

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge one or more config files.
pub fn init_config(paths: &[PathBuf]) -> Config {
    let mut config: Option<Config> = None;

    for path in paths {
        log::info!("loading config: {}", path.display());
        match config::read_file(path) {
            Ok(c) => {
                if let Some(ref mut existing) = config {
                    // Merge configs.
                    config::merge(existing, c);
                } else {
                    config = Some(c);
                }
            }
            Err(e) => {
                log::error!("error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    config.unwrap_or_else(|| {
        log::error!("no config files specified");
        std::process::exit(1);
    })
}
