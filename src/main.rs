//! Interactive demo for the **tilegrid** engine.
//!
//! Reads one line per iteration from stdin: `q` quits, anything else
//! inserts a window, reflows, and prints every window's state.  This is an
//! external consumer of the core — a stand-in for a compositor's layout
//! manager.

use log::{error, info};
use std::io::BufRead;
use tilegrid::config::Config;
use tilegrid::engine::GridLayoutEngine;

/// Resolve the config directory (`$XDG_CONFIG_HOME/tilegrid`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("tilegrid")
}

/// Try to load the config from `$XDG_CONFIG_HOME/tilegrid/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();
    let mut engine = match GridLayoutEngine::new(config.grid.rows, config.grid.cols) {
        Ok(engine) => engine.with_overflow_policy(config.grid.overflow),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    println!("****Grid layout testing program****");
    println!("grid: {}", engine.dims());

    // The insertion count is tracked here, not read back from the engine:
    // reflow treats the caller's count as authoritative.
    let mut count = 0usize;

    let stdin = std::io::stdin();
    loop {
        println!("Press any key to simulate inserting a new window...(press q to quit)");
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("stdin error: {}", e);
                break;
            }
        }
        if line.trim() == "q" {
            println!("exiting...");
            break;
        }

        match engine.insert() {
            Ok(_) => {
                count += 1;
                engine.reflow(count);
            }
            Err(e) => {
                println!("maximum windows reached ({})", e);
                continue;
            }
        }

        println!("****Windows status:****");
        for window in engine.windows() {
            println!("{}", window);
        }
        println!("****Windows status end****");
    }
}
