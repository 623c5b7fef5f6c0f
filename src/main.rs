// Gamma batch interpreter
//
// Usage:
//   gamma [--config <path>] < commands.txt
//
// Reads game commands from standard input, prints results on standard
// output and `ERROR <line>` reports on standard error.

use log::{error, info};
use std::env;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process;

use gamma::batch::{BatchInterpreter, SessionEnd};
use gamma::config::{Config, DEFAULT_CONFIG_PATH};
use gamma::debug_logger::DebugLogger;

fn print_usage() {
    eprintln!("Gamma batch interpreter");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  gamma [OPTIONS] < input");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>         Path to Gamma.toml (default: Gamma.toml if present)");
    eprintln!("  --help                  Show this help message");
}

fn load_config(explicit_path: Option<&str>) -> Config {
    match explicit_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: Could not load config from '{}': {}", path, e);
            process::exit(1);
        }),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Config::load_or_default(DEFAULT_CONFIG_PATH)
        }
        None => Config::default_hardcoded(),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" => {
                print_usage();
                process::exit(0);
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = load_config(config_path.as_deref());

    // Results and ERROR reports share the terminal with log output, so only
    // warnings are shown unless RUST_LOG or the config asks for more.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", &config.logging.default_level);
    }

    env_logger::init();

    info!("Starting gamma batch interpreter");

    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
    let mut interpreter = BatchInterpreter::new(config, logger);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = BufWriter::new(stdout.lock());
    let mut err = stderr.lock();

    match interpreter.run(stdin.lock(), &mut out, &mut err) {
        Ok(SessionEnd::EndOfInput) => {}
        Ok(SessionEnd::InteractiveRequested { game, line }) => {
            error!(
                "Line {}: interactive mode for a {}x{} board is not available in this build",
                line,
                game.width(),
                game.height()
            );
            eprintln!("Interactive mode is not available; use batch mode (B) instead.");
            process::exit(1);
        }
        Err(e) => {
            error!("I/O error: {}", e);
            process::exit(1);
        }
    }
}
