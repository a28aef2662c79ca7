/* 📖 # Why is the CLI minimal and hardcoded?

The binary takes no arguments. It looks for `integer_server.toml` in the current directory
(running without one is fine, defaults apply), starts the HTTP server and serves until the
process is killed. Logging is controlled through `RUST_LOG`.

Exit codes:
- 1: startup failed (tracing, configuration or binding the socket)
- otherwise the process runs until it is stopped
*/

use std::env;
use std::process;
use std::thread;
use std::time::Duration;

use integer_base::tracing::{error, info, init_tracing};
use integer_base::{FilePath, IntegerResult, PalHandle, RealPal, ResultExt};
use integer_engine::{CONFIG_FILE_NAME, CacheHandle, load_config, start_api_server};

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run() {
        error!(error = ?e, "Integer server failed to start");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> IntegerResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| integer_base::err!("Failed to get current directory: {}", e))?;
    let pal = PalHandle::new(RealPal::new(current_dir));

    let config = load_config(&pal, &FilePath::from(CONFIG_FILE_NAME))
        .with_context(|| format!("Failed to load config from {}", CONFIG_FILE_NAME))?;

    let handle = start_api_server(&pal, &config, CacheHandle::default())?;
    info!(port = handle.port(), "Press Ctrl+C to stop");

    while !handle.is_shutdown() {
        thread::park_timeout(Duration::from_secs(1));
    }
    info!("Integer server stopped");
    Ok(())
}
