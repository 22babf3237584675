//! Structured logging walkthrough: context, formats, delivery modes.
//!
//! ```sh
//! VIX_LOG_LEVEL=debug VIX_LOG_FORMAT=json cargo run --example log_demo
//! ```

use vix_utils::env::{env_bool, env_int, env_or};
use vix_utils::prelude::*;
use vix_utils::uuid::uuid4;

fn main() {
    let log = Logger::global();

    let async_mode = env_bool("VIX_LOG_ASYNC", true);
    log.set_async(async_mode);

    log.set_context(
        Context::new()
            .with_request_id(uuid4())
            .with_module("log_demo")
            .with_field("service", "utils")
            .with_field("env", env_or("APP_ENV", "dev")),
    );

    log.info("Hello from the log demo");
    log.debug(format!("debug enabled = {}", log.enabled(LogLevel::Debug)));

    log.log_structured(
        LogLevel::Info,
        "Boot args",
        &[
            ("port", env_int("APP_PORT", 8080).into()),
            ("async", async_mode.into()),
        ],
    );

    log.warn("This is a warning");

    if let Err(e) = checked_step(log) {
        log.log_module("log_demo", LogLevel::Info, format!("step aborted: {}", e));
    }

    if let Err(e) = log.flush() {
        eprintln!("flush failed: {}", e);
    }
    log.clear_context();
}

fn checked_step(log: &Logger) -> Result<()> {
    Err(log.fail("demo error: something went wrong"))
}
