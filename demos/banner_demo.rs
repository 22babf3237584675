//! Shows the startup banner holding back concurrent log lines.
//!
//! ```sh
//! cargo run --example banner_demo
//! ```

use std::time::Duration;
use vix_utils::banner::{emit_server_ready, ServerReadyInfo};
use vix_utils::core::console_sync;
use vix_utils::prelude::*;

fn main() {
    let log = Logger::global();
    log.set_level(LogLevel::Debug);
    console_sync::set_console_sync(true);

    // Hammer the logger from background threads while the banner prints.
    let workers: Vec<_> = (0..4)
        .map(|id| {
            std::thread::spawn(move || {
                let log = Logger::global();
                log.set_context(Context::new().with_module(format!("worker-{}", id)));
                for i in 0..5 {
                    log.info(format!("worker {} tick {}", id, i));
                    std::thread::sleep(Duration::from_millis(3));
                }
            })
        })
        .collect();

    let info = ServerReadyInfo {
        version: "vix 1.16.1".to_string(),
        ready_ms: 128,
        config_path: "./config.json".to_string(),
        threads: 4,
        max_threads: 8,
        ..ServerReadyInfo::default()
    };
    emit_server_ready(&info);

    for worker in workers {
        let _ = worker.join();
    }
    let _ = log.flush();
}
