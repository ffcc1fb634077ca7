//! Global logger setup.
//!
//! Called once at the top of `main`. Level comes from `RUST_LOG` and
//! defaults to `info`; output goes to stderr so command output on stdout
//! stays machine-readable.

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

pub fn init() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let result = Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Failed to apply logger configuration: {}", e);
    }
}
