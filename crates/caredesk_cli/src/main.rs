//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `caredesk_core` linkage.
//! - Resolve any paths given as arguments against the destination table.
//! - Start file logging when `CAREDESK_LOG_DIR` names an absolute directory.

use caredesk_core::{init_logging, resolve, LogSettings, Route, ShellConfig};

fn main() {
    println!("caredesk_core ping={}", caredesk_core::ping());
    println!("caredesk_core version={}", caredesk_core::core_version());

    if let Ok(dir) = std::env::var("CAREDESK_LOG_DIR") {
        let started = LogSettings::from_config(&ShellConfig::default(), dir.as_str())
            .and_then(init_logging);
        match started {
            Ok(()) => println!("logging status=ok dir={dir}"),
            Err(err) => eprintln!("logging status=error error={err}"),
        }
    }

    for path in std::env::args().skip(1) {
        let resolution = resolve(path.as_str());
        let status = match &resolution.route {
            Route::NotFound { .. } => "not_found",
            _ if resolution.redirected_from.is_some() => "redirect",
            _ => "ok",
        };
        log::info!("event=cli_resolve module=cli status={status}");
        println!(
            "route path={} status={} target={} title={}",
            path,
            status,
            resolution.route.path(),
            resolution.route.title()
        );
    }
}
