use std::env;
use std::io;
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Keeps the file writer flushing until process exit
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

const DEFAULT_LOG_FILE: &str = "logs/moondrive.log";

/// Split a log path into the rolling appender's directory and file prefix
fn split_log_path(log_path: &str) -> (&Path, &Path) {
    let path = Path::new(log_path);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file = path.file_name().map(Path::new).unwrap_or(Path::new("moondrive.log"));
    (dir, file)
}

pub fn init() {
    // Env filter: use RUST_LOG or default to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Console (stderr) layer with file/line
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    // MOONDRIVE_LOG_FILE=path/to/file.log, rotated daily
    let log_path = env::var("MOONDRIVE_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let (dir, file) = split_log_path(&log_path);
    let (nb_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file));
    let _ = FILE_GUARD.set(guard);

    let file_layer = fmt::layer()
        .with_writer(nb_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    // Hook panics to log with backtrace
    std::panic::set_hook(Box::new(|info| {
        let mut msg = String::new();
        if let Some(loc) = info.location() {
            msg.push_str(&format!("panic at {}:{}:{} ", loc.file(), loc.line(), loc.column()));
        }
        if let Some(s) = info.payload().downcast_ref::<&str>() {
            msg.push_str(s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            msg.push_str(s);
        } else {
            msg.push_str("<non-string panic>");
        }
        let bt = std::backtrace::Backtrace::force_capture();
        tracing::error!("{}\nBacktrace:\n{:?}", msg, bt);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_splits_into_dir_and_prefix() {
        assert_eq!(split_log_path("logs/moondrive.log"), (Path::new("logs"), Path::new("moondrive.log")));
        assert_eq!(split_log_path("run.log"), (Path::new("."), Path::new("run.log")));
    }
}
