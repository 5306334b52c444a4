use std::{fs::OpenOptions, io, path::Path, sync::Mutex};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

/// The environment variable holding the log filter.
pub const LOG_ENV: &str = "BREATHWORK_LOG";

const DEFAULT_FILTER: &str = "info";

/// Where log lines go.
#[derive(Clone, Copy, Debug)]
pub enum LogTarget<'a> {
    /// Append to a file. Used while the terminal is taken over by the visuals.
    File(&'a Path),
    Stderr,
    /// Don't log at all.
    Disabled,
}

/// Install the global subscriber.
pub fn init(target: LogTarget) -> io::Result<()> {
    match target {
        LogTarget::File(path) => file_subscriber(path, filter())?.init(),
        LogTarget::Stderr => {
            tracing_subscriber::fmt().with_env_filter(filter()).with_target(false).with_writer(io::stderr).init()
        }
        LogTarget::Disabled => (),
    };
    Ok(())
}

/// A subscriber appending plain text lines to the file at `path`, creating it if needed.
fn file_subscriber(path: &Path, filter: EnvFilter) -> io::Result<impl Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish())
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tracing::{debug, info};

    #[test]
    fn file_target_appends_plain_lines() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("breathwork.log");
        fs::write(&path, "earlier run\n").expect("write failed");

        let subscriber = file_subscriber(&path, EnvFilter::new("info")).expect("open failed");
        tracing::subscriber::with_default(subscriber, || {
            info!(breaths = 3, "session completed");
            debug!("filtered out");
        });

        let contents = fs::read_to_string(&path).expect("read failed");
        assert!(contents.starts_with("earlier run\n"));
        assert!(contents.contains("session completed"));
        assert!(contents.contains("breaths=3"));
        assert!(!contents.contains("filtered out"));
        assert!(!contents.contains('\u{1b}'));
    }

    #[test]
    fn file_target_needs_a_writable_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("breathwork.log");
        assert!(file_subscriber(&path, EnvFilter::new("info")).is_err());
    }
}
