//! Logging setup.
//!
//! Two sinks share one `tracing` registry:
//! - the console, filtered by `RUST_LOG` (default `info`);
//! - an optional JSON Lines audit file that records everything at DEBUG and
//!   above, one object per event.

use crate::config::AuditConfig;
use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Open the audit file for appending.
fn open_audit(audit: &AuditConfig) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&audit.path)
}

/// Install the global subscriber.
pub fn init(audit: Option<&AuditConfig>) -> anyhow::Result<()> {
    let console = fmt::layer().with_target(true).with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    let audit_layer = match audit {
        Some(audit) => {
            let file = open_audit(audit)?;
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(audit_layer)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn audit_file_is_appended_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let audit = AuditConfig {
            path: dir.path().join("session.jsonl"),
        };

        writeln!(open_audit(&audit).unwrap(), "{{\"first\":1}}").unwrap();
        writeln!(open_audit(&audit).unwrap(), "{{\"second\":2}}").unwrap();

        let contents = std::fs::read_to_string(&audit.path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
