//! Demo command implementation.

use serde::Serialize;
use std::io::Write;
use strbuf_core::{appendf, StrBufResult, StringBuilder};
use tracing::debug;

/// Snapshot of the builder after the demo ran.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    /// Built content.
    pub content: String,
    /// Content length in bytes.
    pub len: usize,
    /// Allocated capacity in bytes.
    pub capacity: usize,
}

/// Appends three characters, a literal and a formatted sum line.
pub fn build(sb: &mut StringBuilder, lhs: i64, rhs: i64) -> StrBufResult<()> {
    sb.append_char(b'w')?;
    sb.append_char(b'a')?;
    sb.append_char(b't')?;
    sb.append_str("!\n")?;
    appendf!(sb, "{} + {} = {}\n", lhs, rhs, i128::from(lhs) + i128::from(rhs))
}

/// Runs the demo command.
pub fn run(lhs: i64, rhs: i64, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut sb = StringBuilder::new();
    build(&mut sb, lhs, rhs)?;
    debug!(len = sb.len(), capacity = sb.capacity(), "built demo string");

    if format == "json" {
        let report = DemoReport {
            content: sb.to_string_lossy().into_owned(),
            len: sb.len(),
            capacity: sb.capacity(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(sb.as_bytes())?;
        stdout.flush()?;
    }

    sb.release();
    Ok(())
}
