//! Deterministic ordering and emission of the dependency report.

use crate::error::DepscopeError;
use crate::graph::ModuleStats;
use crate::package::Package;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A sortable, printable row of the report: package or module granularity.
pub trait ReportRow {
    /// Label used in the human-readable console form.
    const LABEL: &'static str;

    fn key(&self) -> &str;
    fn incoming(&self) -> usize;
    fn outgoing(&self) -> usize;

    /// Whether the row is emitted. Hidden rows still take part in sorting.
    fn visible(&self) -> bool {
        true
    }
}

impl ReportRow for Package {
    const LABEL: &'static str = "package";

    fn key(&self) -> &str {
        &self.id
    }
    fn incoming(&self) -> usize {
        self.incoming
    }
    fn outgoing(&self) -> usize {
        self.outgoing
    }
    fn visible(&self) -> bool {
        !self.ignored
    }
}

impl ReportRow for ModuleStats {
    const LABEL: &'static str = "module";

    fn key(&self) -> &str {
        &self.module
    }
    fn incoming(&self) -> usize {
        self.incoming
    }
    fn outgoing(&self) -> usize {
        self.outgoing
    }
}

/// Order rows by three successive stable sorts: key ascending, then incoming
/// descending, then outgoing descending. Each later pass is the dominant key
/// because stable sorting preserves the relative order of its ties, so the
/// net order is outgoing desc, incoming desc, key asc.
pub fn sort_rows<T: ReportRow>(rows: &mut [T]) {
    rows.sort_by(|a, b| a.key().cmp(b.key()));
    rows.sort_by(|a, b| b.incoming().cmp(&a.incoming()));
    rows.sort_by(|a, b| b.outgoing().cmp(&a.outgoing()));
}

/// Render visible rows in the persisted `<key>:<incoming>:<outgoing>` form,
/// one row per line.
pub fn render_lines<T: ReportRow>(rows: &[T]) -> String {
    let mut out = String::new();
    for row in rows.iter().filter(|r| r.visible()) {
        // writeln! to a String cannot fail
        let _ = writeln!(out, "{}:{}:{}", row.key(), row.incoming(), row.outgoing());
    }
    out
}

/// Print visible rows to stdout in the human-readable console form.
pub fn print_report<T: ReportRow>(rows: &[T]) {
    for row in rows.iter().filter(|r| r.visible()) {
        println!(
            "{}: {}, incoming: {}, outgoing: {}",
            T::LABEL,
            row.key(),
            row.incoming(),
            row.outgoing()
        );
    }
}

/// Persist the delimited report: create-truncate-write-flush, with a trailing
/// blank line kept for diffing across runs. Any I/O error is fatal; a
/// partially written file is not considered valid (and is not removed).
pub fn save_report<T: ReportRow>(rows: &[T], path: &Path) -> Result<(), DepscopeError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_lines(rows).as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(())
}
