//! Output handling for the CLI.
//!
//! Results go to stdout, either as plain text or as pretty-printed JSON.
//! Diagnostics go through `log` and land on stderr.
//!
//! Every write is checked, so a closed stdout (e.g. `mentions stats | head -0`)
//! surfaces as an error instead of a panic.

use mentions_core::{CorpusConfig, MentionStats, SyncReport};
use serde::Serialize;
use std::io::{self, Write};

/// Text or JSON writer for command results.
#[derive(Debug, Default)]
pub struct OutputHandler {
    json: bool,
}

impl OutputHandler {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn write_json<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(out, "{}", text)?;
        out.flush()
    }

    pub fn emit_stats(&self, stats: &MentionStats) -> io::Result<()> {
        self.write_stats(&mut io::stdout().lock(), stats)
    }

    fn write_stats<W: Write>(&self, out: &mut W, stats: &MentionStats) -> io::Result<()> {
        if self.json {
            return self.write_json(out, stats);
        }
        writeln!(out, "{}", stats)?;
        out.flush()
    }

    /// A sorted list of paths or titles, one per line in text mode.
    pub fn emit_list(&self, items: &[String]) -> io::Result<()> {
        self.write_list(&mut io::stdout().lock(), items)
    }

    fn write_list<W: Write>(&self, out: &mut W, items: &[String]) -> io::Result<()> {
        if self.json {
            return self.write_json(out, &items);
        }
        for item in items {
            writeln!(out, "{}", item)?;
        }
        out.flush()
    }

    pub fn emit_report(&self, report: &SyncReport) -> io::Result<()> {
        self.write_report(&mut io::stdout().lock(), report)
    }

    fn write_report<W: Write>(&self, out: &mut W, report: &SyncReport) -> io::Result<()> {
        if self.json {
            return self.write_json(out, report);
        }
        writeln!(out, "{}", report)?;
        for path in &report.changed {
            writeln!(out, "changed: {}", path)?;
        }
        for path in &report.affected {
            writeln!(out, "affected: {}", path)?;
        }
        out.flush()
    }

    pub fn emit_config(&self, config: &CorpusConfig) -> io::Result<()> {
        self.write_config(&mut io::stdout().lock(), config)
    }

    fn write_config<W: Write>(&self, out: &mut W, config: &CorpusConfig) -> io::Result<()> {
        if self.json {
            return self.write_json(out, config);
        }
        for field in CorpusConfig::list_fields() {
            if let Some(value) = config.get_field(field) {
                writeln!(out, "{} = {}", field, value)?;
            }
        }
        out.flush()
    }
}
