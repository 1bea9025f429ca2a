//! Replacement bookkeeping and report rendering

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

const DESCRIPTION_WIDTH: usize = 25;
const VALUE_WIDTH: usize = 50;

/// One distinct replacement performed during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub description: String,
    pub find: String,
    pub replace: String,
    pub occurrences: usize,
}

/// Tracks which raw values have been processed and accumulates one report
/// entry per distinct replacement, in application order.
#[derive(Debug, Default)]
pub struct ReplacementLedger {
    replaced: HashSet<String>,
    entries: Vec<ReplacementEntry>,
}

impl ReplacementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `raw` was already processed this run.
    pub fn seen(&self, raw: &str) -> bool {
        self.replaced.contains(raw)
    }

    /// Marks `raw` as processed, whether or not it was actually replaced.
    pub fn mark_seen(&mut self, raw: impl Into<String>) {
        self.replaced.insert(raw.into());
    }

    /// Replaces every literal occurrence of `find` in `text` and records
    /// one report entry. Identical find/replace pairs are dropped without
    /// a record.
    pub fn replace(&mut self, text: &mut String, find: &str, replace: &str, description: &str) {
        if find == replace {
            info!("find and replace for {description} had identical argument {find}, ignoring");
            return;
        }

        // Count on the text as it stood before the substitution.
        let occurrences = text.matches(find).count();
        *text = text.replace(find, replace);

        self.entries.push(ReplacementEntry {
            description: description.to_string(),
            find: find.to_string(),
            replace: replace.to_string(),
            occurrences,
        });
    }

    pub fn entries(&self) -> &[ReplacementEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ReplacementEntry> {
        self.entries
    }
}

/// Renders the column-aligned replacement report, one line per entry.
pub fn render_report(entries: &[ReplacementEntry]) -> String {
    let mut report = String::new();
    for entry in entries {
        report.push_str(&format!(
            "{:<desc$} {:<value$} {:<desc$} ({} times)\n",
            entry.description,
            entry.find,
            entry.replace,
            entry.occurrences,
            desc = DESCRIPTION_WIDTH,
            value = VALUE_WIDTH,
        ));
    }
    report
}
