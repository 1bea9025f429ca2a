//! Single-pass redaction over a whole log file

use regex::Regex;
use tracing::{info, warn};

use crate::address::{AddressClassifier, AddressRole};
use crate::ledger::{self, ReplacementEntry, ReplacementLedger};
use crate::token::TokenScrubber;

/// Everything produced by one redaction run.
#[derive(Debug)]
pub struct RedactionOutcome {
    /// The cleaned log text.
    pub text: String,
    /// The server address used for the run; empty when resolution failed.
    pub server_address: String,
    /// True when the server address was auto-detected rather than supplied.
    pub detected: bool,
    /// Distinct replacements in application order.
    pub entries: Vec<ReplacementEntry>,
}

impl RedactionOutcome {
    /// Renders the column-aligned replacement report.
    pub fn report(&self) -> String {
        ledger::render_report(&self.entries)
    }
}

/// Per-run state for one redaction pass: the text buffer, the
/// classifier/scrubber counters, and the replacement ledger. Created at
/// run start, consumed by [`RedactionSession::run`].
pub struct RedactionSession {
    text: String,
    classifier: AddressClassifier,
    scrubber: TokenScrubber,
    ledger: ReplacementLedger,
    url_pattern: Regex,
    ip_pattern: Regex,
}

impl RedactionSession {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            classifier: AddressClassifier::new(),
            scrubber: TokenScrubber::new(),
            ledger: ReplacementLedger::new(),
            url_pattern: Regex::new(r"https?://(.*?)(?::[0-9]+)?/").unwrap(),
            // Deliberately permissive: no 0-255 range check, so quads like
            // 999.999.999.999 are still caught and redacted.
            ip_pattern: Regex::new(r"(?:[0-9]{1,3}\.){3}[0-9]{1,3}").unwrap(),
        }
    }

    /// Applies the full pass in fixed order: server address, access
    /// tokens, then client IP addresses.
    pub fn run(mut self, known_server_address: Option<&str>) -> RedactionOutcome {
        let (server_address, detected) = match known_server_address {
            Some(addr) if !addr.is_empty() => (addr.to_string(), false),
            _ => (self.detect_server_address(), true),
        };

        self.redact_server_address(&server_address);
        self.scrubber.scrub(&mut self.text, &mut self.ledger);
        self.redact_client_addresses();

        RedactionOutcome {
            text: self.text,
            server_address,
            detected,
            entries: self.ledger.into_entries(),
        }
    }

    /// Captures HOST from the first `http(s)://HOST[:PORT]/` in the text.
    fn detect_server_address(&self) -> String {
        let detected = self
            .url_pattern
            .captures(&self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        if detected.is_empty() {
            warn!("could not auto-detect a server address from the log text");
        } else {
            info!("auto-detected server address {detected}");
        }

        detected
    }

    fn redact_server_address(&mut self, address: &str) {
        if address.is_empty() {
            warn!("no server address resolved, skipping server address replacement");
            return;
        }

        let replacement = self
            .classifier
            .classify(address, AddressRole::Server)
            .replacement();
        self.ledger
            .replace(&mut self.text, address, &replacement, "server address");
    }

    fn redact_client_addresses(&mut self) {
        let raws: Vec<String> = self
            .ip_pattern
            .find_iter(&self.text)
            .map(|m| m.as_str().to_string())
            .collect();

        for raw in raws {
            if self.ledger.seen(&raw) {
                continue;
            }

            let replacement = self
                .classifier
                .classify(&raw, AddressRole::Client)
                .replacement();
            self.ledger
                .replace(&mut self.text, &raw, &replacement, "IP address");
            // Internal addresses are marked too so they are not reclassified.
            self.ledger.mark_seen(raw);
        }
    }
}
