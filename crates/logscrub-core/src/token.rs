//! Access-token scrubbing

use regex::Regex;

use crate::ledger::ReplacementLedger;

/// Scans for known secret-bearing patterns and replaces each distinct
/// discovered value with a sequential `ACCESS_TOKEN_n` placeholder.
pub struct TokenScrubber {
    token_count: usize,
    patterns: Vec<(Regex, usize)>,
}

impl TokenScrubber {
    pub fn new() -> Self {
        // Order matters: query-string API keys first, then login/logout
        // access tokens. Group 1 captures the 32-hex-digit secret.
        let patterns = vec![
            (Regex::new(r"api_key=([0-9a-f]{32})").unwrap(), 1),
            (Regex::new(r#"access token "([0-9a-f]{32})""#).unwrap(), 1),
        ];

        Self {
            token_count: 0,
            patterns,
        }
    }

    /// Runs every configured pattern over `text` in order.
    pub fn scrub(&mut self, text: &mut String, ledger: &mut ReplacementLedger) {
        let patterns = std::mem::take(&mut self.patterns);
        for (pattern, group) in &patterns {
            self.scrub_by_pattern(pattern, *group, text, ledger);
        }
        self.patterns = patterns;
    }

    /// Replaces each unique value captured by `group` of `pattern` with a
    /// fresh placeholder from the shared token counter. Values already in
    /// the ledger's seen set are skipped.
    pub fn scrub_by_pattern(
        &mut self,
        pattern: &Regex,
        group: usize,
        text: &mut String,
        ledger: &mut ReplacementLedger,
    ) {
        let raws: Vec<String> = pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(group).map(|m| m.as_str().to_string()))
            .collect();

        for raw in raws {
            if ledger.seen(&raw) {
                continue;
            }

            self.token_count += 1;
            let placeholder = format!("ACCESS_TOKEN_{}", self.token_count);
            ledger.replace(text, &raw, &placeholder, "access token");
            ledger.mark_seen(raw);
        }
    }
}

impl Default for TokenScrubber {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: &str = "deadbeefdeadbeefdeadbeefdeadbeef";
    const KEY_B: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_api_key_scrubbed() {
        let mut scrubber = TokenScrubber::new();
        let mut ledger = ReplacementLedger::new();
        let mut text = format!("GET /ws?api_key={KEY_A} HTTP/1.1");

        scrubber.scrub(&mut text, &mut ledger);

        assert_eq!(text, "GET /ws?api_key=ACCESS_TOKEN_1 HTTP/1.1");
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn test_access_token_scrubbed() {
        let mut scrubber = TokenScrubber::new();
        let mut ledger = ReplacementLedger::new();
        let mut text = format!("login with access token \"{KEY_A}\" ok");

        scrubber.scrub(&mut text, &mut ledger);

        assert_eq!(text, "login with access token \"ACCESS_TOKEN_1\" ok");
    }

    #[test]
    fn test_same_value_shares_placeholder_across_patterns() {
        let mut scrubber = TokenScrubber::new();
        let mut ledger = ReplacementLedger::new();
        let mut text = format!("api_key={KEY_A} then access token \"{KEY_A}\"");

        scrubber.scrub(&mut text, &mut ledger);

        assert_eq!(
            text,
            "api_key=ACCESS_TOKEN_1 then access token \"ACCESS_TOKEN_1\""
        );
        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.entries()[0].occurrences, 2);
    }

    #[test]
    fn test_distinct_values_get_increasing_numbers() {
        let mut scrubber = TokenScrubber::new();
        let mut ledger = ReplacementLedger::new();
        let mut text = format!("api_key={KEY_A} and access token \"{KEY_B}\"");

        scrubber.scrub(&mut text, &mut ledger);

        assert!(text.contains("api_key=ACCESS_TOKEN_1"));
        assert!(text.contains("access token \"ACCESS_TOKEN_2\""));
    }

    #[test]
    fn test_short_hex_is_not_a_token() {
        let mut scrubber = TokenScrubber::new();
        let mut ledger = ReplacementLedger::new();
        let mut text = "api_key=deadbeef done".to_string();

        scrubber.scrub(&mut text, &mut ledger);

        assert_eq!(text, "api_key=deadbeef done");
        assert!(ledger.entries().is_empty());
    }
}
