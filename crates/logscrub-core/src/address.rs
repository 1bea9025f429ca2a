//! Network address classification

use std::net::Ipv4Addr;

use tracing::info;

/// Which placeholder scheme applies to a redacted address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    Server,
    Client,
}

/// Result of classifying a network address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Loopback or private-range address, returned unchanged (lowercased).
    Exempt(String),
    /// Public address, carries the placeholder to substitute.
    Redact(String),
}

impl Classification {
    /// The text to substitute for the classified address.
    pub fn replacement(self) -> String {
        match self {
            Classification::Exempt(unchanged) => unchanged,
            Classification::Redact(placeholder) => placeholder,
        }
    }
}

/// Decides whether a textual address is loopback, private, or public,
/// and hands out sequential `IP_ADDRESS_n` placeholders for public
/// client addresses.
pub struct AddressClassifier {
    client_count: usize,
}

impl AddressClassifier {
    pub fn new() -> Self {
        Self { client_count: 0 }
    }

    pub fn classify(&mut self, input: &str, role: AddressRole) -> Classification {
        let input = input.to_lowercase();

        if input == "localhost" || input == "127.0.0.1" || input == "::1" {
            info!("not cleaning loopback address {input}");
            return Classification::Exempt(input);
        }

        // Only IPv4 literals get the private-range exemption; anything
        // that fails to parse as one (hostnames, out-of-range quads) is
        // treated as public.
        if let Ok(addr) = input.parse::<Ipv4Addr>() {
            if is_internal(addr) {
                info!("not cleaning internal address {input}");
                return Classification::Exempt(input);
            }
        }

        match role {
            AddressRole::Client => {
                self.client_count += 1;
                Classification::Redact(format!("IP_ADDRESS_{}", self.client_count))
            }
            AddressRole::Server => Classification::Redact("SERVER_ADDRESS".to_string()),
        }
    }
}

impl Default for AddressClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn is_internal(addr: Ipv4Addr) -> bool {
    let octets = addr.octets();
    match octets[0] {
        10 | 127 => true,
        172 => (16..32).contains(&octets[1]),
        192 => octets[1] == 168,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_exempt() {
        let mut classifier = AddressClassifier::new();

        for addr in ["localhost", "127.0.0.1", "::1", "LOCALHOST"] {
            let classified = classifier.classify(addr, AddressRole::Client);
            assert_eq!(classified, Classification::Exempt(addr.to_lowercase()));
        }
    }

    #[test]
    fn test_private_ranges_exempt() {
        let mut classifier = AddressClassifier::new();

        for addr in ["10.0.0.5", "127.5.5.5", "172.16.0.1", "172.31.255.255", "192.168.1.1"] {
            let classified = classifier.classify(addr, AddressRole::Client);
            assert_eq!(classified, Classification::Exempt(addr.to_string()));
        }
    }

    #[test]
    fn test_range_boundaries_are_public() {
        let mut classifier = AddressClassifier::new();

        assert_eq!(
            classifier.classify("172.15.0.1", AddressRole::Client),
            Classification::Redact("IP_ADDRESS_1".to_string())
        );
        assert_eq!(
            classifier.classify("172.32.0.1", AddressRole::Client),
            Classification::Redact("IP_ADDRESS_2".to_string())
        );
        assert_eq!(
            classifier.classify("192.169.0.1", AddressRole::Client),
            Classification::Redact("IP_ADDRESS_3".to_string())
        );
    }

    #[test]
    fn test_client_counter_increments_per_redaction() {
        let mut classifier = AddressClassifier::new();

        assert_eq!(
            classifier.classify("8.8.8.8", AddressRole::Client),
            Classification::Redact("IP_ADDRESS_1".to_string())
        );
        // Exempt addresses do not consume a number.
        classifier.classify("10.0.0.1", AddressRole::Client);
        assert_eq!(
            classifier.classify("1.1.1.1", AddressRole::Client),
            Classification::Redact("IP_ADDRESS_2".to_string())
        );
    }

    #[test]
    fn test_server_role_uses_fixed_placeholder() {
        let mut classifier = AddressClassifier::new();

        assert_eq!(
            classifier.classify("example.com", AddressRole::Server),
            Classification::Redact("SERVER_ADDRESS".to_string())
        );
        assert_eq!(
            classifier.classify("8.8.4.4", AddressRole::Server),
            Classification::Redact("SERVER_ADDRESS".to_string())
        );
    }

    #[test]
    fn test_out_of_range_quad_is_public() {
        let mut classifier = AddressClassifier::new();

        assert_eq!(
            classifier.classify("999.999.999.999", AddressRole::Client),
            Classification::Redact("IP_ADDRESS_1".to_string())
        );
    }

    #[test]
    fn test_internal_server_address_exempt() {
        let mut classifier = AddressClassifier::new();

        assert_eq!(
            classifier.classify("192.168.0.10", AddressRole::Server),
            Classification::Exempt("192.168.0.10".to_string())
        );
    }
}
