//! MAC address parsing and OUI vendor identity.

use std::fmt;

use crate::constants::UNKNOWN_VENDOR;

/// A 6-byte IEEE 802 MAC address
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Parse `aa:bb:cc:dd:ee:ff` or `AA-BB-CC-DD-EE-FF`.
    ///
    /// A single trailing separator is tolerated, some drivers print one.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s
            .strip_suffix(':')
            .or_else(|| s.strip_suffix('-'))
            .unwrap_or(s);

        let parts: Vec<&str> = s.split(|c: char| c == ':' || c == '-').collect();
        if parts.len() != 6 {
            return None;
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 {
                return None;
            }
            bytes[i] = u8::from_str_radix(part, 16).ok()?;
        }
        Some(Self(bytes))
    }

    /// Organisationally Unique Identifier (first three octets)
    pub fn oui(&self) -> String {
        let [a, b, c, ..] = self.0;
        format!("{a:02X}-{b:02X}-{c:02X}")
    }

    /// Locally administered bit; set on randomised and soft-AP addresses
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

/// Vendor identity of a BSSID: its OUI, or `Unknown` when unparseable
pub fn vendor_oui(bssid: &str) -> String {
    MacAddress::parse(bssid)
        .map(|mac| mac.oui())
        .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
}
