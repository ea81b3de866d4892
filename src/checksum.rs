use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::RollupError;

pub const ADDRESS_LEN: usize = 20;

/// A fixed-width binary account identifier. Displays as `0x`-prefixed
/// lowercase hex; the checksummed rendering is opt-in via [`to_checksum`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = RollupError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let stripped = value.strip_prefix("0x").unwrap_or(value);
        let bytes = hex::decode(stripped)
            .map_err(|err| RollupError::InvalidAddress(format!("{value}: {err}")))?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            RollupError::InvalidAddress(format!("{value}: expected {ADDRESS_LEN} bytes"))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// EIP-55 mixed-case rendering. The hash input is the UTF-8 text of the
/// lowercase hex encoding without the `0x` prefix, not the raw bytes; a hex
/// letter is upper-cased exactly when the hash nibble at the same character
/// position is >= 8.
pub fn to_checksum(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = hex::encode(Keccak256::digest(lower.as_bytes()));

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (ch, nibble) in lower.chars().zip(hash.chars()) {
        if nibble.to_digit(16).is_some_and(|value| value >= 8) {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(hex_str: &str) -> Address {
        hex_str.parse().unwrap()
    }

    #[test]
    fn matches_eip55_vectors() {
        let cases = [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ];
        for expected in cases {
            let address = addr(&expected.to_lowercase());
            assert_eq!(to_checksum(&address), expected);
        }
    }

    #[test]
    fn checksum_is_deterministic_and_case_preserving() {
        let address = addr("0x52908400098527886e0f7030069857d2e4169ee7");
        let first = to_checksum(&address);
        let second = to_checksum(&address);
        assert_eq!(first, second);
        assert_eq!(first.to_lowercase(), address.to_string());
    }

    #[test]
    fn all_caps_and_all_lower_vectors() {
        // Addresses whose hash pushes every letter one way.
        assert_eq!(
            to_checksum(&addr("0x52908400098527886e0f7030069857d2e4169ee7")),
            "0x52908400098527886E0F7030069857D2E4169EE7"
        );
        assert_eq!(
            to_checksum(&addr("0xde709f2102306220921060314715629080e2fb77")),
            "0xde709f2102306220921060314715629080e2fb77"
        );
    }

    #[test]
    fn parse_rejects_wrong_width() {
        assert!("0xabcd".parse::<Address>().is_err());
        assert!("not-hex".parse::<Address>().is_err());
    }

    #[test]
    fn serde_round_trips_as_string() {
        let address = addr("0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb");
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
