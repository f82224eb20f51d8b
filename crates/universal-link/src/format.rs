//! Stateless conversion helpers shared by the decoder and the verifier.

use {
    alloy::primitives::{Address, U256, utils::format_ether},
    chrono::{DateTime, Utc},
};

/// Lowercase `0x` prefixed hex rendering of an address.
///
/// `Address` implements `Display` with an EIP-55 checksum, which is not what
/// links and wallets compare against.
pub fn address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// Parses an address from hex, ignoring case and an optional `0x` prefix.
pub fn parse_address(s: &str) -> Result<Address, hex::FromHexError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(s, &mut bytes)?;
    Ok(Address::from(bytes))
}

/// Decodes exactly `N` bytes from a hex string without prefix.
pub fn fixed_hex<const N: usize>(s: &str) -> Result<[u8; N], hex::FromHexError> {
    let mut bytes = [0u8; N];
    hex::decode_to_slice(s, &mut bytes)?;
    Ok(bytes)
}

/// Price in ether with the trailing zeros removed, e.g. `0.5`.
pub fn ether(wei: U256) -> String {
    let formatted = format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => formatted,
    }
}

/// Expiry timestamp in UTC, or `None` for orders that never expire or lie
/// outside the representable range.
pub fn expiry(seconds: u64) -> Option<DateTime<Utc>> {
    if seconds == 0 {
        return None;
    }
    DateTime::from_timestamp(i64::try_from(seconds).ok()?, 0)
}

/// Debug helper rendering bytes as `0x` hex.
pub fn debug_bytes(
    bytes: impl AsRef<[u8]>,
    formatter: &mut std::fmt::Formatter,
) -> Result<(), std::fmt::Error> {
    formatter.write_fmt(format_args!("0x{}", hex::encode(bytes.as_ref())))
}
