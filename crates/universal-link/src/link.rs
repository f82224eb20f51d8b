//! Parsing of the universal link text.
//!
//! ```text
//! https://app.awallet.io/<base64 payload>;<v>;<r>;<s>
//! ```
//!
//! `v` is the recovery byte as two hex digits (`1b` or `1c`), `r` and `s`
//! are 64 hex digits each. Everything is validated before any cryptographic
//! work happens.

use {
    crate::{
        format,
        observe,
        order::{InvalidPayload, SalesOrder},
        signature::EcdsaSignature,
    },
    alloy::primitives::B256,
    base64::{Engine as _, engine::general_purpose::STANDARD},
};

/// The prefix of links shared by the wallet app.
pub const DEFAULT_PREFIX: &str = "https://app.awallet.io/";

const FIELD_SEPARATOR: char = ';';
const FIELDS: usize = 4;

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MalformedLink {
    #[error("link does not start with any accepted prefix")]
    UnknownPrefix,
    #[error("expected {FIELDS} fields separated by '{FIELD_SEPARATOR}' but found {0}")]
    FieldCount(usize),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid payload: {0}")]
    Payload(#[from] InvalidPayload),
    #[error("recovery byte {0:?} is not 1b or 1c")]
    RecoveryByte(String),
    #[error("signature component {component} is not 64 hex digits: {value:?}")]
    SignatureComponent {
        component: &'static str,
        value: String,
    },
}

/// Which links are accepted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkFormat {
    prefixes: Vec<String>,
}

impl Default for LinkFormat {
    fn default() -> Self {
        Self {
            prefixes: vec![DEFAULT_PREFIX.to_string()],
        }
    }
}

impl LinkFormat {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Decodes a link into a sales order.
    ///
    /// No partial order is ever returned: any structural problem with the
    /// link text, the payload or the signature fields rejects the whole
    /// link.
    pub fn parse(&self, link: &str) -> Result<SalesOrder, MalformedLink> {
        let link = link.trim();
        let result = self.parse_inner(link);
        match &result {
            Ok(order) => observe::decoded(order),
            Err(err) => observe::rejected(link, err),
        }
        result
    }

    fn parse_inner(&self, link: &str) -> Result<SalesOrder, MalformedLink> {
        let body = self
            .prefixes
            .iter()
            .find_map(|prefix| link.strip_prefix(prefix.as_str()))
            .ok_or(MalformedLink::UnknownPrefix)?;

        let fields: Vec<&str> = body.split(FIELD_SEPARATOR).collect();
        let [payload, v, r, s] = fields[..] else {
            return Err(MalformedLink::FieldCount(fields.len()));
        };

        let payload = STANDARD.decode(payload)?;
        let signature = EcdsaSignature {
            v: recovery_byte(v)?,
            r: component("r", r)?,
            s: component("s", s)?,
        };
        Ok(SalesOrder::from_payload(payload, signature)?)
    }
}

fn recovery_byte(field: &str) -> Result<u8, MalformedLink> {
    match format::fixed_hex::<1>(field) {
        Ok([v @ (27 | 28)]) => Ok(v),
        _ => Err(MalformedLink::RecoveryByte(field.to_string())),
    }
}

fn component(name: &'static str, field: &str) -> Result<B256, MalformedLink> {
    format::fixed_hex::<32>(field)
        .map(B256::new)
        .map_err(|_| MalformedLink::SignatureComponent {
            component: name,
            value: field.to_string(),
        })
}
