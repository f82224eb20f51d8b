//! The sales order carried by a universal link.
//!
//! The signed payload is laid out as:
//!
//! | bytes    | field                                   |
//! |----------|-----------------------------------------|
//! | 0..32    | price in wei, big-endian `uint256`      |
//! | 32..64   | expiry in unix seconds, `0` for never   |
//! | 64..84   | token contract address                  |
//! | 84..     | ticket indices, see [`crate::tickets`]  |

use {
    crate::{
        format,
        signature::{EcdsaSignature, InvalidSignature, PublicKey, SigningScheme},
        tickets::{InvalidTickets, Tickets},
    },
    alloy::primitives::{Address, B256, Bytes, U256, keccak256},
    serde::Serialize,
    serde_with::{DisplayFromStr, serde_as},
};

pub const PRICE_RANGE: std::ops::Range<usize> = 0..32;
pub const EXPIRY_RANGE: std::ops::Range<usize> = 32..64;
pub const CONTRACT_RANGE: std::ops::Range<usize> = 64..84;
/// Length of the fixed part of the payload preceding the ticket indices.
pub const HEADER_LEN: usize = CONTRACT_RANGE.end;

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum InvalidPayload {
    #[error("payload is {len} bytes long but the header alone needs {HEADER_LEN}")]
    TooShort { len: usize },
    #[error("expiry {0} does not fit into 64 bits")]
    ExpiryOverflow(U256),
    #[error(transparent)]
    Tickets(#[from] InvalidTickets),
}

/// A decoded sales order. Immutable once decoded; the signer is resolved
/// separately, see [`crate::Verifier`].
#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    /// The exact payload the seller signed.
    message: Bytes,
    #[serde_as(as = "DisplayFromStr")]
    price_wei: U256,
    expiry: u64,
    #[serde(serialize_with = "serialize_address")]
    contract_address: Address,
    tickets: Tickets,
    signature: EcdsaSignature,
}

fn serialize_address<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format::address(address))
}

impl SalesOrder {
    /// Splits a signed payload into its fields. The payload is kept verbatim
    /// as the signed message.
    pub fn from_payload(
        payload: Vec<u8>,
        signature: EcdsaSignature,
    ) -> Result<Self, InvalidPayload> {
        if payload.len() < HEADER_LEN {
            return Err(InvalidPayload::TooShort { len: payload.len() });
        }

        let price_wei = U256::from_be_slice(&payload[PRICE_RANGE]);
        let expiry = U256::from_be_slice(&payload[EXPIRY_RANGE]);
        let expiry = u64::try_from(expiry).map_err(|_| InvalidPayload::ExpiryOverflow(expiry))?;
        let contract_address = Address::from_slice(&payload[CONTRACT_RANGE]);
        let tickets = Tickets::decode(&payload[HEADER_LEN..])?;

        Ok(Self {
            message: payload.into(),
            price_wei,
            expiry,
            contract_address,
            tickets,
            signature,
        })
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn price_wei(&self) -> U256 {
        self.price_wei
    }

    /// Unix timestamp after which the order is void, `0` if it never
    /// expires.
    pub fn expiry(&self) -> u64 {
        self.expiry
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn tickets(&self) -> &Tickets {
        &self.tickets
    }

    pub fn signature(&self) -> &EcdsaSignature {
        &self.signature
    }

    /// Whether the order can no longer be filled at unix time `now`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expiry != 0 && now >= self.expiry
    }

    /// Identifies the order by everything that determines its signer.
    pub fn id(&self) -> B256 {
        let mut buffer = Vec::with_capacity(self.message.len() + EcdsaSignature::LEN);
        buffer.extend_from_slice(&self.message);
        buffer.extend_from_slice(&self.signature.to_bytes());
        keccak256(buffer)
    }

    /// Recovers the seller's address. Prefer [`crate::Verifier`] which
    /// caches the result.
    pub fn recover_owner(&self, scheme: SigningScheme) -> Result<Address, InvalidSignature> {
        self.signature.recover(scheme, &self.message)
    }

    pub fn recover_owner_key(&self, scheme: SigningScheme) -> Result<PublicKey, InvalidSignature> {
        self.signature.recover_public_key(scheme, &self.message)
    }
}
