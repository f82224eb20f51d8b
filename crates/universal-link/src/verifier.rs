//! Ownership verification of decoded sales orders.

use {
    crate::{
        format,
        observe,
        order::SalesOrder,
        signature::{InvalidSignature, SigningScheme},
    },
    alloy::primitives::{Address, B256},
    moka::sync::Cache,
    serde::Serialize,
};

/// Default number of recovered owners kept in memory.
pub const DEFAULT_CACHE_SIZE: u64 = 10_000;

/// Outcome of checking a sales order against the account that claims to own
/// the tickets. Only [`Verification::Trusted`] should be acted upon; the
/// other variants are kept apart for diagnostics.
#[derive(Debug)]
pub enum Verification {
    Trusted { owner: Address },
    Mismatch { recovered: Address, expected: Address },
    RecoveryFailed(InvalidSignature),
}

impl Verification {
    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted { .. })
    }

    /// The signer, if one could be recovered at all.
    pub fn recovered(&self) -> Option<Address> {
        match self {
            Self::Trusted { owner } => Some(*owner),
            Self::Mismatch { recovered, .. } => Some(*recovered),
            Self::RecoveryFailed(_) => None,
        }
    }
}

impl Serialize for Verification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Json {
            trusted: bool,
            recovered: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reason: Option<String>,
        }

        let reason = match self {
            Self::Trusted { .. } => None,
            Self::Mismatch { expected, .. } => {
                Some(format!("expected owner {}", format::address(expected)))
            }
            Self::RecoveryFailed(err) => Some(err.to_string()),
        };
        Json {
            trusted: self.is_trusted(),
            recovered: self.recovered().as_ref().map(format::address),
            reason,
        }
        .serialize(serializer)
    }
}

/// Recovers and checks sales order signers.
///
/// Recovering a public key is comparatively expensive, so recovered owners
/// are cached by [`SalesOrder::id`]. The cache is bounded and safe to share
/// between threads; two threads resolving the same order at once may both
/// compute the owner, which is harmless since the result only depends on the
/// immutable order. Failed recoveries are not cached.
pub struct Verifier {
    scheme: SigningScheme,
    owners: Cache<B256, Address>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(SigningScheme::default(), DEFAULT_CACHE_SIZE)
    }
}

impl Verifier {
    pub fn new(scheme: SigningScheme, capacity: u64) -> Self {
        Self {
            scheme,
            owners: Cache::new(capacity),
        }
    }

    pub fn scheme(&self) -> SigningScheme {
        self.scheme
    }

    /// Returns the account that signed the order.
    pub fn resolve_owner(&self, order: &SalesOrder) -> Result<Address, InvalidSignature> {
        let id = order.id();
        if let Some(owner) = self.owners.get(&id) {
            observe::owner_resolved(order, &owner, true);
            return Ok(owner);
        }
        let owner = order.recover_owner(self.scheme)?;
        self.owners.insert(id, owner);
        observe::owner_resolved(order, &owner, false);
        Ok(owner)
    }

    /// Checks whether the order was signed by `expected`.
    pub fn verify_owner(&self, order: &SalesOrder, expected: Address) -> Verification {
        match self.resolve_owner(order) {
            Ok(owner) if owner == expected => Verification::Trusted { owner },
            Ok(recovered) => {
                observe::owner_mismatch(order, &recovered, &expected);
                Verification::Mismatch {
                    recovered,
                    expected,
                }
            }
            Err(err) => {
                observe::recovery_failed(order, &err);
                Verification::RecoveryFailed(err)
            }
        }
    }

    /// Like [`Verifier::verify_owner`] with the expected owner given as hex
    /// text. Hex addresses are compared case-insensitively; text that is not
    /// an address never verifies.
    pub fn verify_owner_str(&self, order: &SalesOrder, expected: &str) -> bool {
        match format::parse_address(expected) {
            Ok(expected) => self.verify_owner(order, expected).is_trusted(),
            Err(_) => false,
        }
    }
}
