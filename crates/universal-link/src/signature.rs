use {
    alloy::{
        primitives::{self, Address, B256, SignatureError, U256, eip191_hash_message, keccak256},
        signers::k256::ecdsa::VerifyingKey,
    },
    serde::{Deserialize, Serialize},
    std::fmt::{self, Debug, Formatter},
};

/// How the signed payload was turned into the 32 bytes that were signed.
///
/// The signer's convention cannot be detected from the signature, so it has
/// to be configured.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SigningScheme {
    /// keccak256 over the raw payload. Wallets issuing universal links sign
    /// this way.
    #[default]
    Keccak256,
    /// The payload is signed according to EIP-191's personal_sign signature
    /// format.
    ///
    /// https://eips.ethereum.org/EIPS/eip-191
    EthSign,
}

impl std::str::FromStr for SigningScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" => Ok(Self::Keccak256),
            "ethsign" => Ok(Self::EthSign),
            _ => Err(format!(
                "unknown signing scheme {s:?}, expected \"keccak256\" or \"ethsign\""
            )),
        }
    }
}

impl fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keccak256 => "keccak256",
            Self::EthSign => "ethsign",
        })
    }
}

/// Returns the digest used for signing and recovery of the specified
/// message.
pub fn signing_message(scheme: SigningScheme, message: &[u8]) -> B256 {
    match scheme {
        SigningScheme::Keccak256 => keccak256(message),
        SigningScheme::EthSign => eip191_hash_message(message),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidSignature {
    #[error("recovery byte {0:#04x} is neither 27 nor 28")]
    UnsupportedRecoveryId(u8),
    #[error("public key recovery failed: {0}")]
    Recovery(#[from] SignatureError),
}

/// Recoverable secp256k1 signature as it appears in a link.
#[derive(Eq, PartialEq, Clone, Copy, Default, Hash)]
pub struct EcdsaSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl EcdsaSignature {
    pub const LEN: usize = 65;

    /// v + r + s
    pub fn to_bytes(self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0] = self.v;
        bytes[1..33].copy_from_slice(self.r.as_slice());
        bytes[33..].copy_from_slice(self.s.as_slice());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        Self {
            v: bytes[0],
            r: B256::from_slice(&bytes[1..33]),
            s: B256::from_slice(&bytes[33..]),
        }
    }

    /// The y parity encoded by `v`, which only accepts the legacy 27/28
    /// convention.
    pub fn y_parity(&self) -> Result<bool, InvalidSignature> {
        match self.v {
            27 => Ok(false),
            28 => Ok(true),
            v => Err(InvalidSignature::UnsupportedRecoveryId(v)),
        }
    }

    fn to_primitive(self) -> Result<primitives::Signature, InvalidSignature> {
        Ok(primitives::Signature::new(
            U256::from_be_bytes(self.r.0),
            U256::from_be_bytes(self.s.0),
            self.y_parity()?,
        ))
    }

    pub fn recover_public_key(
        &self,
        scheme: SigningScheme,
        message: &[u8],
    ) -> Result<PublicKey, InvalidSignature> {
        let digest = signing_message(scheme, message);
        let key = self.to_primitive()?.recover_from_prehash(&digest)?;
        Ok(PublicKey::from(&key))
    }

    pub fn recover(
        &self,
        scheme: SigningScheme,
        message: &[u8],
    ) -> Result<Address, InvalidSignature> {
        Ok(self.recover_public_key(scheme, message)?.address())
    }
}

impl Debug for EcdsaSignature {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("EcdsaSignature(")?;
        crate::format::debug_bytes(self.to_bytes(), f)?;
        f.write_str(")")
    }
}

impl Serialize for EcdsaSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.to_bytes())))
    }
}

/// Uncompressed secp256k1 public key without the leading `0x04` tag, i.e.
/// the big-endian x coordinate followed by the y coordinate.
#[derive(Eq, PartialEq, Clone, Copy, Hash)]
pub struct PublicKey(pub [u8; 64]);

impl PublicKey {
    /// The account address controlled by this key: the last 20 bytes of
    /// the keccak256 hash of the key.
    pub fn address(&self) -> Address {
        Address::from_slice(&keccak256(self.0)[12..])
    }

    /// The key interpreted as a single 512 bit integer.
    pub fn to_u512(&self) -> primitives::U512 {
        primitives::U512::from_be_bytes(self.0)
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut bytes = [0u8; 64];
        // Cut the `0x04` uncompressed point tag.
        bytes.copy_from_slice(&point.as_bytes()[1..]);
        Self(bytes)
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("PublicKey(")?;
        crate::format::debug_bytes(self.0, f)?;
        f.write_str(")")
    }
}

/// Recovers the address that produced `signature` over `message`.
pub fn recover_address(
    scheme: SigningScheme,
    message: &[u8],
    signature: &[u8; 65],
) -> Result<Address, InvalidSignature> {
    EcdsaSignature::from_bytes(signature).recover(scheme, message)
}

/// Recovers the public key that produced `signature` over `message`.
pub fn recover_public_key(
    scheme: SigningScheme,
    message: &[u8],
    signature: &[u8; 65],
) -> Result<PublicKey, InvalidSignature> {
    EcdsaSignature::from_bytes(signature).recover_public_key(scheme, message)
}
