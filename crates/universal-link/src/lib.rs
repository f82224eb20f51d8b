//! Decoding and verification of universal link sales orders.
//!
//! A universal link carries an off-chain offer to sell a set of tickets of a
//! token contract at a fixed price. The link embeds the signed payload
//! together with the seller's ECDSA signature so that anybody receiving the
//! link can recover the seller's address and check that it owns the tickets
//! before building a trade.
//!
//! Decoding is handled by [`link::LinkFormat`] and produces an immutable
//! [`order::SalesOrder`]. Ownership checks go through [`verifier::Verifier`],
//! which memoizes the recovered owner per order.

pub mod format;
pub mod link;
mod observe;
pub mod order;
pub mod signature;
pub mod tickets;
pub mod verifier;

pub use {
    link::{LinkFormat, MalformedLink},
    order::SalesOrder,
    signature::{EcdsaSignature, InvalidSignature, SigningScheme},
    verifier::{Verification, Verifier},
};

/// Any error produced while turning a link into a recovered owner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MalformedLink(#[from] MalformedLink),
    #[error(transparent)]
    InvalidSignature(#[from] InvalidSignature),
}

/// Parses a link using the default [`LinkFormat`].
pub fn parse(link: &str) -> Result<SalesOrder, MalformedLink> {
    LinkFormat::default().parse(link)
}
