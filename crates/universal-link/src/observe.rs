//! Events that are meaningful when handling universal links. Keeping the log
//! statements here keeps the decoding and verification code free of logging
//! noise.

use {
    crate::{
        format,
        link::MalformedLink,
        order::SalesOrder,
        signature::InvalidSignature,
    },
    alloy::primitives::Address,
};

pub fn decoded(order: &SalesOrder) {
    tracing::debug!(
        price_wei = %order.price_wei(),
        expiry = order.expiry(),
        contract = %format::address(&order.contract_address()),
        tickets = %order.tickets(),
        "decoded sales order"
    );
}

pub fn rejected(link: &str, err: &MalformedLink) {
    tracing::debug!(?link, %err, "rejected malformed link");
}

pub fn owner_resolved(order: &SalesOrder, owner: &Address, cached: bool) {
    tracing::trace!(
        id = %order.id(),
        owner = %format::address(owner),
        cached,
        "resolved sales order owner"
    );
}

pub fn owner_mismatch(order: &SalesOrder, recovered: &Address, expected: &Address) {
    tracing::warn!(
        id = %order.id(),
        recovered = %format::address(recovered),
        expected = %format::address(expected),
        "sales order was signed by a different account"
    );
}

pub fn recovery_failed(order: &SalesOrder, err: &InvalidSignature) {
    tracing::warn!(id = %order.id(), %err, "could not recover sales order signer");
}
