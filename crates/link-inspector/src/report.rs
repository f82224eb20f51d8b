use {
    alloy::primitives::Address,
    serde::Serialize,
    universal_link::{InvalidSignature, SalesOrder, Verification, format},
};

/// What was learned about a single link, printed as one JSON line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum Report {
    /// The link could not be decoded; none of its contents can be shown.
    Malformed { link: String, error: String },
    /// The signer was checked against the expected owner.
    Verified {
        order: Summary,
        verification: Verification,
    },
    /// No owner was expected, the signer is only reported.
    Recovered { order: Summary, owner: String },
    /// No owner was expected and the signer could not be recovered.
    Unrecoverable { order: Summary, error: String },
}

impl Report {
    pub fn malformed(link: &str, error: &universal_link::MalformedLink) -> Self {
        Self::Malformed {
            link: link.to_string(),
            error: error.to_string(),
        }
    }

    pub fn resolved(order: &SalesOrder, owner: Result<Address, InvalidSignature>) -> Self {
        let order = Summary::new(order);
        match owner {
            Ok(owner) => Self::Recovered {
                order,
                owner: format::address(&owner),
            },
            Err(err) => Self::Unrecoverable {
                order,
                error: err.to_string(),
            },
        }
    }

    pub fn verified(order: &SalesOrder, verification: Verification) -> Self {
        Self::Verified {
            order: Summary::new(order),
            verification,
        }
    }

    /// Whether the link can be shown as a trustworthy offer.
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Verified { verification, .. } => verification.is_trusted(),
            Self::Recovered { .. } => true,
            Self::Malformed { .. } | Self::Unrecoverable { .. } => false,
        }
    }
}

/// The decoded order plus human readable renderings of its fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(flatten)]
    order: SalesOrder,
    price_ether: String,
    expires_at: Option<String>,
    ticket_runs: String,
}

impl Summary {
    fn new(order: &SalesOrder) -> Self {
        Self {
            price_ether: format::ether(order.price_wei()),
            expires_at: format::expiry(order.expiry()).map(|expiry| expiry.to_rfc3339()),
            ticket_runs: order.tickets().to_string(),
            order: order.clone(),
        }
    }
}
