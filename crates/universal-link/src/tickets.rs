//! The ticket index set at the end of a sales order payload.
//!
//! Every index is a big-endian `u16`, two bytes per ticket, in the order the
//! seller listed them. Consecutive indices are not compressed on the wire, so
//! a run of ten tickets takes twenty bytes. The trailing section must be
//! non-empty and have an even length; nothing may be left over.

use {
    serde::Serialize,
    std::{fmt, ops::RangeInclusive},
};

/// Number of payload bytes used by a single ticket index.
pub const INDEX_LEN: usize = 2;

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum InvalidTickets {
    #[error("order does not list any tickets")]
    Empty,
    #[error("{len} trailing bytes do not form whole {INDEX_LEN}-byte indices")]
    PartialIndex { len: usize },
}

/// Ticket indices of a sales order in listing order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tickets(Vec<u16>);

impl Tickets {
    pub fn decode(bytes: &[u8]) -> Result<Self, InvalidTickets> {
        if bytes.is_empty() {
            return Err(InvalidTickets::Empty);
        }
        if bytes.len() % INDEX_LEN != 0 {
            return Err(InvalidTickets::PartialIndex { len: bytes.len() });
        }
        Ok(Self(
            bytes
                .chunks_exact(INDEX_LEN)
                .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                .collect(),
        ))
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: u16) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    /// Groups the indices into inclusive ranges of consecutive values.
    ///
    /// Indices are sorted and deduplicated first, so the result describes
    /// set membership and not listing order.
    pub fn runs(&self) -> Vec<RangeInclusive<u16>> {
        let mut sorted: Vec<u16> = self.iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut runs: Vec<RangeInclusive<u16>> = Vec::new();
        for index in sorted {
            match runs.last_mut() {
                Some(run) if run.end().checked_add(1) == Some(index) => {
                    *run = *run.start()..=index;
                }
                _ => runs.push(index..=index),
            }
        }
        runs
    }
}

impl From<Vec<u16>> for Tickets {
    fn from(indices: Vec<u16>) -> Self {
        Self(indices)
    }
}

/// Renders the indices as comma separated runs, e.g. `179-180,200`.
impl fmt::Display for Tickets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, run) in self.runs().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if run.start() == run.end() {
                write!(f, "{}", run.start())?;
            } else {
                write!(f, "{}-{}", run.start(), run.end())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    #[test]
    fn decodes_sparse_pair() {
        let tickets = Tickets::decode(&hex!("00b300b4")).unwrap();
        assert_eq!(tickets.as_slice(), &[0xb3, 0xb4]);
    }

    #[test]
    fn decodes_long_run() {
        let bytes: Vec<u8> = (0x0100u16..0x010c).flat_map(u16::to_be_bytes).collect();
        let tickets = Tickets::decode(&bytes).unwrap();
        assert_eq!(tickets.len(), 12);
        assert_eq!(tickets.runs(), vec![0x0100..=0x010b]);
    }

    #[test]
    fn decodes_singleton() {
        let tickets = Tickets::decode(&hex!("00df")).unwrap();
        assert_eq!(tickets.as_slice(), &[0xdf]);
        assert!(tickets.contains(0xdf));
        assert!(!tickets.contains(0xde));
    }

    #[test]
    fn rejects_leftover_byte() {
        assert_eq!(
            Tickets::decode(&hex!("00b300")),
            Err(InvalidTickets::PartialIndex { len: 3 })
        );
    }

    #[test]
    fn rejects_empty_set() {
        assert_eq!(Tickets::decode(&[]), Err(InvalidTickets::Empty));
    }

    #[test]
    fn runs_ignore_listing_order() {
        let tickets = Tickets::from(vec![7, 3, 4, 9, 8, 3, u16::MAX]);
        assert_eq!(tickets.runs(), vec![3..=4, 7..=9, u16::MAX..=u16::MAX]);
        assert_eq!(tickets.to_string(), "3-4,7-9,65535");
        assert_eq!(
            tickets.iter().collect::<Vec<_>>(),
            [7, 3, 4, 9, 8, 3, u16::MAX]
        );
    }
}
