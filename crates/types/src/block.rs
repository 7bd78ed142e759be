use crate::{header::Header, transaction::Transaction};

/// An uncle is simply a header that lost the race for its height; it
/// carries no additional fields of its own.
pub type Uncle = Header;

/// A candidate block: a header plus the transaction and uncle lists the
/// header's roots are meant to summarize.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
    pub uncles: Vec<Uncle>,
}

impl Block {
    #[must_use]
    pub fn new(header: Header, transactions: Vec<Transaction>, uncles: Vec<Uncle>) -> Self {
        Self { header, transactions, uncles }
    }
}
