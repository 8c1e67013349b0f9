//! Diversified (curve-based) key components.
//!
//! The diversified hierarchy derives an unbounded family of unlinkable payment
//! addresses per spending key:
//!
//! ```text
//! SpendingKey -> ExpandedSpendingKey -> FullViewingKey -> IncomingViewingKey
//!                                                              |
//!                                            PaymentAddress(d) per valid Diversifier d
//! ```

pub mod address;
pub mod keys;
pub(crate) mod spec;

pub use address::PaymentAddress;
pub use keys::{
    DecodingError, Diversifier, ExpandedSpendingKey, FullViewingKey, IncomingViewingKey,
    NullifierDerivingKey, OutgoingViewingKey, SpendingKey,
};
