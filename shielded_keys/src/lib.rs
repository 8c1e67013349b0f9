//! *Key hierarchies and shielded payment addresses.*
//!
//! `shielded_keys` derives the spending keys, viewing keys and payment addresses used
//! by the two shielded payment schemes:
//!
//! - the [`legacy`] scheme, which is hash-based and yields a single payment address
//!   per spending key;
//! - the [`diversified`] scheme, which is curve-based and yields an unbounded family
//!   of unlinkable payment addresses per spending key, one per valid [`Diversifier`].
//!
//! Each hierarchy level is a pure, deterministic function of the level below it, and
//! no level can be inverted to recover a higher-privilege one. The [`address`] and
//! [`keys`] modules provide sum types over both schemes so that callers holding "some
//! key" or "some address" can discriminate without inspecting scheme internals.
//!
//! This crate deliberately stops at derivation: note encryption, transaction
//! construction and address string encodings live elsewhere.
//!
//! [`Diversifier`]: diversified::Diversifier

#![cfg_attr(docsrs, feature(doc_cfg))]
// Catch documentation errors caused by code changes.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod address;
pub mod constants;
pub mod diversified;
pub mod group_hash;
pub mod keys;
pub mod legacy;
pub mod prf;
