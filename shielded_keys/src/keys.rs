//! Sum types over the spending and viewing keys of both schemes.
//!
//! These mirror [`crate::address::Address`]: three cases, with `Invalid` as the
//! distinguished default, and validity decided by the discriminant alone. Callers
//! are expected to check [`SpendingKey::is_valid`] (or use the accessors, which
//! return `Option`) before assuming a particular scheme.

use crate::{diversified, legacy};

/// A spending key of either scheme.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum SpendingKey {
    /// No key. The default.
    #[default]
    Invalid,
    Legacy(legacy::SpendingKey),
    Diversified(diversified::SpendingKey),
}

impl From<legacy::SpendingKey> for SpendingKey {
    fn from(sk: legacy::SpendingKey) -> Self {
        SpendingKey::Legacy(sk)
    }
}

impl From<diversified::SpendingKey> for SpendingKey {
    fn from(sk: diversified::SpendingKey) -> Self {
        SpendingKey::Diversified(sk)
    }
}

impl SpendingKey {
    /// Returns whether this value holds a key of either scheme. A discriminant
    /// check only.
    pub fn is_valid(&self) -> bool {
        !matches!(self, SpendingKey::Invalid)
    }

    pub fn legacy(&self) -> Option<&legacy::SpendingKey> {
        match self {
            SpendingKey::Legacy(sk) => Some(sk),
            _ => None,
        }
    }

    pub fn diversified(&self) -> Option<&diversified::SpendingKey> {
        match self {
            SpendingKey::Diversified(sk) => Some(sk),
            _ => None,
        }
    }
}

/// A viewing key of either scheme.
///
/// The diversified scheme's viewing credential is its full viewing key.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum ViewingKey {
    /// No key. The default.
    #[default]
    Invalid,
    Legacy(legacy::ViewingKey),
    Diversified(diversified::FullViewingKey),
}

impl From<legacy::ViewingKey> for ViewingKey {
    fn from(vk: legacy::ViewingKey) -> Self {
        ViewingKey::Legacy(vk)
    }
}

impl From<diversified::FullViewingKey> for ViewingKey {
    fn from(fvk: diversified::FullViewingKey) -> Self {
        ViewingKey::Diversified(fvk)
    }
}

impl ViewingKey {
    /// Returns whether this value holds a key of either scheme. A discriminant
    /// check only.
    pub fn is_valid(&self) -> bool {
        !matches!(self, ViewingKey::Invalid)
    }

    pub fn legacy(&self) -> Option<&legacy::ViewingKey> {
        match self {
            ViewingKey::Legacy(vk) => Some(vk),
            _ => None,
        }
    }

    pub fn diversified(&self) -> Option<&diversified::FullViewingKey> {
        match self {
            ViewingKey::Diversified(fvk) => Some(fvk),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SpendingKey, ViewingKey};
    use crate::{diversified, legacy};

    #[test]
    fn defaults_are_invalid() {
        assert!(!SpendingKey::default().is_valid());
        assert!(!ViewingKey::default().is_valid());
    }

    #[test]
    fn populated_keys_are_valid() {
        let legacy_sk = legacy::SpendingKey::from_bytes(&[0u8; 32]).unwrap();
        let diversified_sk = diversified::SpendingKey::from_bytes(&[1u8; 32]).unwrap();

        assert!(SpendingKey::from(legacy_sk).is_valid());
        assert!(SpendingKey::from(diversified_sk).is_valid());
        assert!(ViewingKey::from(legacy_sk.viewing_key()).is_valid());
        assert!(ViewingKey::from(diversified_sk.full_viewing_key()).is_valid());
    }

    #[test]
    fn accessors_discriminate_between_schemes() {
        let sk: SpendingKey = legacy::SpendingKey::from_bytes(&[0u8; 32]).unwrap().into();
        assert!(sk.legacy().is_some());
        assert!(sk.diversified().is_none());

        let vk: ViewingKey = diversified::SpendingKey::from_bytes(&[0u8; 32])
            .unwrap()
            .full_viewing_key()
            .into();
        assert!(vk.diversified().is_some());
        assert!(vk.legacy().is_none());
    }
}
