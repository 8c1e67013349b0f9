//! A sum type over the payment addresses of both schemes.

use crate::{diversified, legacy};

/// A shielded payment address of either scheme.
///
/// `Invalid` is the distinguished default so that a default-constructed value can
/// never be mistaken for a populated address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Address {
    /// No address. The default.
    #[default]
    Invalid,
    Legacy(legacy::PaymentAddress),
    Diversified(diversified::PaymentAddress),
}

impl From<legacy::PaymentAddress> for Address {
    fn from(addr: legacy::PaymentAddress) -> Self {
        Address::Legacy(addr)
    }
}

impl From<diversified::PaymentAddress> for Address {
    fn from(addr: diversified::PaymentAddress) -> Self {
        Address::Diversified(addr)
    }
}

impl Address {
    /// Returns whether this value holds an address of either scheme.
    ///
    /// This is purely a discriminant check; no scheme-specific contents are
    /// inspected.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Address::Invalid)
    }

    /// Returns the legacy address within this value, if that is what it holds.
    pub fn legacy(&self) -> Option<&legacy::PaymentAddress> {
        match self {
            Address::Legacy(addr) => Some(addr),
            _ => None,
        }
    }

    /// Returns the diversified address within this value, if that is what it holds.
    pub fn diversified(&self) -> Option<&diversified::PaymentAddress> {
        match self {
            Address::Diversified(addr) => Some(addr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Address;
    use crate::diversified::{Diversifier, SpendingKey};
    use crate::legacy;

    #[test]
    fn default_is_invalid() {
        let addr = Address::default();
        assert_eq!(addr, Address::Invalid);
        assert!(!addr.is_valid());
        assert!(addr.legacy().is_none());
        assert!(addr.diversified().is_none());
    }

    #[test]
    fn populated_addresses_are_valid() {
        let legacy_addr = legacy::SpendingKey::from_bytes(&[0u8; 32]).unwrap().address();
        let any: Address = legacy_addr.into();
        assert!(any.is_valid());
        assert!(any.legacy().is_some());
        assert!(any.diversified().is_none());

        let diversified_addr = SpendingKey::from_bytes(&[0u8; 32])
            .unwrap()
            .full_viewing_key()
            .to_payment_address(Diversifier([0u8; 11]))
            .unwrap();
        let any: Address = diversified_addr.into();
        assert!(any.is_valid());
        assert!(any.diversified().is_some());
        assert!(any.legacy().is_none());
    }
}
