//! Diversified payment addresses.

use blake2b_simd::Params as Blake2bParams;
use group::{Group, GroupEncoding};

use super::keys::Diversifier;
use crate::constants::ADDRESS_FINGERPRINT_PERSONALIZATION;

/// A diversified payment address.
///
/// # Invariants
///
/// `pk_d` is guaranteed to be prime-order (i.e. in the prime-order subgroup of the
/// curve, and not the identity).
#[derive(Clone, Copy, Debug)]
pub struct PaymentAddress {
    pk_d: jubjub::SubgroupPoint,
    diversifier: Diversifier,
}

impl PartialEq for PaymentAddress {
    fn eq(&self, other: &Self) -> bool {
        self.pk_d == other.pk_d && self.diversifier == other.diversifier
    }
}

impl Eq for PaymentAddress {}

impl PaymentAddress {
    /// Constructs a PaymentAddress from a diversifier and a curve point.
    ///
    /// Returns None if `pk_d` is the identity.
    pub fn from_parts(diversifier: Diversifier, pk_d: jubjub::SubgroupPoint) -> Option<Self> {
        if pk_d.is_identity().into() {
            None
        } else {
            Some(PaymentAddress { pk_d, diversifier })
        }
    }

    /// Parses a PaymentAddress from its canonical encoding.
    ///
    /// Returns None if the diversifier has no base point or the `pk_d` encoding is
    /// not a valid prime-order point.
    pub fn from_bytes(bytes: &[u8; 43]) -> Option<Self> {
        let diversifier = {
            let mut tmp = [0; 11];
            tmp.copy_from_slice(&bytes[0..11]);
            Diversifier(tmp)
        };
        // Check that the diversifier is valid
        diversifier.g_d()?;

        let pk_d =
            jubjub::SubgroupPoint::from_bytes(bytes[11..43].try_into().expect("43 - 11 == 32"));
        if pk_d.is_some().into() {
            PaymentAddress::from_parts(diversifier, pk_d.unwrap())
        } else {
            None
        }
    }

    /// Returns the canonical byte encoding of this address, `d || pk_d`.
    pub fn to_bytes(&self) -> [u8; 43] {
        let mut bytes = [0; 43];
        bytes[0..11].copy_from_slice(&self.diversifier.0);
        bytes[11..].copy_from_slice(&self.pk_d.to_bytes());
        bytes
    }

    /// Returns the [`Diversifier`] for this `PaymentAddress`.
    pub fn diversifier(&self) -> &Diversifier {
        &self.diversifier
    }

    /// Returns `pk_d` for this `PaymentAddress`.
    pub fn pk_d(&self) -> &jubjub::SubgroupPoint {
        &self.pk_d
    }

    pub fn g_d(&self) -> Option<jubjub::SubgroupPoint> {
        self.diversifier.g_d()
    }

    /// Returns a compact, stable fingerprint of this address, suitable for indexing.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut result = [0u8; 32];
        result.copy_from_slice(
            Blake2bParams::new()
                .hash_length(32)
                .personal(ADDRESS_FINGERPRINT_PERSONALIZATION)
                .to_state()
                .update(&self.to_bytes())
                .finalize()
                .as_bytes(),
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::keys::{Diversifier, SpendingKey};
    use super::PaymentAddress;

    /// Diversifiers with a known-invalid base point; see `Diversifier::g_d`.
    const INVALID_DIVERSIFIERS: [[u8; 11]; 2] = [
        [0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0x05, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ];

    fn ivk_for_seed(seed: [u8; 32]) -> super::super::keys::IncomingViewingKey {
        SpendingKey::from_bytes(&seed)
            .expect("seed has the right length")
            .full_viewing_key()
            .ivk()
    }

    #[test]
    fn address_absent_iff_diversifier_invalid() {
        let ivk = ivk_for_seed([0u8; 32]);

        for d in INVALID_DIVERSIFIERS {
            let d = Diversifier(d);
            assert!(d.g_d().is_none());
            assert!(ivk.to_payment_address(d).is_none());
        }

        let valid = Diversifier([0u8; 11]);
        assert!(valid.g_d().is_some());
        assert!(ivk.to_payment_address(valid).is_some());
    }

    #[test]
    fn distinct_diversifiers_give_distinct_pk_d() {
        let ivk = ivk_for_seed([0u8; 32]);

        let d1 = Diversifier([0x00, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let d2 = Diversifier([0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let addr1 = ivk.to_payment_address(d1).expect("d1 is valid");
        let addr2 = ivk.to_payment_address(d2).expect("d2 is valid");

        assert_ne!(addr1.pk_d(), addr2.pk_d());
    }

    #[test]
    fn bytes_round_trip() {
        let ivk = ivk_for_seed([7u8; 32]);
        let addr = ivk
            .to_payment_address(Diversifier([0u8; 11]))
            .expect("zero diversifier is valid");

        let parsed = PaymentAddress::from_bytes(&addr.to_bytes()).expect("encoding is canonical");
        assert_eq!(addr, parsed);
        assert_eq!(addr.fingerprint(), parsed.fingerprint());
    }

    #[test]
    fn from_bytes_rejects_invalid_diversifier() {
        let ivk = ivk_for_seed([7u8; 32]);
        let addr = ivk
            .to_payment_address(Diversifier([0u8; 11]))
            .expect("zero diversifier is valid");

        let mut bytes = addr.to_bytes();
        bytes[0..11].copy_from_slice(&INVALID_DIVERSIFIERS[0]);
        assert!(PaymentAddress::from_bytes(&bytes).is_none());
    }
}
