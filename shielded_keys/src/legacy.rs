//! Legacy (hash-based) key components.
//!
//! The legacy hierarchy derives a single payment address per spending key:
//!
//! ```text
//! SpendingKey -> ReceivingKey -> ViewingKey -> PaymentAddress
//! ```
//!
//! Every level is a deterministic function of the spending key, and each step is
//! one-way: the paying key and transmission key are PRF/DH images of the secrets
//! below them.

use blake2b_simd::Params as Blake2bParams;
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use x25519_dalek::{PublicKey, StaticSecret};

use crate::constants::ADDRESS_FINGERPRINT_PERSONALIZATION;
use crate::prf::prf_legacy;

const PRF_TAG_A_PK: u8 = 0x00;
const PRF_TAG_SK_ENC: u8 = 0x01;

/// Errors that can occur in the decoding of legacy spending keys.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodingError {
    /// The length of the byte slice provided for decoding was incorrect.
    LengthInvalid { expected: usize, actual: usize },
    /// The four leading bits of the key were set; spending keys are 252 bits wide.
    LeadingBitsNonZero,
}

/// Standard X25519 scalar clamping.
fn clamp_x25519(mut x: [u8; 32]) -> [u8; 32] {
    x[0] &= 0xF8;
    x[31] &= 0x7F;
    x[31] |= 0x40;
    x
}

/// A legacy spending key, the 252-bit root secret of the hierarchy.
///
/// The top four bits of byte 31 are always zero.
#[derive(Clone, Copy)]
pub struct SpendingKey([u8; 32]);

impl ConstantTimeEq for SpendingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for SpendingKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SpendingKey {}

impl SpendingKey {
    /// Generates a random spending key.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        // Truncate to 252 bits.
        bytes[31] &= 0x0F;
        SpendingKey(bytes)
    }

    /// Decodes a spending key from its 32-byte encoding.
    ///
    /// Returns an error if the slice has the wrong length or the encoding exceeds
    /// 252 bits. Such inputs cannot occur from correct callers.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodingError> {
        let repr: [u8; 32] = bytes.try_into().map_err(|_| DecodingError::LengthInvalid {
            expected: 32,
            actual: bytes.len(),
        })?;
        if repr[31] & 0xF0 != 0 {
            return Err(DecodingError::LeadingBitsNonZero);
        }
        Ok(SpendingKey(repr))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Derives the note-decryption secret for this spending key.
    pub fn receiving_key(&self) -> ReceivingKey {
        let mut sk_enc = [0u8; 32];
        sk_enc.copy_from_slice(&prf_legacy(&self.0, PRF_TAG_SK_ENC).as_bytes()[..32]);
        ReceivingKey(clamp_x25519(sk_enc))
    }

    /// Derives the public identifier `a_pk` for this spending key.
    pub fn paying_key(&self) -> PayingKey {
        let mut a_pk = [0u8; 32];
        a_pk.copy_from_slice(&prf_legacy(&self.0, PRF_TAG_A_PK).as_bytes()[..32]);
        PayingKey(a_pk)
    }

    pub fn viewing_key(&self) -> ViewingKey {
        ViewingKey {
            a_pk: self.paying_key(),
            sk_enc: self.receiving_key(),
        }
    }

    /// Derives the payment address for this spending key.
    ///
    /// Equal, bit for bit, to `self.viewing_key().address()`.
    pub fn address(&self) -> PaymentAddress {
        self.viewing_key().address()
    }
}

/// A legacy receiving key, used only to decrypt notes sent to the corresponding
/// address.
#[derive(Clone, Copy)]
pub struct ReceivingKey([u8; 32]);

impl ConstantTimeEq for ReceivingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for ReceivingKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ReceivingKey {}

impl ReceivingKey {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Derives the transmission key `pk_enc` for this receiving key.
    pub fn pk_enc(&self) -> TransmissionKey {
        let secret = StaticSecret::from(self.0);
        TransmissionKey(PublicKey::from(&secret))
    }
}

/// The public identifier `a_pk` of a legacy address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayingKey(pub [u8; 32]);

/// The note-encryption public key `pk_enc` of a legacy address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransmissionKey(PublicKey);

impl TransmissionKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        TransmissionKey(PublicKey::from(bytes))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

/// A legacy key that permits detecting incoming payments without spending
/// authority.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ViewingKey {
    pub a_pk: PayingKey,
    pub sk_enc: ReceivingKey,
}

impl ViewingKey {
    pub fn address(&self) -> PaymentAddress {
        PaymentAddress {
            a_pk: self.a_pk,
            pk_enc: self.sk_enc.pk_enc(),
        }
    }
}

/// A legacy payment address, the externally shared identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentAddress {
    pub a_pk: PayingKey,
    pub pk_enc: TransmissionKey,
}

impl PaymentAddress {
    pub fn from_parts(a_pk: PayingKey, pk_enc: TransmissionKey) -> Self {
        PaymentAddress { a_pk, pk_enc }
    }

    /// Parses a payment address from its canonical encoding.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        let mut a_pk = [0u8; 32];
        a_pk.copy_from_slice(&bytes[0..32]);
        let mut pk_enc = [0u8; 32];
        pk_enc.copy_from_slice(&bytes[32..64]);
        PaymentAddress {
            a_pk: PayingKey(a_pk),
            pk_enc: TransmissionKey::from_bytes(pk_enc),
        }
    }

    /// Returns the canonical byte encoding of this address, `a_pk || pk_enc`.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..32].copy_from_slice(&self.a_pk.0);
        bytes[32..64].copy_from_slice(&self.pk_enc.to_bytes());
        bytes
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

#[cfg(any(test, feature = "test-dependencies"))]
pub mod testing {
    use core::fmt::{self, Debug, Formatter};

    use proptest::prelude::*;

    use super::{ReceivingKey, SpendingKey};

    impl Debug for SpendingKey {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "Spending keys cannot be Debug-formatted.")
        }
    }

    impl Debug for ReceivingKey {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "Receiving keys cannot be Debug-formatted.")
        }
    }

    prop_compose! {
        pub fn arb_spending_key()(mut bytes in any::<[u8; 32]>()) -> SpendingKey {
            bytes[31] &= 0x0F;
            SpendingKey::from_bytes(&bytes).expect("masked bytes are a valid spending key")
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rand::rngs::OsRng;

    use super::{DecodingError, PaymentAddress, SpendingKey};
    use crate::address::Address;

    fn test_seed() -> SpendingKey {
        let bytes =
            hex::decode("0000000000000000000000000000000000000000000000000000000000000001")
                .unwrap();
        SpendingKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn golden_derivations_for_fixed_seed() {
        let sk = test_seed();

        assert_eq!(
            hex::encode(sk.paying_key().0),
            "7b8373068c87cf51a2c90b04d88d11ee26001633be897578f7ed93289bb47016"
        );
        assert_eq!(
            hex::encode(sk.receiving_key().to_bytes()),
            "c068b459d42b7ea692e3dcec451228cab6d502a9d0e4a0a24735688a142e9b68"
        );
        assert_eq!(
            hex::encode(sk.address().to_bytes()),
            "7b8373068c87cf51a2c90b04d88d11ee26001633be897578f7ed93289bb47016\
             570636d4770cc99abf233a2a406eef2cf5881e17b644698c24fdb75df89ba933"
        );
        assert_eq!(
            hex::encode(sk.address().fingerprint()),
            "4754d3503a8d99947201478cdb1e1d27c079e2646c4a93eeb4752e6e6adeb563"
        );
    }

    #[test]
    fn derivation_paths_agree() {
        let sk = test_seed();
        assert_eq!(sk.address(), sk.viewing_key().address());
    }

    #[test]
    fn fingerprint_is_stable() {
        let addr = test_seed().address();
        let same = PaymentAddress::from_bytes(&addr.to_bytes());
        assert_eq!(addr.fingerprint(), same.fingerprint());
    }

    #[test]
    fn from_bytes_rejects_malformed_input() {
        assert_matches!(
            SpendingKey::from_bytes(&[0u8; 31]),
            Err(DecodingError::LengthInvalid {
                expected: 32,
                actual: 31
            })
        );
        assert_matches!(
            SpendingKey::from_bytes(&[0xFFu8; 32]),
            Err(DecodingError::LeadingBitsNonZero)
        );
    }

    #[test]
    fn random_keys_are_252_bits() {
        for _ in 0..32 {
            let sk = SpendingKey::random(&mut OsRng);
            assert_eq!(sk.to_bytes()[31] & 0xF0, 0);
        }
    }

    proptest! {
        #[test]
        fn derivations_are_deterministic(sk in super::testing::arb_spending_key()) {
            prop_assert_eq!(sk.viewing_key().a_pk, sk.paying_key());
            prop_assert_eq!(sk.address(), sk.viewing_key().address());
            prop_assert_eq!(sk.address().fingerprint(), sk.address().fingerprint());
        }

        #[test]
        fn populated_addresses_are_valid(sk in super::testing::arb_spending_key()) {
            let any: Address = sk.address().into();
            prop_assert!(any.is_valid());
        }
    }
}
