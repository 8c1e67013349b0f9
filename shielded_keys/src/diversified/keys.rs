//! Diversified-scheme key components.

use std::io::{self, Read, Write};

use ff::PrimeField;
use group::{Group, GroupEncoding};
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq, CtOption};

use super::address::PaymentAddress;
use super::spec::{crh_ivk, diversify_hash};
use crate::constants::{PROOF_GENERATION_KEY_GENERATOR, SPENDING_KEY_GENERATOR};
use crate::prf::prf_expand;

// PRF^expand domain-separation tags. Each tag is bound to exactly one derivation;
// never reuse one.
const PRF_TAG_ASK: &[u8] = &[0x00];
const PRF_TAG_NSK: &[u8] = &[0x01];
const PRF_TAG_OVK: &[u8] = &[0x02];
const PRF_TAG_DEFAULT_DIVERSIFIER: u8 = 0x03;

/// The number of candidate diversifiers examined by [`SpendingKey::default_address`]
/// before giving up.
const DIVERSIFIER_SEARCH_BOUND: u16 = 256;

/// Errors that can occur in the decoding of diversified-scheme keys.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodingError {
    /// The length of the byte slice provided for decoding was incorrect.
    LengthInvalid { expected: usize, actual: usize },
    /// Could not decode the `ask` bytes to a scalar.
    InvalidAsk,
    /// Could not decode the `nsk` bytes to a scalar.
    InvalidNsk,
}

/// A diversified-scheme spending key, the 256-bit seed of the hierarchy.
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
        SpendingKey(bytes)
    }

    /// Decodes a spending key from its 32-byte encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodingError> {
        let repr: [u8; 32] = bytes.try_into().map_err(|_| DecodingError::LengthInvalid {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(SpendingKey(repr))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn expanded_spending_key(&self) -> ExpandedSpendingKey {
        ExpandedSpendingKey::from_spending_key(&self.0)
    }

    /// Shorthand for expanding the key and deriving its full viewing key; both
    /// paths produce identical output.
    pub fn full_viewing_key(&self) -> FullViewingKey {
        FullViewingKey::from_expanded_spending_key(&self.expanded_spending_key())
    }

    /// Returns the first payment address in this key's canonical diversifier
    /// sequence, together with the diversifier that produced it.
    ///
    /// Candidate `i` is the first 11 bytes of `PRF^expand(sk, [0x03, i])`; the
    /// search examines indices `0..256` in order, so the result is stable across
    /// invocations. `None` (every candidate invalid) is astronomically unlikely
    /// but remains part of the contract.
    pub fn default_address(&self) -> Option<(Diversifier, PaymentAddress)> {
        let ivk = self.full_viewing_key().ivk();
        for i in 0..DIVERSIFIER_SEARCH_BOUND {
            let mut d = [0u8; 11];
            d.copy_from_slice(
                &prf_expand(&self.0, &[PRF_TAG_DEFAULT_DIVERSIFIER, i as u8]).as_bytes()[..11],
            );
            let diversifier = Diversifier(d);
            match ivk.to_payment_address(diversifier) {
                Some(addr) => return Some((diversifier, addr)),
                None => {
                    tracing::trace!(index = i, "candidate diversifier has no base point");
                }
            }
        }
        None
    }
}

/// An outgoing viewing key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutgoingViewingKey(pub [u8; 32]);

/// An expanded spending key: the three independent sub-secrets a spending key
/// expands to.
///
/// `ask` authorizes spends, `nsk` derives nullifiers, `ovk` views outgoing notes.
/// Each is derived under its own PRF^expand tag and none is interchangeable with
/// another.
#[derive(Clone)]
pub struct ExpandedSpendingKey {
    pub ask: jubjub::Fr,
    pub nsk: jubjub::Fr,
    pub ovk: OutgoingViewingKey,
}

impl ExpandedSpendingKey {
    pub fn from_spending_key(sk: &[u8]) -> Self {
        let ask = jubjub::Fr::from_bytes_wide(prf_expand(sk, PRF_TAG_ASK).as_array());
        let nsk = jubjub::Fr::from_bytes_wide(prf_expand(sk, PRF_TAG_NSK).as_array());
        let mut ovk = OutgoingViewingKey([0u8; 32]);
        ovk.0
            .copy_from_slice(&prf_expand(sk, PRF_TAG_OVK).as_bytes()[..32]);
        ExpandedSpendingKey { ask, nsk, ovk }
    }

    /// Decodes the expanded spending key from its serialized representation.
    pub fn from_bytes(b: &[u8]) -> Result<Self, DecodingError> {
        if b.len() != 96 {
            return Err(DecodingError::LengthInvalid {
                expected: 96,
                actual: b.len(),
            });
        }

        let ask = Option::from(jubjub::Fr::from_repr(b[0..32].try_into().expect("checked length")))
            .ok_or(DecodingError::InvalidAsk)?;
        let nsk =
            Option::from(jubjub::Fr::from_repr(b[32..64].try_into().expect("checked length")))
                .ok_or(DecodingError::InvalidNsk)?;
        let ovk = OutgoingViewingKey(b[64..96].try_into().expect("checked length"));

        Ok(ExpandedSpendingKey { ask, nsk, ovk })
    }

    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut repr = [0u8; 96];
        reader.read_exact(repr.as_mut())?;
        Self::from_bytes(&repr).map_err(|e| match e {
            DecodingError::InvalidAsk => {
                io::Error::new(io::ErrorKind::InvalidData, "ask not in field")
            }
            DecodingError::InvalidNsk => {
                io::Error::new(io::ErrorKind::InvalidData, "nsk not in field")
            }
            DecodingError::LengthInvalid { .. } => unreachable!("repr is 96 bytes"),
        })
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// Encodes the expanded spending key to its serialized representation,
    /// `ask || nsk || ovk`.
    pub fn to_bytes(&self) -> [u8; 96] {
        let mut result = [0u8; 96];
        result[0..32].copy_from_slice(&self.ask.to_repr());
        result[32..64].copy_from_slice(&self.nsk.to_repr());
        result[64..96].copy_from_slice(&self.ovk.0);
        result
    }
}

/// A key used to derive the nullifier for a note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NullifierDerivingKey(pub jubjub::SubgroupPoint);

/// A key that provides the capability to view incoming and outgoing transactions
/// without spending authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullViewingKey {
    pub ak: jubjub::SubgroupPoint,
    pub nk: NullifierDerivingKey,
    pub ovk: OutgoingViewingKey,
}

impl FullViewingKey {
    /// Derives the full viewing key from an expanded spending key.
    ///
    /// `ak` and `nk` are derived against two distinct fixed-base generators so the
    /// two points are never confusable; `ovk` is carried through unchanged.
    pub fn from_expanded_spending_key(expsk: &ExpandedSpendingKey) -> Self {
        FullViewingKey {
            ak: SPENDING_KEY_GENERATOR * expsk.ask,
            nk: NullifierDerivingKey(PROOF_GENERATION_KEY_GENERATOR * expsk.nsk),
            ovk: expsk.ovk,
        }
    }

    /// Derives the incoming viewing key for this full viewing key.
    pub fn ivk(&self) -> IncomingViewingKey {
        IncomingViewingKey(crh_ivk(self.ak.to_bytes(), self.nk.0.to_bytes()))
    }

    pub fn to_payment_address(&self, diversifier: Diversifier) -> Option<PaymentAddress> {
        self.ivk().to_payment_address(diversifier)
    }

    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let ak = {
            let mut buf = [0u8; 32];
            reader.read_exact(&mut buf)?;
            jubjub::SubgroupPoint::from_bytes(&buf).and_then(|p| CtOption::new(p, !p.is_identity()))
        };
        let nk = {
            let mut buf = [0u8; 32];
            reader.read_exact(&mut buf)?;
            jubjub::SubgroupPoint::from_bytes(&buf)
        };
        if ak.is_none().into() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "ak not of prime order",
            ));
        }
        if nk.is_none().into() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "nk not in prime-order subgroup",
            ));
        }
        let ak = ak.unwrap();
        let nk = NullifierDerivingKey(nk.unwrap());

        let mut ovk = [0u8; 32];
        reader.read_exact(&mut ovk)?;

        Ok(FullViewingKey {
            ak,
            nk,
            ovk: OutgoingViewingKey(ovk),
        })
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.ak.to_bytes())?;
        writer.write_all(&self.nk.0.to_bytes())?;
        writer.write_all(&self.ovk.0)?;

        Ok(())
    }

    /// Encodes the full viewing key to its serialized representation,
    /// `ak || nk || ovk`.
    pub fn to_bytes(&self) -> [u8; 96] {
        let mut result = [0u8; 96];
        self.write(&mut result[..])
            .expect("should be able to serialize a FullViewingKey");
        result
    }
}

/// An incoming viewing key: detects payments to every diversified address under
/// one viewing key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingViewingKey(jubjub::Fr);

impl IncomingViewingKey {
    /// Attempts to derive the payment address at the given diversifier.
    ///
    /// Returns `None` when the diversifier has no base point; that is a normal
    /// "no address here" outcome, not an error.
    pub fn to_payment_address(&self, diversifier: Diversifier) -> Option<PaymentAddress> {
        diversifier.g_d().and_then(|g_d| {
            let pk_d = g_d * self.0;

            PaymentAddress::from_parts(diversifier, pk_d)
        })
    }

    pub fn to_repr(&self) -> [u8; 32] {
        self.0.to_repr()
    }
}

/// An 11-byte address diversifier.
///
/// Not every byte string is a usable diversifier; [`Diversifier::g_d`] decides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diversifier(pub [u8; 11]);

impl Diversifier {
    /// Returns the base point this diversifier maps to, if any.
    pub fn g_d(&self) -> Option<jubjub::SubgroupPoint> {
        diversify_hash(&self.0)
    }
}

#[cfg(any(test, feature = "test-dependencies"))]
pub mod testing {
    use core::fmt::{self, Debug, Formatter};

    use proptest::prelude::*;

    use super::{ExpandedSpendingKey, FullViewingKey, IncomingViewingKey, SpendingKey};

    impl Debug for SpendingKey {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "Spending keys cannot be Debug-formatted.")
        }
    }

    impl Debug for ExpandedSpendingKey {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "Spending keys cannot be Debug-formatted.")
        }
    }

    prop_compose! {
        pub fn arb_spending_key()(bytes in any::<[u8; 32]>()) -> SpendingKey {
            SpendingKey::from_bytes(&bytes).expect("32 bytes are a valid seed")
        }
    }

    prop_compose! {
        pub fn arb_expanded_spending_key()(sk in arb_spending_key()) -> ExpandedSpendingKey {
            sk.expanded_spending_key()
        }
    }

    prop_compose! {
        pub fn arb_full_viewing_key()(expsk in arb_expanded_spending_key()) -> FullViewingKey {
            FullViewingKey::from_expanded_spending_key(&expsk)
        }
    }

    prop_compose! {
        pub fn arb_incoming_viewing_key()(fvk in arb_full_viewing_key()) -> IncomingViewingKey {
            fvk.ivk()
        }
    }
}
