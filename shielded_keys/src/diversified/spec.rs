//! Helper functions shared by the diversified-scheme key and address types.

use blake2s_simd::Params as Blake2sParams;
use ff::PrimeField;

use crate::constants::{CRH_IVK_PERSONALIZATION, KEY_DIVERSIFICATION_PERSONALIZATION};
use crate::group_hash::group_hash;

/// $CRH^\mathsf{ivk}(ak, nk)$
///
/// The collision-resistant hash-to-scalar used to derive the incoming viewing key.
pub(crate) fn crh_ivk(ak: [u8; 32], nk: [u8; 32]) -> jubjub::Fr {
    let mut h: [u8; 32] = Blake2sParams::new()
        .hash_length(32)
        .personal(CRH_IVK_PERSONALIZATION)
        .to_state()
        .update(&ak)
        .update(&nk)
        .finalize()
        .as_bytes()
        .try_into()
        .expect("output length is correct");

    // Drop the most significant five bits, so it can be interpreted as a scalar.
    h[31] &= 0b0000_0111;

    jubjub::Fr::from_repr(h).expect("only 251 bits are set")
}

/// $DiversifyHash(d)$
///
/// Maps a diversifier to a base point on the curve; `None` for the diversifiers
/// that have no corresponding base point.
pub(crate) fn diversify_hash(d: &[u8; 11]) -> Option<jubjub::SubgroupPoint> {
    group_hash(d, KEY_DIVERSIFICATION_PERSONALIZATION)
}
