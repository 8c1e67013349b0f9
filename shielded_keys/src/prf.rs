//! Domain-separated pseudorandom functions backing both key hierarchies.

use blake2b_simd::{Hash as Blake2bHash, Params as Blake2bParams};

use crate::constants::{PRF_EXPAND_PERSONALIZATION, PRF_LEGACY_PERSONALIZATION};

/// PRF^expand(sk, t) := BLAKE2b-512("Shld__ExpandSeed", sk || t)
///
/// The diversified-scheme key expansion. Each caller owns a distinct tag `t`; tags
/// are never shared between derivations.
pub fn prf_expand(sk: &[u8], t: &[u8]) -> Blake2bHash {
    prf_expand_vec(sk, &[t])
}

pub fn prf_expand_vec(sk: &[u8], ts: &[&[u8]]) -> Blake2bHash {
    let mut h = Blake2bParams::new()
        .hash_length(64)
        .personal(PRF_EXPAND_PERSONALIZATION)
        .to_state();
    h.update(sk);
    for t in ts {
        h.update(t);
    }
    h.finalize()
}

/// PRF^addr(sk, t) := BLAKE2b-512("Shld__LegacySeed", sk || t)
///
/// The legacy-scheme address PRF. Personalized separately from [`prf_expand`] so the
/// two hierarchies can never collide on a tag.
pub fn prf_legacy(sk: &[u8], t: u8) -> Blake2bHash {
    let mut h = Blake2bParams::new()
        .hash_length(64)
        .personal(PRF_LEGACY_PERSONALIZATION)
        .to_state();
    h.update(sk);
    h.update(&[t]);
    h.finalize()
}
