//! Personalization strings and fixed-base generators used by the key hierarchies.

use jubjub::SubgroupPoint;

/// First 64 bytes of the BLAKE2s input during group hash.
/// This is chosen to be some random string that we couldn't have anticipated when we designed
/// the algorithm, for rigidity purposes.
/// We deliberately use an ASCII hex string of 32 bytes here.
pub const GH_FIRST_BLOCK: &[u8; 64] =
    b"096b36a5804bfacef1691e173c366a47ff5ba84a44f26ddd7e8d9f79d5b42df0";

// BLAKE2s invocation personalizations
/// BLAKE2s Personalization for CRH^ivk = BLAKE2s(ak | nk)
pub const CRH_IVK_PERSONALIZATION: &[u8; 8] = b"Shld_ivk";

// Group hash personalizations
/// BLAKE2s Personalization for the group hash for key diversification
pub const KEY_DIVERSIFICATION_PERSONALIZATION: &[u8; 8] = b"Shld__gd";

/// BLAKE2s Personalization for the spending key base point
pub const SPENDING_KEY_GENERATOR_PERSONALIZATION: &[u8; 8] = b"Shld__G_";

/// BLAKE2s Personalization for the proof generation key base point
pub const PROOF_GENERATION_KEY_BASE_GENERATOR_PERSONALIZATION: &[u8; 8] = b"Shld__H_";

// BLAKE2b invocation personalizations
/// BLAKE2b Personalization for PRF^expand, the diversified-scheme key expansion
pub const PRF_EXPAND_PERSONALIZATION: &[u8; 16] = b"Shld__ExpandSeed";

/// BLAKE2b Personalization for the legacy-scheme address PRF
pub const PRF_LEGACY_PERSONALIZATION: &[u8; 16] = b"Shld__LegacySeed";

/// BLAKE2b Personalization for payment address fingerprints
pub const ADDRESS_FINGERPRINT_PERSONALIZATION: &[u8; 16] = b"Shld__AddrFprint";

/// The spender proves discrete log with respect to this base at spend time.
pub const SPENDING_KEY_GENERATOR: SubgroupPoint = SubgroupPoint::from_raw_unchecked(
    bls12_381::Scalar::from_raw([
        0x41c3_5a68_c55d_5877,
        0x26cc_bb97_c40b_3572,
        0x6202_2d13_21a4_6236,
        0x4e7d_e69a_e4af_f5d9,
    ]),
    bls12_381::Scalar::from_raw([
        0x3aec_7e22_7a88_16c2,
        0xd4f2_8439_29bc_6204,
        0xa49a_e8aa_1bd7_5960,
        0x3b4e_3ab7_395e_4821,
    ]),
);

/// The prover demonstrates knowledge of discrete log with respect to this base when
/// they are constructing a proof; `nk` is derived against it so that `ak` and `nk`
/// are never confusable.
pub const PROOF_GENERATION_KEY_GENERATOR: SubgroupPoint = SubgroupPoint::from_raw_unchecked(
    bls12_381::Scalar::from_raw([
        0xc46e_5fbe_966d_b456,
        0xac50_1e69_4f46_a526,
        0x8a11_e853_6d7b_3a24,
        0x280e_23a2_843b_5e83,
    ]),
    bls12_381::Scalar::from_raw([
        0x5dc3_07b5_bbb8_37e1,
        0x96c0_f976_f684_00e1,
        0xa0fa_3265_d1df_241e,
        0x5979_056c_53dc_7213,
    ]),
);

#[cfg(test)]
mod tests {
    use group::Group;
    use jubjub::SubgroupPoint;

    use super::*;
    use crate::group_hash::group_hash;

    fn find_group_hash(m: &[u8], personalization: &[u8; 8]) -> SubgroupPoint {
        let mut tag = m.to_vec();
        let i = tag.len();
        tag.push(0u8);

        loop {
            let gh = group_hash(&tag, personalization);

            // We don't want to overflow and start reusing generators
            assert!(tag[i] != u8::MAX);
            tag[i] += 1;

            if let Some(gh) = gh {
                break gh;
            }
        }
    }

    #[test]
    fn spending_key_generator() {
        assert_eq!(
            find_group_hash(&[], SPENDING_KEY_GENERATOR_PERSONALIZATION),
            SPENDING_KEY_GENERATOR,
        );
    }

    #[test]
    fn proof_generation_key_base_generator() {
        assert_eq!(
            find_group_hash(&[], PROOF_GENERATION_KEY_BASE_GENERATOR_PERSONALIZATION),
            PROOF_GENERATION_KEY_GENERATOR,
        );
    }

    #[test]
    fn no_duplicate_fixed_base_generators() {
        let fixed_base_generators = [SPENDING_KEY_GENERATOR, PROOF_GENERATION_KEY_GENERATOR];

        // Check for duplicates, and for the neutral element.
        for (i, p1) in fixed_base_generators.iter().enumerate() {
            if bool::from(p1.is_identity()) {
                panic!("Neutral element!");
            }

            for p2 in fixed_base_generators.iter().skip(i + 1) {
                if p1 == p2 {
                    panic!("Duplicate generator!");
                }
            }
        }
    }
}
