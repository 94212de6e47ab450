use proptest::prelude::*;

use btc_primitives::base58;
use btc_primitives::bech32::{self, Variant};
use btc_primitives::bip39::Mnemonic;
use btc_primitives::ec::{self, PrivateKey};
use btc_primitives::MnemonicError;

fn entropy_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::sample::select(vec![16usize, 20, 24, 28, 32])
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mnemonic_entropy_roundtrip(entropy in entropy_strategy()) {
        let m = Mnemonic::from_entropy(&entropy).unwrap();
        prop_assert_eq!(m.word_count(), entropy.len() * 3 / 4);
        let recovered = m.to_entropy();
        prop_assert_eq!(recovered.as_bytes(), entropy.as_slice());

        let reparsed = Mnemonic::from_phrase(&m.phrase()).unwrap();
        prop_assert_eq!(&reparsed, &m);
    }

    /// Every bit of the checksum (the low bits of the last word) is checked.
    #[test]
    fn mnemonic_checksum_flip_rejected(entropy in entropy_strategy(), pick in any::<usize>()) {
        let m = Mnemonic::from_entropy(&entropy).unwrap();
        let checksum_bits = entropy.len() / 4;
        let bit = pick % checksum_bits;

        let list = btc_primitives::bip39::mnemonic::word_list();
        let mut words: Vec<&str> = m.words().collect();
        let last = list.binary_search(words.last().unwrap()).unwrap();
        let flipped = last ^ (1 << bit);
        *words.last_mut().unwrap() = list[flipped];

        prop_assert_eq!(Mnemonic::validate(&words), Err(MnemonicError::InvalidChecksum));
    }

    #[test]
    fn private_key_wif_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            prop_assert_eq!(PrivateKey::from_wif(&pk.to_wif()).unwrap(), pk.clone());
            prop_assert_eq!(ec::private_to_public(&seed).unwrap(), pk.pub_key());
        }
    }

    /// (a + b)G == aG + bG.
    #[test]
    fn scalar_addition_matches_point_tweak(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
    ) {
        if let (Ok(ka), Ok(sum)) = (PrivateKey::from_bytes(&a), ec::add_scalars(&a, &b)) {
            let via_points = ec::tweak_add(&ka.pub_key(), &b).unwrap();
            prop_assert_eq!(via_points, ec::private_to_public(&sum).unwrap());
        }
    }

    #[test]
    fn lift_x_recovers_even_point(seed in prop::array::uniform32(any::<u8>())) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let pub_key = pk.pub_key();
            let lifted = ec::lift_x(&pub_key.to_x_only()).unwrap();
            prop_assert!(lifted.has_even_y());
            prop_assert_eq!(lifted.to_x_only(), pub_key.to_x_only());
        }
    }

    #[test]
    fn base58check_roundtrip(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = base58::check_encode(&data);
        prop_assert_eq!(base58::check_decode(&encoded).unwrap(), data);
    }

    #[test]
    fn bech32_variant_is_preserved(
        data in prop::collection::vec(0u8..32, 0..40),
        use_m in any::<bool>(),
    ) {
        let variant = if use_m { Variant::Bech32m } else { Variant::Bech32 };
        let encoded = bech32::encode("bc", &data, variant).unwrap();
        let (hrp, decoded, got) = bech32::decode(&encoded).unwrap();
        prop_assert_eq!(hrp, "bc");
        prop_assert_eq!(decoded, data);
        prop_assert_eq!(got, variant);
    }
}
