use proptest::collection::{hash_set, vec as pvec};
use proptest::prelude::*;
use proptest::sample::Index;
use rayform::{Entry, EntryKind, Format, FormatKind, Rpk};

fn kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![
        Just(EntryKind::Raw),
        Just(EntryKind::Texture),
        Just(EntryKind::Sound),
        Just(EntryKind::Content),
        Just(EntryKind::Factory),
        Just(EntryKind::Package),
    ]
}

/// Wire-valid names: 1..=16 bytes of printable ASCII.
fn name_strategy() -> impl Strategy<Value = String> {
    pvec(0x20u8..=0x7E, 1..=16).prop_map(|bytes| String::from_utf8(bytes).unwrap())
}

/// Entry lists with unique names, arbitrary kinds, payloads, and reserved
/// words: the domain over which decode(encode(_)) must be the identity.
fn entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
    hash_set(name_strategy(), 0..8)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let parts = pvec(
                (kind_strategy(), pvec(any::<u8>(), 0..64), any::<u32>()),
                names.len(),
            );
            (Just(names), parts)
        })
        .prop_map(|(names, parts)| {
            names
                .into_iter()
                .zip(parts)
                .map(|(name, (kind, payload, reserved))| Entry { name, kind, payload, reserved })
                .collect()
        })
}

proptest! {
    #[test]
    fn prop_rpk_roundtrip(entries in entries_strategy()) {
        let original = Format::Rpk(Rpk { entries });
        let bytes = original.to_bytes();
        prop_assert_eq!(bytes.len(), original.encoded_len());

        let decoded = Format::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn prop_rpk_byte_stability(entries in entries_strategy()) {
        let bytes = Format::Rpk(Rpk { entries }).to_bytes();
        let reencoded = Format::from_bytes(&bytes).unwrap().to_bytes();
        prop_assert_eq!(reencoded, bytes);
    }

    #[test]
    fn prop_truncation_rejected(entries in entries_strategy(), cut in any::<Index>()) {
        let bytes = Format::Rpk(Rpk { entries }).to_bytes();
        let cut = cut.index(bytes.len());
        prop_assert!(Format::from_bytes(&bytes[..cut]).is_err());
    }

    #[test]
    fn prop_list_matches_decode(entries in entries_strategy()) {
        let rpk = Rpk { entries };
        let bytes = Format::Rpk(rpk.clone()).to_bytes();

        let infos = Rpk::list_entries(&bytes).unwrap();
        prop_assert_eq!(infos.len(), rpk.entries.len());
        for (info, entry) in infos.iter().zip(&rpk.entries) {
            prop_assert_eq!(&info.name, &entry.name);
            prop_assert_eq!(info.kind, entry.kind);
            prop_assert_eq!(info.size as usize, entry.payload.len());
        }
    }

    #[test]
    fn prop_leaf_roundtrip(data in pvec(any::<u8>(), 0..256)) {
        for magic in [0x1D2D_3DC6u32, 0x3D23_AFCF, 0x4646_4952, 0xAFCE_0F00, 0xAFCE_0F01] {
            let mut bytes = magic.to_le_bytes().to_vec();
            bytes.extend_from_slice(&data);

            let format = Format::from_bytes(&bytes).unwrap();
            prop_assert_eq!(format.encoded_len(), bytes.len());
            prop_assert_eq!(format.to_bytes(), bytes);
        }
    }

    // Decode must reject or accept, never panic, on arbitrary input.
    #[test]
    fn prop_arbitrary_input_never_panics(buf in pvec(any::<u8>(), 0..512)) {
        let _ = Format::from_bytes(&buf);
        let _ = Rpk::list_entries(&buf);
        let _ = FormatKind::detect(&buf);
    }

    // Same, with a valid RPK magic forcing the table and span paths.
    #[test]
    fn prop_rpk_tail_junk_never_panics(tail in pvec(any::<u8>(), 0..256)) {
        let mut buf = 0xAFBF_0C01u32.to_le_bytes().to_vec();
        buf.extend_from_slice(&tail);
        let _ = Format::from_bytes(&buf);
        let _ = Rpk::list_entries(&buf);
    }
}
