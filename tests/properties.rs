//! Property tests for size validation and planar/packed equivalence.

use enough::Unstoppable;
use proptest::prelude::*;
use zenraw::*;

fn layout_strategy() -> impl Strategy<Value = Layout> {
    (0u32..64, 0u32..64, 0u32..5, prop::sample::select(vec![0u32, 1, 2, 3, 4]), any::<bool>())
        .prop_map(|(h, w, c, e, interleaved)| Layout::new(h, w, c, e).with_interleaved(interleaved))
}

proptest! {
    #[test]
    fn exact_length_validates(layout in layout_strategy()) {
        let expected = layout.expected_len().unwrap();
        prop_assert_eq!(validate(&layout, true, expected), Validation::Valid);
    }

    #[test]
    fn any_other_length_mismatches(layout in layout_strategy(), actual in 0u64..100_000) {
        let expected = layout.expected_len().unwrap();
        prop_assume!(actual != expected);
        prop_assert_eq!(
            validate(&layout, true, actual),
            Validation::SizeMismatch { expected, actual }
        );
    }

    #[test]
    fn missing_source_ignores_length(layout in layout_strategy(), actual in any::<u64>()) {
        prop_assert_eq!(validate(&layout, false, actual), Validation::SourceMissing);
    }

    #[test]
    fn decode_never_panics(layout in layout_strategy(), data in prop::collection::vec(any::<u8>(), 0..512)) {
        match decode(&layout, &data, Unstoppable) {
            Ok(image) => {
                prop_assert_eq!(image.pixels().len() as u64, layout.expected_len().unwrap());
                prop_assert!(image.format.is_supported());
            }
            Err(RawError::UnsupportedFormat { .. }) => prop_assert!(!layout.format().is_supported()),
            Err(RawError::SizeMismatch { expected, actual }) => {
                prop_assert_eq!(actual, data.len() as u64);
                prop_assert_ne!(expected, actual);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn planar_and_packed_agree(w in 1usize..24, h in 1usize..24, seed in any::<u8>()) {
        let packed: Vec<u8> = (0..w * h * 3).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
        let mut planar = Vec::with_capacity(packed.len());
        for c in 0..3 {
            planar.extend(packed.iter().skip(c).step_by(3));
        }
        let layout = Layout::new(h as u32, w as u32, 3, 1);
        let from_planar = decode(&layout.with_interleaved(false), &planar, Unstoppable).unwrap();
        let from_packed = decode(&layout.with_interleaved(true), &packed, Unstoppable).unwrap();
        prop_assert_eq!(from_planar.pixels(), from_packed.pixels());
    }
}
