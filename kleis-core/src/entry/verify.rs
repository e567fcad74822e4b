//! Passcode comparison

/// Compare the first `length` digits of `entered` against `reference`
///
/// Every one of the `length` positions is inspected regardless of where the
/// first mismatch sits, so the running time does not reveal how much of
/// the entry was correct. A slice shorter than `length` never matches.
pub fn verify(entered: &[u8], reference: &[u8], length: usize) -> bool {
    let (Some(entered), Some(reference)) = (entered.get(..length), reference.get(..length))
    else {
        return false;
    };

    let diff = entered
        .iter()
        .zip(reference)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));

    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const REFERENCE: [u8; 6] = [1, 2, 3, 4, 5, 6];

    #[test]
    fn test_exact_match() {
        assert!(verify(&[1, 2, 3, 4, 5, 6], &REFERENCE, 6));
    }

    #[test]
    fn test_mismatch_at_first_position() {
        assert!(!verify(&[9, 2, 3, 4, 5, 6], &REFERENCE, 6));
    }

    #[test]
    fn test_mismatch_at_last_position() {
        assert!(!verify(&[1, 2, 3, 4, 5, 0], &REFERENCE, 6));
    }

    #[test]
    fn test_only_length_elements_compared() {
        // Slack slot past the required length is never looked at
        assert!(verify(&[1, 2, 3, 4, 5, 6, 7], &REFERENCE, 6));
        assert!(verify(&[1, 2, 3, 9, 9, 9], &REFERENCE, 3));
    }

    #[test]
    fn test_zero_fill_fails_against_nonzero_reference() {
        assert!(!verify(&[1, 2, 3, 0, 0, 0], &REFERENCE, 6));
        assert!(verify(&[0; 6], &[0; 6], 6));
    }

    #[test]
    fn test_short_slices_never_match() {
        assert!(!verify(&[1, 2, 3], &REFERENCE, 6));
        assert!(!verify(&REFERENCE, &[1, 2, 3], 6));
    }

    #[test]
    fn test_zero_length_matches() {
        assert!(verify(&[], &[], 0));
    }

    proptest! {
        #[test]
        fn prop_equal_iff_prefix_equal(
            entered in proptest::collection::vec(0u8..=9, 8),
            reference in proptest::collection::vec(0u8..=9, 8),
            length in 0usize..=8,
        ) {
            let expected = entered[..length] == reference[..length];
            prop_assert_eq!(verify(&entered, &reference, length), expected);
        }

        #[test]
        fn prop_any_single_mismatch_fails(
            reference in proptest::collection::vec(0u8..=9, 1..=8),
            position in any::<proptest::sample::Index>(),
            delta in 1u8..=9,
        ) {
            let mut entered = reference.clone();
            let i = position.index(reference.len());
            entered[i] = (entered[i] + delta) % 10;
            prop_assert!(!verify(&entered, &reference, reference.len()));
        }
    }
}
