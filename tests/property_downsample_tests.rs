use proptest::prelude::*;
use streamchart::pipeline::{SampleTarget, stride_sample};

proptest! {
    #[test]
    fn stride_sample_respects_bound_and_preserves_order(
        len in 0usize..5_000,
        target in 1usize..600,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let sampled = stride_sample(&items, SampleTarget::Bounded(target));

        if len <= target {
            prop_assert_eq!(&sampled, &items);
        } else {
            prop_assert!(sampled.len() <= target);
            prop_assert!(!sampled.is_empty());
        }

        let stride = SampleTarget::Bounded(target).stride(len);
        for (position, value) in sampled.iter().enumerate() {
            prop_assert_eq!(*value, position * stride);
        }
    }
}
