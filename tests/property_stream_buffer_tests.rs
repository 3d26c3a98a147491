use proptest::prelude::*;
use streamchart::core::{DataPoint, StreamBuffer};

proptest! {
    #[test]
    fn buffer_keeps_latest_points_in_arrival_order(
        capacity in 1usize..64,
        count in 0usize..256,
    ) {
        let mut buffer = StreamBuffer::with_capacity(capacity).expect("buffer");
        for i in 0..count {
            buffer.append(DataPoint::new(i as i64, i as f64, "metric-a"));
            prop_assert!(buffer.len() <= capacity);
        }

        let snapshot = buffer.snapshot();
        let expected_len = count.min(capacity);
        prop_assert_eq!(snapshot.len(), expected_len);

        let expected: Vec<i64> = ((count - expected_len)..count).map(|i| i as i64).collect();
        let actual: Vec<i64> = snapshot.iter().map(|p| p.timestamp).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(buffer.evicted_count(), (count - expected_len) as u64);
    }
}
