mod common;

use common::synthetic_cascade::{encode_cascade, patterned_tree, TreeSpec};
use pico_detector::{Cascade, CascadeError};

#[test]
fn round_trip_across_depths_and_tree_counts() {
    for depth in [1i32, 2, 3] {
        for count in [1usize, 5] {
            let trees: Vec<TreeSpec> =
                (0..count).map(|t| patterned_tree(depth, t as i32)).collect();
            let bytes = encode_cascade(depth, &trees);
            let cascade = Cascade::from_bytes(&bytes)
                .unwrap_or_else(|e| panic!("depth={depth} count={count}: {e}"));

            let leaf_count = 1usize << depth;
            assert_eq!(cascade.tree_depth, depth as usize);
            assert_eq!(cascade.tree_count, count);
            assert_eq!(cascade.tree_codes.len(), count * leaf_count * 4);
            assert_eq!(cascade.predictions.len(), count * leaf_count);
            assert_eq!(cascade.thresholds.len(), count);

            for (t, tree) in trees.iter().enumerate() {
                let base = t * leaf_count * 4;
                // Placeholder quadruplet for the unused node 0.
                assert_eq!(&cascade.tree_codes[base..base + 4], &[0, 0, 0, 0]);
                for (node, quad) in tree.codes.iter().enumerate() {
                    let at = base + 4 * (node + 1);
                    assert_eq!(&cascade.tree_codes[at..at + 4], quad.as_slice());
                }
                assert_eq!(
                    &cascade.predictions[t * leaf_count..(t + 1) * leaf_count],
                    tree.predictions.as_slice()
                );
                assert_eq!(cascade.thresholds[t], tree.threshold);
            }
        }
    }
}

#[test]
fn truncating_one_byte_fails_the_load() {
    let trees = vec![patterned_tree(2, 0), patterned_tree(2, 1)];
    let bytes = encode_cascade(2, &trees);
    let short = &bytes[..bytes.len() - 1];
    assert!(matches!(
        Cascade::from_bytes(short),
        Err(CascadeError::Truncated { .. })
    ));
}
