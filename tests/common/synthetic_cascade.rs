/// One tree of a synthetic cascade.
///
/// `codes` holds `2^depth - 1` offset quadruplets in binary-heap order
/// (node 1 first); `predictions` holds `2^depth` leaf values.
pub struct TreeSpec {
    pub codes: Vec<[i8; 4]>,
    pub predictions: Vec<f32>,
    pub threshold: f32,
}

/// Serialize trees into the little-endian cascade file layout (8 skipped
/// header bytes, depth, count, then per-tree codes/predictions/threshold).
pub fn encode_cascade(tree_depth: i32, trees: &[TreeSpec]) -> Vec<u8> {
    let leaf_count = 1usize << tree_depth;
    let mut bytes = vec![0u8; 8];
    bytes.extend_from_slice(&tree_depth.to_le_bytes());
    bytes.extend_from_slice(&(trees.len() as i32).to_le_bytes());

    for tree in trees {
        assert_eq!(tree.codes.len(), leaf_count - 1, "codes per tree");
        assert_eq!(tree.predictions.len(), leaf_count, "predictions per tree");
        for quad in &tree.codes {
            bytes.extend(quad.iter().map(|&v| v as u8));
        }
        for &pred in &tree.predictions {
            bytes.extend_from_slice(&pred.to_le_bytes());
        }
        bytes.extend_from_slice(&tree.threshold.to_le_bytes());
    }

    bytes
}

/// Deterministic tree contents derived from the tree index, for round-trip
/// checks.
pub fn patterned_tree(tree_depth: i32, seed: i32) -> TreeSpec {
    let leaf_count = 1usize << tree_depth;
    let codes = (0..leaf_count - 1)
        .map(|node| {
            let base = (seed * 31 + node as i32 * 7) % 120;
            [
                base as i8,
                (base + 1) as i8,
                -(base as i8),
                (base - 3) as i8,
            ]
        })
        .collect();
    let predictions = (0..leaf_count)
        .map(|leaf| seed as f32 * 0.5 + leaf as f32 * 0.125 - 1.0)
        .collect();
    TreeSpec {
        codes,
        predictions,
        threshold: seed as f32 * 0.25 - 2.0,
    }
}
