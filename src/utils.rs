use crate::config::BalanceTolerance;

/// Height of a perfectly balanced tree holding `count` nodes: `⌈log2(count + 1)⌉`.
pub fn minimal_height(count: usize) -> usize {
    (usize::BITS - count.leading_zeros()) as usize
}

/// Largest tracked height a tree of `count` nodes may reach before rebuilding.
pub fn rebalance_threshold(count: usize, tolerance: &BalanceTolerance) -> f64 {
    (count as f64).log2() * tolerance.multiplier() + tolerance.additive()
}
