use ordered_index_tree::{BalanceTolerance, OrderedIndexTree};

fn main() {
    let tree = OrderedIndexTree::balanced_from([1u64, 2, 3, 20, 30, 4, 5, 6, 7]);
    tree.pretty_print();

    let mut tree2 = OrderedIndexTree::new();
    tree2.pretty_print();
    for key in [50u64, 25, 75, 12, 37, 62, 87] {
        tree2.insert(key);
    }
    tree2.pretty_print();

    // unbalanced until rebalanced
    let mut tree3 = OrderedIndexTree::with_tolerance(BalanceTolerance::disabled());
    tree3.extend([1u64, 2, 3, 4, 5]);
    tree3.pretty_print();
    tree3.rebalance();
    tree3.pretty_print();

    for (depth, row) in tree3.rows().iter().enumerate() {
        let row: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{depth}: {}", row.join(" "));
    }
}
