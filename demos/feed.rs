use ordered_index_tree::data_gen::{sorted_u64, uniform_u64};
use ordered_index_tree::{Direction, OrderedIndexTree};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rand::thread_rng();

    for exponent in 1..=5u32 {
        let count = 10usize.pow(exponent);

        let start = Instant::now();
        let tree: OrderedIndexTree<u64> = sorted_u64(Some(count)).into_iter().collect();
        info!(
            count,
            elapsed = ?start.elapsed(),
            height = tree.height(),
            generation = tree.generation(),
            "fed sorted values"
        );

        let values = uniform_u64(count, 0, 99_999_999, &mut rng);
        let start = Instant::now();
        let tree: OrderedIndexTree<u64> = values.into_iter().collect();
        info!(
            count,
            elapsed = ?start.elapsed(),
            height = tree.height(),
            "fed random values"
        );

        let queries = uniform_u64(count, 0, 9_999_999, &mut rng);
        let start = Instant::now();
        let hits = queries
            .iter()
            .filter(|&q| tree.search(|v| Direction::toward(v, q)) == Some(q))
            .count();
        info!(count, hits, elapsed = ?start.elapsed(), "queried random values");
    }
}
