pub mod binary_search_tree;
pub mod config;
pub mod data_gen;
pub mod error;
pub mod node_store;
pub mod utils;

pub use binary_search_tree::{Direction, Iter, OrderedIndexTree};
pub use config::BalanceTolerance;
pub use error::TreeError;
pub use node_store::{NodeHandle, NodeStore, NodeView};
