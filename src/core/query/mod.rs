pub mod query_ops;

pub use query_ops::{filter_items, require_results, sample_random, sort_items, SortDirection};
