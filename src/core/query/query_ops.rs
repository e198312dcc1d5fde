// Generic list operations shared by every relay command.
// Nothing here knows about Codeforces, Kaggle or Discord - the services pick
// the predicate, the sample size and the sort key.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::core::relay::RelayError;

/// Direction for [`sort_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Keep only the items matching `predicate`. Relative order is untouched.
pub fn filter_items<T, P>(items: Vec<T>, predicate: P) -> Vec<T>
where
    P: Fn(&T) -> bool,
{
    items.into_iter().filter(|item| predicate(item)).collect()
}

/// Draw `k` items uniformly at random without replacement.
///
/// Asking for more than the population is not an error: the whole population
/// comes back, shuffled.
pub fn sample<T, R>(items: Vec<T>, k: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    if k >= items.len() {
        let mut items = items;
        items.shuffle(rng);
        return items;
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    index::sample(rng, slots.len(), k)
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// [`sample`] using the thread-local RNG.
///
/// The RNG is created and dropped inside this call, so callers can use it
/// freely between `.await` points.
pub fn sample_random<T>(items: Vec<T>, k: usize) -> Vec<T> {
    let mut rng = rand::thread_rng();
    sample(items, k, &mut rng)
}

/// Stable sort by `key` in the given direction.
pub fn sort_items<T, K, F>(items: &mut [T], key: F, direction: SortDirection)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    match direction {
        SortDirection::Ascending => items.sort_by(|a, b| key(a).cmp(&key(b))),
        SortDirection::Descending => items.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

/// Turn an empty list into the "no results" signal carrying `notice`.
pub fn require_results<T>(items: Vec<T>, notice: impl Into<String>) -> Result<Vec<T>, RelayError> {
    if items.is_empty() {
        Err(RelayError::EmptyResult(notice.into()))
    } else {
        Ok(items)
    }
}
