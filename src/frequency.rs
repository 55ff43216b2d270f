//! Most-frequent-value helper

use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

/// The value that occurs most often in `values`; ties go to the smallest.
/// `None` for an empty slice.
pub fn most_frequent<T>(values: &[T]) -> Option<T>
where
    T: Ord + Hash + Clone,
{
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    counts
        .into_iter()
        .max_by_key(|&(value, count)| (count, Reverse(value)))
        .map(|(value, _)| value.clone())
}
