//! Sorting and filtering shared by the entity services.
//!
//! Tables are scanned in insertion order, then ordered in memory. The sort is
//! stable, so rows with equal keys keep their insertion order.

/// Sort `items` by `key`, most recent (largest) first.
pub fn sort_desc_stable<T, K, F>(items: &mut [T], key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Keep the items matching `pred`, preserving their relative order.
pub fn filter_ordered<T, F>(items: Vec<T>, pred: F) -> Vec<T>
where
    F: Fn(&T) -> bool,
{
    items.into_iter().filter(|item| pred(item)).collect()
}
