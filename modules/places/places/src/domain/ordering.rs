//! Ordering rules for the per-owner group list.

/// The order given to a newly appended entry: one past the current maximum, or `1` for an
/// empty list. `None` once the maximum is `i64::MAX`.
#[must_use]
pub fn next_order(orders: impl IntoIterator<Item = i64>) -> Option<i64> {
    orders
        .into_iter()
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

/// Whether `order` is affected by moving an entry to `new_order`.
#[must_use]
pub fn is_shifted_by(order: i64, new_order: i64) -> bool {
    order >= new_order
}
