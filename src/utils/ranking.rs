//! Leaderboard ordering
//!
//! Every "top N" table in the dashboard sorts descending by a count and keeps
//! the first N. `slice::sort_by` is stable, so ties keep their incoming order.

/// Stable sort descending by `count`, then keep at most `n` rows.
pub fn top_n_by_count<T, F>(mut rows: Vec<T>, n: usize, count: F) -> Vec<T>
where
    F: Fn(&T) -> u32,
{
    rows.sort_by(|a, b| count(b).cmp(&count(a)));
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_input_order() {
        let rows = vec![("a", 1), ("b", 3), ("c", 3), ("d", 2)];
        let top = top_n_by_count(rows, 3, |r| r.1);
        assert_eq!(top, vec![("b", 3), ("c", 3), ("d", 2)]);
    }

    #[test]
    fn test_fewer_rows_than_limit() {
        let top = top_n_by_count(vec![("a", 1)], 15, |r| r.1);
        assert_eq!(top.len(), 1);
    }
}
