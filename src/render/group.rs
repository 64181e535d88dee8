//! Run-length grouping of adjacent equal values into weighted spans.
//!
//! This is the merged-cell engine: a column's values are walked once, maximal
//! runs of adjacent equal values are found, and each run head is assigned the
//! total physical-row span of its run. Covered members emit nothing.

/// Compute the row spans for one column of cells.
///
/// Walks `items` once. For each index the result holds either `Some(span)`
/// when the index starts a maximal run of adjacent equal values (`span` is
/// the sum of `weight` over every run member, including the head), or `None`
/// when the index is covered by an earlier run and must not emit a cell.
///
/// Run members are compared to the run head with `equals`. Weights are
/// physical-row counts, so spans are expressed in table rows rather than in
/// records; a covered member contributes its own weight to the head's span
/// but is never re-evaluated as a potential head itself.
///
/// # Arguments
/// * `items` - the column's values, one per record, in table order
/// * `equals` - equality relation driving the grouping
/// * `weight` - physical rows occupied by each record (at least 1)
pub fn run_spans<T, E, W>(items: &[T], mut equals: E, mut weight: W) -> Vec<Option<usize>>
where
    E: FnMut(&T, &T) -> bool,
    W: FnMut(&T) -> usize,
{
    let mut spans = vec![None; items.len()];
    let mut i = 0;
    while i < items.len() {
        let mut span = weight(&items[i]);
        let mut j = i + 1;
        while j < items.len() && equals(&items[i], &items[j]) {
            span += weight(&items[j]);
            j += 1;
        }
        spans[i] = Some(span);
        i = j;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of<T: PartialEq + Copy>(items: &[T], weights: &[usize]) -> Vec<Option<usize>> {
        let rows: Vec<(T, usize)> = items.iter().copied().zip(weights.iter().copied()).collect();
        run_spans(&rows, |a, b| a.0 == b.0, |row| row.1)
    }

    #[test]
    fn test_unit_weights_sum_run_lengths() {
        let items = ["a", "a", "b", "a"];
        let spans = run_spans(&items, |a, b| a == b, |_| 1);
        assert_eq!(spans, [Some(2), None, Some(1), Some(1)]);
    }

    #[test]
    fn test_weights_count_physical_rows_not_records() {
        // A covered member with two sub-rows widens the head's span, and the
        // record after the run still gets its own cell.
        let items = ["a", "a", "b"];
        let spans = spans_of(&items, &[1, 2, 1]);
        assert_eq!(spans, [Some(3), None, Some(1)]);
    }

    #[test]
    fn test_all_distinct_yields_own_weights() {
        let items = ["x", "y", "z"];
        let spans = spans_of(&items, &[2, 1, 3]);
        assert_eq!(spans, [Some(2), Some(1), Some(3)]);
    }

    #[test]
    fn test_all_equal_collapses_to_one_cell() {
        let items = ["same"; 4];
        let spans = spans_of(&items, &[1, 2, 1, 2]);
        assert_eq!(spans, [Some(6), None, None, None]);
    }

    #[test]
    fn test_none_values_group_together() {
        let items: [Option<&str>; 4] = [None, None, Some("a"), None];
        let spans = run_spans(&items, |a, b| a == b, |_| 1);
        assert_eq!(spans, [Some(2), None, Some(1), Some(1)]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let spans = run_spans(&[] as &[&str], |a, b| a == b, |_| 1);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_span_total_covers_every_physical_row() {
        let items = ["a", "b", "b", "c", "c", "c", "a"];
        let weights = [1, 2, 1, 1, 3, 1, 2];
        let spans = spans_of(&items, &weights);

        let emitted: usize = spans.iter().flatten().sum();
        let total: usize = weights.iter().sum();
        assert_eq!(emitted, total);
    }
}
