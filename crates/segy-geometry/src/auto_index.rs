//! Synthetic trace-ordinal assignment for duplicate index positions.

use std::time::Instant;

use segy_model::{IndexHeaderSet, Result, TRACE_HEADER};

/// Assign each trace a 1-based ordinal within its group of duplicates.
///
/// Every header column except the synthetic `trace` column acts as a
/// grouping key. Traces sharing the same key tuple get ordinals
/// `1, 2, …` in original file order, so a repeated shot keeps its
/// acquisition sequence. The result is written (or rewritten) as the
/// `trace` column.
///
/// Grouping is a stable sort of row indices by the composite key followed
/// by a run-length pass, so the cost stays near-linear in the trace count
/// regardless of how many headers make up the key.
pub fn assign_trace_ordinals(headers: &mut IndexHeaderSet) -> Result<()> {
    let started = Instant::now();

    let group_names: Vec<String> = headers
        .names()
        .filter(|name| *name != TRACE_HEADER)
        .map(str::to_owned)
        .collect();
    let trace_count = headers.trace_count();

    let ordinals = {
        let columns: Vec<&[i64]> = group_names
            .iter()
            .filter_map(|name| headers.column(name))
            .collect();

        let mut order: Vec<usize> = (0..trace_count).collect();
        // Stable sort: rows with equal keys keep their file order.
        order.sort_by(|&a, &b| {
            columns
                .iter()
                .map(|col| col[a])
                .cmp(columns.iter().map(|col| col[b]))
        });

        let mut ordinals = vec![0_i64; trace_count];
        let mut run = 0_i64;
        for (pos, &row) in order.iter().enumerate() {
            let same_group =
                pos > 0 && columns.iter().all(|col| col[row] == col[order[pos - 1]]);
            run = if same_group { run + 1 } else { 1 };
            ordinals[row] = run;
        }
        ordinals
    };

    headers.insert(TRACE_HEADER, ordinals)?;

    tracing::debug!(
        traces = trace_count,
        elapsed = ?started.elapsed(),
        "assigned duplicate-trace ordinals"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(shot_point: Vec<i64>, cable: Vec<i64>, channel: Vec<i64>) -> IndexHeaderSet {
        IndexHeaderSet::new()
            .with_column("shot_point", shot_point)
            .unwrap()
            .with_column("cable", cable)
            .unwrap()
            .with_column("channel", channel)
            .unwrap()
    }

    #[test]
    fn unique_positions_all_get_ordinal_one() {
        let mut headers = headers(vec![1, 1, 2, 2], vec![1, 1, 1, 1], vec![1, 2, 1, 2]);
        assign_trace_ordinals(&mut headers).unwrap();
        assert_eq!(headers.column(TRACE_HEADER), Some(&[1, 1, 1, 1][..]));
    }

    #[test]
    fn duplicates_count_up_in_file_order() {
        // Rows 0, 2 and 4 share the same key tuple; so do rows 1 and 3.
        let mut headers = headers(
            vec![9, 9, 9, 9, 9],
            vec![1, 2, 1, 2, 1],
            vec![5, 5, 5, 5, 5],
        );
        assign_trace_ordinals(&mut headers).unwrap();
        assert_eq!(headers.column(TRACE_HEADER), Some(&[1, 1, 2, 2, 3][..]));
    }

    #[test]
    fn existing_trace_column_is_not_part_of_the_key() {
        let mut headers = headers(vec![1, 1], vec![1, 1], vec![2, 2]);
        headers.insert(TRACE_HEADER, vec![7, 7]).unwrap();

        assign_trace_ordinals(&mut headers).unwrap();
        assert_eq!(headers.column(TRACE_HEADER), Some(&[1, 2][..]));
    }

    #[test]
    fn empty_header_set_yields_empty_trace_column() {
        let mut headers = IndexHeaderSet::new();
        assign_trace_ordinals(&mut headers).unwrap();
        assert_eq!(headers.column(TRACE_HEADER), Some(&[][..]));
    }
}
