use crate::domain::models::{Matrix, MatrixCell, Period, RowIdentity};

use super::aggregator::AggregateMap;

/// Assembles aggregator output into a dense grid.
///
/// Every declared row gets a cell for every declared period; buckets missing
/// from the aggregate render as zero rather than being omitted, so consumers
/// can index positionally. Totals are computed here and the synthetic total
/// row, when requested, is appended last and flagged.
pub struct MatrixBuilder;

impl MatrixBuilder {
    pub fn build(
        aggregate: &AggregateMap,
        rows: Vec<RowIdentity>,
        periods: &[Period],
        include_totals: bool,
    ) -> Matrix {
        let mut cells: Vec<Vec<MatrixCell>> = Vec::with_capacity(rows.len());
        let mut row_totals: Vec<MatrixCell> = Vec::with_capacity(rows.len());
        let mut column_minutes = vec![0_i64; periods.len()];

        for row in &rows {
            let mut row_cells = Vec::with_capacity(periods.len());
            let mut row_minutes = 0_i64;

            for (col, period) in periods.iter().enumerate() {
                let minutes = aggregate
                    .get(&(row.key.clone(), period.key.clone()))
                    .copied()
                    .unwrap_or(0);
                row_minutes += minutes;
                column_minutes[col] += minutes;
                row_cells.push(MatrixCell::from_minutes(minutes));
            }

            cells.push(row_cells);
            row_totals.push(MatrixCell::from_minutes(row_minutes));
        }

        let column_totals: Vec<MatrixCell> = column_minutes
            .iter()
            .map(|&m| MatrixCell::from_minutes(m))
            .collect();
        let grand_total = MatrixCell::from_minutes(column_minutes.iter().sum());

        let mut rows = rows;
        if include_totals {
            rows.push(RowIdentity::total());
            cells.push(column_totals.clone());
            row_totals.push(grand_total);
        }

        Matrix {
            periods: periods.to_vec(),
            rows,
            cells,
            row_totals,
            column_totals,
            grand_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DimensionKey, Granularity};
    use time::macros::datetime;

    fn periods() -> Vec<Period> {
        Period::last_n(datetime!(2025-04-30 12:00 UTC), Granularity::Month, 2)
    }

    fn aggregate() -> AggregateMap {
        let march = Period::key_for(datetime!(2025-03-01 00:00 UTC), Granularity::Month);
        let april = Period::key_for(datetime!(2025-04-01 00:00 UTC), Granularity::Month);

        let mut agg = AggregateMap::new();
        agg.insert((DimensionKey::new("alice"), march.clone()), 75);
        agg.insert((DimensionKey::new("bob"), april), 60);
        agg
    }

    fn rows() -> Vec<RowIdentity> {
        vec![
            RowIdentity::new("alice", "alice"),
            RowIdentity::new("bob", "bob"),
        ]
    }

    #[test]
    fn grid_is_dense_with_zero_fill() {
        let matrix = MatrixBuilder::build(&aggregate(), rows(), &periods(), false);

        for row in 0..matrix.rows.len() {
            for period in 0..matrix.periods.len() {
                assert!(matrix.cell(row, period).is_some());
            }
        }
        // alice logged nothing in April; the cell exists and is zero.
        assert_eq!(matrix.cell(0, 1).unwrap().minutes, 0);
    }

    #[test]
    fn totals_equal_the_sum_of_their_cells() {
        let matrix = MatrixBuilder::build(&aggregate(), rows(), &periods(), false);

        for (i, total) in matrix.row_totals.iter().enumerate() {
            let sum: i64 = matrix.cells[i].iter().map(|c| c.minutes).sum();
            assert_eq!(total.minutes, sum);
        }
        for (col, total) in matrix.column_totals.iter().enumerate() {
            let sum: i64 = matrix.cells.iter().map(|row| row[col].minutes).sum();
            assert_eq!(total.minutes, sum);
        }
        assert_eq!(matrix.grand_total.minutes, 135);
    }

    #[test]
    fn empty_entry_set_yields_all_zero_totals() {
        let matrix = MatrixBuilder::build(&AggregateMap::new(), rows(), &periods(), true);

        assert_eq!(matrix.grand_total.minutes, 0);
        assert!(matrix.row_totals.iter().all(|c| c.minutes == 0));
        assert!(matrix.column_totals.iter().all(|c| c.minutes == 0));
    }

    #[test]
    fn total_row_is_appended_last_and_flagged() {
        let matrix = MatrixBuilder::build(&aggregate(), rows(), &periods(), true);

        let last = matrix.rows.last().unwrap();
        assert!(last.is_total);
        assert!(matrix.rows[..matrix.rows.len() - 1].iter().all(|r| !r.is_total));

        // The total row's cells are the column totals.
        let total_cells = matrix.cells.last().unwrap();
        assert_eq!(total_cells, &matrix.column_totals);
        assert_eq!(matrix.row_totals.last().unwrap(), &matrix.grand_total);
    }

    #[test]
    fn building_twice_yields_identical_matrices() {
        let agg = aggregate();
        let first = MatrixBuilder::build(&agg, rows(), &periods(), true);
        let second = MatrixBuilder::build(&agg, rows(), &periods(), true);
        assert_eq!(first, second);
    }
}
