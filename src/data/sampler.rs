use rand::SeedableRng as _;
use rand::seq::index;
use rand_pcg::Pcg64;

use super::table::Table;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to draw a sample from a table column.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// The table has no column with the requested header.
    #[error("does not contain the required column: '{column}'")]
    MissingColumn { column: String },

    /// The column exists but holds no numeric values after cleaning.
    #[error("column '{column}' has no numeric values")]
    EmptyColumn { column: String },

    /// Caller contract violation: the sample size must be at least 1.
    #[error("sample size must be a positive integer")]
    InvalidSampleSize,
}

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// A random draw from one cleaned column.
///
/// `values.len()` is `min(requested, available)`. When the column had fewer
/// usable values than requested, all of them are returned in row order and
/// [`Sample::is_truncated`] reports the shortfall so the caller can warn.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// The sampled values.
    pub values: Vec<f64>,
    /// How many usable (non-missing) values the column held.
    pub available: usize,
    /// The sample size the caller asked for.
    pub requested: usize,
}

impl Sample {
    /// Number of values actually drawn.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the draw is empty (never true for a successful sample).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when fewer values were available than requested.
    pub fn is_truncated(&self) -> bool {
        self.available < self.requested
    }
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Interpret one cell as a numeric measurement.
///
/// Empty cells, text that does not parse as a float, and non-finite parses
/// (`NaN`, `inf`) all count as missing.
fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Draw `n` values uniformly without replacement from the named column.
///
/// Missing cells are removed first. Sampling uses a PCG generator seeded
/// from `seed`, so identical inputs reproduce the identical sample on every
/// run and on every platform. Distinct row indices are drawn, never rows, so
/// equal values occurring in different rows can both be selected but no row
/// contributes twice.
///
/// When fewer than `n` usable values exist, all of them are returned (row
/// order preserved) and the sample reports itself truncated.
pub fn sample_column(
    table: &Table,
    column: &str,
    n: usize,
    seed: u64,
) -> Result<Sample, SampleError> {
    if n == 0 {
        return Err(SampleError::InvalidSampleSize);
    }

    let cells = table.column(column).ok_or_else(|| SampleError::MissingColumn {
        column: column.to_string(),
    })?;

    let cleaned: Vec<f64> = cells.iter().filter_map(|c| parse_cell(c)).collect();
    if cleaned.is_empty() {
        return Err(SampleError::EmptyColumn {
            column: column.to_string(),
        });
    }

    let available = cleaned.len();
    let values = if available >= n {
        let mut rng = Pcg64::seed_from_u64(seed);
        index::sample(&mut rng, available, n)
            .into_iter()
            .map(|i| cleaned[i])
            .collect()
    } else {
        cleaned
    };

    Ok(Sample {
        values,
        available,
        requested: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::Column;

    fn torque_table(cells: &[&str]) -> Table {
        Table::from_columns(vec![Column {
            name: "Actual Torque [of nominal]".to_string(),
            values: cells.iter().map(|c| (*c).to_string()).collect(),
        }])
    }

    #[test]
    fn draws_exactly_n_values_without_replacement() {
        // Eleven distinct values so duplicate draws would be visible.
        let table = torque_table(&[
            "0.1", "0.2", "0.15", "0.18", "0.12", "0.22", "0.19", "0.17", "0.16", "0.14", "0.21",
        ]);
        let sample = sample_column(&table, "Actual Torque [of nominal]", 10, 42).unwrap();

        assert_eq!(sample.len(), 10);
        assert!(!sample.is_truncated());

        let mut sorted = sample.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();
        assert_eq!(sorted.len(), 10, "a row was drawn twice");

        let column: Vec<f64> = (0..11)
            .map(|i| table.column("Actual Torque [of nominal]").unwrap()[i].parse().unwrap())
            .collect();
        for v in &sample.values {
            assert!(column.contains(v));
        }
    }

    #[test]
    fn identical_seed_reproduces_identical_sample() {
        let table = torque_table(&[
            "0.1", "0.2", "0.15", "0.18", "0.12", "0.22", "0.19", "0.17", "0.16", "0.14", "0.21",
        ]);
        let a = sample_column(&table, "Actual Torque [of nominal]", 10, 42).unwrap();
        let b = sample_column(&table, "Actual Torque [of nominal]", 10, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_changes_the_draw() {
        let cells: Vec<String> = (0..100).map(|i| format!("{}", i as f64 / 100.0)).collect();
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        let table = torque_table(&refs);
        let a = sample_column(&table, "Actual Torque [of nominal]", 10, 42).unwrap();
        let b = sample_column(&table, "Actual Torque [of nominal]", 10, 43).unwrap();
        assert_ne!(a.values, b.values);
    }

    #[test]
    fn short_column_returns_everything_in_row_order() {
        let table = torque_table(&["0.3", "0.1", "0.2"]);
        let sample = sample_column(&table, "Actual Torque [of nominal]", 10, 42).unwrap();
        assert_eq!(sample.values, vec![0.3, 0.1, 0.2]);
        assert_eq!(sample.available, 3);
        assert_eq!(sample.requested, 10);
        assert!(sample.is_truncated());
    }

    #[test]
    fn missing_cells_are_cleaned_before_sampling() {
        let table = torque_table(&["0.1", "", "NaN", "not-a-number", "0.2", "inf"]);
        let sample = sample_column(&table, "Actual Torque [of nominal]", 10, 42).unwrap();
        assert_eq!(sample.values, vec![0.1, 0.2]);
        assert_eq!(sample.available, 2);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = torque_table(&["0.1"]);
        let err = sample_column(&table, "Peak Torque", 10, 42).unwrap_err();
        assert!(matches!(err, SampleError::MissingColumn { ref column } if column == "Peak Torque"));
        assert!(err.to_string().contains("Peak Torque"));
    }

    #[test]
    fn all_missing_column_is_an_error() {
        let table = torque_table(&["", "n/a", ""]);
        assert!(matches!(
            sample_column(&table, "Actual Torque [of nominal]", 10, 42),
            Err(SampleError::EmptyColumn { .. })
        ));
    }

    #[test]
    fn zero_sample_size_is_rejected() {
        let table = torque_table(&["0.1"]);
        assert!(matches!(
            sample_column(&table, "Actual Torque [of nominal]", 0, 42),
            Err(SampleError::InvalidSampleSize)
        ));
    }
}
