use super::table::{Column, Table};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to interpret a byte stream as tab-delimited tabular text.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The stream is not well-formed tab-delimited text (ragged rows,
    /// invalid UTF-8, broken quoting).
    #[error("invalid tab-delimited data: {0}")]
    Malformed(#[from] csv::Error),

    /// The stream has no usable header row at all.
    #[error("no columns to parse from file")]
    NoColumns,
}

// ---------------------------------------------------------------------------
// TSV loader
// ---------------------------------------------------------------------------

/// Column name the upstream export tool emits for its trailing empty header
/// cell. Dropped on load, matching what every consumer of these files does by
/// hand.
pub const SPURIOUS_COLUMN: &str = "Unnamed: 3";

/// Parse raw file bytes as a tab-delimited table.
///
/// Header cells that are empty get the exporter's placeholder name
/// `Unnamed: <index>`, and a column literally named `"Unnamed: 3"` is then
/// dropped silently. Everything else is kept untouched; cells remain text.
///
/// Rows whose field count differs from the header are a [`LoadError`]: the
/// table invariant is that every column has the same row count.
pub fn parse_tsv(bytes: &[u8]) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::NoColumns);
    }

    let names: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if h.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for result in reader.records() {
        // Strict mode: a record with a different field count than the header
        // surfaces as a csv error here.
        let record = result?;
        for (idx, field) in record.iter().enumerate() {
            cells[idx].push(field.to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column { name, values })
        .collect();

    let mut table = Table::from_columns(columns);
    table.drop_column(SPURIOUS_COLUMN);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_delimited_text() {
        let raw = b"Time [s]\tActual Torque [of nominal]\n0.0\t0.11\n0.1\t0.14\n";
        let table = parse_tsv(raw).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("Actual Torque [of nominal]").unwrap(),
            &["0.11".to_string(), "0.14".to_string()]
        );
    }

    #[test]
    fn commas_are_plain_characters() {
        let raw = b"a\tb\n1,5\t2\n";
        let table = parse_tsv(raw).unwrap();
        assert_eq!(table.column("a").unwrap(), &["1,5".to_string()]);
    }

    #[test]
    fn drops_the_spurious_unnamed_column() {
        // Trailing tab on every line: the exporter artifact. The empty header
        // cell at index 3 becomes "Unnamed: 3" and is dropped.
        let raw = b"Idx\tTime [s]\tActual Torque [of nominal]\t\n1\t0.0\t0.11\t\n2\t0.1\t0.14\t\n";
        let table = parse_tsv(raw).unwrap();
        assert_eq!(table.column_count(), 3);
        assert!(!table.has_column("Unnamed: 3"));
        assert!(table.has_column("Actual Torque [of nominal]"));
    }

    #[test]
    fn drops_an_explicitly_named_unnamed_3() {
        let raw = b"a\tUnnamed: 3\n1\t2\n";
        let table = parse_tsv(raw).unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn other_unnamed_columns_are_kept() {
        // Only index 3 is the known artifact; an empty header elsewhere is
        // named but not dropped.
        let raw = b"a\t\tc\n1\t2\t3\n";
        let table = parse_tsv(raw).unwrap();
        assert!(table.has_column("Unnamed: 1"));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let raw = b"a\tb\n1\t2\t3\n";
        let err = parse_tsv(raw).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(parse_tsv(b"").unwrap_err(), LoadError::NoColumns));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let raw = b"a\tb\n\xff\xfe\t2\n";
        assert!(matches!(
            parse_tsv(raw).unwrap_err(),
            LoadError::Malformed(_)
        ));
    }

    #[test]
    fn header_only_file_yields_empty_columns() {
        let table = parse_tsv(b"a\tb\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }
}
