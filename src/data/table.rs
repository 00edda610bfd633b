// ---------------------------------------------------------------------------
// Column – one named value sequence
// ---------------------------------------------------------------------------

/// A single named column of raw cell text.
///
/// Cells stay untyped strings; numeric interpretation happens later, only for
/// the column the analysis actually reads.
#[derive(Debug, Clone)]
pub struct Column {
    /// Header name as it appeared in the file (or a synthesized placeholder).
    pub name: String,
    /// Raw cell values, one per row.
    pub values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Table – the parsed tabular file
// ---------------------------------------------------------------------------

/// An ordered collection of named columns with equal row counts.
///
/// A `Table` is produced by the loader and discarded as soon as the analysis
/// has extracted the column it needs.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from already-parsed columns.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the columns have differing row counts; the
    /// loader guarantees equal lengths for anything it hands over.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].values.len() == w[1].values.len()),
            "columns must have equal row counts"
        );
        Table { columns }
    }

    /// Look up a column's cells by header name.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Whether a column with this header exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Header names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Remove a column by name, silently doing nothing if it is absent.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (zero for a table with no columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Whether the table holds no columns at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(names: &[&str]) -> Table {
        Table::from_columns(
            names
                .iter()
                .map(|n| Column {
                    name: (*n).to_string(),
                    values: vec!["0.1".to_string(), "0.2".to_string()],
                })
                .collect(),
        )
    }

    #[test]
    fn column_lookup_by_name() {
        let table = table_with(&["Time [s]", "Actual Torque [of nominal]"]);
        assert!(table.has_column("Actual Torque [of nominal]"));
        assert_eq!(
            table.column("Actual Torque [of nominal]").unwrap().len(),
            2
        );
        assert!(table.column("Torque").is_none());
    }

    #[test]
    fn drop_column_removes_only_the_named_one() {
        let mut table = table_with(&["a", "Unnamed: 3", "b"]);
        table.drop_column("Unnamed: 3");
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "b"]);

        // Dropping an absent column is a no-op.
        table.drop_column("Unnamed: 3");
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn row_count_of_empty_table_is_zero() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
    }
}
