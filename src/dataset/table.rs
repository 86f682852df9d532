//! Column-oriented numeric table with named columns.
//!
//! A [`Table`] is the data container that flows through every preprocessing step.
//! Missing values are encoded as `f64::NAN`; see [`is_missing`].
//!
//! Every operation that changes the shape of a table (`with_column`, `select`,
//! `take_rows`) returns a new table and leaves the receiver untouched.

use super::error::DatasetError;
use std::collections::HashSet;

/// Returns `true` if the cell holds the missing-value sentinel.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// A named numeric column.
#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered collection of equally long, uniquely named numeric columns.
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns.
    ///
    /// # Errors
    /// - [`DatasetError::DuplicateColumn`] if two columns share a name.
    /// - [`DatasetError::LengthMismatch`] if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::with_capacity(columns.len());

        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(DatasetError::DuplicateColumn {
                    column: col.name.clone(),
                });
            }
            if col.len() != n_rows {
                return Err(DatasetError::LengthMismatch {
                    column: col.name.clone(),
                    expected: n_rows,
                    got: col.len(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Build a table from row-major data.
    ///
    /// ```
    /// use iris_pipeline::dataset::Table;
    ///
    /// let table = Table::from_rows(&["sl", "sw"], &[vec![f64::NAN, f64::NAN], vec![4.9, 3.0]]).unwrap();
    /// assert_eq!(table.shape(), (2, 2));
    /// ```
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: &[Vec<f64>]) -> Result<Self, DatasetError> {
        let mut columns: Vec<Column> = names
            .iter()
            .map(|n| Column::new(n.as_ref(), Vec::with_capacity(rows.len())))
            .collect();

        for (i, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                return Err(DatasetError::LengthMismatch {
                    column: format!("row {}", i),
                    expected: names.len(),
                    got: row.len(),
                });
            }
            for (col, &v) in columns.iter_mut().zip(row) {
                col.values.push(v);
            }
        }

        let mut table = Self::new(columns)?;
        // A table without columns still remembers how many rows it was built from.
        table.n_rows = rows.len();
        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(n_rows, n_columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Values of the named column.
    pub fn column(&self, name: &str) -> Result<&[f64], DatasetError> {
        self.column_index(name)
            .map(|i| self.columns[i].values())
            .ok_or_else(|| DatasetError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Read a single cell.
    pub fn get(&self, row: usize, name: &str) -> Result<f64, DatasetError> {
        let values = self.column(name)?;
        values
            .get(row)
            .copied()
            .ok_or(DatasetError::RowOutOfBounds {
                row,
                n_rows: self.n_rows,
            })
    }

    /// Row `i` in column order.
    pub fn row(&self, i: usize) -> Result<Vec<f64>, DatasetError> {
        if i >= self.n_rows {
            return Err(DatasetError::RowOutOfBounds {
                row: i,
                n_rows: self.n_rows,
            });
        }
        Ok(self.columns.iter().map(|c| c.values[i]).collect())
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.n_rows).map(move |i| self.columns.iter().map(|c| c.values[i]).collect())
    }

    /// Return a copy of this table with `name` appended as the last column.
    ///
    /// # Errors
    /// - [`DatasetError::DuplicateColumn`] if `name` already exists.
    /// - [`DatasetError::LengthMismatch`] if `values` does not have `n_rows` entries.
    pub fn with_column(
        &self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Table, DatasetError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(DatasetError::DuplicateColumn { column: name });
        }
        if values.len() != self.n_rows {
            return Err(DatasetError::LengthMismatch {
                column: name,
                expected: self.n_rows,
                got: values.len(),
            });
        }

        let mut columns = self.columns.clone();
        columns.push(Column::new(name, values));
        Ok(Table {
            columns,
            n_rows: self.n_rows,
        })
    }

    /// A new table with only `names`, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table, DatasetError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let idx =
                self.column_index(name.as_ref())
                    .ok_or_else(|| DatasetError::ColumnNotFound {
                        column: name.as_ref().to_string(),
                    })?;
            columns.push(self.columns[idx].clone());
        }
        let mut table = Table::new(columns)?;
        table.n_rows = self.n_rows;
        Ok(table)
    }

    /// Concatenate the columns of `other` after the columns of `self`.
    pub fn hstack(&self, other: &Table) -> Result<Table, DatasetError> {
        if other.n_rows != self.n_rows {
            return Err(DatasetError::LengthMismatch {
                column: "<hstack>".to_string(),
                expected: self.n_rows,
                got: other.n_rows,
            });
        }
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        let mut table = Table::new(columns)?;
        table.n_rows = self.n_rows;
        Ok(table)
    }

    /// A new table holding the rows at `indices`, in that order.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Table, DatasetError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_rows) {
            return Err(DatasetError::RowOutOfBounds {
                row: bad,
                n_rows: self.n_rows,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), indices.iter().map(|&i| c.values[i]).collect()))
            .collect();
        Ok(Table {
            columns,
            n_rows: indices.len(),
        })
    }

    /// Copy of this table with every cell passed through `f(column_index, value)`.
    /// Names and shape are unchanged.
    pub fn map_cells<F>(&self, mut f: F) -> Table
    where
        F: FnMut(usize, f64) -> f64,
    {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(j, col)| Column {
                name: col.name.clone(),
                values: col.values.iter().map(|&v| f(j, v)).collect(),
            })
            .collect();
        Table {
            columns,
            n_rows: self.n_rows,
        }
    }

    /// Overwrite a single cell in place.
    pub fn set(&mut self, row: usize, name: &str, value: f64) -> Result<(), DatasetError> {
        let n_rows = self.n_rows;
        let idx = self
            .column_index(name)
            .ok_or_else(|| DatasetError::ColumnNotFound {
                column: name.to_string(),
            })?;
        let cell = self.columns[idx]
            .values
            .get_mut(row)
            .ok_or(DatasetError::RowOutOfBounds { row, n_rows })?;
        *cell = value;
        Ok(())
    }

    /// Number of missing cells in the named column.
    pub fn missing_count(&self, name: &str) -> Result<usize, DatasetError> {
        Ok(self.column(name)?.iter().filter(|&&v| is_missing(v)).count())
    }
}
