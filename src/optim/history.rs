//! Convergence trace of a run.
//!
//! One row is appended per iteration with the global best position and fitness
//! known at the end of that iteration. The optimizer never reads the trace back.

use std::io::Write;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Global best at the end of one iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Iteration the row was recorded in
    pub iteration: usize,
    /// Global best position over the optimizable dimensions
    pub position: Vec<f64>,
    /// Global best fitness
    pub fitness: f64,
}

/// Append-only sequence of [`HistoryRow`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    rows: Vec<HistoryRow>,
}

impl History {
    /// Creates an empty history with room for `max_iters` rows.
    pub fn with_capacity(max_iters: usize) -> Self {
        Self {
            rows: Vec::with_capacity(max_iters),
        }
    }

    /// Appends the global best of the iteration that just finished.
    pub fn record(&mut self, position: ArrayView1<'_, f64>, fitness: f64) {
        self.rows.push(HistoryRow {
            iteration: self.rows.len(),
            position: position.to_vec(),
            fitness,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&HistoryRow> {
        self.rows.last()
    }

    /// The fitness column.
    pub fn fitness(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.fitness).collect()
    }

    /// The trace as a matrix with rows `[position..., fitness]`.
    pub fn to_array2(&self) -> Array2<f64> {
        let dim = self.rows.first().map_or(0, |row| row.position.len());
        let mut array = Array2::zeros((self.rows.len(), dim + 1));
        for (mut target, row) in array.rows_mut().into_iter().zip(self.rows.iter()) {
            for (d, value) in row.position.iter().enumerate() {
                target[d] = *value;
            }
            target[dim] = row.fitness;
        }
        array
    }

    /// Writes the trace as CSV with the header `iteration,x0,...,fitness`.
    ///
    /// # Arguments
    ///
    /// * `writer` - Destination of the CSV text
    pub fn write_csv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let dim = self.rows.first().map_or(0, |row| row.position.len());

        let mut header = vec!["iteration".to_string()];
        header.extend((0..dim).map(|d| format!("x{d}")));
        header.push("fitness".to_string());
        writeln!(writer, "{}", header.join(","))?;

        for row in &self.rows {
            let mut fields = vec![row.iteration.to_string()];
            fields.extend(row.position.iter().map(|value| value.to_string()));
            fields.push(row.fitness.to_string());
            writeln!(writer, "{}", fields.join(","))?;
        }

        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn history() -> History {
        let mut history = History::with_capacity(2);
        history.record(array![0.5, 2.0].view(), 1.0);
        history.record(array![0.25, 3.0].view(), 1.5);
        history
    }

    #[test]
    fn test_record_numbers_rows() {
        let history = history();

        assert_eq!(history.len(), 2);
        assert_eq!(history.rows()[1].iteration, 1);
        assert_eq!(history.fitness(), vec![1.0, 1.5]);
        assert_eq!(history.last().unwrap().position, vec![0.25, 3.0]);
    }

    #[test]
    fn test_to_array2() {
        assert_eq!(
            history().to_array2(),
            array![[0.5, 2.0, 1.0], [0.25, 3.0, 1.5]]
        );
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        history().write_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(
            csv,
            "iteration,x0,x1,fitness\n0,0.5,2,1\n1,0.25,3,1.5\n"
        );
    }
}
