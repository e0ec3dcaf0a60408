//! Information display for run inputs and results
//!
//! This module renders variable tables, convergence traces and optimization
//! reports as human-readable tables. It implements the `Display` trait for
//! `OptimizationReport` and `DecodedVariables` and provides helpers to format
//! the remaining components.

use std::fmt::{self, Display};

use tabled::{builder::Builder, settings::Style};

use crate::optim::{
    history::{History, HistoryRow},
    report::OptimizationReport,
    variables::{DecodedVariables, VariableKind, VariableSpec},
};

/// Number of trailing history rows shown in a report summary.
const HISTORY_TAIL: usize = 10;

/// Trait for converting components to table records
///
/// Implementors provide column headers and a way to convert their data to
/// string values for each column.
trait TableRecord {
    /// Get the column headers for the table
    fn columns() -> Vec<String>;

    /// Convert the instance to a record for display in a table
    fn to_record(&self) -> Vec<String>;
}

impl TableRecord for (usize, &VariableSpec) {
    fn columns() -> Vec<String> {
        vec![
            "#".to_string(),
            "Kind".to_string(),
            "Lower / Value".to_string(),
            "Upper".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        let (index, spec) = self;
        let kind = match spec.kind {
            VariableKind::Real => "real",
            VariableKind::Integer => "integer",
            VariableKind::Fixed => "fixed",
        };
        let upper = match spec.kind {
            VariableKind::Fixed => "-".to_string(),
            _ => spec.upper.to_string(),
        };
        vec![index.to_string(), kind.to_string(), spec.lower.to_string(), upper]
    }
}

impl TableRecord for HistoryRow {
    fn columns() -> Vec<String> {
        vec![
            "Iteration".to_string(),
            "Best fitness".to_string(),
            "Best position".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            self.iteration.to_string(),
            format!("{:.6}", self.fitness),
            format_vector(&self.position),
        ]
    }
}

/// Converts a collection of TableRecord implementors to a formatted table string
fn to_table<T: TableRecord>(records: &[T]) -> String {
    let mut builder = Builder::default();
    builder.push_record(T::columns());

    for record in records {
        builder.push_record(record.to_record());
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn format_vector(values: &[f64]) -> String {
    let values = values
        .iter()
        .map(|value| format!("{value:.6}"))
        .collect::<Vec<_>>();
    format!("[{}]", values.join(", "))
}

/// Renders a variable table with one row per parameter.
pub fn variables_table(variables: &[VariableSpec]) -> String {
    let records = variables.iter().enumerate().collect::<Vec<_>>();
    to_table(&records)
}

/// Renders the last rows of a convergence trace.
///
/// # Arguments
/// * `history` - The trace to render
/// * `tail` - Maximum number of trailing rows to show
pub fn history_table(history: &History, tail: usize) -> String {
    let rows = history.rows();
    to_table(&rows[rows.len().saturating_sub(tail)..])
}

impl Display for DecodedVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(vec!["Search Space"]);
        builder.push_record(vec![format!(
            "{} optimizable ({} integer), {} fixed",
            self.dim(),
            self.integer_mask().iter().filter(|&&is_int| is_int).count(),
            self.constants().len()
        )]);
        builder.push_record(vec!["Optimizable Variables"]);
        builder.push_record(vec![variables_table(self.specs())]);

        if !self.constants().is_empty() {
            builder.push_record(vec!["Fixed Values"]);
            builder.push_record(vec![format_vector(&self.constants().to_vec())]);
        }

        let mut table = builder.build();
        table.with(Style::sharp());
        write!(f, "{table}")
    }
}

impl Display for OptimizationReport {
    /// Formats a report as a summary table followed by the tail of the history
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();

        builder.push_record(vec!["Optimization Report".to_string(), String::new()]);
        builder.push_record(vec!["Best fitness".to_string(), format!("{:.6}", self.best_fitness)]);
        builder.push_record(vec![
            "Best position".to_string(),
            format_vector(&self.best_position),
        ]);
        builder.push_record(vec![
            "Best parameters".to_string(),
            format_vector(&self.best_params),
        ]);
        builder.push_record(vec!["Iterations".to_string(), self.iterations.to_string()]);
        builder.push_record(vec!["Evaluations".to_string(), self.evaluations.to_string()]);
        builder.push_record(vec![
            "Non-finite evaluations".to_string(),
            self.non_finite_evaluations.to_string(),
        ]);
        builder.push_record(vec!["Seed".to_string(), self.seed.to_string()]);

        let mut table = builder.build();
        table.with(Style::sharp());
        writeln!(f, "{table}")?;
        write!(f, "{}", history_table(&self.history, HISTORY_TAIL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_variables_table_lists_every_variable() {
        let table = variables_table(&[VariableSpec::fixed(2.5), VariableSpec::integer(0.0, 10.0)]);

        assert!(table.contains("fixed"));
        assert!(table.contains("integer"));
        assert!(table.contains("2.5"));
        assert!(table.contains("10"));
    }

    #[test]
    fn test_history_table_shows_tail() {
        let mut history = History::with_capacity(20);
        for i in 0..20 {
            history.record(array![i as f64].view(), i as f64 * 1000.0);
        }

        let table = history_table(&history, 3);
        assert!(table.contains("19000.000000"));
        assert!(table.contains("17000.000000"));
        assert!(!table.contains("16000.000000"));
    }

    #[test]
    fn test_decoded_variables_display() {
        let decoded = DecodedVariables::decode(&[
            VariableSpec::fixed(1.0),
            VariableSpec::real(0.0, 1.0),
            VariableSpec::integer(0.0, 4.0),
        ])
        .unwrap();

        let text = decoded.to_string();
        assert!(text.contains("2 optimizable (1 integer), 1 fixed"));
    }
}
