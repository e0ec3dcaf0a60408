use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::optim::{history::History, params::PsoParams, report::OptimizationReport, variables::VariableSpec};

/// Everything needed to start a run, as stored in a JSON configuration file.
///
/// # Example
///
/// ```json
/// {
///   "variables": [
///     { "kind": "fixed", "lower": 0.1, "upper": 0.1 },
///     { "kind": "real", "lower": -5.0, "upper": 5.0 },
///     { "kind": "integer", "lower": 0.0, "upper": 10.0 }
///   ],
///   "pso": { "swarm_size": 20, "max_iters": 100, "w_start": 1.05, "w_end": 0.5, "vary_fraction": 0.9 },
///   "warm_start": [0.0, 5.0],
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Variable table, one entry per parameter of the objective
    pub variables: Vec<VariableSpec>,
    /// Swarm parameters
    #[serde(default)]
    pub pso: PsoParams,
    /// Optional warm start over the optimizable dimensions
    #[serde(default)]
    pub warm_start: Option<Vec<f64>>,
    /// Optional seed of the random streams
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Loads a run configuration from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the JSON file
///
/// # Errors
///
/// * `IOError::FileNotFound` if the file cannot be opened
/// * `IOError::JsonParseError` if the contents are not a valid configuration
pub fn load_config(path: impl Into<PathBuf>) -> Result<RunConfig, IOError> {
    let path = path.into();
    let file = File::open(path).map_err(IOError::FileNotFound)?;
    serde_json::from_reader(file).map_err(IOError::JsonParseError)
}

/// Saves a run configuration as pretty-printed JSON.
pub fn save_config(path: impl Into<PathBuf>, config: &RunConfig) -> Result<(), IOError> {
    write_json(path.into(), config)
}

/// Saves an optimization report as pretty-printed JSON.
///
/// # Arguments
///
/// * `path` - Destination file, created or truncated
/// * `report` - The report to save
pub fn save_report(path: impl Into<PathBuf>, report: &OptimizationReport) -> Result<(), IOError> {
    write_json(path.into(), report)
}

/// Saves a convergence trace as CSV, see [`History::write_csv`].
pub fn save_history_csv(path: impl Into<PathBuf>, history: &History) -> Result<(), IOError> {
    let file = File::create(path.into()).map_err(IOError::WriteError)?;
    history
        .write_csv(BufWriter::new(file))
        .map_err(IOError::WriteError)
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<(), IOError> {
    let mut writer = BufWriter::new(File::create(path).map_err(IOError::WriteError)?);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|error| {
        if error.is_io() {
            IOError::WriteError(error.into())
        } else {
            IOError::JsonParseError(error)
        }
    })?;
    writer.flush().map_err(IOError::WriteError)
}

/// Represents errors that can occur while reading or writing run files.
#[derive(Error, Debug)]
pub enum IOError {
    /// The file could not be opened for reading.
    #[error("File not found: {0}")]
    FileNotFound(#[from] std::io::Error),

    /// The file could not be created or written.
    #[error("Failed to write file: {0}")]
    WriteError(std::io::Error),

    /// The file contents could not be parsed or serialized as JSON.
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::params::PsoParamsBuilder;
    use ndarray::array;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = RunConfig {
            variables: vec![VariableSpec::fixed(0.1), VariableSpec::integer(0.0, 10.0)],
            pso: PsoParamsBuilder::default().swarm_size(8).build().unwrap(),
            warm_start: Some(vec![5.0]),
            seed: Some(42),
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_config_defaults() {
        let json = r#"{ "variables": [{ "kind": "real", "lower": 0.0, "upper": 1.0 }] }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.pso, PsoParams::default());
        assert_eq!(config.warm_start, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("missing.json"));
        assert!(matches!(result, Err(IOError::FileNotFound(_))));
    }

    #[test]
    fn test_save_history_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut history = History::with_capacity(1);
        history.record(array![1.0].view(), 2.0);

        save_history_csv(&path, &history).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "iteration,x0,fitness\n0,1,2\n");
    }

    #[test]
    fn test_unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::with_capacity(0);

        // A directory cannot be opened as a file for writing
        let result = save_history_csv(dir.path(), &history);
        assert!(matches!(result, Err(IOError::WriteError(_))));
        assert!(result.unwrap_err().to_string().starts_with("Failed to write file"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_is_a_write_error() {
        let mut history = History::with_capacity(1);
        history.record(array![1.0].view(), 2.0);

        // Every write to /dev/full fails with "no space left on device"
        let csv = save_history_csv("/dev/full", &history);
        assert!(matches!(csv, Err(IOError::WriteError(_))));

        let config = RunConfig {
            variables: vec![VariableSpec::real(0.0, 1.0)],
            pso: PsoParams::default(),
            warm_start: None,
            seed: None,
        };
        let json = save_config("/dev/full", &config);
        assert!(matches!(json, Err(IOError::WriteError(_))));
    }
}
