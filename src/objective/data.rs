//! Train/test data partitions handed to the objective function.
//!
//! The optimizer treats the contents as opaque. A [`DataBundle`] is borrowed for
//! the whole run and every field is passed through to the objective unchanged.

use serde::{Deserialize, Serialize};

/// Training and test partitions evaluated by an objective function.
///
/// # Type Parameters
///
/// * `D` - Type of the data matrices (features)
/// * `L` - Type of the label vectors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataBundle<D, L> {
    /// Training data matrix
    pub train_data: D,
    /// Labels belonging to the training data
    pub train_labels: L,
    /// Test data matrix
    pub test_data: D,
    /// Labels belonging to the test data
    pub test_labels: L,
}

impl<D, L> DataBundle<D, L> {
    /// Creates a new bundle from the four partitions.
    ///
    /// # Arguments
    ///
    /// * `train_data` - Training data matrix
    /// * `train_labels` - Training labels
    /// * `test_data` - Test data matrix
    /// * `test_labels` - Test labels
    pub fn new(train_data: D, train_labels: L, test_data: D, test_labels: L) -> Self {
        Self {
            train_data,
            train_labels,
            test_data,
            test_labels,
        }
    }
}

impl DataBundle<(), ()> {
    /// A bundle without data, for objectives that only look at the parameters.
    pub fn empty() -> Self {
        Self::new((), (), (), ())
    }
}
