use super::data::DataBundle;
use super::error::ObjectiveError;

/// Defines the function maximized by the optimizer.
///
/// An objective scores a full parameter vector (fixed constants followed by the
/// optimizable values) against a train/test split. Higher values are better.
/// The optimizer treats it as a black box: it may be expensive and
/// non-deterministic, and it is called once per particle per iteration without
/// caching.
///
/// Non-finite return values are not errors. They are ranked as negative
/// infinity so they can never become an incumbent.
///
/// Any closure with the signature
/// `Fn(&D, &L, &D, &L, &[f64]) -> Result<f64, ObjectiveError>` is an objective.
///
/// # Type Parameters
///
/// * `D` - Type of the data matrices
/// * `L` - Type of the label vectors
pub trait Objective<D, L> {
    /// Scores a parameter vector.
    ///
    /// # Arguments
    /// * `train_data` - Training data matrix
    /// * `train_labels` - Training labels
    /// * `test_data` - Test data matrix
    /// * `test_labels` - Test labels
    /// * `params` - Full parameter vector
    ///
    /// # Returns
    /// * `Result<f64, ObjectiveError>` - The fitness (higher is better) or an error
    fn evaluate(
        &self,
        train_data: &D,
        train_labels: &L,
        test_data: &D,
        test_labels: &L,
        params: &[f64],
    ) -> Result<f64, ObjectiveError>;

    /// Scores a parameter vector against all partitions of a [`DataBundle`].
    fn evaluate_bundle(
        &self,
        data: &DataBundle<D, L>,
        params: &[f64],
    ) -> Result<f64, ObjectiveError> {
        self.evaluate(
            &data.train_data,
            &data.train_labels,
            &data.test_data,
            &data.test_labels,
            params,
        )
    }
}

impl<D, L, F> Objective<D, L> for F
where
    F: Fn(&D, &L, &D, &L, &[f64]) -> Result<f64, ObjectiveError>,
{
    fn evaluate(
        &self,
        train_data: &D,
        train_labels: &L,
        test_data: &D,
        test_labels: &L,
        params: &[f64],
    ) -> Result<f64, ObjectiveError> {
        self(train_data, train_labels, test_data, test_labels, params)
    }
}
