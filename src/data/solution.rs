//! Five-component flow solution attached to mesh nodes.

use crate::mesh_error::MeshError;

/// Components per node, in storage order.
pub const COMPONENTS: usize = 5;

/// Component names written next to the `fields` array.
pub const COMPONENT_NAMES: [&str; COMPONENTS] =
    ["Pressure", "VelocityX", "VelocityY", "VelocityZ", "Temperature"];

/// Name of the point-data array carrying the solution.
pub const FIELD_ARRAY_NAME: &str = "fields";

/// A loaded solution: interleaved values, [`COMPONENTS`] per local node.
#[derive(Clone, Debug, PartialEq)]
pub struct SolutionField {
    name: String,
    time: Option<f64>,
    values: Vec<f64>,
}

impl SolutionField {
    /// Wrap `values` for `node_count` local nodes.
    ///
    /// # Errors
    /// [`MeshError::SolutionLayout`] unless `values.len() == node_count * 5`.
    pub fn try_new(
        name: impl Into<String>,
        time: Option<f64>,
        values: Vec<f64>,
        node_count: usize,
    ) -> Result<Self, MeshError> {
        let expected = node_count * COMPONENTS;
        if values.len() != expected {
            return Err(MeshError::SolutionLayout {
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            time,
            values,
        })
    }

    /// Name of the stored solution node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Solution time, when the file stores one.
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    /// Local nodes covered by the values.
    pub fn node_count(&self) -> usize {
        self.values.len() / COMPONENTS
    }

    /// Interleaved values, [`COMPONENTS`] per node.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Hands the buffer over to its new owner (the grid's point data).
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_must_cover_every_node() {
        let err = SolutionField::try_new("s", None, vec![0.0; 9], 2).unwrap_err();
        assert_eq!(
            err,
            MeshError::SolutionLayout {
                expected: 10,
                found: 9
            }
        );
        let ok = SolutionField::try_new("s", Some(0.5), vec![0.0; 10], 2).unwrap();
        assert_eq!(ok.node_count(), 2);
        assert_eq!(ok.time(), Some(0.5));
    }
}
