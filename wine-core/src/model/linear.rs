//! Linear regression model

use super::{ModelLoadError, QualityModel};

/// `intercept + Σ coefficients[i] · x[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(
        n_features: usize,
        intercept: f64,
        coefficients: Vec<f64>,
    ) -> Result<Self, ModelLoadError> {
        if coefficients.len() != n_features {
            return Err(ModelLoadError::InvalidArtifact(format!(
                "linear model has {} coefficients for {} features",
                coefficients.len(),
                n_features
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelLoadError::InvalidArtifact(
                "linear model has non-finite weights".into(),
            ));
        }
        Ok(Self {
            intercept,
            coefficients,
        })
    }
}

impl QualityModel for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, String> {
        if features.len() != self.coefficients.len() {
            return Err(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            ));
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }

    fn kind(&self) -> &str {
        "linear"
    }
}
