use thiserror::Error;

/// Errors raised by the deflection pipeline.
///
/// Validation failures are raised at the entry point of a calculation, before
/// any numerical work. Numerical failures ([`ImpactorError::Convergence`] and
/// [`ImpactorError::DegenerateOrbit`]) abort the single calculation they occur
/// in; nothing is retried or clamped internally.
#[derive(Error, Debug)]
pub enum ImpactorError {
    #[error("Invalid input for `{field}`: {reason}")]
    InputValidation { field: String, reason: String },

    #[error(
        "Kepler equation did not converge after {iterations} iterations \
         (M = {mean_anomaly}, e = {eccentricity}, residual = {residual:e})"
    )]
    Convergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
        residual: f64,
    },

    #[error("Orbit is not a bound ellipse (e = {eccentricity}, a = {semi_major_axis} m)")]
    DegenerateOrbit {
        eccentricity: f64,
        semi_major_axis: f64,
    },

    #[error("External asteroid data unavailable: {0}")]
    ExternalDataUnavailable(String),

    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl ImpactorError {
    /// Build an [`ImpactorError::InputValidation`] for `field`.
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ImpactorError::InputValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Reject non-finite or non-positive values of a named quantity.
    pub(crate) fn require_positive(field: &str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::invalid(
                field,
                format!("must be a finite value > 0, got {value}"),
            ))
        }
    }
}

impl PartialEq for ImpactorError {
    fn eq(&self, other: &Self) -> bool {
        use ImpactorError::*;
        match (self, other) {
            (
                InputValidation {
                    field: fa,
                    reason: ra,
                },
                InputValidation {
                    field: fb,
                    reason: rb,
                },
            ) => fa == fb && ra == rb,
            (
                Convergence {
                    mean_anomaly: ma,
                    eccentricity: ea,
                    iterations: ia,
                    ..
                },
                Convergence {
                    mean_anomaly: mb,
                    eccentricity: eb,
                    iterations: ib,
                    ..
                },
            ) => ma == mb && ea == eb && ia == ib,
            (
                DegenerateOrbit {
                    eccentricity: ea,
                    semi_major_axis: aa,
                },
                DegenerateOrbit {
                    eccentricity: eb,
                    semi_major_axis: ab,
                },
            ) => ea == eb && aa == ab,
            (ExternalDataUnavailable(a), ExternalDataUnavailable(b)) => a == b,

            // Wrapped library errors are not comparable: equal if same variant
            (JsonError(_), JsonError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
