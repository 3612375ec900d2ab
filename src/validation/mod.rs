// src/validation/mod.rs

//! Numerical consistency checks on a [`StateVector`].
//!
//! A failure here always means a bug in state evolution, never bad input,
//! and is reported as `GroverError::NumericalConsistency`.

use crate::core::{GroverError, StateVector, NORM_TOLERANCE};

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(GroverError::NumericalConsistency)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), GroverError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.total_probability();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(GroverError::numerical(format!(
            "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

/// Checks that no amplitude has become NaN or infinite.
pub fn check_finite(state: &StateVector) -> Result<(), GroverError> {
    match state.vector().iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        Some(index) => Err(GroverError::numerical(format!(
            "amplitude at basis index {} is not finite: {}",
            index,
            state.vector()[index]
        ))),
        None => Ok(()),
    }
}

/// Runs every state check: finiteness, then normalization.
pub fn validate_state(state: &StateVector, norm_tolerance: Option<f64>) -> Result<(), GroverError> {
    check_finite(state)?;
    check_normalization(state, norm_tolerance)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_normalized_state_passes() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let state = StateVector::new(vec![Complex::new(h, 0.0), Complex::new(0.0, -h)], 1);
        assert!(validate_state(&state, None).is_ok());
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = StateVector::new(vec![Complex::new(0.5, 0.0), Complex::new(0.5, 0.0)], 1);
        assert!(matches!(
            check_normalization(&state, None),
            Err(GroverError::NumericalConsistency { .. })
        ));
        // a loose enough tolerance accepts it
        assert!(check_normalization(&state, Some(0.6)).is_ok());
    }

    #[test]
    fn test_nan_amplitude_fails() {
        let state = StateVector::new(vec![Complex::new(f64::NAN, 0.0), Complex::new(1.0, 0.0)], 1);
        assert!(check_finite(&state).is_err());
    }
}
