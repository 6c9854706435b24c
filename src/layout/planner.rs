//! # Column Planning
//!
//! Turns relative column weights into byte widths that exactly fill a line.

use crate::error::ConfigError;

/// Check that every weight is finite and strictly positive.
pub fn validate_weights(weights: &[f64]) -> Result<(), ConfigError> {
    if weights.is_empty() {
        return Err(ConfigError::EmptyRow);
    }
    match weights
        .iter()
        .position(|w| !w.is_finite() || *w <= 0.0)
    {
        Some(column) => Err(ConfigError::InvalidWeight {
            column,
            weight: weights[column],
        }),
        None => Ok(()),
    }
}

/// # Allocate Column Widths
///
/// Every column but the last gets `floor(weight * budget / total)`; the last
/// column takes whatever remains, so the widths always sum to `budget`.
///
/// ```
/// use columna::layout::planner::allocate;
///
/// assert_eq!(allocate(&[2.0, 1.0, 1.0], 48).unwrap(), vec![24, 12, 12]);
/// assert_eq!(allocate(&[1.0, 1.0, 1.0], 32).unwrap(), vec![10, 10, 12]);
/// ```
pub fn allocate(weights: &[f64], budget: usize) -> Result<Vec<usize>, ConfigError> {
    validate_weights(weights)?;

    let total: f64 = weights.iter().sum();
    let mut widths = Vec::with_capacity(weights.len());
    let mut used = 0usize;

    for weight in &weights[..weights.len() - 1] {
        let width = ((weight * budget as f64) / total).floor() as usize;
        // Float error must not push the running sum past the budget
        let width = width.min(budget - used);
        used += width;
        widths.push(width);
    }
    widths.push(budget - used);

    Ok(widths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_allocate_proportional() {
        assert_eq!(allocate(&[2.0, 1.0, 1.0], 48), Ok(vec![24, 12, 12]));
        assert_eq!(allocate(&[1.0; 4], 48), Ok(vec![12, 12, 12, 12]));
    }

    #[test]
    fn test_last_column_absorbs_remainder() {
        assert_eq!(allocate(&[1.0, 1.0, 1.0], 16), Ok(vec![5, 5, 6]));
        assert_eq!(allocate(&[0.1, 0.2, 0.7], 48), Ok(vec![4, 9, 35]));
    }

    #[test]
    fn test_single_column() {
        assert_eq!(allocate(&[3.5], 24), Ok(vec![24]));
    }

    #[test]
    fn test_tiny_weight_gets_zero() {
        assert_eq!(allocate(&[0.001, 1000.0], 32), Ok(vec![0, 32]));
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert_eq!(allocate(&[], 48), Err(ConfigError::EmptyRow));
        assert_eq!(
            allocate(&[1.0, 0.0], 48),
            Err(ConfigError::InvalidWeight {
                column: 1,
                weight: 0.0
            })
        );
        assert!(matches!(
            allocate(&[f64::NAN], 48),
            Err(ConfigError::InvalidWeight { column: 0, .. })
        ));
        assert!(allocate(&[1.0, -2.0], 48).is_err());
        assert!(allocate(&[f64::INFINITY, 1.0], 48).is_err());
    }
}
