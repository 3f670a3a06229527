//! # Validation Module
//!
//! Input validation for job specifications.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (form inputs)                                       │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any network call)                        │
//! │  ├── Required sizing fields present and positive                       │
//! │  └── Optional fields in range when supplied                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing backend                                              │
//! │  └── Inventory availability, model input checks                        │
//! │                                                                         │
//! │  A ValidationError here means NO request was sent.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::item::JobSpec;
use crate::{MAX_CUTTING_TIME_MINUTES, MAX_DIMENSION_MM, MAX_THICKNESS_MM};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a sheet dimension in millimeters.
///
/// ## Rules
/// - Must be present and positive (`Some(0.0)` counts as unset-by-accident
///   and is rejected, never treated as a degenerate job)
/// - Must not exceed [`MAX_DIMENSION_MM`]
pub fn validate_dimension(field: &str, value: Option<f64>) -> ValidationResult<()> {
    let value = value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if value > MAX_DIMENSION_MM {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: MAX_DIMENSION_MM,
        });
    }

    Ok(())
}

/// Validates an estimated cutting time in minutes.
pub fn validate_cutting_time(value: Option<f64>) -> ValidationResult<()> {
    let value = value.ok_or_else(|| ValidationError::Required {
        field: "time".to_string(),
    })?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "time".to_string(),
        });
    }

    if value > MAX_CUTTING_TIME_MINUTES {
        return Err(ValidationError::OutOfRange {
            field: "time".to_string(),
            min: 0.0,
            max: MAX_CUTTING_TIME_MINUTES,
        });
    }

    Ok(())
}

/// Validates a material thickness in millimeters, when supplied.
pub fn validate_thickness(value: f64) -> ValidationResult<()> {
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "thickness".to_string(),
        });
    }

    if value > MAX_THICKNESS_MM {
        return Err(ValidationError::OutOfRange {
            field: "thickness".to_string(),
            min: 0.0,
            max: MAX_THICKNESS_MM,
        });
    }

    Ok(())
}

/// Validates a complexity score (1-5 scale), when supplied.
pub fn validate_complexity(value: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "complexity".to_string(),
            min: 1.0,
            max: 5.0,
        });
    }

    Ok(())
}

/// Validates a copy quantity, when supplied.
pub fn validate_quantity(value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name, when supplied.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Job Spec Validation
// =============================================================================

/// Validates a job specification before insertion into an order.
///
/// ## Rules
/// - width, height, time: required, positive, within ceilings
/// - thickness, complexity, quantity, name: validated only when present -
///   partial items are tolerated by design
pub fn validate_job_spec(spec: &JobSpec) -> ValidationResult<()> {
    validate_dimension("width", spec.width_mm)?;
    validate_dimension("height", spec.height_mm)?;
    validate_cutting_time(spec.time_minutes)?;

    if let Some(thickness) = spec.thickness_mm {
        validate_thickness(thickness)?;
    }
    if let Some(complexity) = spec.complexity {
        validate_complexity(complexity)?;
    }
    if let Some(quantity) = spec.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(name) = &spec.name {
        validate_item_name(name)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimension() {
        assert!(validate_dimension("width", Some(300.0)).is_ok());
        assert!(validate_dimension("width", None).is_err());
        assert!(validate_dimension("width", Some(0.0)).is_err());
        assert!(validate_dimension("width", Some(-5.0)).is_err());
        assert!(validate_dimension("width", Some(20_000.0)).is_err());
    }

    #[test]
    fn test_validate_cutting_time() {
        assert!(validate_cutting_time(Some(15.0)).is_ok());
        assert!(validate_cutting_time(None).is_err());
        assert!(validate_cutting_time(Some(0.0)).is_err());
        assert!(validate_cutting_time(Some(2000.0)).is_err());
    }

    #[test]
    fn test_validate_thickness() {
        assert!(validate_thickness(3.0).is_ok());
        assert!(validate_thickness(0.0).is_err());
        assert!(validate_thickness(150.0).is_err());
    }

    #[test]
    fn test_validate_complexity() {
        for score in 1..=5u8 {
            assert!(validate_complexity(score).is_ok());
        }
        assert!(validate_complexity(0).is_err());
        assert!(validate_complexity(6).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_validate_job_spec_partial_items_tolerated() {
        // No material, thickness, color - still a valid insertion.
        let spec = JobSpec::sized(300.0, 200.0, 15.0);
        assert!(validate_job_spec(&spec).is_ok());

        // But present optional fields are still range-checked.
        let spec = JobSpec {
            complexity: Some(9),
            ..JobSpec::sized(300.0, 200.0, 15.0)
        };
        assert!(validate_job_spec(&spec).is_err());
    }
}
