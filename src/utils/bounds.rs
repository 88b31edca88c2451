//! Shape checks that map straight onto [`LabError`](crate::error::LabError) variants

use crate::error::{LabErrorBuilder, LabResult};

/// Fail with `ShapeMismatch` unless both sequences have the same length
pub fn check_same_length(
    what: &str,
    expected: usize,
    actual: usize,
    component: &str,
    operation: &str,
) -> LabResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(LabErrorBuilder::new(component, operation).shape_mismatch(what, expected, actual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    #[test]
    fn test_same_length() {
        assert!(check_same_length("signal", 3, 3, "filters", "train").is_ok());
        assert!(matches!(
            check_same_length("signal", 3, 4, "filters", "train"),
            Err(LabError::ShapeMismatch { expected: 3, actual: 4, .. })
        ));
    }
}
