//! Summary statistics for demographic series

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median with linear interpolation between the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[20.0, 22.0, 27.0]).unwrap(), 23.0);
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_relative_eq!(median(&[31.0, 19.0, 24.0]).unwrap(), 24.0);
        assert_relative_eq!(median(&[18.0, 30.0, 20.0, 22.0]).unwrap(), 21.0);
        assert!(median(&[]).is_none());
    }
}
