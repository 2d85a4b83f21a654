/// Add two numbers
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Sum any amount of numbers; the empty sum is 0
pub fn sum(numbers: &[f64]) -> f64 {
    numbers.iter().copied().fold(0.0, add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_zero_with_no_numbers() {
        assert!(sum(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_returns_same_number_for_one_arg() {
        assert!((sum(&[5.0]) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_returns_correct_sum_for_many_args() {
        assert!((sum(&[1.0, 2.0, 3.0]) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(sum(&[1.0, f64::NAN]).is_nan());
        assert!(!sum(&[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_floats_need_tolerance() {
        let received = sum(&[0.1, 0.2]);
        assert_ne!(received.to_bits(), 0.3_f64.to_bits());
        assert!((received - 0.3).abs() < 1e-9);
    }
}
