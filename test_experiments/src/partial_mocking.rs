pub trait MathUtils {
    fn add(&self, a: i64, b: i64) -> i64 {
        a + b
    }

    fn subtract(&self, a: i64, b: i64) -> i64 {
        a - b
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Math;

impl MathUtils for Math {}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::*;

    // Only `subtract` is listed, so `add` keeps its default body.
    mock! {
        pub Math {}

        impl MathUtils for Math {
            fn subtract(&self, a: i64, b: i64) -> i64;
        }
    }

    #[test]
    fn test_real_implementation() {
        assert_eq!(Math.add(1, 2), 3);
        assert_eq!(Math.subtract(3, 2), 1);
    }

    #[test]
    fn test_add_stays_real() {
        let math = MockMath::new();
        assert_eq!(math.add(1, 2), 3);
    }

    #[test]
    fn test_subtract_is_mocked() {
        let mut math = MockMath::new();
        math.expect_subtract()
            .with(eq(3), eq(2))
            .times(1)
            .return_const(99_i64);

        assert_eq!(math.subtract(3, 2), 99);
        assert_eq!(math.add(3, 2), 5);
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn test_unconfigured_subtract_panics() {
        let math = MockMath::new();
        math.subtract(3, 2);
    }
}
