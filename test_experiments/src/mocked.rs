#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait Multiplier {
    fn multiply(&self, n: i64) -> i64;
}

/// The production multiplier
#[derive(Debug, Default, Clone, Copy)]
pub struct TenTimes;

impl Multiplier for TenTimes {
    fn multiply(&self, n: i64) -> i64 {
        n * 10
    }
}

/// Multiply `n` through whichever multiplier the caller supplies
pub fn multiply(n: i64, multiplier: &dyn Multiplier) -> i64 {
    multiplier.multiply(n)
}
