#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait Divider {
    fn divide(&self, n: i64) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ByTen;

impl Divider for ByTen {
    fn divide(&self, n: i64) -> i64 {
        n / 10
    }
}

pub fn divide(n: i64, divider: &dyn Divider) -> i64 {
    divider.divide(n)
}
