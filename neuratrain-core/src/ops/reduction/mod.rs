//! Full reductions to a scalar.

pub mod mean;
pub mod sum;

pub use mean::mean_op;
pub use sum::sum_op;

#[cfg(test)]
#[path = "reduction_test.rs"]
mod tests;
