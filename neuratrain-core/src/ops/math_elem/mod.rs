//! Element-wise math functions.

pub mod abs;
pub mod clamp;
pub mod ln;
pub mod powi;
pub mod sqrt;

pub use abs::abs_op;
pub use clamp::clamp_op;
pub use ln::ln_op;
pub use powi::powi_op;
pub use sqrt::sqrt_op;
