//! Quasi-Newton training: an inverse Hessian estimate refined after every
//! step, and a golden-section line search along the resulting direction.

pub mod line_search;
pub mod quasi_newton;
pub mod update_functions;

pub use line_search::{golden_section_search, LineSearchConfig};
pub use quasi_newton::QuasiNewton;
pub use update_functions::UpdateFunction;
