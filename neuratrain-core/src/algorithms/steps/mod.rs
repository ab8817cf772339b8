//! Add-ons that adapt the training step.

pub mod errdiff;
pub mod leak_step;
pub mod search_then_converge;
pub mod simple_step;

pub use errdiff::ErrDiffStepUpdate;
pub use leak_step::LeakStepAdaptation;
pub use search_then_converge::SearchThenConverge;
pub use simple_step::SimpleStepMinimization;

#[cfg(test)]
#[path = "steps_test.rs"]
mod tests;
