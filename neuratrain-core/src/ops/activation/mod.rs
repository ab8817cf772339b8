//! Activation functions used by the network layers.

pub mod relu;
pub mod sigmoid;
pub mod softmax;
pub mod softplus;
pub mod tanh;

pub use relu::relu_op;
pub use sigmoid::sigmoid_op;
pub use softmax::softmax_op;
pub use softplus::softplus_op;
pub use tanh::tanh_op;

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
