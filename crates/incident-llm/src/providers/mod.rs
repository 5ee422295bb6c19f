//! Model invokers
//!
//! This module contains the model-hosting backends behind [`crate::ModelInvoker`].

pub mod bedrock;
pub mod static_text;

pub use bedrock::BedrockInvoker;
pub use static_text::StaticInvoker;
