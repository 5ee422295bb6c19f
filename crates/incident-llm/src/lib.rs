pub mod provider;
pub mod provider_factory;
pub mod providers;

pub use provider::{GenerationParams, ModelError, ModelInvoker, Result};
pub use provider_factory::{create_invoker, InvokerConfig, AVAILABLE_PROVIDERS};
pub use providers::{BedrockInvoker, StaticInvoker};
