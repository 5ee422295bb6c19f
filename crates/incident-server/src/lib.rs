pub mod config;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod state;

pub use config::{ProviderType, ServerConfig};
pub use error::HandlerError;
pub use handler::RequestHandler;
pub use server::{app_config, mock_config, run_server};
pub use state::AppState;
