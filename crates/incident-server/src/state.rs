use incident_llm::{create_invoker, ModelError};

use crate::config::ServerConfig;
use crate::handler::RequestHandler;

pub struct AppState {
    pub handler: RequestHandler,
}

impl AppState {
    pub fn new(handler: RequestHandler) -> Self {
        Self { handler }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, ModelError> {
        let invoker = create_invoker(&config.invoker_config())?;
        let handler = RequestHandler::new(invoker).with_sectionizer(config.sectionizer());
        Ok(Self::new(handler))
    }
}
