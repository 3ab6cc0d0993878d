//! Configuration structures, one file per section group.

mod app;
mod backend;
mod llm;
mod network;

pub use app::{AppConfig, ChatConfig, UiConfig};
pub use backend::BackendConfig;
pub use llm::LlmConfig;
pub use network::NetworkConfig;
