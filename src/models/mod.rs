pub mod config;
pub mod credential;
pub mod session;

pub use config::{Configuration, ModelDescriptor, RunSettings, CONFIG_FILE};
pub use credential::ApiKey;
pub use session::{SessionState, SessionStore, STATE_FILE};
