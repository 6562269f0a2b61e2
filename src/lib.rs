pub mod agent;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod session;
pub mod voice;

pub use crate::agent::{AgentAction, AgentReply, Orchestrator};
pub use crate::config::Settings;
pub use crate::error::AgentError;
pub use crate::form::{FieldType, FormCatalog, FormDefinition, FormField, SlotValue};
pub use crate::session::Session;
