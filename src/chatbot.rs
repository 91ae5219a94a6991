//! AI chatbot module - answers free-form channel messages with Gemini.

mod handler;
mod relay;
mod routing;

pub use handler::handle_message;
pub use relay::{ChatSettings, ReplySink, relay_chat};
pub use routing::{Route, route_message};
