pub mod bot;
pub mod chatbot;
pub mod chunker;
pub mod commands;
pub mod config;
pub mod error;
pub mod gemini;
pub mod liveness;

pub use bot::run;
