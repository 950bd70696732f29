pub mod blog;
pub mod config;
pub mod content;
pub mod model;
pub mod platform;
pub mod preferences;

// Interpreter
pub mod command;
pub mod handlers;
pub mod output;
pub mod panel;
pub mod session;

// UI-agnostic rendering
pub mod render;
