// HTTP server modules
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

// Startup configuration
pub mod config;

// Relay pipeline
pub mod knowledge;
pub mod messenger;
pub mod responder;

// LLM abstraction layer
pub mod llm;
