// Handlers module

pub mod health;
pub mod pages;
pub mod webhook;

pub use health::health_handler;
pub use pages::{home_handler, privacy_handler};
pub use webhook::{receive_webhook_handler, verify_webhook_handler};
