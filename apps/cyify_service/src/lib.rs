pub mod app_module;
pub mod app_router;
pub mod core;
pub mod credentials;
pub mod health;
pub mod prompts;
pub mod session;
pub mod text_transformer;
