pub mod style_check;
pub mod text_transformer_service;

pub use text_transformer_service::TextTransformerService;
