pub mod session_controller;
pub mod session_state;
pub mod session_store;
pub mod session_view;

pub use session_state::{Notice, NoticeLevel, SessionAction, SessionState};
pub use session_store::{Session, SessionStore, TransformJob};
