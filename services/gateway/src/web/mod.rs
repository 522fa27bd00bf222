pub mod gate;
pub mod logging;
pub mod pages;
pub mod proxy;
pub mod state;

// Re-export the handlers so the router can be assembled in one place.
pub use gate::gate_pages;
pub use logging::log_requests;
pub use proxy::{
    delete_chat_handler, get_chat_handler, get_preview_handler, login_handler,
    post_message_handler, update_code_handler,
};
