//! crates/site_builder_core/src/components/mod.rs
//!
//! Headless models of the page components. Each holds the state its view
//! renders from and performs the backend calls its user actions trigger.

pub mod chat_message;
pub mod code_editor;
pub mod preview_frame;
pub mod sidebar;
pub mod top_bar;

pub use chat_message::ChatBubble;
pub use code_editor::{CodeEditor, EditorTab};
pub use preview_frame::PreviewFrame;
pub use sidebar::{Sidebar, SidebarEntry};
pub use top_bar::{nav_items, NavItem, TopBar, UserMenu};
