//! crates/site_builder_core/src/components/top_bar.rs
//!
//! Top navigation bar and user menu.

use std::sync::Arc;

use crate::session::AuthSession;

const NAV_ITEMS: [(&str, &str); 3] = [
    ("Page Editor", "/dashboard"),
    ("Conversation", "/chat"),
    ("Live Preview", "/preview"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMenu {
    pub display_name: String,
    pub email: String,
    pub initials: String,
}

/// Navigation entries; an entry is active only on an exact path match.
pub fn nav_items(current_path: &str) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .map(|&(name, href)| NavItem {
            name,
            href,
            active: current_path == href,
        })
        .collect()
}

pub struct TopBar {
    session: Arc<AuthSession>,
}

impl TopBar {
    pub fn new(session: Arc<AuthSession>) -> Self {
        Self { session }
    }

    pub fn nav(&self, current_path: &str) -> Vec<NavItem> {
        nav_items(current_path)
    }

    /// `None` while nobody is signed in.
    pub fn user_menu(&self) -> Option<UserMenu> {
        let user = self.session.user()?;
        let display_name = user.display_name().to_string();
        let initials = display_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        Some(UserMenu {
            display_name,
            email: user.email,
            initials,
        })
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}
