//! crates/site_builder_core/src/storage.rs
//!
//! In-memory `SessionStore`: a key/value local storage plus a cookie jar,
//! shared by every holder of the `Arc`. Last writer wins.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cookies::CookieJar;
use crate::ports::{SessionStore, TOKEN_COOKIE_DAYS, TOKEN_KEY, USER_DATA_KEY};

#[derive(Debug, Default)]
struct StoreInner {
    local: HashMap<String, String>,
    cookies: CookieJar,
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<StoreInner>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.inner.read().local.get(key).cloned()
    }

    /// Writes local storage only, leaving cookies untouched.
    pub fn set_item(&self, key: &str, value: &str) {
        self.inner
            .write()
            .local
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove_item(&self, key: &str) {
        self.inner.write().local.remove(key);
    }

    /// Writes a cookie only, leaving local storage untouched.
    pub fn set_cookie(&self, name: &str, value: &str, days: i64) -> String {
        self.inner.write().cookies.set(name, value, days)
    }

    pub fn remove_cookie(&self, name: &str) -> String {
        self.inner.write().cookies.remove(name)
    }

    /// All live cookies as a `Cookie` request header.
    pub fn cookie_header(&self) -> Option<String> {
        self.inner.read().cookies.header_value()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.get_item(TOKEN_KEY)
    }

    fn set_token(&self, token: &str) {
        let mut inner = self.inner.write();
        inner.local.insert(TOKEN_KEY.to_string(), token.to_string());
        inner.cookies.set(TOKEN_KEY, token, TOKEN_COOKIE_DAYS);
    }

    fn remove_token(&self) {
        let mut inner = self.inner.write();
        inner.local.remove(TOKEN_KEY);
        inner.cookies.remove(TOKEN_KEY);
    }

    fn cookie_token(&self) -> Option<String> {
        self.inner.read().cookies.get(TOKEN_KEY).map(str::to_string)
    }

    fn user_data(&self) -> Option<String> {
        self.get_item(USER_DATA_KEY)
    }

    fn set_user_data(&self, serialized: &str) {
        self.set_item(USER_DATA_KEY, serialized);
    }

    fn remove_user_data(&self) {
        self.remove_item(USER_DATA_KEY);
    }
}
