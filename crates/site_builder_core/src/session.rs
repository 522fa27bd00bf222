//! crates/site_builder_core/src/session.rs
//!
//! The auth session provider: who is signed in for the lifetime of the tab.
//!
//! The session is an explicit object handed to whatever needs it (the chat
//! page, the top bar) rather than ambient global state. It owns no token of
//! its own; the token lives in the `SessionStore` and the user record is
//! derived from it.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::domain::{Credentials, Registration, User};
use crate::ports::{AuthApi, Navigator, PortResult, SessionStore};
use crate::token::{decode_claims, TokenClaims};

/// Externally visible state of the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Initial state until `initialize` has resolved the stored token.
    Loading,
    Authenticated(User),
    Anonymous,
}

#[derive(Debug)]
struct SessionState {
    user: Option<User>,
    loading: bool,
}

/// Snapshot of every place auth state lives, for debugging inconsistent
/// sessions (e.g. a cookie without a matching stored token).
#[derive(Debug, Clone, PartialEq)]
pub struct AuthDiagnostics {
    pub loading: bool,
    pub logged_in: bool,
    pub user: Option<User>,
    pub storage_token: bool,
    pub cookie_token: bool,
    pub claims: Option<TokenClaims>,
    /// True when local storage and the cookie hold the same token (or neither does).
    pub consistent: bool,
}

pub struct AuthSession {
    auth: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            store,
            navigator,
            state: RwLock::new(SessionState {
                user: None,
                loading: true,
            }),
        }
    }

    pub fn status(&self) -> AuthStatus {
        let state = self.state.read();
        match (&state.user, state.loading) {
            (_, true) => AuthStatus::Loading,
            (Some(user), false) => AuthStatus::Authenticated(user.clone()),
            (None, false) => AuthStatus::Anonymous,
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().user.is_some()
    }

    /// Resolves the stored token into a user. Cached user data wins over a
    /// profile lookup. Always leaves the `Loading` state.
    pub async fn initialize(&self) {
        if self.store.token().is_some() {
            match self.stored_user() {
                Some(user) => {
                    debug!("restoring user from session storage");
                    self.set_user(Some(user));
                }
                None => self.fetch_user_profile().await,
            }
        }
        self.state.write().loading = false;
    }

    /// Stores the token and establishes the user, either from `user` or
    /// through the profile fallbacks. Leaves the `Loading` state.
    pub async fn login(&self, token: &str, user: Option<User>) {
        info!(with_user = user.is_some(), "establishing session");
        self.store.set_token(token);
        match user {
            Some(user) => self.remember(user),
            None => self.fetch_user_profile().await,
        }
        self.state.write().loading = false;
    }

    /// Authenticates with the backend and, on success, runs `login`.
    pub async fn sign_in(&self, email: &str, password: &str) -> PortResult<Option<User>> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let grant = self.auth.login(&credentials).await?.into_result()?;
        self.login(&grant.token, grant.user).await;
        Ok(self.user())
    }

    /// Creates an account and signs straight into it.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> PortResult<Option<User>> {
        let registration = Registration {
            email: email.to_string(),
            password: password.to_string(),
            username: username.map(str::to_string),
        };
        let grant = self.auth.register(&registration).await?.into_result()?;
        self.login(&grant.token, grant.user).await;
        Ok(self.user())
    }

    /// Clears every trace of the session and hard-navigates to `/login`.
    pub fn logout(&self) {
        info!("logging out");
        self.store.remove_token();
        self.store.remove_user_data();
        {
            let mut state = self.state.write();
            state.user = None;
            state.loading = false;
        }
        self.navigator.replace("/login");
    }

    /// Best-effort user resolution: backend profile, then cached user data
    /// keyed by the token's `userId`, then the bare token identity.
    /// Leaves the user unset when none of those is available.
    pub async fn fetch_user_profile(&self) {
        match self.auth.profile().await {
            Ok(envelope) => {
                if let Some(profile) = envelope.success_data().filter(|p| !p.email.is_empty()) {
                    debug!("profile resolved from backend");
                    self.remember(profile);
                    return;
                }
                debug!("profile response carried no usable user");
            }
            Err(e) => info!("profile endpoint unavailable, using fallbacks: {}", e),
        }

        let Some(token) = self.store.token() else {
            return;
        };
        let Some(user_id) = decode_claims(&token).and_then(|claims| claims.user_id) else {
            return;
        };

        if let Some(cached) = self.stored_user() {
            debug!("profile resolved from cached user data");
            self.set_user(Some(User {
                id: user_id,
                email: cached.email,
                username: cached.username,
            }));
            return;
        }

        debug!("profile resolved from token identity only");
        self.set_user(Some(User {
            id: user_id,
            email: String::new(),
            username: None,
        }));
    }

    pub fn diagnostics(&self) -> AuthDiagnostics {
        let storage_token = self.store.token();
        let cookie_token = self.store.cookie_token();
        let state = self.state.read();
        AuthDiagnostics {
            loading: state.loading,
            logged_in: state.user.is_some(),
            user: state.user.clone(),
            storage_token: storage_token.is_some(),
            cookie_token: cookie_token.is_some(),
            claims: storage_token.as_deref().and_then(decode_claims),
            consistent: storage_token == cookie_token,
        }
    }

    /// Wipes the token from storage and cookie, then reloads the page.
    /// Cached user data is left in place.
    pub fn clear_tokens(&self) {
        self.store.remove_token();
        self.navigator.reload();
    }

    fn remember(&self, user: User) {
        match serde_json::to_string(&user) {
            Ok(serialized) => self.store.set_user_data(&serialized),
            Err(e) => error!("failed to serialize user data: {}", e),
        }
        self.set_user(Some(user));
    }

    fn stored_user(&self) -> Option<User> {
        let raw = self.store.user_data()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                error!("stored user data is not valid JSON: {}", e);
                None
            }
        }
    }

    fn set_user(&self, user: Option<User>) {
        self.state.write().user = user;
    }
}
