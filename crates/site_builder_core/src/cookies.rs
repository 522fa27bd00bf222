//! crates/site_builder_core/src/cookies.rs
//!
//! Client-side cookie jar with `document.cookie` semantics: one value per
//! name, path `/`, `SameSite=Lax`, and an absolute expiry that is honoured
//! on every read.

use std::collections::BTreeMap;

use cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: BTreeMap<String, Cookie<'static>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name` for `days` days and returns the
    /// `Set-Cookie` line that produces the same cookie in a browser.
    pub fn set(&mut self, name: &str, value: &str, days: i64) -> String {
        let cookie = Cookie::build((name.to_string(), value.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .expires(expiry_after_days(OffsetDateTime::now_utc(), days))
            .build();
        let line = cookie.to_string();
        self.cookies.insert(name.to_string(), cookie);
        line
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .get(name)
            .filter(|cookie| is_live(cookie, OffsetDateTime::now_utc()))
            .map(|cookie| cookie.value())
    }

    /// Expires the cookie and returns the `Set-Cookie` line doing the same.
    pub fn remove(&mut self, name: &str) -> String {
        self.cookies.remove(name);
        Cookie::build((name.to_string(), String::new()))
            .path("/")
            .max_age(Duration::ZERO)
            .build()
            .to_string()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Live cookies rendered as a `Cookie` request header, `None` when empty.
    pub fn header_value(&self) -> Option<String> {
        let now = OffsetDateTime::now_utc();
        let pairs: Vec<String> = self
            .cookies
            .values()
            .filter(|cookie| is_live(cookie, now))
            .map(|cookie| cookie.stripped().to_string())
            .collect();
        (!pairs.is_empty()).then(|| pairs.join("; "))
    }
}

fn is_live(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    cookie.expires_datetime().map_or(true, |at| at > now)
}

/// `now + days`. Lifetimes past the representable range end at the latest
/// date; negative ones that overflow end at the epoch.
fn expiry_after_days(now: OffsetDateTime, days: i64) -> OffsetDateTime {
    days.checked_mul(SECONDS_PER_DAY)
        .and_then(|seconds| now.checked_add(Duration::seconds(seconds)))
        .unwrap_or_else(|| {
            if days > 0 {
                PrimitiveDateTime::MAX.assume_utc()
            } else {
                OffsetDateTime::UNIX_EPOCH
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let mut jar = CookieJar::new();
        jar.set("authToken", "abc.def.ghi", 7);
        assert_eq!(jar.get("authToken"), Some("abc.def.ghi"));
        assert!(jar.exists("authToken"));
    }

    #[test]
    fn remove_then_exists_is_false() {
        let mut jar = CookieJar::new();
        jar.set("authToken", "abc", 7);
        let line = jar.remove("authToken");
        assert!(!jar.exists("authToken"));

        let removal = Cookie::parse(line).unwrap();
        assert_eq!(removal.name(), "authToken");
        assert_eq!(removal.value(), "");
        assert_eq!(removal.path(), Some("/"));
        assert_eq!(removal.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn expired_cookies_are_invisible() {
        let mut jar = CookieJar::new();
        jar.set("stale", "1", -1);
        assert_eq!(jar.get("stale"), None);
        assert_eq!(jar.header_value(), None);
    }

    #[test]
    fn set_cookie_line_carries_path_expiry_and_same_site() {
        let mut jar = CookieJar::new();
        let line = jar.set("authToken", "t", 7);

        let parsed = Cookie::parse(line).unwrap();
        assert_eq!(parsed.name_value(), ("authToken", "t"));
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(parsed.same_site(), Some(SameSite::Lax));
        let expires = parsed.expires_datetime().unwrap();
        let lifetime = expires - OffsetDateTime::now_utc();
        assert!(lifetime > Duration::days(6) && lifetime <= Duration::days(7));
    }

    #[test]
    fn header_value_joins_live_cookies() {
        let mut jar = CookieJar::new();
        jar.set("a", "1", 1);
        jar.set("b", "2", 1);
        assert_eq!(jar.header_value().as_deref(), Some("a=1; b=2"));
    }

    #[test]
    fn extreme_lifetimes_are_clamped() {
        let mut jar = CookieJar::new();
        jar.set("forever", "1", i64::MAX / 2);
        jar.set("never", "1", i64::MIN / 2);
        assert!(jar.exists("forever"));
        assert!(!jar.exists("never"));

        let now = OffsetDateTime::now_utc();
        assert_eq!(
            expiry_after_days(now, i64::MAX),
            PrimitiveDateTime::MAX.assume_utc()
        );
        assert_eq!(expiry_after_days(now, i64::MIN), OffsetDateTime::UNIX_EPOCH);
    }
}
