use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};

use super::RequestContext;
use crate::config::{MAX_SESSION_AGE_HOURS, SameSitePolicy, SessionConfig};

/// Cookie 构建器，集中管理会话 cookie 的属性
#[derive(Debug, Clone)]
pub struct CookieBuilder {
    name: String,
    same_site: SameSite,
    secure: bool,
    http_only: bool,
    max_age: Option<Duration>,
}

impl CookieBuilder {
    pub fn from_config(config: &SessionConfig) -> Self {
        let same_site = match config.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            name: config.cookie_name.clone(),
            same_site,
            secure: config.secure,
            http_only: config.http_only,
            max_age: config
                .max_age_hours
                .and_then(|h| i64::try_from(h.min(MAX_SESSION_AGE_HOURS)).ok())
                .map(Duration::hours),
        }
    }

    fn build_cookie_base(&self, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.name.clone(), value);
        cookie.set_path("/");
        cookie.set_http_only(self.http_only);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie
    }

    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = self.build_cookie_base(token);
        if let Some(max_age) = self.max_age {
            cookie.set_max_age(max_age);
        }
        cookie
    }

    /// 空值 + 过去的过期时间，浏览器收到后删除 cookie
    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.build_cookie_base(String::new());
        cookie.set_max_age(Duration::ZERO);
        cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
        cookie
    }

    pub fn cookie_name(&self) -> &str {
        &self.name
    }
}

/// Session token persisted in a single browser cookie.
///
/// Nothing is stored server-side and the token is never inspected here;
/// whether it is valid is for the backend to say.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cookies: CookieBuilder,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookies: CookieBuilder::from_config(config),
        }
    }

    pub fn cookie_name(&self) -> &str {
        self.cookies.cookie_name()
    }

    /// Current token, `None` when the cookie is missing or empty
    pub fn get(&self, ctx: &impl RequestContext) -> Option<String> {
        ctx.cookie(self.cookie_name()).filter(|v| !v.is_empty())
    }

    pub fn set(&self, ctx: &mut impl RequestContext, token: String) {
        ctx.set_cookie(self.cookies.build_session_cookie(token));
    }

    pub fn clear(&self, ctx: &mut impl RequestContext) {
        ctx.set_cookie(self.cookies.build_expired_session_cookie());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryContext;

    fn store() -> SessionStore {
        SessionStore::new(&SessionConfig::default())
    }

    #[test]
    fn test_get_reads_session_cookie() {
        let ctx = MemoryContext::new().with_cookie("sessionId", "tok123");
        assert_eq!(store().get(&ctx).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_get_treats_empty_cookie_as_absent() {
        let ctx = MemoryContext::new().with_cookie("sessionId", "");
        assert!(store().get(&ctx).is_none());
        assert!(store().get(&MemoryContext::new()).is_none());
    }

    #[test]
    fn test_set_writes_root_path_cookie() {
        let mut ctx = MemoryContext::new();
        store().set(&mut ctx, "tok123".to_string());

        let cookie = ctx.outgoing_cookie("sessionId").unwrap();
        assert_eq!(cookie.value(), "tok123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert!(cookie.max_age().is_none());
    }

    #[test]
    fn test_set_honors_max_age() {
        let config = SessionConfig {
            max_age_hours: Some(2),
            ..SessionConfig::default()
        };
        let mut ctx = MemoryContext::new();
        SessionStore::new(&config).set(&mut ctx, "t".to_string());
        assert_eq!(
            ctx.outgoing_cookie("sessionId").unwrap().max_age(),
            Some(Duration::hours(2))
        );
    }

    #[test]
    fn test_oversized_max_age_is_clamped() {
        let config = SessionConfig {
            max_age_hours: Some(u64::MAX),
            ..SessionConfig::default()
        };
        let mut ctx = MemoryContext::new();
        SessionStore::new(&config).set(&mut ctx, "t".to_string());
        assert_eq!(
            ctx.outgoing_cookie("sessionId").unwrap().max_age(),
            Some(Duration::hours(MAX_SESSION_AGE_HOURS as i64))
        );
    }

    #[test]
    fn test_clear_expires_cookie_in_the_past() {
        let mut ctx = MemoryContext::new().with_cookie("sessionId", "tok123");
        store().clear(&mut ctx);

        let cookie = ctx.outgoing_cookie("sessionId").unwrap();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
    }

    #[test]
    fn test_custom_cookie_name() {
        let config = SessionConfig {
            cookie_name: "tu_session".to_string(),
            ..SessionConfig::default()
        };
        let store = SessionStore::new(&config);
        let ctx = MemoryContext::new()
            .with_cookie("sessionId", "wrong")
            .with_cookie("tu_session", "right");
        assert_eq!(store.get(&ctx).as_deref(), Some("right"));
    }
}
