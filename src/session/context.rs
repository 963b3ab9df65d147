use std::collections::HashMap;

use actix_web::cookie::Cookie;

/// Parsed `application/x-www-form-urlencoded` body
pub type FormFields = HashMap<String, String>;

/// Per-request capabilities a handler needs: form fields in, cookies in,
/// cookies out.
pub trait RequestContext {
    /// Raw form field value
    fn field(&self, name: &str) -> Option<&str>;

    /// Incoming cookie value
    fn cookie(&self, name: &str) -> Option<String>;

    /// Queue a cookie on the outgoing response
    fn set_cookie(&mut self, cookie: Cookie<'static>);

    /// Trimmed field value; blank counts as missing
    fn required_field(&self, name: &str) -> Option<String> {
        self.field(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// In-memory context used by tests and by anything that drives handlers
/// outside actix.
#[derive(Debug, Default, Clone)]
pub struct MemoryContext {
    fields: FormFields,
    cookies: HashMap<String, String>,
    outgoing: Vec<Cookie<'static>>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name.to_string(), value.to_string());
        self
    }

    /// Every cookie written so far, in order
    pub fn outgoing_cookies(&self) -> &[Cookie<'static>] {
        &self.outgoing
    }

    /// Last cookie written under `name`
    pub fn outgoing_cookie(&self, name: &str) -> Option<&Cookie<'static>> {
        self.outgoing.iter().rev().find(|c| c.name() == name)
    }
}

impl RequestContext for MemoryContext {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn set_cookie(&mut self, cookie: Cookie<'static>) {
        self.outgoing.push(cookie);
    }
}
