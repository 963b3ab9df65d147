//! actix-web side of [`RequestContext`]
//!
//! Wraps the incoming request and its parsed form, collects cookie writes,
//! and turns a handler [`Outcome`] into the final `HttpResponse`.

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};

use crate::handlers::Outcome;
use crate::session::{FormFields, RequestContext};

pub struct ActixContext<'a> {
    req: &'a HttpRequest,
    form: FormFields,
    outgoing: Vec<Cookie<'static>>,
}

impl<'a> ActixContext<'a> {
    pub fn new(req: &'a HttpRequest, form: FormFields) -> Self {
        Self {
            req,
            form,
            outgoing: Vec::new(),
        }
    }

    /// Context for requests without a form body (GET, logout)
    pub fn without_form(req: &'a HttpRequest) -> Self {
        Self::new(req, FormFields::new())
    }

    /// 将 Outcome 转换为 HTTP 响应，并附带所有待写入的 cookie
    pub fn into_response(self, outcome: Outcome) -> HttpResponse {
        let status = match &outcome {
            Outcome::Redirect { status, .. } => status.code(),
            Outcome::Rendered(_) => 200,
            Outcome::Action(result) => result.status(),
        };

        let mut builder =
            HttpResponse::build(StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY));
        for cookie in self.outgoing {
            builder.cookie(cookie);
        }

        match outcome {
            Outcome::Redirect { location, .. } => {
                builder.insert_header((header::LOCATION, location)).finish()
            }
            Outcome::Rendered(data) => builder.json(data),
            Outcome::Action(result) => builder.json(result),
        }
    }
}

impl RequestContext for ActixContext<'_> {
    fn field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.req.cookie(name).map(|c| c.value().to_string())
    }

    fn set_cookie(&mut self, cookie: Cookie<'static>) {
        self.outgoing.push(cookie);
    }
}
