use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, trace};

use crate::api::constants::{
    ACTION_TOGGLE_LINK, ACTION_UPDATE_LINK, HOME_PATH, LINKS_PATH, LOGIN_PATH, LOGOUT_PATH,
    SIGNUP_PATH,
};
use crate::api::context::ActixContext;
use crate::handlers::{AppState, Outcome, RedirectStatus, auth, links};
use crate::session::FormFields;

/// User-facing pages and their form actions
pub struct PageService;

impl PageService {
    pub async fn home(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
        trace!("Rendering home page");
        let ctx = ActixContext::without_form(&req);
        let outcome = links::home_page(state.get_ref(), &ctx);
        ctx.into_response(outcome)
    }

    pub async fn create_link(
        req: HttpRequest,
        state: web::Data<AppState>,
        form: web::Form<FormFields>,
    ) -> HttpResponse {
        let mut ctx = ActixContext::new(&req, form.into_inner());
        let outcome = links::create_link(state.get_ref(), &mut ctx).await;
        ctx.into_response(outcome)
    }

    pub async fn login_page(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
        let ctx = ActixContext::without_form(&req);
        let outcome = auth::login_page(state.get_ref(), &ctx);
        ctx.into_response(outcome)
    }

    pub async fn sign_in(
        req: HttpRequest,
        state: web::Data<AppState>,
        form: web::Form<FormFields>,
    ) -> HttpResponse {
        let mut ctx = ActixContext::new(&req, form.into_inner());
        let outcome = auth::sign_in(state.get_ref(), &mut ctx).await;
        ctx.into_response(outcome)
    }

    pub async fn signup_page(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
        let ctx = ActixContext::without_form(&req);
        let outcome = auth::signup_page(state.get_ref(), &ctx);
        ctx.into_response(outcome)
    }

    pub async fn sign_up(
        req: HttpRequest,
        state: web::Data<AppState>,
        form: web::Form<FormFields>,
    ) -> HttpResponse {
        let mut ctx = ActixContext::new(&req, form.into_inner());
        let outcome = auth::sign_up(state.get_ref(), &mut ctx).await;
        ctx.into_response(outcome)
    }

    /// Logout has no page of its own
    pub async fn logout_page(req: HttpRequest) -> HttpResponse {
        ActixContext::without_form(&req)
            .into_response(Outcome::redirect(HOME_PATH, RedirectStatus::Found))
    }

    pub async fn sign_out(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
        let mut ctx = ActixContext::without_form(&req);
        let outcome = auth::sign_out(state.get_ref(), &mut ctx).await;
        ctx.into_response(outcome)
    }

    pub async fn links(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
        let mut ctx = ActixContext::without_form(&req);
        let outcome = links::list_links(state.get_ref(), &mut ctx).await;
        ctx.into_response(outcome)
    }

    pub async fn update_link(
        req: HttpRequest,
        state: web::Data<AppState>,
        form: web::Form<FormFields>,
    ) -> HttpResponse {
        let mut ctx = ActixContext::new(&req, form.into_inner());
        let outcome = links::update_link(state.get_ref(), &mut ctx).await;
        ctx.into_response(outcome)
    }

    pub async fn toggle_link(
        req: HttpRequest,
        state: web::Data<AppState>,
        form: web::Form<FormFields>,
    ) -> HttpResponse {
        let mut ctx = ActixContext::new(&req, form.into_inner());
        let outcome = links::toggle_link(state.get_ref(), &mut ctx).await;
        ctx.into_response(outcome)
    }

    /// `POST /links?/<action>`: named form actions on the links page
    pub async fn links_action(
        req: HttpRequest,
        state: web::Data<AppState>,
        form: web::Form<FormFields>,
    ) -> HttpResponse {
        let action = named_action(req.query_string()).to_string();
        debug!("Dispatching links action '{}'", action);

        let mut ctx = ActixContext::new(&req, form.into_inner());
        let outcome = match action.as_str() {
            ACTION_UPDATE_LINK => links::update_link(state.get_ref(), &mut ctx).await,
            ACTION_TOGGLE_LINK => links::toggle_link(state.get_ref(), &mut ctx).await,
            _ => Outcome::failure(404, format!("Unknown form action '{}'", action)),
        };
        ctx.into_response(outcome)
    }
}

/// `/updateLink` -> `updateLink`; anything after `&` or `=` is ignored
fn named_action(query: &str) -> &str {
    let query = query.strip_prefix('/').unwrap_or(query);
    query.split(['&', '=']).next().unwrap_or_default()
}

/// 页面路由配置
pub fn page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(HOME_PATH, web::get().to(PageService::home))
        .route(HOME_PATH, web::post().to(PageService::create_link))
        .route(LOGIN_PATH, web::get().to(PageService::login_page))
        .route(LOGIN_PATH, web::post().to(PageService::sign_in))
        .route(SIGNUP_PATH, web::get().to(PageService::signup_page))
        .route(SIGNUP_PATH, web::post().to(PageService::sign_up))
        .route(LOGOUT_PATH, web::get().to(PageService::logout_page))
        .route(LOGOUT_PATH, web::post().to(PageService::sign_out))
        .route(LINKS_PATH, web::get().to(PageService::links))
        .route(LINKS_PATH, web::post().to(PageService::links_action))
        .route("/links/update", web::post().to(PageService::update_link))
        .route("/links/toggle", web::post().to(PageService::toggle_link));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_action() {
        assert_eq!(named_action("/updateLink"), "updateLink");
        assert_eq!(named_action("/enableDisableLink"), "enableDisableLink");
        assert_eq!(named_action("updateLink&x=1"), "updateLink");
        assert_eq!(named_action("/updateLink="), "updateLink");
        assert_eq!(named_action(""), "");
    }
}
