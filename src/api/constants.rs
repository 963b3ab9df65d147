//! API 模块常量定义
//!
//! 包含会话 cookie、页面路径、上游 API 路径等硬编码常量。

/// Session Cookie 名称（默认值，可通过 session.cookie_name 覆盖）
pub const SESSION_COOKIE_NAME: &str = "sessionId";

/// Prefix the upstream API puts in front of the token in its `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

// 页面路径
pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const LOGOUT_PATH: &str = "/logout";
pub const LINKS_PATH: &str = "/links";

// 上游 API 路径
pub const API_SIGNIN: &str = "/signin";
pub const API_SIGNUP: &str = "/signup";
pub const API_SIGNOUT: &str = "/signout";
pub const API_LINKS: &str = "/links";

/// Named form actions accepted on `POST /links?/<action>`
pub const ACTION_UPDATE_LINK: &str = "updateLink";
pub const ACTION_TOGGLE_LINK: &str = "enableDisableLink";
