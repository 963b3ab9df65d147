use serde::Serialize;

use crate::backend::Link;

/// Redirect codes the front end uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStatus {
    /// 301, navigation away from login/signup after auth
    MovedPermanently,
    /// 302, auth gate and forced logout
    Found,
}

impl RedirectStatus {
    pub fn code(self) -> u16 {
        match self {
            RedirectStatus::MovedPermanently => 301,
            RedirectStatus::Found => 302,
        }
    }
}

/// What a handler hands back to the page layer.
///
/// Redirects are ordinary values here; the page layer turns them into a
/// `Location` response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Redirect {
        location: String,
        status: RedirectStatus,
    },
    Rendered(PageData),
    Action(ActionResult),
}

impl Outcome {
    pub fn redirect(location: impl Into<String>, status: RedirectStatus) -> Self {
        Outcome::Redirect {
            location: location.into(),
            status,
        }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Outcome::Action(ActionResult::failure(status, error))
    }

    pub fn is_redirect_to(&self, path: &str) -> bool {
        matches!(self, Outcome::Redirect { location, .. } if location == path)
    }
}

/// Data for a page render. `session_present` is layout data every page gets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageData {
    pub session_present: bool,
    #[serde(flatten)]
    pub page: Page,
}

impl PageData {
    pub fn anonymous(page: Page) -> Self {
        Self {
            session_present: false,
            page,
        }
    }

    pub fn authenticated(page: Page) -> Self {
        Self {
            session_present: true,
            page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Home,
    Login,
    Signup,
    Links { links: Vec<Link> },
}

/// Result of a form action, consumed once by the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionResult {
    Success {
        success: bool,
        message: String,
    },
    Created {
        #[serde(rename = "longURL")]
        long_url: String,
        #[serde(rename = "shortURL")]
        short_url: String,
    },
    Failure {
        #[serde(skip)]
        status: u16,
        error: String,
    },
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        ActionResult::Success {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        ActionResult::Failure {
            status,
            error: error.into(),
        }
    }

    /// HTTP status the page layer should answer with
    pub fn status(&self) -> u16 {
        match self {
            ActionResult::Success { .. } | ActionResult::Created { .. } => 200,
            ActionResult::Failure { status, .. } => *status,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionResult::Failure { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_result_shapes() {
        assert_eq!(
            serde_json::to_value(ActionResult::success("Link updated successfully")).unwrap(),
            json!({"success": true, "message": "Link updated successfully"})
        );
        assert_eq!(
            serde_json::to_value(ActionResult::failure(401, "invalid credentials")).unwrap(),
            json!({"error": "invalid credentials"})
        );
        assert_eq!(
            serde_json::to_value(ActionResult::Created {
                long_url: "https://example.com".into(),
                short_url: "abc123".into(),
            })
            .unwrap(),
            json!({"longURL": "https://example.com", "shortURL": "abc123"})
        );
    }

    #[test]
    fn test_action_status() {
        assert_eq!(ActionResult::success("ok").status(), 200);
        assert_eq!(ActionResult::failure(400, "Missing required fields").status(), 400);
    }

    #[test]
    fn test_page_data_flattens_page_tag() {
        let data = PageData::authenticated(Page::Links { links: vec![] });
        assert_eq!(
            serde_json::to_value(data).unwrap(),
            json!({"session_present": true, "page": "links", "links": []})
        );
        assert_eq!(
            serde_json::to_value(PageData::anonymous(Page::Login)).unwrap(),
            json!({"session_present": false, "page": "login"})
        );
    }

    #[test]
    fn test_redirect_codes() {
        assert_eq!(RedirectStatus::MovedPermanently.code(), 301);
        assert_eq!(RedirectStatus::Found.code(), 302);
        assert!(Outcome::redirect("/login", RedirectStatus::Found).is_redirect_to("/login"));
    }
}
