//! Admin dashboard routes.
//!
//! Everything except the login page requires an authenticated session via
//! the [`RequireAdminAuth`](crate::middleware::RequireAdminAuth) extractor.
//! Mutation outcomes travel back to the listing as explicit query-parameter
//! notices (`?success=`, `?warning=`, `?error=`) rather than session flash
//! state.

pub mod auth;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Build the admin router (nested under `/admin`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/add", get(products::add_form).post(products::add))
        .route("/edit/{id}", get(products::edit_form).post(products::edit))
        .route("/delete/{id}", post(products::delete))
}

/// Query parameters carrying a mutation outcome back to a page.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// A notice rendered at the top of an admin page.
#[derive(Debug, Clone, Copy)]
pub struct Notice {
    /// CSS class suffix: `success`, `warning`, or `error`.
    pub kind: &'static str,
    pub message: &'static str,
}

impl MessageQuery {
    /// Resolve the query parameters into at most one notice.
    ///
    /// Unknown codes are ignored; the query string is caller-controlled and
    /// is never echoed back verbatim.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        if let Some(code) = self.success.as_deref() {
            let message = match code {
                "created" => "Product created.",
                "updated" => "Product updated.",
                _ => return None,
            };
            return Some(Notice {
                kind: "success",
                message,
            });
        }

        if let Some(code) = self.warning.as_deref() {
            let message = match code {
                "deleted" => "Product deleted.",
                "export_failed" => {
                    "Saved, but regenerating the catalog snapshot failed; check the logs."
                }
                _ => return None,
            };
            return Some(Notice {
                kind: "warning",
                message,
            });
        }

        if let Some(code) = self.error.as_deref() {
            let message = match code {
                "not_found" => "No product with that id.",
                _ => return None,
            };
            return Some(Notice {
                kind: "error",
                message,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_known_codes() {
        let query = MessageQuery {
            success: Some("created".to_owned()),
            ..Default::default()
        };
        let notice = query.notice().expect("notice");
        assert_eq!(notice.kind, "success");
        assert_eq!(notice.message, "Product created.");

        let query = MessageQuery {
            warning: Some("deleted".to_owned()),
            ..Default::default()
        };
        assert_eq!(query.notice().expect("notice").kind, "warning");
    }

    #[test]
    fn test_notice_unknown_code_is_dropped() {
        let query = MessageQuery {
            error: Some("<script>alert(1)</script>".to_owned()),
            ..Default::default()
        };
        assert!(query.notice().is_none());
    }

    #[test]
    fn test_notice_empty_query() {
        assert!(MessageQuery::default().notice().is_none());
    }
}
