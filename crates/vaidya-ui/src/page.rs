//! Page HTML embedding.

/// The complete self-contained page HTML.
///
/// A sidebar menu switches between three views: Home, Login, and Sign Up.
/// After a successful login the Login view turns into the interview chat.
/// All calls go to the JSON API on the same origin (`/api/signup`,
/// `/api/login`, `/api/chat`).
///
/// Serve from the `/` endpoint:
///
/// ```rust,ignore
/// use vaidya_ui::PAGE_HTML;
///
/// async fn home() -> axum::response::Html<&'static str> {
///     axum::response::Html(PAGE_HTML)
/// }
/// ```
pub const PAGE_HTML: &str = include_str!("../assets/page.html");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_self_contained() {
        assert!(PAGE_HTML.contains("<!DOCTYPE html>"));
        assert!(PAGE_HTML.contains("<style>"));
        assert!(PAGE_HTML.contains("<script>"));
        // No CDN links or external assets.
        assert!(!PAGE_HTML.contains("https://cdn"));
        assert!(!PAGE_HTML.contains("src=\"http"));
    }

    #[test]
    fn test_page_has_the_three_views() {
        for view in ["Home", "Login", "Sign Up"] {
            assert!(PAGE_HTML.contains(view), "missing view: {}", view);
        }
    }

    #[test]
    fn test_page_targets_the_json_api() {
        assert!(PAGE_HTML.contains("/api/signup"));
        assert!(PAGE_HTML.contains("/api/login"));
        assert!(PAGE_HTML.contains("/api/chat"));
    }
}
