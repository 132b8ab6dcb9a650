use percent_encoding::percent_decode_str;

use crate::types::{Action, RouteMatch};

/// A title is valid when every character is an ASCII letter or digit.
/// The empty string passes; callers that need a page check for it.
pub fn is_valid_title(title: &str) -> bool {
    title.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Match `/<action>/<title>` against the accepted actions and title charset.
///
/// `path` is the raw request path; it is percent-decoded before matching, so
/// an encoded `/` counts as a separator and an encoded `.` still fails the
/// title check. Returns `None` for anything else, which the dispatcher
/// reports as 404.
pub fn match_path(path: &str) -> Option<RouteMatch> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    let rest = decoded.strip_prefix('/')?;
    let (segment, title) = rest.split_once('/')?;
    let action = Action::parse(segment)?;
    if !is_valid_title(title) {
        log::debug!("Rejected title segment {:?} for action {}", title, segment);
        return None;
    }
    Some(RouteMatch { action, title: title.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(path: &str) -> (Action, String) {
        let m = match_path(path).unwrap_or_else(|| panic!("{path} should match"));
        (m.action, m.title)
    }

    #[test]
    fn accepts_every_action_with_alphanumeric_title() {
        assert_eq!(matched("/view/Welcome"), (Action::View, "Welcome".to_string()));
        assert_eq!(matched("/edit/Page2"), (Action::Edit, "Page2".to_string()));
        assert_eq!(matched("/save/ABC123"), (Action::Save, "ABC123".to_string()));
        assert_eq!(matched("/list/x"), (Action::List, "x".to_string()));
    }

    #[test]
    fn percent_encoded_paths_are_decoded_first() {
        assert_eq!(matched("/view/%57elcome"), (Action::View, "Welcome".to_string()));
        assert_eq!(matched("/%65dit/Page"), (Action::Edit, "Page".to_string()));
        assert!(match_path("/view/..%2Fsecret").is_none());
        assert!(match_path("/view/%2e%2e").is_none());
        assert!(match_path("/view/a%2Fb").is_none());
        assert!(match_path("/view/%FF").is_none());
    }

    #[test]
    fn empty_title_is_routable() {
        assert_eq!(matched("/list/"), (Action::List, String::new()));
        assert_eq!(matched("/edit/"), (Action::Edit, String::new()));
    }

    #[test]
    fn rejects_paths_outside_the_pattern() {
        let rejected = [
            "",
            "/",
            "/view",
            "/list",
            "/bogus/path",
            "view/Welcome",
            "/View/Welcome",
            "/view/Welcome/",
            "/view/a/b",
            "/view/../secret",
            "/view/..",
            "/view/has space",
            "/view/under_score",
            "/view/dash-ed",
            "/view/dot.txt",
            "/view/%2e%2e",
            "/view/Ünïcode",
            "//view/Welcome",
        ];
        for path in rejected {
            assert!(match_path(path).is_none(), "{path:?} should not match");
        }
    }

    #[test]
    fn title_validation() {
        assert!(is_valid_title("FrontPage42"));
        assert!(is_valid_title(""));
        assert!(!is_valid_title("a/b"));
        assert!(!is_valid_title("a\\b"));
        assert!(!is_valid_title(".hidden"));
    }
}
