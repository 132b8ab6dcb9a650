//! Property-based tests for page storage and path matching.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use proptest::prelude::*;

use folio::{match_path, Action, Page, PageStore};

/// Strategy for generating valid page titles.
fn valid_title() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,32}"
}

/// Strategy for generating actions and their path segment.
fn action() -> impl Strategy<Value = (Action, &'static str)> {
    prop::sample::select(vec![
        (Action::View, "view"),
        (Action::Edit, "edit"),
        (Action::Save, "save"),
        (Action::List, "list"),
    ])
}

/// Strategy for titles holding at least one character outside `[a-zA-Z0-9]`.
/// `%` is left out so the raw path cannot decode into a valid title.
fn invalid_title() -> impl Strategy<Value = String> {
    let bad_char = any::<char>().prop_filter("must not be alphanumeric or %", |c| {
        !c.is_ascii_alphanumeric() && *c != '%'
    });
    ("[a-zA-Z0-9]{0,8}", bad_char, "[a-zA-Z0-9]{0,8}")
        .prop_map(|(head, bad, tail)| format!("{head}{bad}{tail}"))
}

proptest! {
    /// Any valid title and body survive a save followed by a load.
    #[test]
    fn save_then_load_roundtrip(
        title in valid_title(),
        body in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let dir = tempfile::tempdir().expect("tempdir");
        let pages = PageStore::new(dir.path().to_path_buf());
        let page = Page::new(title.as_str(), body);
        pages.save(&page).unwrap();
        prop_assert_eq!(pages.load(&title).unwrap(), page);
    }

    /// Every action with a valid title matches and yields that title.
    #[test]
    fn valid_paths_match((action, segment) in action(), title in valid_title()) {
        let route = match_path(&format!("/{segment}/{title}"));
        prop_assert!(route.is_some());
        let route = route.unwrap();
        prop_assert_eq!(route.action, action);
        prop_assert_eq!(route.title, title);
    }

    /// A title with any non-alphanumeric character never matches.
    #[test]
    fn invalid_titles_never_match((_, segment) in action(), title in invalid_title()) {
        let path = format!("/{segment}/{title}");
        prop_assert!(match_path(&path).is_none());
    }

    /// Percent-encoding a bad title does not smuggle it past the check.
    #[test]
    fn encoded_invalid_titles_never_match((_, segment) in action(), title in invalid_title()) {
        let encoded = utf8_percent_encode(&title, NON_ALPHANUMERIC).to_string();
        let path = format!("/{segment}/{encoded}");
        prop_assert!(match_path(&path).is_none());
    }

    /// Unknown action segments never match, whatever the title.
    #[test]
    fn unknown_actions_never_match(segment in "[a-z]{1,8}", title in valid_title()) {
        prop_assume!(!matches!(segment.as_str(), "view" | "edit" | "save" | "list"));
        let path = format!("/{segment}/{title}");
        prop_assert!(match_path(&path).is_none());
    }
}
