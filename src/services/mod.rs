pub mod page_store;
pub mod title_matcher;

pub use page_store::PageStore;
pub use title_matcher::{is_valid_title, match_path};
