use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::errors::WikiError;
use crate::services::title_matcher::is_valid_title;
use crate::types::{ListEntry, Page};

const PAGE_EXTENSION: &str = "txt";

/// One-file-per-page storage under a data directory.
///
/// Every call goes straight to the filesystem. Nothing serializes writers, so
/// two saves of the same title race and the last one wins.
#[derive(Clone)]
pub struct PageStore {
    data_dir: Arc<PathBuf>,
}

impl PageStore {
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir: Arc::new(data_dir) }
    }

    fn page_path(&self, title: &str) -> Option<PathBuf> {
        if title.is_empty() || !is_valid_title(title) {
            return None;
        }
        Some(self.data_dir.join(format!("{}.{}", title, PAGE_EXTENSION)))
    }

    /// Read a page. Missing and unreadable files both come back as `NotFound`.
    pub fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.page_path(title).ok_or(WikiError::NotFound)?;
        match fs::read(&path) {
            Ok(body) => {
                debug!("Loaded page {:?}, {} bytes", title, body.len());
                Ok(Page { title: title.to_string(), body })
            }
            Err(e) => {
                debug!("Cannot load page {:?} from {:?}: {}", title, path, e);
                Err(WikiError::NotFound)
            }
        }
    }

    /// Truncate and rewrite the page file. New files are created owner-only.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title).ok_or_else(|| {
            WikiError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid page title {:?}", page.title),
            ))
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path).map_err(|e| {
            error!("Failed to open {:?} for writing: {}", path, e);
            WikiError::Io(e)
        })?;
        file.write_all(&page.body).map_err(|e| {
            error!("Failed to write {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page {:?}, {} bytes", page.title, page.body.len());
        Ok(())
    }

    /// Snapshot of the data directory, dotfiles hidden, sorted by name
    pub fn list(&self) -> Result<Vec<ListEntry>, WikiError> {
        let entries = fs::read_dir(self.data_dir.as_path()).map_err(|e| {
            error!("Failed to read directory {:?}: {}", self.data_dir, e);
            WikiError::Io(e)
        })?;

        let mut result = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.starts_with('.') {
                        continue;
                    }
                    let title = page_title_of(&name);
                    result.push(ListEntry { name, title });
                }
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                }
            }
        }
        result.sort_by(|a, b| a.name.cmp(&b.name));

        debug!("Listed {:?}, found {} entries", self.data_dir, result.len());
        Ok(result)
    }
}

/// `Title.txt` -> `Some("Title")` when the stem is a valid title
fn page_title_of(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".txt")?;
    if stem.is_empty() || !is_valid_title(stem) {
        return None;
    }
    Some(stem.to_string())
}
