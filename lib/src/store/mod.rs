//! Read-only access to a browser's bookmark hierarchy.

pub mod chrome;
pub mod detect;
pub mod firefox;

pub use chrome::ChromeStore;
pub use detect::{detect_browsers, BrowserProfile, BrowserType};
pub use firefox::FirefoxStore;

use crate::error::{ExportError, Result};
use crate::models::bookmark::BookmarkNode;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The host bookmark store. Implementations never modify what they read.
pub trait BookmarkStore: Send + Sync {
    /// The full hierarchy, roots first, in the store's own order.
    fn get_tree(&self) -> Result<Vec<BookmarkNode>>;
}

impl BookmarkStore for Box<dyn BookmarkStore> {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        (**self).get_tree()
    }
}

impl<S: BookmarkStore + ?Sized> BookmarkStore for Arc<S> {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        (**self).get_tree()
    }
}

/// A fixed tree held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tree: Vec<BookmarkNode>,
}

impl MemoryStore {
    pub fn new(tree: Vec<BookmarkNode>) -> Self {
        Self { tree }
    }
}

impl BookmarkStore for MemoryStore {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        Ok(self.tree.clone())
    }
}

/// Open the store for a bookmarks file, or for a detected browser profile.
///
/// An explicit `path` wins: `*.sqlite` files are read as Firefox places
/// databases, anything else as a Chromium `Bookmarks` file. Without a path the
/// first detected profile matching `browser` and `profile` is used.
pub fn open_store(
    path: Option<&Path>,
    browser: Option<&str>,
    profile: Option<&str>,
) -> Result<Box<dyn BookmarkStore>> {
    if let Some(path) = path {
        return Ok(store_for_path(path));
    }

    let wanted = match browser {
        Some(name) => Some(
            BrowserType::from_string(name)
                .ok_or_else(|| ExportError::Browser(format!("Unknown browser '{}'", name)))?,
        ),
        None => None,
    };

    let selected = detect_browsers()
        .into_iter()
        .find(|p| p.matches(wanted.as_ref(), profile))
        .ok_or_else(|| ExportError::Browser("No matching browser profile found".to_string()))?;

    info!("Reading bookmarks from {}", selected.display_string());
    Ok(store_for_profile(&selected))
}

/// A store that resolves its source on every read instead of up front.
///
/// Resolution failures only show up when the tree is actually requested, so
/// messages that never read bookmarks work without a usable browser profile.
#[derive(Debug, Clone, Default)]
pub struct LazyStore {
    path: Option<PathBuf>,
    browser: Option<String>,
    profile: Option<String>,
}

impl LazyStore {
    pub fn new(path: Option<&Path>, browser: Option<&str>, profile: Option<&str>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            browser: browser.map(str::to_string),
            profile: profile.map(str::to_string),
        }
    }
}

impl BookmarkStore for LazyStore {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        open_store(
            self.path.as_deref(),
            self.browser.as_deref(),
            self.profile.as_deref(),
        )?
        .get_tree()
    }
}

fn store_for_path(path: &Path) -> Box<dyn BookmarkStore> {
    let is_places = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("sqlite"));

    if is_places {
        Box::new(FirefoxStore::new(path))
    } else {
        Box::new(ChromeStore::new(path))
    }
}

fn store_for_profile(profile: &BrowserProfile) -> Box<dyn BookmarkStore> {
    match profile.browser {
        BrowserType::Chrome | BrowserType::Edge => Box::new(ChromeStore::new(&profile.path)),
        BrowserType::Firefox => Box::new(FirefoxStore::new(&profile.path)),
    }
}
