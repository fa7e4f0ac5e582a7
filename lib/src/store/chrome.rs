use super::BookmarkStore;
use crate::error::Result;
use crate::models::bookmark::BookmarkNode;
use log::debug;
use serde::Deserialize;
use serde_json::Map;
use std::fs;
use std::path::{Path, PathBuf};

/// Milliseconds between 1601-01-01 (Chromium's epoch) and 1970-01-01.
const WEBKIT_EPOCH_OFFSET_MS: i64 = 11_644_473_600_000;

/// Id Chromium gives the invisible root that holds the top-level folders.
const ROOT_ID: &str = "0";

/// Chrome bookmark structure (JSON)
#[derive(Debug, Deserialize)]
struct ChromeEntry {
    id: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    name: String,
    url: Option<String>,
    date_added: Option<String>,
    date_modified: Option<String>,
    children: Option<Vec<ChromeEntry>>,
}

#[derive(Debug, Deserialize)]
struct ChromeBookmarkFile {
    roots: ChromeRoots,
}

#[derive(Debug, Deserialize)]
struct ChromeRoots {
    bookmark_bar: ChromeEntry,
    other: ChromeEntry,
    synced: Option<ChromeEntry>,
}

/// A Chromium-family `Bookmarks` file (Chrome, Chromium, Edge).
///
/// The tree comes back in the same shape `chrome.bookmarks.getTree` produces:
/// a single untitled root whose children are the bookmark bar, other
/// bookmarks and, when present, mobile bookmarks.
#[derive(Debug, Clone)]
pub struct ChromeStore {
    path: PathBuf,
}

impl ChromeStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl BookmarkStore for ChromeStore {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        let content = fs::read(&self.path)?;
        let file: ChromeBookmarkFile = serde_json::from_slice(&content)?;
        debug!("Parsed Chromium bookmarks from {}", self.path.display());

        let mut tops = vec![file.roots.bookmark_bar, file.roots.other];
        tops.extend(file.roots.synced);

        let children = tops
            .iter()
            .enumerate()
            .map(|(index, entry)| convert(entry, ROOT_ID, index))
            .collect();

        Ok(vec![BookmarkNode::folder(ROOT_ID, "", children)])
    }
}

fn convert(entry: &ChromeEntry, parent_id: &str, index: usize) -> BookmarkNode {
    let is_folder = entry.node_type == "folder";

    let children = if is_folder {
        let kids = entry.children.as_deref().unwrap_or_default();
        Some(
            kids.iter()
                .enumerate()
                .map(|(i, child)| convert(child, &entry.id, i))
                .collect(),
        )
    } else {
        None
    };

    BookmarkNode {
        id: entry.id.clone(),
        parent_id: Some(parent_id.to_string()),
        index: u32::try_from(index).ok(),
        title: entry.name.clone(),
        url: if is_folder { None } else { entry.url.clone() },
        date_added: entry.date_added.as_deref().and_then(webkit_to_unix_millis),
        date_group_modified: if is_folder {
            entry.date_modified.as_deref().and_then(webkit_to_unix_millis)
        } else {
            None
        },
        node_type: None,
        children,
        extra: Map::new(),
    }
}

/// Convert a Chromium timestamp (µs since 1601, as a string) to ms since 1970.
fn webkit_to_unix_millis(raw: &str) -> Option<i64> {
    let micros: i64 = raw.parse().ok()?;
    if micros <= 0 {
        return None;
    }
    Some(micros / 1000 - WEBKIT_EPOCH_OFFSET_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "checksum": "e68417696614de65818e666d48227636",
        "roots": {
            "bookmark_bar": {
                "children": [
                    {
                        "date_added": "13245678900000000",
                        "guid": "0b5c1a6a-0000-4000-8000-000000000005",
                        "id": "5",
                        "name": "Google",
                        "type": "url",
                        "url": "https://www.google.com/"
                    },
                    {
                        "children": [
                            {
                                "date_added": "13245678900000000",
                                "id": "7",
                                "name": "Rust",
                                "type": "url",
                                "url": "https://www.rust-lang.org/"
                            }
                        ],
                        "date_added": "13245678900000000",
                        "date_modified": "13245678950000000",
                        "id": "6",
                        "name": "Dev",
                        "type": "folder"
                    }
                ],
                "date_added": "13245678900000000",
                "date_modified": "0",
                "id": "1",
                "name": "Bookmarks bar",
                "type": "folder"
            },
            "other": {
                "children": [],
                "date_added": "13245678900000000",
                "id": "2",
                "name": "Other bookmarks",
                "type": "folder"
            },
            "synced": {
                "children": [],
                "date_added": "13245678900000000",
                "id": "3",
                "name": "Mobile bookmarks",
                "type": "folder"
            }
        },
        "version": 1
    }"#;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_tree_has_single_root_with_top_folders() {
        let file = write_file(SAMPLE);
        let tree = ChromeStore::new(file.path()).get_tree().unwrap();

        assert_eq!(tree.len(), 1);
        let root = &tree[0];
        assert_eq!(root.id, "0");
        assert_eq!(root.title, "");
        assert!(root.parent_id.is_none());

        let titles: Vec<&str> = root
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Bookmarks bar", "Other bookmarks", "Mobile bookmarks"]);
    }

    #[test]
    fn test_nodes_carry_parent_index_and_dates() {
        let file = write_file(SAMPLE);
        let tree = ChromeStore::new(file.path()).get_tree().unwrap();
        let bar = &tree[0].children.as_ref().unwrap()[0];

        assert_eq!(bar.parent_id.as_deref(), Some("0"));
        assert_eq!(bar.index, Some(0));
        assert_eq!(bar.date_group_modified, None);

        let bar_children = bar.children.as_ref().unwrap();
        let google = &bar_children[0];
        assert_eq!(google.url.as_deref(), Some("https://www.google.com/"));
        assert_eq!(google.parent_id.as_deref(), Some("1"));
        assert_eq!(google.index, Some(0));
        assert_eq!(google.date_added, Some(1_601_205_300_000));
        assert!(google.children.is_none());
        assert!(google.extra.is_empty());

        let dev = &bar_children[1];
        assert_eq!(dev.index, Some(1));
        assert!(dev.url.is_none());
        assert_eq!(dev.date_group_modified, Some(1_601_205_350_000));

        let rust = &dev.children.as_ref().unwrap()[0];
        assert_eq!(rust.parent_id.as_deref(), Some("6"));
        assert_eq!(rust.title, "Rust");
    }

    #[test]
    fn test_missing_synced_root_is_fine() {
        let content = r#"{
            "roots": {
                "bookmark_bar": {"id": "1", "name": "Bar", "type": "folder"},
                "other": {"id": "2", "name": "Other", "type": "folder", "children": []}
            }
        }"#;
        let file = write_file(content);
        let tree = ChromeStore::new(file.path()).get_tree().unwrap();

        let tops = tree[0].children.as_ref().unwrap();
        assert_eq!(tops.len(), 2);
        // Folders always report a child list, even when the file omits it.
        assert_eq!(tops[0].children.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_malformed_file_is_a_json_error() {
        let file = write_file("{ not json");
        let err = ChromeStore::new(file.path()).get_tree().unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
    }

    #[rstest]
    #[case("13245678900000000", Some(1_601_205_300_000))]
    #[case("11644473600000000", Some(0))]
    #[case("0", None)]
    #[case("", None)]
    #[case("soon", None)]
    fn test_webkit_timestamps(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(webkit_to_unix_millis(raw), expected);
    }
}
