use super::BookmarkStore;
use crate::error::{ExportError, Result};
use crate::models::bookmark::{BookmarkNode, NodeType};
use log::{debug, warn};
use rusqlite::{Connection, OpenFlags};
use serde_json::Map;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const ROOT_GUID: &str = "root________";
const TAGS_GUID: &str = "tags________";

const TYPE_BOOKMARK: i64 = 1;
const TYPE_FOLDER: i64 = 2;
const TYPE_SEPARATOR: i64 = 3;

/// One row of `moz_bookmarks`, joined with its place.
#[derive(Debug)]
struct PlacesRow {
    id: i64,
    kind: i64,
    parent: i64,
    position: i64,
    title: Option<String>,
    date_added: Option<i64>,
    last_modified: Option<i64>,
    guid: String,
    url: Option<String>,
}

/// A Firefox `places.sqlite` database, opened read-only.
///
/// The tree matches `browser.bookmarks.getTree`: one root folder, guids as
/// ids, node types set. The internal tags folder is left out.
#[derive(Debug, Clone)]
pub struct FirefoxStore {
    path: PathBuf,
}

impl FirefoxStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read every bookmark row from a private copy of the database.
    ///
    /// A running Firefox keeps `places.sqlite` locked, so the file and its
    /// write-ahead log are copied into a temporary directory first. The copy
    /// is removed when the directory goes out of scope.
    fn load_rows(&self) -> Result<Vec<PlacesRow>> {
        if !self.path.exists() {
            return Err(ExportError::Store(format!(
                "Places database not found: {}",
                self.path.display()
            )));
        }

        let scratch = tempfile::tempdir()?;
        let copy = scratch.path().join("places.sqlite");
        fs::copy(&self.path, &copy)?;
        let wal = sidecar(&self.path, "-wal");
        if wal.exists() {
            fs::copy(&wal, sidecar(&copy, "-wal"))?;
        }
        debug!("Copied {} to {}", self.path.display(), copy.display());

        // Read-write on the copy so SQLite can replay the copied log.
        let conn = Connection::open_with_flags(
            &copy,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let mut stmt = conn.prepare(
            "SELECT b.id, b.type, b.parent, b.position, b.title,
                    b.dateAdded, b.lastModified, b.guid, p.url
             FROM moz_bookmarks b
             LEFT JOIN moz_places p ON b.fk = p.id
             ORDER BY b.parent, b.position",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PlacesRow {
                id: row.get(0)?,
                kind: row.get(1)?,
                parent: row.get(2)?,
                position: row.get(3)?,
                title: row.get(4)?,
                date_added: row.get(5)?,
                last_modified: row.get(6)?,
                guid: row.get(7)?,
                url: row.get(8)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }
}

/// `places.sqlite` -> `places.sqlite-wal`
fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

impl BookmarkStore for FirefoxStore {
    fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        let rows = self.load_rows()?;
        debug!("Read {} rows from {}", rows.len(), self.path.display());

        let root = rows
            .iter()
            .find(|r| r.guid == ROOT_GUID)
            .ok_or_else(|| ExportError::Store("Places database has no root folder".to_string()))?;

        let mut by_parent: HashMap<i64, Vec<&PlacesRow>> = HashMap::new();
        for row in &rows {
            by_parent.entry(row.parent).or_default().push(row);
        }

        let mut visited = HashSet::new();
        Ok(vec![build_node(root, None, &by_parent, &mut visited)])
    }
}

/// Build `row` and everything below it. Rows already placed in the tree are
/// skipped, which keeps a corrupt parent chain from looping forever.
fn build_node(
    row: &PlacesRow,
    parent_guid: Option<&str>,
    by_parent: &HashMap<i64, Vec<&PlacesRow>>,
    visited: &mut HashSet<i64>,
) -> BookmarkNode {
    visited.insert(row.id);

    let node_type = match row.kind {
        TYPE_FOLDER => NodeType::Folder,
        TYPE_SEPARATOR => NodeType::Separator,
        _ => NodeType::Bookmark,
    };

    let children = (row.kind == TYPE_FOLDER).then(|| {
        let mut nodes = Vec::new();
        for kid in by_parent.get(&row.id).into_iter().flatten() {
            if kid.guid == TAGS_GUID {
                continue;
            }
            if visited.contains(&kid.id) {
                warn!("Skipping bookmark {} already placed in the tree", kid.guid);
                continue;
            }
            nodes.push(build_node(kid, Some(row.guid.as_str()), by_parent, visited));
        }
        nodes
    });

    BookmarkNode {
        id: row.guid.clone(),
        parent_id: parent_guid.map(str::to_string),
        index: u32::try_from(row.position).ok(),
        title: row.title.clone().unwrap_or_default(),
        url: if row.kind == TYPE_BOOKMARK {
            row.url.clone()
        } else {
            None
        },
        date_added: row.date_added.map(|us| us / 1000),
        date_group_modified: if row.kind == TYPE_FOLDER {
            row.last_modified.map(|us| us / 1000)
        } else {
            None
        },
        node_type: Some(node_type),
        children,
        extra: Map::new(),
    }
}
