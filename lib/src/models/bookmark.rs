use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of node, as reported by Firefox. Chromium stores leave it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Bookmark,
    Folder,
    Separator,
}

/// A folder or a leaf bookmark in the host bookmark hierarchy.
///
/// Field names follow the WebExtension `BookmarkTreeNode` so a serialized tree
/// looks exactly like the one the browser hands out. Unknown fields are kept in
/// `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_group_modified: Option<i64>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookmarkNode {
    /// A bare folder with the given children.
    pub fn folder(id: &str, title: &str, children: Vec<BookmarkNode>) -> Self {
        Self {
            id: id.to_string(),
            parent_id: None,
            index: None,
            title: title.to_string(),
            url: None,
            date_added: None,
            date_group_modified: None,
            node_type: None,
            children: Some(children),
            extra: Map::new(),
        }
    }

    /// A bare leaf bookmark.
    pub fn bookmark(id: &str, title: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_id: None,
            index: None,
            title: title.to_string(),
            url: Some(url.to_string()),
            date_added: None,
            date_group_modified: None,
            node_type: None,
            children: None,
            extra: Map::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        match self.node_type {
            Some(NodeType::Folder) => true,
            Some(_) => false,
            None => self.url.is_none() && self.children.is_some(),
        }
    }

    /// Number of leaves carrying a URL in this subtree, self included.
    pub fn count_bookmarks(&self) -> usize {
        let own = usize::from(self.url.is_some());
        own + self
            .children
            .as_deref()
            .map(count_bookmarks)
            .unwrap_or(0)
    }
}

/// Number of URL-carrying nodes across a whole tree.
pub fn count_bookmarks(nodes: &[BookmarkNode]) -> usize {
    nodes.iter().map(BookmarkNode::count_bookmarks).sum()
}
