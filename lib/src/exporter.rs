//! The requesting side: ask for the tree, serialize it, save it.

use crate::download::DownloadSink;
use crate::error::Result;
use crate::messaging::MessageDispatcher;
use crate::models::bookmark::{count_bookmarks, BookmarkNode};
use crate::models::errors::ChannelError;
use crate::models::message::Message;
use log::{debug, error};
use std::path::PathBuf;
use std::time::Duration;

/// File name used when none is configured.
pub const DEFAULT_FILENAME: &str = "bookmarks.json";

/// How an export attempt ended.
#[derive(Debug, PartialEq)]
pub enum ExportOutcome {
    /// The file was saved.
    Downloaded { path: PathBuf, bookmarks: usize },
    /// The round trip failed; nothing was written.
    Aborted(ChannelError),
}

/// Send one export request over `dispatcher` and wait for the tree.
///
/// A channel failure is logged here and handed back as the error value.
pub fn request_tree<D: MessageDispatcher + ?Sized>(
    dispatcher: &D,
    timeout: Option<Duration>,
) -> std::result::Result<Vec<BookmarkNode>, ChannelError> {
    let result = dispatcher
        .send_message(Message::ExportBookmarks)
        .and_then(|pending| {
            debug!("Waiting for reply to request {}", pending.id());
            pending.wait(timeout)
        });

    match result {
        Ok(response) => Ok(response.bookmark_tree),
        Err(e) => {
            error!("Error fetching bookmarks: {}", e);
            Err(e)
        }
    }
}

pub struct Exporter<'a, D: MessageDispatcher + ?Sized, S: DownloadSink + ?Sized> {
    dispatcher: &'a D,
    downloads: &'a S,
    filename: String,
    timeout: Option<Duration>,
}

impl<'a, D: MessageDispatcher + ?Sized, S: DownloadSink + ?Sized> Exporter<'a, D, S> {
    pub fn new(dispatcher: &'a D, downloads: &'a S) -> Self {
        Self {
            dispatcher,
            downloads,
            filename: DEFAULT_FILENAME.to_string(),
            timeout: None,
        }
    }

    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = filename.to_string();
        self
    }

    /// Give up waiting for a reply after `timeout`. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request the tree. A channel failure is logged and reported as the error value.
    pub fn request_tree(&self) -> std::result::Result<Vec<BookmarkNode>, ChannelError> {
        request_tree(self.dispatcher, self.timeout)
    }

    /// Request the tree, or `None` if the round trip failed.
    pub fn fetch_tree(&self) -> Option<Vec<BookmarkNode>> {
        self.request_tree().ok()
    }

    /// Run one full export: request, serialize with two-space indentation, save.
    pub fn export_bookmarks(&self) -> Result<ExportOutcome> {
        let tree = match self.request_tree() {
            Ok(tree) => tree,
            Err(e) => return Ok(ExportOutcome::Aborted(e)),
        };

        let data = serde_json::to_string_pretty(&tree)?;
        let path = self.downloads.download_json(&data, &self.filename)?;

        Ok(ExportOutcome::Downloaded {
            path,
            bookmarks: count_bookmarks(&tree),
        })
    }
}
