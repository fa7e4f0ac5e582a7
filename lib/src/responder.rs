//! Answers export requests with the current bookmark tree.

use crate::messaging::{Completion, Listener, ListenerOutcome, MessageDispatcher, ReplySender};
use crate::models::message::{ExportResponse, Message, Request};
use crate::store::BookmarkStore;
use log::{debug, error, info};
use std::sync::Arc;

/// Listener that owns the bookmark store on the responding side.
pub struct BookmarkResponder<S: BookmarkStore> {
    store: Arc<S>,
}

impl<S: BookmarkStore + 'static> BookmarkResponder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Build a responder for `store` and register it with `dispatcher`.
    pub fn install<D: MessageDispatcher + ?Sized>(dispatcher: &mut D, store: S) -> Arc<Self> {
        let responder = Arc::new(Self::new(store));
        dispatcher.add_listener(responder.clone());
        info!("Bookmark responder is running");
        responder
    }

    fn fetch_and_reply(&self, request: Request, reply: ReplySender) -> ListenerOutcome {
        let store = Arc::clone(&self.store);
        let id = request.id;

        let spawned = Completion::spawn("bookmark-responder", move || match store.get_tree() {
            Ok(bookmark_tree) => {
                debug!(
                    "Replying to request {} with {} root node(s)",
                    id,
                    bookmark_tree.len()
                );
                reply.send(ExportResponse { bookmark_tree });
            }
            // No reply: dropping the handle closes the port on the caller's side.
            Err(e) => error!("Failed to read bookmark tree for request {}: {}", id, e),
        });

        match spawned {
            Ok(completion) => ListenerOutcome::Deferred(completion),
            Err(e) => {
                error!("Could not start worker for request {}: {}", id, e);
                ListenerOutcome::Done
            }
        }
    }
}

impl<S: BookmarkStore + 'static> Listener for BookmarkResponder<S> {
    fn on_message(&self, request: Request, reply: ReplySender) -> ListenerOutcome {
        match &request.message {
            Message::ExportBookmarks => self.fetch_and_reply(request, reply),
            Message::Count { count } => {
                let shown = count
                    .as_ref()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "missing".to_string());
                info!("Received a count message, count is {}", shown);
                ListenerOutcome::Done
            }
            Message::Unrecognized(value) => {
                debug!("Ignoring unrecognized message {}: {}", request.id, value);
                ListenerOutcome::Done
            }
        }
    }
}
