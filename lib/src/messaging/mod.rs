//! Request/response plumbing between the exporter and the bookmark responder.
//!
//! A [`MessageDispatcher`] delivers each [`Message`] to its registered
//! [`Listener`]s together with a one-shot [`ReplySender`]. The sender of the
//! message gets a [`PendingResponse`] that resolves when a listener replies,
//! or fails once every reply handle is gone.

pub mod bus;

pub use bus::LocalBus;

use crate::models::errors::ChannelError;
use crate::models::message::{ExportResponse, Message, Request};
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use uuid::Uuid;

/// What a listener did with a request.
#[derive(Debug)]
pub enum ListenerOutcome {
    /// Nothing more will happen for this request on this listener.
    Done,
    /// A reply will be sent later from the given completion.
    Deferred(Completion),
}

impl ListenerOutcome {
    pub fn is_deferred(&self) -> bool {
        matches!(self, ListenerOutcome::Deferred(_))
    }
}

/// Handle to work that will resolve a deferred reply.
#[derive(Debug)]
pub struct Completion {
    handle: JoinHandle<()>,
}

impl Completion {
    /// Run `work` on a named background thread.
    pub fn spawn<F>(name: &str, work: F) -> std::io::Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new().name(name.to_string()).spawn(work)?;
        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the work to finish. Returns false if it panicked.
    pub fn join(self) -> bool {
        self.handle.join().is_ok()
    }
}

/// Something that reacts to messages sent over a dispatcher.
pub trait Listener: Send + Sync {
    fn on_message(&self, request: Request, reply: ReplySender) -> ListenerOutcome;
}

/// Routes messages to listeners and hands back a pending reply.
pub trait MessageDispatcher {
    fn add_listener(&mut self, listener: Arc<dyn Listener>);

    fn send_message(&self, message: Message) -> Result<PendingResponse, ChannelError>;
}

/// One-shot reply handle. Clones share the same slot; the first reply wins.
#[derive(Clone)]
pub struct ReplySender {
    request_id: Uuid,
    slot: Arc<Mutex<Option<Sender<ExportResponse>>>>,
}

impl ReplySender {
    /// Deliver the reply. Returns false if a reply was already sent.
    pub fn send(&self, response: ExportResponse) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => {
                if tx.send(response).is_err() {
                    debug!(
                        "Caller of request {} stopped waiting before the reply",
                        self.request_id
                    );
                }
                true
            }
            None => {
                warn!(
                    "Reply for request {} was already sent, ignoring",
                    self.request_id
                );
                false
            }
        }
    }
}

/// The sending side's view of a request that is in flight.
#[derive(Debug)]
pub struct PendingResponse {
    request_id: Uuid,
    receiver: Receiver<ExportResponse>,
}

impl PendingResponse {
    pub fn id(&self) -> Uuid {
        self.request_id
    }

    /// Block until the reply arrives. `None` waits for as long as it takes.
    pub fn wait(self, timeout: Option<Duration>) -> Result<ExportResponse, ChannelError> {
        match timeout {
            None => self.receiver.recv().map_err(|_| ChannelError::PortClosed),
            Some(limit) => self.receiver.recv_timeout(limit).map_err(|e| match e {
                RecvTimeoutError::Timeout => ChannelError::TimedOut(limit),
                RecvTimeoutError::Disconnected => ChannelError::PortClosed,
            }),
        }
    }
}

/// Create the two ends of a single request's reply channel.
pub fn reply_channel(request_id: Uuid) -> (ReplySender, PendingResponse) {
    let (tx, rx) = mpsc::channel();
    (
        ReplySender {
            request_id,
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        PendingResponse {
            request_id,
            receiver: rx,
        },
    )
}
