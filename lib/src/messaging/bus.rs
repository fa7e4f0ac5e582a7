use super::{reply_channel, Completion, Listener, ListenerOutcome, MessageDispatcher, PendingResponse};
use crate::models::errors::ChannelError;
use crate::models::message::{Message, Request};
use log::{debug, warn};
use std::sync::{Arc, Mutex};

/// In-process dispatcher: listeners run on the sending thread, deferred work
/// keeps running on its own thread until it replies.
#[derive(Default)]
pub struct LocalBus {
    listeners: Vec<Arc<dyn Listener>>,
    in_flight: Mutex<Vec<Completion>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of deferred replies that have not finished yet.
    pub fn in_flight(&self) -> usize {
        match self.in_flight.lock() {
            Ok(list) => list.iter().filter(|c| !c.is_finished()).count(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .filter(|c| !c.is_finished())
                .count(),
        }
    }

    /// Wait for every deferred reply to finish. Returns how many were joined.
    pub fn drain(&self) -> usize {
        let pending: Vec<Completion> = match self.in_flight.lock() {
            Ok(mut list) => list.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };

        let count = pending.len();
        for completion in pending {
            if !completion.join() {
                warn!("A deferred reply panicked before completing");
            }
        }
        count
    }

    fn track(&self, completion: Completion) {
        let mut list = match self.in_flight.lock() {
            Ok(list) => list,
            Err(poisoned) => poisoned.into_inner(),
        };
        list.retain(|c| !c.is_finished());
        list.push(completion);
    }
}

impl MessageDispatcher for LocalBus {
    fn add_listener(&mut self, listener: Arc<dyn Listener>) {
        self.listeners.push(listener);
        debug!("Listener registered ({} total)", self.listeners.len());
    }

    fn send_message(&self, message: Message) -> Result<PendingResponse, ChannelError> {
        if self.listeners.is_empty() {
            return Err(ChannelError::NoReceiver);
        }

        let request = Request::new(message);
        let (reply, pending) = reply_channel(request.id);
        debug!("Dispatching request {}: {}", request.id, request.message);

        for listener in &self.listeners {
            if let ListenerOutcome::Deferred(completion) =
                listener.on_message(request.clone(), reply.clone())
            {
                self.track(completion);
            }
        }

        Ok(pending)
    }
}
