//! Publish/subscribe fan-out for simulation messages.
//!
//! Each [`MessageBroker::subscribe`] call opens an unbounded channel; every
//! published [`Message`] is cloned into all of them. Subscribers that dropped
//! their receiver are forgotten on the next publish.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::collision::Message;

#[derive(Debug, Default)]
pub struct MessageBroker {
    subscribers: Vec<Sender<Message>>,
}

impl MessageBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<Message> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, message: Message) {
        self.subscribers
            .retain(|tx| tx.send(message.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
