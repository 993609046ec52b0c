//! Hand-off of remote commands from the watcher thread to the main loop

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

use crate::state::Command;

/// Queue depth. The watcher delivers at most one command per poll and the
/// main loop drains every tick, so this is never approached in practice.
pub const DEFAULT_CAPACITY: usize = 32;

/// Sending half, owned by the watcher thread
#[derive(Debug, Clone)]
pub struct CommandProducer {
    tx: Sender<Command>,
}

/// Receiving half, owned by the main loop. Deliberately not `Clone`.
#[derive(Debug)]
pub struct CommandConsumer {
    rx: Receiver<Command>,
}

/// Create a bounded command channel
pub fn command_channel(capacity: usize) -> (CommandProducer, CommandConsumer) {
    let (tx, rx) = bounded(capacity.max(1));
    (CommandProducer { tx }, CommandConsumer { rx })
}

impl CommandProducer {
    /// Queue a command without blocking.
    ///
    /// Returns `false` if the command was dropped because the queue is full
    /// or the consumer is gone.
    pub fn push(&self, command: Command) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                warn!("Command queue full, dropping {}", command);
                false
            }
            Err(TrySendError::Disconnected(command)) => {
                warn!("Command consumer gone, dropping {}", command);
                false
            }
        }
    }
}

impl CommandConsumer {
    /// Remove and return everything queued right now, oldest first.
    ///
    /// Commands pushed while draining are left for the next call.
    pub fn drain_all(&self) -> Vec<Command> {
        let queued = self.rx.len();
        self.rx.try_iter().take(queued).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn drains_in_enqueue_order() {
        let (producer, consumer) = command_channel(DEFAULT_CAPACITY);
        assert!(producer.push(Command::Toggle));
        assert!(producer.push(Command::Toggle));
        assert!(producer.push(Command::Reset));

        assert_eq!(
            consumer.drain_all(),
            vec![Command::Toggle, Command::Toggle, Command::Reset]
        );
        assert!(consumer.drain_all().is_empty());
    }

    #[test]
    fn empty_drain_does_not_block() {
        let (_producer, consumer) = command_channel(4);
        assert!(consumer.drain_all().is_empty());
        assert!(consumer.drain_all().is_empty());
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let (producer, consumer) = command_channel(2);
        assert!(producer.push(Command::Toggle));
        assert!(producer.push(Command::Reset));
        assert!(!producer.push(Command::Toggle));
        assert_eq!(consumer.drain_all(), vec![Command::Toggle, Command::Reset]);
    }

    #[test]
    fn push_after_consumer_dropped_reports_failure() {
        let (producer, consumer) = command_channel(2);
        drop(consumer);
        assert!(!producer.push(Command::Reset));
    }

    #[test]
    fn concurrent_producer_preserves_order() {
        let (producer, consumer) = command_channel(1024);
        let handle = thread::spawn(move || {
            for i in 0..500 {
                let command = if i % 2 == 0 { Command::Toggle } else { Command::Reset };
                assert!(producer.push(command));
            }
        });

        let mut received = Vec::new();
        while received.len() < 500 {
            received.extend(consumer.drain_all());
            thread::yield_now();
        }
        handle.join().unwrap();

        for (i, command) in received.iter().enumerate() {
            let expected = if i % 2 == 0 { Command::Toggle } else { Command::Reset };
            assert_eq!(*command, expected);
        }
    }
}
