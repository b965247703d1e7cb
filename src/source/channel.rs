//! Channel-based reading source.
//!
//! Receives readings via a tokio unbounded channel. Any producer, such as
//! the simulator task or a test, pushes readings through the sender.

use tokio::sync::mpsc;

use super::ReadingSource;
use crate::data::Reading;

/// A reading source backed by an mpsc channel.
///
/// Every reading sent is delivered exactly once, in order.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<Reading>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of an unbounded channel
    /// * `source_description` - Where readings come from (e.g., "simulator")
    pub fn new(receiver: mpsc::UnboundedReceiver<Reading>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            last_error: None,
        }
    }

    /// Create a channel pair for sending readings to a ChannelSource.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<Reading>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl ReadingSource for ChannelSource {
    fn poll(&mut self) -> Option<Reading> {
        match self.receiver.try_recv() {
            Ok(reading) => Some(reading),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                if self.last_error.is_none() {
                    self.last_error = Some("Producer disconnected".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
