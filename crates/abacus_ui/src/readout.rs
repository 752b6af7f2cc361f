//! Numeric readout capability.
//!
//! The gesture handler pushes a [`Reading`] here when a drag ends. What the
//! host does with it (a text widget, a log line, a channel to another
//! thread) is its own business.

use abacus_core::Reading;
use crossbeam_channel::{Receiver, Sender};

/// Placeholder shown while the abacus is indeterminate.
pub const INDETERMINATE_TEXT: &str = "?";

/// Receives decoded abacus values.
pub trait Readout: Send + Sync {
    /// Shows a new reading.
    fn show(&self, reading: Reading);
}

/// Formats a reading for display: the decimal value, or [`INDETERMINATE_TEXT`].
#[must_use]
pub fn readout_text(reading: Reading) -> String {
    match reading {
        Reading::Value(v) => v.to_string(),
        Reading::Indeterminate => INDETERMINATE_TEXT.to_string(),
    }
}

/// Readout that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReadout;

impl Readout for NullReadout {
    fn show(&self, _reading: Reading) {}
}

/// Readout that forwards readings over a channel.
///
/// A host UI thread owns the receiving end and updates its widget from it.
#[derive(Debug, Clone)]
pub struct ChannelReadout {
    sender: Sender<Reading>,
}

impl ChannelReadout {
    /// Creates a readout and the receiver its readings arrive on.
    #[must_use]
    pub fn unbounded() -> (Self, Receiver<Reading>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }

    /// Creates a readout around an existing sender.
    #[must_use]
    pub fn new(sender: Sender<Reading>) -> Self {
        Self { sender }
    }
}

impl Readout for ChannelReadout {
    fn show(&self, reading: Reading) {
        // A dropped receiver means nobody is looking at the readout anymore.
        let _ = self.sender.send(reading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_text() {
        assert_eq!(readout_text(Reading::Value(120)), "120");
        assert_eq!(readout_text(Reading::Indeterminate), "?");
    }

    #[test]
    fn test_channel_readout() {
        let (readout, rx) = ChannelReadout::unbounded();
        readout.show(Reading::Value(7));
        readout.show(Reading::Indeterminate);

        assert_eq!(rx.try_recv(), Ok(Reading::Value(7)));
        assert_eq!(rx.try_recv(), Ok(Reading::Indeterminate));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_readout_survives_dropped_receiver() {
        let (readout, rx) = ChannelReadout::unbounded();
        drop(rx);
        readout.show(Reading::Value(1));
    }
}
