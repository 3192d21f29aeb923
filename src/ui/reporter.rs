//! Textual sink for connection failures.
//!
//! The helper never propagates a failed open; it reports a human readable
//! line here instead and hands the caller a "not opened" signal.

use crate::ui::messages;

pub trait ErrorReporter {
    fn report(&self, message: &str);
}

/// Default sink: prints through the CLI message helpers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&self, message: &str) {
        messages::error(message);
    }
}
