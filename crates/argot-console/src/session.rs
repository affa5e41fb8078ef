//! Per-line state handed to console command handlers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argot_command::CommandManager;
use parking_lot::Mutex;

/// State of one dispatched line.
///
/// Handlers print through it and may ask the console to stop. Clones share
/// the same output buffer.
#[derive(Clone)]
pub struct Session {
    manager: Arc<CommandManager<Session>>,
    output: Arc<Mutex<Vec<String>>>,
    exit: Arc<AtomicBool>,
}

impl Session {
    pub(crate) fn new(manager: Arc<CommandManager<Session>>, exit: Arc<AtomicBool>) -> Self {
        Self {
            manager,
            output: Arc::default(),
            exit,
        }
    }

    /// Registry the line is dispatched through
    pub fn manager(&self) -> &CommandManager<Session> {
        &self.manager
    }

    /// Append a line of output
    pub fn print(&self, line: impl Into<String>) {
        self.output.lock().push(line.into());
    }

    /// Ask the console to stop after this line
    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::SeqCst);
    }

    pub(crate) fn take_output(&self) -> Vec<String> {
        std::mem::take(&mut *self.output.lock())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("output_lines", &self.output.lock().len())
            .field("exit", &self.exit.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
