use crate::{
    formats::FormatFunction,
    util::{eprint_err, ErrorCode},
    writers::LogWriter,
    DeferredNow, Level, LogEvent,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

/// Allows logging to a memory buffer with limited size.
///
/// The writer is cheap to clone; all clones share the same buffer,
/// so a clone can be handed to a logger while the original is kept for inspecting the content.
#[derive(Clone)]
pub struct BufferWriter {
    state: Arc<Mutex<State>>,
    min_level: Level,
}
struct State {
    buffer: VecDeque<String>,
    size: usize,
    max_size: usize,
    format: FormatFunction,
}

impl BufferWriter {
    /// Create a new instance that keeps at most `max_size` bytes of formatted log lines.
    ///
    /// If the limit would be exceeded, the oldest lines are dropped.
    #[must_use]
    pub fn new(max_size: usize, format: FormatFunction) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                max_size,
                format,
                buffer: VecDeque::new(),
                size: 0,
            })),
            min_level: Level::Debug,
        }
    }

    /// Lines with a lower level are not written.
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, State>, std::io::Error> {
        self.state
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    /// Returns the buffered lines, oldest first.
    ///
    /// A poisoned buffer yields an empty result.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lock_state()
            .map(|state| state.buffer.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Removes all buffered lines.
    pub fn clear(&self) {
        if let Ok(mut state) = self.lock_state() {
            state.buffer.clear();
            state.size = 0;
        }
    }
}

impl LogWriter for BufferWriter {
    fn write(&self, now: &mut DeferredNow, event: &LogEvent) -> std::io::Result<()> {
        let mut state = self.lock_state()?;

        let mut logline = Vec::<u8>::with_capacity(80);
        (state.format)(&mut logline, now, event).inspect_err(|e| {
            eprint_err(ErrorCode::Format, "formatting failed", e);
        })?;

        if !logline.is_empty() {
            if logline.len() > state.max_size {
                state.buffer.clear();
                state.size = 0;
            } else {
                while state.size + logline.len() > state.max_size {
                    if let Some(line) = state.buffer.pop_front() {
                        state.size -= line.len();
                    }
                }
            }

            state
                .buffer
                .push_back(String::from_utf8_lossy(&logline).to_string());
            state.size += logline.len();
        }
        Ok(())
    }

    fn flush(&self) -> std::io::Result<()> {
        // nothing to do
        Ok(())
    }

    fn min_level(&self) -> Level {
        self.min_level
    }
}
