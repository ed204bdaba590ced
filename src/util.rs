use crate::{DeferredNow, FormatFunction, LogEvent};
use std::{cell::RefCell, io::Write};

#[derive(Copy, Clone, Debug)]
pub(crate) enum ErrorCode {
    Flush,
    Format,
    LogFile,
    LogFileCleanup,
    Poison,
    Write,
}
impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Flush => "flush",
            Self::Format => "format",
            Self::LogFile => "logfile",
            Self::LogFileCleanup => "logfile-cleanup",
            Self::Poison => "poison",
            Self::Write => "write",
        }
    }
}

// Reports problems of the logger itself, which cannot go through the logger
pub(crate) fn eprint_err(error_code: ErrorCode, msg: &str, err: &dyn std::error::Error) {
    eprintln!(
        "[tg_logger][ERRCODE::{}] {msg}, caused by {err}",
        error_code.as_str()
    );
}

pub(crate) fn io_err(s: &'static str) -> std::io::Error {
    std::io::Error::other(s)
}

// Formats the log line with its line ending into a reusable thread-local buffer
// and hands the bytes to `write`; errors of `write` are returned, not reported
pub(crate) fn with_formatted_line<F>(
    format: FormatFunction,
    now: &mut DeferredNow,
    event: &LogEvent,
    line_ending: &[u8],
    write: F,
) -> std::io::Result<()>
where
    F: FnOnce(&[u8]) -> std::io::Result<()>,
{
    thread_local! {
        static BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(200));
    }

    BUFFER.with(|tl_buf| match tl_buf.try_borrow_mut() {
        Ok(mut buffer) => {
            format_line(format, now, event, line_ending, &mut buffer);
            let result = write(&buffer);
            buffer.clear();
            result
        }
        // log calls from within a format function
        Err(_) => {
            let mut buffer = Vec::with_capacity(200);
            format_line(format, now, event, line_ending, &mut buffer);
            write(&buffer)
        }
    })
}

fn format_line(
    format: FormatFunction,
    now: &mut DeferredNow,
    event: &LogEvent,
    line_ending: &[u8],
    buffer: &mut Vec<u8>,
) {
    format(buffer, now, event)
        .and_then(|()| buffer.write_all(line_ending))
        .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
}
