use crate::{Cleanup, FileSpec};

#[derive(Clone, Copy, Debug)]
pub(crate) struct RotationConfig {
    // rotate when the current file grows beyond this many bytes
    pub(crate) max_size: u64,
    pub(crate) cleanup: Cleanup,
}

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) append: bool,
    pub(crate) file_spec: FileSpec,
    pub(crate) line_ending: &'static [u8],
}

pub(crate) const UNIX_LINE_ENDING: &[u8] = b"\n";
pub(crate) const WINDOWS_LINE_ENDING: &[u8] = b"\r\n";
