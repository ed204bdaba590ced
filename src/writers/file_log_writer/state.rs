mod list_and_cleanup;
mod numbers;

use super::config::{Config, RotationConfig};
use crate::{
    util::{eprint_err, ErrorCode},
    Cleanup,
};
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

pub(crate) use list_and_cleanup::list_of_rotated_files;

pub(super) const CURRENT_INFIX: &str = "rCURRENT";

#[derive(Debug)]
struct RotationState {
    max_size: u64,
    current_size: u64,
    // the index to which the rCURRENT file will be renamed with the next rotation
    next_index: u32,
    cleanup: Cleanup,
    o_cleanup_thread: Option<list_and_cleanup::CleanupThread>,
}
impl RotationState {
    fn rotation_necessary(&self) -> bool {
        self.current_size > self.max_size
    }

    fn shutdown(&mut self) {
        if let Some(cleanup_thread) = self.o_cleanup_thread.take() {
            cleanup_thread.shutdown();
        }
    }
}

#[derive(Debug)]
enum Inner {
    Initial(Option<RotationConfig>, bool),
    Active(Option<RotationState>, File, PathBuf),
}

// The mutable state of a FileLogWriter.
#[derive(Debug)]
pub(super) struct State {
    config: Config,
    inner: Inner,
}
impl State {
    pub(super) fn new(
        config: Config,
        o_rotation_config: Option<RotationConfig>,
        cleanup_in_background_thread: bool,
    ) -> Self {
        Self {
            config,
            inner: Inner::Initial(o_rotation_config, cleanup_in_background_thread),
        }
    }

    pub(super) fn config(&self) -> &Config {
        &self.config
    }

    // The log file is only created with the first log line
    fn initialize(&mut self) -> Result<(), std::io::Error> {
        if let Inner::Initial(o_rotation_config, cleanup_in_background_thread) = &self.inner {
            self.inner = match o_rotation_config {
                None => {
                    let path = self.config.file_spec.as_pathbuf(None);
                    let file = open_log_file(&path, self.config.append)?;
                    Inner::Active(None, file, path)
                }
                Some(rotation_config) => {
                    self.initialize_with_rotation(*rotation_config, *cleanup_in_background_thread)?
                }
            };
        }
        Ok(())
    }

    fn initialize_with_rotation(
        &self,
        rotation_config: RotationConfig,
        cleanup_in_background_thread: bool,
    ) -> Result<Inner, std::io::Error> {
        let file_spec = &self.config.file_spec;
        let mut next_index = numbers::get_highest_index(file_spec).map_or(0, |idx| idx + 1);
        if !self.config.append {
            // a left-over rCURRENT file from an earlier run becomes a rotated file
            next_index = numbers::rotate_rcurrent(file_spec, next_index)?;
        }

        let path = file_spec.as_pathbuf(Some(CURRENT_INFIX));
        let file = open_log_file(&path, self.config.append)?;
        let current_size = file.metadata()?.len();

        let o_cleanup_thread = if rotation_config.cleanup.limits().is_some() {
            list_and_cleanup::cleanup(None, rotation_config.cleanup, file_spec)?;
            if cleanup_in_background_thread {
                Some(list_and_cleanup::CleanupThread::start(
                    rotation_config.cleanup,
                    file_spec.clone(),
                )?)
            } else {
                None
            }
        } else {
            None
        };

        Ok(Inner::Active(
            Some(RotationState {
                max_size: rotation_config.max_size,
                current_size,
                next_index,
                cleanup: rotation_config.cleanup,
                o_cleanup_thread,
            }),
            file,
            path,
        ))
    }

    pub(super) fn flush(&mut self) -> std::io::Result<()> {
        if let Inner::Active(_, ref mut file, _) = self.inner {
            file.flush()
        } else {
            Ok(())
        }
    }

    fn rotate_if_necessary(&mut self, force: bool) -> Result<(), std::io::Error> {
        if let Inner::Active(Some(ref mut rotation_state), ref mut current_file, ref path) =
            self.inner
        {
            if force || rotation_state.rotation_necessary() {
                current_file.flush()?;
                rotation_state.next_index =
                    numbers::rotate_rcurrent(&self.config.file_spec, rotation_state.next_index)?;
                *current_file = open_log_file(path, false)?;
                rotation_state.current_size = 0;

                list_and_cleanup::cleanup(
                    rotation_state.o_cleanup_thread.as_ref(),
                    rotation_state.cleanup,
                    &self.config.file_spec,
                )?;
            }
        }
        Ok(())
    }

    // Closes the current file, renames it to the next rotated file name,
    // and continues with a fresh rCURRENT file.
    pub(super) fn trigger_rotation(&mut self) -> Result<(), std::io::Error> {
        self.initialize()?;
        self.rotate_if_necessary(true)
    }

    pub(super) fn write_buffer(&mut self, buf: &[u8]) -> std::io::Result<()> {
        if let Inner::Initial(_, _) = self.inner {
            self.initialize()?;
        }

        self.rotate_if_necessary(false).unwrap_or_else(|e| {
            eprint_err(ErrorCode::LogFile, "rotation failed", &e);
        });

        if let Inner::Active(ref mut o_rotation_state, ref mut log_file, _) = self.inner {
            log_file.write_all(buf)?;

            if let Some(ref mut rotation_state) = o_rotation_state {
                rotation_state.current_size += buf.len() as u64;
            }
        }
        Ok(())
    }

    pub(super) fn current_path(&self) -> Option<PathBuf> {
        match self.inner {
            Inner::Active(_, _, ref path) => Some(path.clone()),
            Inner::Initial(_, _) => None,
        }
    }

    pub(super) fn shutdown(&mut self) {
        if let Inner::Active(ref mut o_rotation_state, ref mut file, _) = self.inner {
            file.flush().ok();
            if let Some(rotation_state) = o_rotation_state {
                rotation_state.shutdown();
            }
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> Result<File, std::io::Error> {
    if append {
        OpenOptions::new().create(true).append(true).open(path)
    } else {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
    }
}
