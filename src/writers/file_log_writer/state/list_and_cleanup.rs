use super::numbers::is_number_infix;
use crate::{
    util::{eprint_err, ErrorCode},
    Cleanup, FileSpec,
};
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{channel, Sender},
    thread::JoinHandle,
};

const CLEANUP_THREAD_NAME: &str = "tg_logger-fs-cleanup";

// All rotated files, plain or compressed, youngest first
pub(crate) fn list_of_rotated_files(file_spec: &FileSpec) -> Vec<PathBuf> {
    let mut files = file_spec.list_of_files(is_number_infix, file_spec.get_suffix());
    if file_spec.get_suffix().is_some() {
        files.extend(file_spec.list_of_files(is_number_infix, Some("gz")));
    }
    files.sort_unstable_by(|a, b| b.file_name().cmp(&a.file_name()));
    files.dedup();
    files
}

// Does the cleanup right away, or asks the cleanup thread to do it
pub(super) fn cleanup(
    o_cleanup_thread: Option<&CleanupThread>,
    cleanup: Cleanup,
    file_spec: &FileSpec,
) -> Result<(), std::io::Error> {
    match o_cleanup_thread {
        Some(cleanup_thread) => {
            cleanup_thread.trigger();
            Ok(())
        }
        None => cleanup_now(cleanup, file_spec),
    }
}

fn cleanup_now(cleanup: Cleanup, file_spec: &FileSpec) -> Result<(), std::io::Error> {
    let Some((keep_plain, keep_compressed)) = cleanup.limits() else {
        return Ok(());
    };
    for (index, path) in list_of_rotated_files(file_spec).iter().enumerate() {
        if index >= keep_plain + keep_compressed {
            std::fs::remove_file(path)?;
        } else if index >= keep_plain {
            compress(path)?;
        }
    }
    Ok(())
}

#[cfg(feature = "compress")]
fn compress(path: &Path) -> Result<(), std::io::Error> {
    use std::fs::File;

    if path.extension().is_some_and(|ext| ext == "gz") {
        return Ok(());
    }
    let mut gz_path = path.as_os_str().to_owned();
    gz_path.push(".gz");

    let mut encoder =
        flate2::write::GzEncoder::new(File::create(gz_path)?, flate2::Compression::fast());
    std::io::copy(&mut File::open(path)?, &mut encoder)?;
    encoder.finish()?;
    std::fs::remove_file(path)
}

// Without the compress feature, all limits for compressed files are zero
#[cfg(not(feature = "compress"))]
fn compress(_path: &Path) -> Result<(), std::io::Error> {
    Ok(())
}

// A thread that cleans up whenever it is triggered, until it is shut down
#[derive(Debug)]
pub(super) struct CleanupThread {
    o_sender: Option<Sender<()>>,
    join_handle: JoinHandle<()>,
}

impl CleanupThread {
    pub(super) fn start(cleanup: Cleanup, file_spec: FileSpec) -> Result<Self, std::io::Error> {
        let (sender, receiver) = channel::<()>();
        let builder = std::thread::Builder::new().name(CLEANUP_THREAD_NAME.to_string());
        #[cfg(not(feature = "dont_minimize_extra_stacks"))]
        let builder = builder.stack_size(512 * 1024);
        let join_handle = builder.spawn(move || {
            // ends when the sender is dropped
            while receiver.recv().is_ok() {
                cleanup_now(cleanup, &file_spec).unwrap_or_else(|e| {
                    eprint_err(ErrorCode::LogFileCleanup, "cleanup failed", &e);
                });
            }
        })?;
        Ok(Self {
            o_sender: Some(sender),
            join_handle,
        })
    }

    fn trigger(&self) {
        if let Some(sender) = &self.o_sender {
            sender.send(()).ok();
        }
    }

    pub(super) fn shutdown(mut self) {
        drop(self.o_sender.take());
        self.join_handle.join().ok();
    }
}
