use crate::TgLoggerError;
use chrono::Local;
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

const TS_USCORE_DASHES_USCORE_DASHES: &str = "%Y-%m-%d_%H-%M-%S";

/// Name and folder of the output files of a [`FileLogWriter`](crate::writers::FileLogWriter).
///
/// File names are composed as
///
/// ```text
/// [<basename>][_<discriminant>][_<timestamp>][_<infix>][.<suffix>]
/// ```
///
/// The basename defaults to the program name, the suffix to `log`, the folder to the
/// current working directory. With rotation, the infix is `rCURRENT` for the file that is
/// being written, and `r00000`, `r00001`, ... for the rotated files.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileSpec {
    pub(crate) directory: PathBuf,
    pub(crate) basename: String,
    pub(crate) o_discriminant: Option<String>,
    o_timestamp: Option<String>,
    pub(crate) o_suffix: Option<String>,
}
impl Default for FileSpec {
    fn default() -> Self {
        FileSpec {
            directory: PathBuf::from("."),
            basename: Self::default_basename(),
            o_discriminant: None,
            o_timestamp: None,
            o_suffix: Some(String::from("log")),
        }
    }
}
impl FileSpec {
    fn default_basename() -> String {
        std::env::current_exe()
            .ok()
            .as_deref()
            .and_then(Path::file_stem)
            .map_or_else(
                || "app".to_string(),
                |stem| stem.to_string_lossy().to_string(),
            )
    }

    /// Derives basename, suffix and folder from the path of a file.
    ///
    /// # Errors
    ///
    /// [`TgLoggerError::OutputBadDirectory`] if the path is an existing folder
    /// or has no file name.
    pub fn try_from<P: Into<PathBuf>>(p: P) -> Result<Self, TgLoggerError> {
        let p: PathBuf = p.into();
        let (Some(stem), false) = (p.file_stem(), p.is_dir()) else {
            return Err(TgLoggerError::OutputBadDirectory);
        };
        Ok(FileSpec {
            directory: p
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
            basename: stem.to_string_lossy().to_string(),
            o_discriminant: None,
            o_suffix: p.extension().map(|s| s.to_string_lossy().to_string()),
            o_timestamp: None,
        })
    }

    /// Replaces the program name as first part of the file names.
    #[must_use]
    pub fn basename<S: Into<String>>(mut self, basename: S) -> Self {
        self.basename = basename.into();
        self
    }

    /// The folder for the files; it is created if necessary.
    #[must_use]
    pub fn directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.directory = directory.into();
        self
    }

    /// Adds a name part after the basename.
    #[must_use]
    pub fn discriminant<S: Into<String>>(mut self, discriminant: S) -> Self {
        self.o_discriminant = Some(discriminant.into());
        self
    }

    /// Replaces the suffix `log`; `None` means no suffix.
    #[must_use]
    pub fn o_suffix<S: Into<String>>(mut self, o_suffix: Option<S>) -> Self {
        self.o_suffix = o_suffix.map(Into::into);
        self
    }

    /// Replaces the suffix `log`.
    #[must_use]
    pub fn suffix<S: Into<String>>(self, suffix: S) -> Self {
        self.o_suffix(Some(suffix))
    }

    /// Makes the file name include the current time,
    /// so that every program start writes to a fresh set of files.
    #[must_use]
    pub fn use_timestamp(mut self) -> Self {
        self.o_timestamp = Some(Local::now().format(TS_USCORE_DASHES_USCORE_DASHES).to_string());
        self
    }

    /// The folder into which the log files are written.
    #[must_use]
    pub fn get_directory(&self) -> &Path {
        &self.directory
    }

    pub(crate) fn get_suffix(&self) -> Option<&str> {
        self.o_suffix.as_deref()
    }

    pub(crate) fn fixed_name_part(&self) -> String {
        let mut fixed_name_part = self.basename.clone();
        fixed_name_part.reserve(50);

        if let Some(discriminant) = &self.o_discriminant {
            FileSpec::separate_with_underscore(&mut fixed_name_part);
            fixed_name_part.push_str(discriminant);
        }
        if let Some(timestamp) = &self.o_timestamp {
            FileSpec::separate_with_underscore(&mut fixed_name_part);
            fixed_name_part.push_str(timestamp);
        }
        fixed_name_part
    }

    fn separate_with_underscore(filename: &mut String) {
        if !filename.is_empty() {
            filename.push('_');
        }
    }

    /// Derives a `PathBuf` from the spec and the given infix.
    #[must_use]
    pub fn as_pathbuf(&self, o_infix: Option<&str>) -> PathBuf {
        let mut filename = self.fixed_name_part();

        if let Some(infix) = o_infix {
            if !infix.is_empty() {
                FileSpec::separate_with_underscore(&mut filename);
                filename.push_str(infix);
            }
        }
        if let Some(suffix) = &self.o_suffix {
            filename.push('.');
            filename.push_str(suffix);
        }

        let mut p_path = self.directory.clone();
        p_path.push(filename);
        p_path
    }

    // Returns the files of this spec whose infix passes the filter and whose extension,
    // if given, matches; ordered from youngest to oldest
    pub(crate) fn list_of_files(
        &self,
        infix_filter: fn(&str) -> bool,
        o_suffix: Option<&str>,
    ) -> Vec<PathBuf> {
        let fixed_name_part = self.fixed_name_part();
        let infix_start = if fixed_name_part.is_empty() {
            0
        } else {
            fixed_name_part.len() + 1 // underscore at the end
        };
        self.list_related_files()
            .into_iter()
            .filter(|path| {
                o_suffix.is_none_or(|suffix| {
                    path.extension()
                        .is_some_and(|ext| ext.to_string_lossy() == suffix)
                })
            })
            .filter(|path| {
                path.file_stem()
                    .map(OsStr::to_string_lossy)
                    .and_then(|stem| stem.get(infix_start..).map(infix_filter))
                    .unwrap_or(false)
            })
            .collect::<Vec<PathBuf>>()
    }

    // All files in the directory whose name starts with the fixed name part, youngest first
    fn list_related_files(&self) -> Vec<PathBuf> {
        let fixed_name_part = self.fixed_name_part();
        let Ok(read_dir) = std::fs::read_dir(&self.directory) else {
            return Vec::new();
        };
        let mut log_files = read_dir
            .flatten(/*ignore errors from reading entries in the directory*/)
            .map(|de| de.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                // fixed name part must match
                path.file_name()
                    .is_some_and(|fln| fln.to_string_lossy().starts_with(&fixed_name_part))
            })
            .collect::<Vec<PathBuf>>();
        log_files.sort_unstable();
        log_files.reverse();
        log_files
    }
}
