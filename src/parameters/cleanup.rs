/// What happens with rotated log files.
///
/// Used with [`FileLogWriterBuilder::rotate`](crate::writers::FileLogWriterBuilder::rotate).
/// Unless configured otherwise, the cleanup runs in a background thread of the writer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cleanup {
    /// Rotated files are kept forever.
    Never,

    /// Only the given number of youngest rotated files is kept, older ones are deleted.
    KeepLogFiles(usize),

    /// Rotated files are gzip-compressed; only the given number of youngest
    /// compressed files is kept.
    #[cfg_attr(docsrs, doc(cfg(feature = "compress")))]
    #[cfg(feature = "compress")]
    KeepCompressedFiles(usize),

    /// `KeepLogAndCompressedFiles(5, 30)` keeps the youngest five rotated files as they are,
    /// compresses the next 30, and deletes the rest.
    #[cfg_attr(docsrs, doc(cfg(feature = "compress")))]
    #[cfg(feature = "compress")]
    KeepLogAndCompressedFiles(usize, usize),
}

impl Cleanup {
    // How many rotated files stay plain, and how many more are kept compressed;
    // None if nothing is ever removed
    pub(crate) fn limits(self) -> Option<(usize, usize)> {
        match self {
            Self::Never => None,
            Self::KeepLogFiles(plain) => Some((plain, 0)),
            #[cfg(feature = "compress")]
            Self::KeepCompressedFiles(compressed) => Some((0, compressed)),
            #[cfg(feature = "compress")]
            Self::KeepLogAndCompressedFiles(plain, compressed) => Some((plain, compressed)),
        }
    }
}
