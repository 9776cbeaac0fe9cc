use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use thiserror::Error;

/// Error opening or mapping a single data file.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("could not open {0}")]
    Open(String, #[source] std::io::Error),
    #[error("could not memory-map {0}")]
    Map(String, #[source] std::io::Error),
}

/// An immutable, memory-mapped read-only view of one data file.
///
/// A `FileMapping` that failed to open is represented as `good() == false`
/// with an empty byte view, rather than as a constructor error, so that
/// `Database` can report a single combined "database not good" condition
/// the way the original `imdb::good()` does.
pub struct FileMapping {
    // `None` is the "not-good" sentinel: open or mmap failed.
    mmap: Option<Mmap>,
}

impl FileMapping {
    /// Opens `path` read-only and maps its full contents. On any failure
    /// (missing file, permission denied), returns a not-good mapping
    /// rather than an error — the database decides what that means.
    pub fn open(path: &Path) -> Self {
        match Self::try_open(path) {
            Ok(mmap) => FileMapping { mmap: Some(mmap) },
            Err(e) => {
                log::warn!("{e}");
                FileMapping { mmap: None }
            }
        }
    }

    fn try_open(path: &Path) -> Result<Mmap, MappingError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| MappingError::Open(display.clone(), e))?;
        // SAFETY: the mapped file is not expected to be mutated by another
        // process for the lifetime of this mapping; the navigator only
        // ever reads through it.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| MappingError::Map(display, e))?;
        Ok(mmap)
    }

    pub fn good(&self) -> bool {
        self.mmap.is_some()
    }

    pub fn len(&self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The immutable byte view backing this mapping. Empty when not good.
    pub fn view(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[..],
            None => &[],
        }
    }
}
