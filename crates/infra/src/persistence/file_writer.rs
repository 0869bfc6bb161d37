// crates/infra/src/persistence/file_writer.rs
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use dwalk_shared_kernel::{InfraResult, InfrastructureError};

/// Helper utilities for writing files.
pub struct FileWriter;

impl FileWriter {
    /// Create a buffered writer targeting `path`, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> InfraResult<BufWriter<File>> {
        let path = path.as_ref();
        File::create(path)
            .map(BufWriter::new)
            .map_err(|source| InfrastructureError::FileWrite { path: path.to_path_buf(), source })
    }

    /// Runs `write` against a fresh buffered file and flushes it.
    pub fn write_with<P, F>(path: P, write: F) -> InfraResult<()>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
    {
        let path = path.as_ref();
        let mut writer = Self::create(path)?;
        write(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|source| InfrastructureError::FileWrite { path: path.to_path_buf(), source })
    }
}
