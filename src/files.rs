use std::path::Path;

/// Reads local files as text.
pub trait FileReader: Send + Sync {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}
