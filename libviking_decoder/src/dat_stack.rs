use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::error::DatStackError;

/// The collection of raw `.dat` transmission files for a deployment.
///
/// A shore station writes one file per download session, so a deployment is
/// spread over many files in one directory. The stack serves them in sorted
/// order and keeps the total byte count for progress reporting.
#[derive(Debug)]
pub struct DatStack {
    file_stack: VecDeque<PathBuf>,
    pub total_stack_size_bytes: u64,
}

impl DatStack {
    /// Create a new DatStack for a directory of raw transmission files.
    pub fn new(path: &Path) -> Result<Self, DatStackError> {
        let mut file_list: Vec<PathBuf> = Vec::new();
        let mut total_stack_size_bytes: u64 = 0;
        for item in path.read_dir()? {
            let item_path = item?.path();
            if item_path.extension().is_some_and(|ext| ext == "dat") {
                total_stack_size_bytes += item_path.metadata()?.len();
                file_list.push(item_path);
            }
        }

        if file_list.is_empty() {
            return Err(DatStackError::NoMatchingFiles(path.to_path_buf()));
        }

        file_list.sort(); // Session files share a prefix; the date tail orders them.

        Ok(DatStack {
            file_stack: file_list.into(),
            total_stack_size_bytes,
        })
    }

    pub fn remaining_files(&self) -> usize {
        self.file_stack.len()
    }

    /// Pop the next file and read its full contents.
    ///
    /// Returns `Ok(None)` once the stack is exhausted.
    pub fn next_file(&mut self) -> Result<Option<(PathBuf, String)>, DatStackError> {
        match self.file_stack.pop_front() {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)?;
                Ok(Some((path, contents)))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory_is_error() {
        let dir = std::env::temp_dir().join("viking_decoder_empty_stack_test");
        std::fs::create_dir_all(&dir).unwrap();
        match DatStack::new(&dir) {
            Err(DatStackError::NoMatchingFiles(_)) => (),
            other => panic!("expected no-matching-files, got {other:?}"),
        }
    }

    #[test]
    fn test_serves_files_in_sorted_order() {
        let dir = std::env::temp_dir().join("viking_decoder_stack_order_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("PMZA-RIKI_RAW_02.dat"), "second").unwrap();
        std::fs::write(dir.join("PMZA-RIKI_RAW_01.dat"), "first").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let mut stack = DatStack::new(&dir).unwrap();
        assert_eq!(stack.remaining_files(), 2);
        assert_eq!(stack.total_stack_size_bytes, 11);
        let (path, contents) = stack.next_file().unwrap().unwrap();
        assert!(path.to_string_lossy().ends_with("01.dat"));
        assert_eq!(contents, "first");
        let (_, contents) = stack.next_file().unwrap().unwrap();
        assert_eq!(contents, "second");
        assert!(stack.next_file().unwrap().is_none());
    }
}
