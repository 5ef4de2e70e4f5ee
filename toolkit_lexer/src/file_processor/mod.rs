//! Source file loading

mod processor;

use crate::config::runtime::FileProcessorPreferences;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};
use std::path::Path;

/// Process a file with default preferences
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Compile-time maximum file size in bytes
pub fn get_max_file_size() -> u64 {
    FileProcessor::max_file_size()
}
