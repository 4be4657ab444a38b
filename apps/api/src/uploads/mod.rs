// Upload pipeline: receive file, extract text, analyze, persist.
// Extraction and evaluation failures end in fallback content, never in an error.

pub mod extraction;
pub mod handlers;
pub mod repository;
pub mod storage;
