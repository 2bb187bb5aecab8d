use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("file {} does not exist", .0.display())]
    InputFileDoesNotExist(PathBuf),
    #[error("expected a `.rd` source file, got {}", .0.display())]
    BadExtension(PathBuf),
    #[error("could not compile `{file}` due to {count} previous error(s)")]
    CompilationFailed { file: String, count: usize },
}
