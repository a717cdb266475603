mod file_system;
mod source;

pub use file_system::{FileSystemProvider, ScmFileSystem};
pub use source::{RevisionResolver, ScmSource};
