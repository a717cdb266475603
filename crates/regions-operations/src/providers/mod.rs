mod git;

pub use git::{Git2FileSystem, Git2FileSystemProvider, GitSource};
