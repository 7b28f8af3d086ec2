#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "dir",
            EntryKind::Symlink => "symlink",
            EntryKind::Submodule => "submodule",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryLinks {
    pub api_url: String,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
    pub git_url: Option<String>,
}

/// A node returned by the content API. Only individually fetched files carry
/// `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    pub kind: EntryKind,
    pub links: EntryLinks,
    pub content: Option<String>,
    pub encoding: Option<String>,
}

impl RemoteEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// The content endpoint answers with an array for directories and a single
/// object for files. Callers branch on this instead of normalizing it away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryContents {
    Listing(Vec<RemoteEntry>),
    SingleFile(RemoteEntry),
}

/// Bytes picked by the user for upload.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Vec<u8>,
}
