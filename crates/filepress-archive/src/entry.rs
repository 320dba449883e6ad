use std::path::PathBuf;

/// An archive entry as it was written during extraction.
#[derive(Clone, Debug)]
pub struct Entry {
    /// Name as stored in the archive, `/`-separated.
    pub name: String,
    pub target_path: PathBuf,
    /// Bytes written; zero for directories.
    pub size: u64,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(name: impl Into<String>, target_path: PathBuf, size: u64, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            target_path,
            size,
            kind,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Summary of one extraction.
#[derive(Clone, Debug, Default)]
pub struct UnpackReport {
    pub entry_count: usize,
    pub file_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<Entry>,
}

impl UnpackReport {
    pub(crate) fn push(&mut self, entry: Entry) {
        self.entry_count += 1;
        if entry.is_file() {
            self.file_count += 1;
            self.total_bytes += entry.size;
        }
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }
}
