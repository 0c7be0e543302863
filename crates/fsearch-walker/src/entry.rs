//! Classification of directory entries.

use std::fs::FileType;

/// What a directory entry is, judged without following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory that is not a symbolic link.
    Directory,
    /// A symbolic link, whatever it points at.
    Symlink,
    /// Sockets, devices, FIFOs, and entries whose type could not be read.
    Other,
}

impl EntryKind {
    /// Classifies an entry from its own (link-not-followed) file type.
    #[must_use]
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, b"a").unwrap();

        let kind = EntryKind::from_file_type(std::fs::symlink_metadata(&file).unwrap().file_type());
        assert_eq!(kind, EntryKind::File);

        let kind =
            EntryKind::from_file_type(std::fs::symlink_metadata(dir.path()).unwrap().file_type());
        assert_eq!(kind, EntryKind::Directory);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_a_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("loop");
        std::os::unix::fs::symlink(dir.path(), &link).unwrap();

        let kind = EntryKind::from_file_type(std::fs::symlink_metadata(&link).unwrap().file_type());
        assert_eq!(kind, EntryKind::Symlink);
    }
}
