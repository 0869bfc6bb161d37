use std::fmt;

use serde::{Deserialize, Serialize};

/// Type tag of a walked filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    Other,
}

impl EntryKind {
    /// Maps a `find -type` style character (`b c d f l p s`) to a kind.
    pub fn from_type_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(Self::BlockDevice),
            'c' => Some(Self::CharDevice),
            'd' => Some(Self::Dir),
            'f' => Some(Self::File),
            'l' => Some(Self::Symlink),
            'p' => Some(Self::Fifo),
            's' => Some(Self::Socket),
            _ => None,
        }
    }

    pub fn type_char(self) -> char {
        match self {
            Self::BlockDevice => 'b',
            Self::CharDevice => 'c',
            Self::Dir => 'd',
            Self::File => 'f',
            Self::Symlink => 'l',
            Self::Fifo => 'p',
            Self::Socket => 's',
            Self::Other => '?',
        }
    }

    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            return Self::Symlink;
        }
        if file_type.is_dir() {
            return Self::Dir;
        }
        if file_type.is_file() {
            return Self::File;
        }
        special_kind(file_type)
    }
}

#[cfg(unix)]
fn special_kind(file_type: std::fs::FileType) -> EntryKind {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_block_device() {
        EntryKind::BlockDevice
    } else if file_type.is_char_device() {
        EntryKind::CharDevice
    } else if file_type.is_fifo() {
        EntryKind::Fifo
    } else if file_type.is_socket() {
        EntryKind::Socket
    } else {
        EntryKind::Other
    }
}

#[cfg(not(unix))]
fn special_kind(_file_type: std::fs::FileType) -> EntryKind {
    EntryKind::Other
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_char())
    }
}
