// entry.rs — Entry, stat snapshot, and file mode constants
//
// One Entry per filesystem object within a directory level. The traversal
// driver owns Entry lifetime; the per-level processing pass only reads the
// stat snapshot and the precomputed name width.

use std::ffi::OsString;
use std::fs::Metadata;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;

use unicode_width::UnicodeWidthStr;

// ── File mode constants (POSIX st_mode values) ────────────────────────────────

pub const S_IFMT: u32 = 0o170000;
pub const S_IFIFO: u32 = 0o010000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFSOCK: u32 = 0o140000;

pub const S_ISUID: u32 = 0o4000;
pub const S_ISGID: u32 = 0o2000;
pub const S_ISVTX: u32 = 0o1000;

pub const S_IXUSR: u32 = 0o100;
pub const S_IXGRP: u32 = 0o010;
pub const S_IXOTH: u32 = 0o001;

/// Raw st_blocks unit, fixed by POSIX regardless of the filesystem.
pub const STAT_BLOCK_SIZE: u64 = 512;

// ── Entry status ──────────────────────────────────────────────────────────────

/// Traversal status for one entry, decoupled from any platform's
/// directory-walking primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Plain entry with a valid stat snapshot
    Normal,
    /// Directory the driver may descend into
    Directory,
    /// Enumeration-level error on this entry (errno code)
    Error(i32),
    /// Symlink loop: this directory is already on the ancestor chain
    Cycle,
    /// stat/access failure on this sibling (errno code)
    Unreadable(i32),
}

impl EntryStatus {
    /// Error/Unreadable entries sort after all normal entries and are
    /// reported instead of rendered.
    pub fn is_failed(&self) -> bool {
        matches!(self, EntryStatus::Error(_) | EntryStatus::Unreadable(_))
    }
}

// ── Stat snapshot ─────────────────────────────────────────────────────────────

/// Read-only stat snapshot taken when the driver enumerates the entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatSnapshot {
    pub ino:    u64,
    pub size:   u64,
    pub blocks: u64,
    pub nlink:  u64,
    pub uid:    u32,
    pub gid:    u32,
    pub mode:   u32,
    pub dev:    u64,
    pub rdev:   u64,
    pub mtime:  i64,
    pub atime:  i64,
    pub ctime:  i64,
}

impl StatSnapshot {
    pub fn from_metadata(md: &Metadata) -> Self {
        StatSnapshot {
            ino:    md.ino(),
            size:   md.size(),
            blocks: md.blocks(),
            nlink:  md.nlink(),
            uid:    md.uid(),
            gid:    md.gid(),
            mode:   md.mode(),
            dev:    md.dev(),
            rdev:   md.rdev(),
            mtime:  md.mtime(),
            atime:  md.atime(),
            ctime:  md.ctime(),
        }
    }

    pub fn file_type(&self) -> u32 {
        self.mode & S_IFMT
    }

    pub fn is_dir(&self) -> bool {
        self.file_type() == S_IFDIR
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type() == S_IFLNK
    }

    /// Character or block device: shares the size column as "major, minor".
    pub fn is_device(&self) -> bool {
        matches!(self.file_type(), S_IFCHR | S_IFBLK)
    }

    pub fn is_executable(&self) -> bool {
        self.mode & (S_IXUSR | S_IXGRP | S_IXOTH) != 0
    }

    pub fn major(&self) -> u64 {
        nix::sys::stat::major(self.rdev)
    }

    pub fn minor(&self) -> u64 {
        nix::sys::stat::minor(self.rdev)
    }
}

// ── Entry ─────────────────────────────────────────────────────────────────────

/// One filesystem object within a directory level.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name:       OsString,
    pub path:       PathBuf,
    pub depth:      usize,
    pub status:     EntryStatus,
    pub stat:       StatSnapshot,
    /// Hidden-dot filtering result, recomputed per level by the controller
    pub visible:    bool,
    /// Display width of the escaped name, computed once at creation
    pub name_width: usize,
}

impl Entry {
    pub fn new(name: OsString, path: PathBuf, depth: usize, status: EntryStatus, stat: StatSnapshot) -> Self {
        let name_width = escape_name(name.as_bytes()).width();
        Entry { name, path, depth, status, stat, visible: false, name_width }
    }

    pub fn is_root_level(&self) -> bool {
        self.depth == 0
    }

    pub fn is_hidden(&self) -> bool {
        self.name.as_bytes().first() == Some(&b'.')
    }

    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_bytes()
    }
}

// ── Name escaping ─────────────────────────────────────────────────────────────

/// Replace non-printable content with '?', one '?' per offending byte.
/// Valid printable UTF-8 passes through unchanged.
pub fn escape_name(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                push_printable(&mut out, s);
                break;
            }
            Err(e) => {
                let (valid, bad) = rest.split_at(e.valid_up_to());
                // split_at landed on a valid char boundary
                push_printable(&mut out, unsafe { std::str::from_utf8_unchecked(valid) });
                let bad_len = e.error_len().unwrap_or(bad.len());
                for _ in 0..bad_len {
                    out.push('?');
                }
                rest = &bad[bad_len..];
            }
        }
    }

    out
}

fn push_printable(out: &mut String, s: &str) {
    for c in s.chars() {
        if c.is_control() {
            // one '?' per byte, matching the byte-wise contract
            for _ in 0..c.len_utf8() {
                out.push('?');
            }
        } else {
            out.push(c);
        }
    }
}
