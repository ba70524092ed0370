// traversal.rs — Directory tree walking
//
// The driver side of the level pipeline: stats operands, enumerates one
// directory at a time, applies the comparator to siblings with a stable
// sort, and hands each LevelBatch to the visitor exactly once before
// advancing. Symlink loops are caught against the ancestor chain and
// only that branch is abandoned.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::command_line::CommandLine;
use crate::entry::{Entry, EntryStatus, StatSnapshot};
use crate::entry_comparator::{SortConfig, compare};
use crate::error::AppError;
use crate::level::LevelBatch;

/// Consumer of the driver's output: one call per directory level, plus
/// the "path:" headers and the cycle and error reports that belong
/// between levels.
pub trait LevelVisitor {
    fn level(&mut self, batch: &mut LevelBatch) -> Result<(), AppError>;
    fn directory_header(&mut self, path: &Path) -> Result<(), AppError>;
    fn report_cycle(&mut self, path: &Path);
    fn report_error(&mut self, path: &Path, err: &std::io::Error);
}

pub struct Traversal<'a> {
    cmd:  &'a CommandLine,
    sort: SortConfig,
    /// (dev, inode) of every directory on the current descent chain
    ancestors: Vec<(u64, u64)>,
    /// Headers appear with -R or when listing more than one operand
    print_headers: bool,
}

impl<'a> Traversal<'a> {
    pub fn new(cmd: &'a CommandLine) -> Self {
        Traversal {
            cmd,
            sort: SortConfig::from_command_line(cmd),
            ancestors: Vec::new(),
            print_headers: cmd.recurse || cmd.paths.len() > 1,
        }
    }

    /// Walk every operand. Non-fatal problems are diagnosed by the visitor
    /// or reported here; only an enumeration failure mid-stream unwinds.
    pub fn run<V: LevelVisitor>(&mut self, visitor: &mut V) -> Result<(), AppError> {
        let mut roots = Vec::with_capacity(self.cmd.paths.len());
        for path in &self.cmd.paths {
            roots.push(self.stat_operand(path));
        }
        roots.sort_by(|a, b| compare(a, b, &self.sort));

        let mut batch = LevelBatch::new(PathBuf::from("."), 0, roots);
        visitor.level(&mut batch)?;

        if self.cmd.print_dir {
            return Ok(());
        }

        for e in &batch.entries {
            if e.status == EntryStatus::Directory {
                self.descend(&e.path, 1, visitor)?;
            }
        }

        Ok(())
    }

    /// Operand paths follow symlinks unless the active options care about
    /// the link itself.
    fn stat_operand(&self, path: &Path) -> Entry {
        let name = OsString::from(path.as_os_str());
        let md = if self.cmd.follow_root_links() {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };

        match md {
            Ok(md) => {
                let stat = StatSnapshot::from_metadata(&md);
                let status = if stat.is_dir() { EntryStatus::Directory } else { EntryStatus::Normal };
                Entry::new(name, path.to_path_buf(), 0, status, stat)
            }
            Err(err) => {
                let errno = err.raw_os_error().unwrap_or(libc_eio());
                Entry::new(name, path.to_path_buf(), 0, EntryStatus::Error(errno), StatSnapshot::default())
            }
        }
    }

    fn descend<V: LevelVisitor>(
        &mut self,
        dir: &Path,
        depth: usize,
        visitor: &mut V,
    ) -> Result<(), AppError> {
        // resolve the directory's own identity for loop detection
        let dir_id = match fs::metadata(dir) {
            Ok(md) => {
                let stat = StatSnapshot::from_metadata(&md);
                (stat.dev, stat.ino)
            }
            Err(err) => {
                visitor.report_error(dir, &err);
                return Ok(());
            }
        };
        if self.ancestors.contains(&dir_id) {
            visitor.report_cycle(dir);
            return Ok(());
        }

        // the header precedes the diagnosis when a directory turns out
        // to be unreadable, matching the order entries appear in
        let reader = match fs::read_dir(dir) {
            Ok(reader) => reader,
            Err(err) => {
                if self.print_headers {
                    visitor.directory_header(dir)?;
                }
                visitor.report_error(dir, &err);
                return Ok(());
            }
        };

        if self.print_headers {
            visitor.directory_header(dir)?;
        }
        debug!("descending into {} at depth {}", dir.display(), depth);

        let mut entries = Vec::new();
        if self.cmd.include_dots {
            entries.push(self.stat_child(dir, OsString::from("."), depth));
            entries.push(self.stat_child(dir, OsString::from(".."), depth));
        }
        for dirent in reader {
            let dirent = dirent.map_err(|source| AppError::Traversal {
                path: dir.to_path_buf(),
                source,
            })?;
            entries.push(self.stat_child(dir, dirent.file_name(), depth));
        }
        entries.sort_by(|a, b| compare(a, b, &self.sort));

        let mut batch = LevelBatch::new(dir.to_path_buf(), depth, entries);
        visitor.level(&mut batch)?;

        if !self.cmd.recurse {
            return Ok(());
        }

        self.ancestors.push(dir_id);
        for e in &batch.entries {
            if e.status == EntryStatus::Directory
                && e.visible
                && e.name != OsString::from(".")
                && e.name != OsString::from("..")
            {
                self.descend(&e.path, depth + 1, visitor)?;
            }
        }
        self.ancestors.pop();

        Ok(())
    }

    fn stat_child(&self, dir: &Path, name: OsString, depth: usize) -> Entry {
        let path = dir.join(&name);
        match fs::symlink_metadata(&path) {
            Ok(md) => {
                let stat = StatSnapshot::from_metadata(&md);
                let status = if stat.is_dir() { EntryStatus::Directory } else { EntryStatus::Normal };
                Entry::new(name, path, depth, status, stat)
            }
            Err(err) => {
                let errno = err.raw_os_error().unwrap_or(libc_eio());
                Entry::new(name, path, depth, EntryStatus::Unreadable(errno), StatSnapshot::default())
            }
        }
    }
}

/// EIO, for the rare stat failure without an OS error code.
fn libc_eio() -> i32 {
    5
}
