// level.rs — The sibling batch for one directory depth
//
// A LevelBatch is processed exactly once to completion (diagnose → filter →
// aggregate → layout → render) before the traversal driver advances.

use std::path::PathBuf;

use crate::entry::Entry;

#[derive(Debug)]
pub struct LevelBatch {
    pub dir_path: PathBuf,
    pub depth:    usize,
    pub entries:  Vec<Entry>,
}

impl LevelBatch {
    pub fn new(dir_path: PathBuf, depth: usize, entries: Vec<Entry>) -> Self {
        LevelBatch { dir_path, depth, entries }
    }

    /// The batch of command-line operands, as opposed to the children of
    /// some listed directory.
    pub fn is_root_level(&self) -> bool {
        self.depth == 0
    }

    pub fn visible(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.visible).count()
    }
}
