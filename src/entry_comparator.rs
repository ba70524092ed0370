// entry_comparator.rs — Sibling ordering predicate
//
// Total order over two entries, applied by the traversal driver with a
// stable sort. Placement rules (root-level directories first, failed
// entries last) always hold; the reverse flag only negates the key
// comparison that follows them.

use std::cmp::Ordering;

use crate::command_line::{SortMode, TimeField};
use crate::entry::{Entry, EntryStatus};

/// Global sort configuration, distilled from the command line.
#[derive(Debug, Clone, Copy)]
pub struct SortConfig {
    pub mode:       SortMode,
    pub time_field: TimeField,
    pub reverse:    bool,
}

impl SortConfig {
    pub fn from_command_line(cmd: &crate::command_line::CommandLine) -> Self {
        SortConfig {
            mode:       cmd.sort_mode,
            time_field: cmd.time_field,
            reverse:    cmd.reverse,
        }
    }
}

/// Compare two sibling entries under the active sort configuration.
pub fn compare(a: &Entry, b: &Entry, cfg: &SortConfig) -> Ordering {
    // Rule 1: at the root level, directories list before everything else,
    // regardless of sort mode or reversal.
    if a.is_root_level() {
        let a_dir = a.status == EntryStatus::Directory;
        let b_dir = b.status == EntryStatus::Directory;
        if a_dir != b_dir {
            return if a_dir { Ordering::Less } else { Ordering::Greater };
        }
    }

    // Rule 2: failed entries sort after all normal entries; two failed
    // entries fall back to the name key (or stay put under "unsorted").
    let a_failed = a.status.is_failed();
    let b_failed = b.status.is_failed();
    if a_failed || b_failed {
        if a_failed && b_failed {
            if cfg.mode == SortMode::Unsorted {
                return Ordering::Equal;
            }
            return apply_reverse(compare_name(a, b), cfg);
        }
        return if a_failed { Ordering::Greater } else { Ordering::Less };
    }

    let ord = match cfg.mode {
        // Rule 3: preserve driver-yielded order
        SortMode::Unsorted => return Ordering::Equal,
        SortMode::Name => compare_name(a, b),
        // Newest first, ties by name
        SortMode::Time => {
            let (at, bt) = (time_of(a, cfg.time_field), time_of(b, cfg.time_field));
            bt.cmp(&at).then_with(|| compare_name(a, b))
        }
        // Largest first, ties by name
        SortMode::Size => b.stat.size.cmp(&a.stat.size).then_with(|| compare_name(a, b)),
    };

    apply_reverse(ord, cfg)
}

fn apply_reverse(ord: Ordering, cfg: &SortConfig) -> Ordering {
    if cfg.reverse { ord.reverse() } else { ord }
}

/// Byte-wise name comparison, the primary name key and universal tiebreaker.
fn compare_name(a: &Entry, b: &Entry) -> Ordering {
    a.name_bytes().cmp(b.name_bytes())
}

fn time_of(e: &Entry, field: TimeField) -> i64 {
    match field {
        TimeField::Modified => e.stat.mtime,
        TimeField::Access => e.stat.atime,
        TimeField::Changed => e.stat.ctime,
    }
}
