// attribute_aggregator.rs — Per-level field-width maxima and block totals
//
// Single pass over the visible entries of one level, no ordering
// dependency. Produces the right-justification widths the renderer uses
// and the block sum for the "total N" line.

use crate::command_line::CommandLine;
use crate::entry::{Entry, STAT_BLOCK_SIZE};
use crate::owner::OwnerResolver;

/// Aggregated display widths (in characters) plus the raw block total.
/// Widths stay zero for fields the active options never print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Maxima {
    pub inode_width: usize,
    pub block_width: usize,
    pub nlink_width: usize,
    pub owner_width: usize,
    pub group_width: usize,
    pub size_width:  usize,
    pub major_width: usize,
    pub minor_width: usize,
    /// Sum of raw st_blocks over visible entries, before unit conversion
    pub block_total: u64,
}

/// Number of decimal digits needed to print n.
pub fn uint_length(n: u64) -> usize {
    if n == 0 {
        return 1;
    }
    let mut n = n;
    let mut len = 0;
    while n > 0 {
        n /= 10;
        len += 1;
    }
    len
}

/// Convert raw 512-byte stat blocks into the configured block size,
/// rounding up.
pub fn convert_blocks(blocks: u64, block_size: u64) -> u64 {
    (blocks * STAT_BLOCK_SIZE).div_ceil(block_size)
}

/// Scan the visible entries of one level and compute all field maxima.
pub fn aggregate<'a, I>(visible: I, cmd: &CommandLine, resolver: &mut OwnerResolver) -> Maxima
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut max_inode: u64 = 0;
    let mut max_blocks: u64 = 0;
    let mut max_nlink: u64 = 0;
    let mut max_owner: usize = 0;
    let mut max_group: usize = 0;
    let mut max_size: u64 = 0;
    let mut max_major: u64 = 0;
    let mut max_minor: u64 = 0;
    let mut has_device = false;
    let mut block_total: u64 = 0;

    for e in visible {
        let s = &e.stat;

        if cmd.print_inode {
            max_inode = max_inode.max(s.ino);
        }

        block_total += s.blocks;
        if cmd.print_blocks {
            max_blocks = max_blocks.max(s.blocks);
        }

        if cmd.long_format {
            max_nlink = max_nlink.max(s.nlink);

            if cmd.numeric_ids {
                max_owner = max_owner.max(uint_length(s.uid as u64));
                max_group = max_group.max(uint_length(s.gid as u64));
            } else {
                let owner_len = match resolver.resolve_owner(s.uid) {
                    Some(name) => name.chars().count(),
                    None => uint_length(s.uid as u64),
                };
                max_owner = max_owner.max(owner_len);

                let group_len = match resolver.resolve_group(s.gid) {
                    Some(name) => name.chars().count(),
                    None => uint_length(s.gid as u64),
                };
                max_group = max_group.max(group_len);
            }

            if s.is_device() {
                has_device = true;
                max_major = max_major.max(s.major());
                max_minor = max_minor.max(s.minor());
            } else {
                max_size = max_size.max(s.size);
            }
        }
    }

    let mut m = Maxima { block_total, ..Default::default() };

    if cmd.print_inode {
        m.inode_width = uint_length(max_inode);
    }
    if cmd.print_blocks {
        m.block_width = uint_length(convert_blocks(max_blocks, cmd.block_size));
    }
    if cmd.long_format {
        m.nlink_width = uint_length(max_nlink);
        m.owner_width = max_owner;
        m.group_width = max_group;
        m.size_width = uint_length(max_size);

        // Device entries share the size column as "major, minor" and must
        // align with regular-file sizes, so the wider of the two layouts
        // dictates the column; the narrower side absorbs the difference.
        if has_device {
            m.major_width = uint_length(max_major);
            m.minor_width = uint_length(max_minor);
            if m.size_width < m.major_width + m.minor_width + 2 {
                m.size_width = m.major_width + m.minor_width + 2;
            } else {
                m.major_width = m.size_width - m.minor_width - 2;
            }
        }
    }

    m
}
