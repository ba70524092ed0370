// entry_renderer.rs — One entry's visual representation
//
// Emits a single line (long/single-column modes) or a single padded grid
// cell. All field widths come from the level's Maxima; the renderer never
// looks at other entries.

use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

use crate::attribute_aggregator::{Maxima, convert_blocks};
use crate::command_line::{CommandLine, TimeField};
use crate::entry::{Entry, S_IFDIR, S_IFIFO, S_IFLNK, S_IFSOCK, escape_name};
use crate::humanize::{MAX_HUMAN_WIDTH, format_human};
use crate::mode_string::mode_string;
use crate::owner::OwnerResolver;
use crate::timestamp::format_timestamp;

/// Where the entry lands in the output stream.
#[derive(Debug, Clone, Copy)]
pub enum CellPosition {
    /// One entry per line: unconditional newline
    Line,
    /// Grid cell padded to the assigned column width
    Grid { pad_to: usize },
    /// Last cell of a grid row: newline instead of padding
    GridRowEnd,
}

pub struct EntryRenderer<'a> {
    cmd: &'a CommandLine,
    /// Reference time for the six-month timestamp window
    now: i64,
}

impl<'a> EntryRenderer<'a> {
    pub fn new(cmd: &'a CommandLine, now: i64) -> Self {
        EntryRenderer { cmd, now }
    }

    /// Write one entry. Returns true when a non-fatal formatting failure
    /// was reported (the run still exits nonzero).
    pub fn render<W: Write>(
        &self,
        entry: &Entry,
        maxima: &Maxima,
        resolver: &mut OwnerResolver,
        position: CellPosition,
        out: &mut W,
    ) -> io::Result<bool> {
        let mut warned = false;

        if self.cmd.print_inode {
            write!(out, "{:>width$} ", entry.stat.ino, width = maxima.inode_width)?;
        }

        if self.cmd.print_blocks {
            if self.cmd.humanize {
                let human = format_human(entry.stat.blocks * crate::entry::STAT_BLOCK_SIZE);
                write!(out, "{:>width$} ", human, width = MAX_HUMAN_WIDTH)?;
            } else {
                let blocks = convert_blocks(entry.stat.blocks, self.cmd.block_size);
                write!(out, "{:>width$} ", blocks, width = maxima.block_width)?;
            }
        }

        if self.cmd.long_format {
            warned |= self.render_long_fields(entry, maxima, resolver, out)?;
        }

        self.render_name(entry, out)?;

        if self.cmd.long_format && entry.stat.is_symlink() {
            warned |= self.render_link_target(entry, out)?;
        }

        match position {
            CellPosition::Line | CellPosition::GridRowEnd => writeln!(out)?,
            CellPosition::Grid { pad_to } => {
                // the assigned width plus one gap column; an indicator
                // character, when present, consumes the gap
                let pad = pad_to - entry.name_width + 1;
                write!(out, "{:pad$}", "", pad = pad)?;
            }
        }

        Ok(warned)
    }

    fn render_long_fields<W: Write>(
        &self,
        entry: &Entry,
        maxima: &Maxima,
        resolver: &mut OwnerResolver,
        out: &mut W,
    ) -> io::Result<bool> {
        let s = &entry.stat;
        let mut warned = false;

        write!(out, "{} {:>width$} ", mode_string(s.mode), s.nlink, width = maxima.nlink_width)?;

        if self.cmd.numeric_ids {
            write!(out, "{:<width$} ", s.uid, width = maxima.owner_width)?;
            write!(out, "{:<width$} ", s.gid, width = maxima.group_width)?;
        } else {
            match resolver.resolve_owner(s.uid) {
                Some(name) => write!(out, "{:<width$} ", name, width = maxima.owner_width)?,
                None => write!(out, "{:<width$} ", s.uid, width = maxima.owner_width)?,
            }
            match resolver.resolve_group(s.gid) {
                Some(name) => write!(out, "{:<width$} ", name, width = maxima.group_width)?,
                None => write!(out, "{:<width$} ", s.gid, width = maxima.group_width)?,
            }
        }

        if s.is_device() {
            write!(
                out,
                "{:>majw$}, {:>minw$} ",
                s.major(),
                s.minor(),
                majw = maxima.major_width,
                minw = maxima.minor_width,
            )?;
        } else if self.cmd.humanize {
            write!(out, "{:>width$} ", format_human(s.size), width = MAX_HUMAN_WIDTH)?;
        } else {
            write!(out, "{:>width$} ", s.size, width = maxima.size_width)?;
        }

        let stamp = match self.cmd.time_field {
            TimeField::Modified => s.mtime,
            TimeField::Access => s.atime,
            TimeField::Changed => s.ctime,
        };
        match format_timestamp(stamp, self.now) {
            Some(text) => write!(out, "{} ", text)?,
            None => {
                eprintln!("rls: {}: cannot format time", entry.name.to_string_lossy());
                warned = true;
            }
        }

        Ok(warned)
    }

    fn render_name<W: Write>(&self, entry: &Entry, out: &mut W) -> io::Result<()> {
        if self.cmd.raw_print {
            out.write_all(entry.name_bytes())?;
        } else {
            out.write_all(escape_name(entry.name_bytes()).as_bytes())?;
        }

        if self.cmd.print_indicator {
            match entry.stat.file_type() {
                S_IFDIR => write!(out, "/")?,
                S_IFLNK => write!(out, "@")?,
                S_IFIFO => write!(out, "|")?,
                S_IFSOCK => write!(out, "=")?,
                _ => {
                    if entry.stat.is_executable() {
                        write!(out, "*")?;
                    } else if self.cmd.grid_mode() {
                        // keep grid columns aligned with their marked peers
                        write!(out, " ")?;
                    }
                }
            }
        }

        Ok(())
    }

    fn render_link_target<W: Write>(&self, entry: &Entry, out: &mut W) -> io::Result<bool> {
        match std::fs::read_link(&entry.path) {
            Ok(target) => {
                write!(out, " -> ")?;
                if self.cmd.raw_print {
                    out.write_all(target.as_os_str().as_bytes())?;
                } else {
                    out.write_all(escape_name(target.as_os_str().as_bytes()).as_bytes())?;
                }
                Ok(false)
            }
            Err(err) => {
                eprintln!("rls: {}: {}", entry.name.to_string_lossy(), err);
                Ok(true)
            }
        }
    }
}
