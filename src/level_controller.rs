// level_controller.rs — One directory level, start to finish
//
// Diagnose failed siblings, apply the hidden-name policy, aggregate
// widths, fit columns, render. All per-level state (maxima, layout plan)
// is local to one call and dropped before the driver advances.

use std::io::Write;
use std::path::Path;

use crate::attribute_aggregator::{Maxima, aggregate, convert_blocks};
use crate::column_layout::{LayoutPlan, layout};
use crate::command_line::CommandLine;
use crate::entry::{Entry, EntryStatus};
use crate::entry_renderer::{CellPosition, EntryRenderer};
use crate::error::AppError;
use crate::humanize::MAX_HUMAN_WIDTH;
use crate::level::LevelBatch;
use crate::owner::OwnerResolver;
use crate::traversal::LevelVisitor;

pub struct LevelController<'a, W: Write> {
    cmd:       &'a CommandLine,
    out:       &'a mut W,
    resolver:  OwnerResolver,
    now:       i64,
    /// Whether anything has been written yet, for blank-line separation
    wrote_any: bool,
    had_error: bool,
}

impl<'a, W: Write> LevelController<'a, W> {
    pub fn new(cmd: &'a CommandLine, now: i64, out: &'a mut W) -> Self {
        LevelController {
            cmd,
            out,
            resolver: OwnerResolver::new(),
            now,
            wrote_any: false,
            had_error: false,
        }
    }

    /// True when any non-fatal diagnostic was emitted during the run.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Report failed siblings inline, like ls does before listing a level.
    fn report_failed_entries(&mut self, batch: &LevelBatch) {
        for e in &batch.entries {
            let errno = match e.status {
                EntryStatus::Error(code) | EntryStatus::Unreadable(code) => code,
                _ => continue,
            };
            let err = std::io::Error::from_raw_os_error(errno);
            eprintln!("rls: {}: {}", e.name.to_string_lossy(), err);
            self.had_error = true;
        }
    }

    /// Hidden-dot policy plus the root-level special cases. Failed entries
    /// are diagnosed, never rendered; root-level directory operands get
    /// their own level unless -d keeps them inline.
    fn mark_visibility(&self, batch: &mut LevelBatch) {
        let root = batch.is_root_level();
        for e in &mut batch.entries {
            e.visible = match e.status {
                EntryStatus::Error(_) | EntryStatus::Unreadable(_) | EntryStatus::Cycle => false,
                EntryStatus::Directory if root && !self.cmd.print_dir => false,
                _ => self.cmd.show_hidden || !e.is_hidden(),
            };
        }
    }

    /// Fixed per-column cost: one gap column, plus the inode and block
    /// fields with their trailing spaces when active.
    fn column_overhead(&self, maxima: &Maxima) -> usize {
        let mut overhead = 1;
        if self.cmd.print_inode {
            overhead += maxima.inode_width + 1;
        }
        if self.cmd.print_blocks {
            let field = if self.cmd.humanize { MAX_HUMAN_WIDTH } else { maxima.block_width };
            overhead += field + 1;
        }
        overhead
    }

    fn render_per_line(&mut self, visible: &[&Entry], maxima: &Maxima) -> Result<(), AppError> {
        let renderer = EntryRenderer::new(self.cmd, self.now);
        for e in visible {
            let warned = renderer.render(e, maxima, &mut self.resolver, CellPosition::Line, self.out)?;
            self.had_error |= warned;
        }
        Ok(())
    }

    fn render_grid(
        &mut self,
        visible: &[&Entry],
        maxima: &Maxima,
        plan: &LayoutPlan,
    ) -> Result<(), AppError> {
        let renderer = EntryRenderer::new(self.cmd, self.now);
        for row in 0..plan.rows {
            for col in 0..plan.columns {
                let Some(i) = plan.index_at(row, col) else { break };
                let row_continues =
                    col + 1 < plan.columns && plan.index_at(row, col + 1).is_some();
                let position = if row_continues {
                    CellPosition::Grid { pad_to: plan.width_of(col) }
                } else {
                    CellPosition::GridRowEnd
                };
                let warned =
                    renderer.render(visible[i], maxima, &mut self.resolver, position, self.out)?;
                self.had_error |= warned;
            }
        }
        Ok(())
    }
}

impl<'a, W: Write> LevelVisitor for LevelController<'a, W> {
    fn level(&mut self, batch: &mut LevelBatch) -> Result<(), AppError> {
        self.report_failed_entries(batch);
        self.mark_visibility(batch);

        if batch.visible_count() == 0 {
            return Ok(());
        }

        let maxima = {
            // split borrow: aggregation walks entries while caching names
            let resolver = &mut self.resolver;
            aggregate(batch.visible(), self.cmd, resolver)
        };

        if (self.cmd.print_blocks || self.cmd.long_format) && !batch.is_root_level() {
            writeln!(self.out, "total {}", convert_blocks(maxima.block_total, self.cmd.block_size))?;
        }

        let visible: Vec<&Entry> = batch.visible().collect();

        if self.cmd.grid_mode() {
            let widths: Vec<usize> = visible.iter().map(|e| e.name_width).collect();
            let overhead = self.column_overhead(&maxima);
            let plan = layout(&widths, overhead, self.cmd.terminal_width, self.cmd.horizontal);
            if plan.is_grid() {
                self.render_grid(&visible, &maxima, &plan)?;
            } else {
                self.render_per_line(&visible, &maxima)?;
            }
        } else {
            self.render_per_line(&visible, &maxima)?;
        }

        self.wrote_any = true;
        Ok(())
    }

    fn directory_header(&mut self, path: &Path) -> Result<(), AppError> {
        if self.wrote_any {
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}:", path.display())?;
        self.wrote_any = true;
        Ok(())
    }

    fn report_cycle(&mut self, path: &Path) {
        eprintln!("rls: {} causes a cycle", path.display());
        self.had_error = true;
    }

    fn report_error(&mut self, path: &Path, err: &std::io::Error) {
        eprintln!("rls: {}: {}", path.display(), err);
        self.had_error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::StatSnapshot;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn entry(name: &str, depth: usize, status: EntryStatus) -> Entry {
        Entry::new(
            OsString::from(name),
            PathBuf::from(name),
            depth,
            status,
            StatSnapshot { blocks: 8, ..Default::default() },
        )
    }

    fn run_level(cmd: &CommandLine, batch: &mut LevelBatch) -> String {
        let mut buf = Vec::new();
        let mut ctl = LevelController::new(cmd, 1_700_000_000, &mut buf);
        ctl.level(batch).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn hidden_entries_are_filtered() {
        let mut cmd = CommandLine::new(true, false);
        cmd.by_column = false;
        let mut batch = LevelBatch::new(
            PathBuf::from("."),
            1,
            vec![entry(".hidden", 1, EntryStatus::Normal), entry("shown", 1, EntryStatus::Normal)],
        );
        assert_eq!(run_level(&cmd, &mut batch), "shown\n");
    }

    #[test]
    fn show_hidden_keeps_dot_names() {
        let mut cmd = CommandLine::new(true, false);
        cmd.by_column = false;
        cmd.show_hidden = true;
        let mut batch = LevelBatch::new(
            PathBuf::from("."),
            1,
            vec![entry(".hidden", 1, EntryStatus::Normal)],
        );
        assert_eq!(run_level(&cmd, &mut batch), ".hidden\n");
    }

    #[test]
    fn root_directories_suppressed_without_dash_d() {
        let mut cmd = CommandLine::new(true, false);
        cmd.by_column = false;
        let mut batch = LevelBatch::new(
            PathBuf::from("."),
            0,
            vec![entry("adir", 0, EntryStatus::Directory), entry("afile", 0, EntryStatus::Normal)],
        );
        assert_eq!(run_level(&cmd, &mut batch), "afile\n");
    }

    #[test]
    fn dash_d_lists_root_directories_inline() {
        let mut cmd = CommandLine::new(true, false);
        cmd.by_column = false;
        cmd.print_dir = true;
        let mut batch = LevelBatch::new(
            PathBuf::from("."),
            0,
            vec![entry("adir", 0, EntryStatus::Directory)],
        );
        assert_eq!(run_level(&cmd, &mut batch), "adir\n");
    }

    #[test]
    fn total_line_for_non_root_levels_in_long_mode() {
        let mut cmd = CommandLine::new(true, false);
        cmd.long_format = true;
        cmd.numeric_ids = true;
        let mut batch = LevelBatch::new(
            PathBuf::from("."),
            1,
            vec![entry("f", 1, EntryStatus::Normal)],
        );
        let out = run_level(&cmd, &mut batch);
        // 8 raw blocks * 512 / 512
        assert!(out.starts_with("total 8\n"), "got {:?}", out);
    }

    #[test]
    fn no_total_line_at_root_level() {
        let mut cmd = CommandLine::new(true, false);
        cmd.long_format = true;
        cmd.numeric_ids = true;
        let mut batch = LevelBatch::new(
            PathBuf::from("."),
            0,
            vec![entry("f", 0, EntryStatus::Normal)],
        );
        assert!(!run_level(&cmd, &mut batch).starts_with("total"));
    }

    #[test]
    fn failed_entries_mark_the_run_but_render_nothing() {
        let mut cmd = CommandLine::new(true, false);
        cmd.by_column = false;
        let mut buf = Vec::new();
        let mut ctl = LevelController::new(&cmd, 1_700_000_000, &mut buf);
        let mut batch = LevelBatch::new(
            PathBuf::from("."),
            1,
            vec![entry("gone", 1, EntryStatus::Unreadable(2)), entry("ok", 1, EntryStatus::Normal)],
        );
        ctl.level(&mut batch).unwrap();
        assert!(ctl.had_error());
        assert_eq!(String::from_utf8(buf).unwrap(), "ok\n");
    }

    #[test]
    fn empty_level_prints_nothing() {
        let mut cmd = CommandLine::new(true, false);
        cmd.long_format = true;
        let mut batch = LevelBatch::new(PathBuf::from("."), 1, vec![]);
        assert_eq!(run_level(&cmd, &mut batch), "");
    }

    #[test]
    fn grid_rendering_walks_rows() {
        let mut cmd = CommandLine::new(true, false);
        cmd.terminal_width = 9;
        // names of width 1: fits "a  c  e\nb  d\n" layout (3 cols x 2 rows)
        let names = ["a", "b", "c", "d", "e"];
        let entries: Vec<Entry> =
            names.iter().map(|n| entry(n, 1, EntryStatus::Normal)).collect();
        let mut batch = LevelBatch::new(PathBuf::from("."), 1, entries);
        let out = run_level(&cmd, &mut batch);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('a'));
        assert!(lines[0].contains('c'));
        assert!(lines[0].trim_end().ends_with('e'));
        assert!(lines[1].starts_with('b'));
        assert!(lines[1].trim_end().ends_with('d'));
    }

    #[test]
    fn reported_directory_error_sets_the_exit_flag() {
        let cmd = CommandLine::new(true, false);
        let mut buf = Vec::new();
        let mut ctl = LevelController::new(&cmd, 0, &mut buf);
        let err = std::io::Error::from_raw_os_error(13);
        ctl.report_error(Path::new("locked"), &err);
        assert!(ctl.had_error());
        assert!(buf.is_empty());
    }

    #[test]
    fn header_separation_blank_line() {
        let cmd = CommandLine::new(true, false);
        let mut buf = Vec::new();
        let mut ctl = LevelController::new(&cmd, 0, &mut buf);
        ctl.directory_header(Path::new("first")).unwrap();
        ctl.directory_header(Path::new("second")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "first:\n\nsecond:\n");
    }
}
