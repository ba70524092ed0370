// command_line.rs — CLI argument parsing (custom, no clap)
//
// getopt-style bundled single-character switches. Flag interactions are
// order-sensitive (-l1 is single-column, -1l is long), so switches are
// applied left to right and the last one wins — a declarative parser
// cannot express that.

use std::ffi::OsString;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use crate::error::AppError;

pub const USAGE: &str = "usage: rls [-AacCdFfhiklnqRrSstuwx1] [file ...]";

pub const DEFAULT_BLOCK_SIZE: u64 = 512;
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Unsorted, // -f — traversal order
    Name,     // default — byte-wise by name
    Time,     // -t — newest first
    Size,     // -S — largest first
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Modified, // default — st_mtime
    Access,   // -u — st_atime
    Changed,  // -c — st_ctime
}

// ── CommandLine struct ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CommandLine {
    pub sort_mode:       SortMode,
    pub time_field:      TimeField,
    pub reverse:         bool,     // -r
    pub show_hidden:     bool,     // -A, -a, or superuser default
    pub include_dots:    bool,     // -a — synthesize "." and ".." entries
    pub recurse:         bool,     // -R
    pub print_dir:       bool,     // -d — list operands themselves
    pub print_inode:     bool,     // -i
    pub print_blocks:    bool,     // -s
    pub print_indicator: bool,     // -F
    pub numeric_ids:     bool,     // -n
    pub long_format:     bool,     // -l
    pub humanize:        bool,     // -h
    pub raw_print:       bool,     // -w / -q; default off on a tty
    pub by_column:       bool,     // -C / -1; default on for a tty
    pub horizontal:      bool,     // -x — row-major grid fill
    /// -k pins the block size at 1024; BLOCKSIZE must not override it
    pub block_size_pinned: bool,
    pub block_size:      u64,
    pub terminal_width:  usize,
    pub paths:           Vec<PathBuf>,
}

impl CommandLine {
    /// Baseline before any switch is applied. Raw output and single-column
    /// are the defaults when stdout is not a terminal; the superuser sees
    /// hidden entries without asking.
    pub fn new(stdout_is_tty: bool, is_superuser: bool) -> Self {
        CommandLine {
            sort_mode:         SortMode::Name,
            time_field:        TimeField::Modified,
            reverse:           false,
            show_hidden:       is_superuser,
            include_dots:      false,
            recurse:           false,
            print_dir:         false,
            print_inode:       false,
            print_blocks:      false,
            print_indicator:   false,
            numeric_ids:       false,
            long_format:       false,
            humanize:          false,
            raw_print:         !stdout_is_tty,
            by_column:         stdout_is_tty,
            horizontal:        false,
            block_size_pinned: false,
            block_size:        DEFAULT_BLOCK_SIZE,
            terminal_width:    DEFAULT_TERMINAL_WIDTH,
            paths:             Vec::new(),
        }
    }

    /// Parse command-line arguments into a CommandLine.
    /// Args should NOT include argv[0] (program name).
    pub fn parse_from<I, S>(args: I, stdout_is_tty: bool, is_superuser: bool) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut cmd = CommandLine::new(stdout_is_tty, is_superuser);
        let mut operands_only = false;

        for arg in args {
            let arg: OsString = arg.into();
            let bytes = arg.as_bytes();

            if operands_only || bytes.first() != Some(&b'-') || bytes.len() == 1 {
                // "-" alone is an operand, like any path
                cmd.paths.push(PathBuf::from(arg));
                continue;
            }
            if bytes == b"--" {
                operands_only = true;
                continue;
            }

            for &b in &bytes[1..] {
                cmd.apply_switch(b)?;
            }
        }

        if cmd.paths.is_empty() {
            cmd.paths.push(PathBuf::from("."));
        }

        Ok(cmd)
    }

    fn apply_switch(&mut self, switch: u8) -> Result<(), AppError> {
        match switch {
            b'a' => {
                self.include_dots = true;
                self.show_hidden = true;
            }
            b'A' => self.show_hidden = true,
            b't' => self.sort_mode = SortMode::Time,
            b'S' => self.sort_mode = SortMode::Size,
            b'f' => self.sort_mode = SortMode::Unsorted,
            b'u' => self.time_field = TimeField::Access,
            b'c' => self.time_field = TimeField::Changed,
            b'r' => self.reverse = true,
            b'R' => self.recurse = true,
            b'd' => {
                self.print_dir = true;
                self.recurse = false;
            }
            b'F' => self.print_indicator = true,
            b'i' => self.print_inode = true,
            b's' => self.print_blocks = true,
            b'h' => self.humanize = true,
            b'k' => {
                self.humanize = false;
                self.block_size = 1024;
                self.block_size_pinned = true;
            }
            b'n' => {
                self.numeric_ids = true;
                self.long_format = true;
            }
            b'l' => self.long_format = true,
            b'1' => {
                self.by_column = false;
                self.horizontal = false;
                self.long_format = false;
            }
            b'C' => {
                self.by_column = true;
                self.horizontal = false;
                self.long_format = false;
            }
            b'x' => {
                self.by_column = true;
                self.horizontal = true;
                self.long_format = false;
            }
            b'q' => self.raw_print = false,
            b'w' => self.raw_print = true,
            other => {
                return Err(AppError::InvalidArg(format!(
                    "illegal option -- {}",
                    other as char
                )));
            }
        }
        Ok(())
    }

    /// Grid rendering applies only when columns are on and long format is off.
    pub fn grid_mode(&self) -> bool {
        self.by_column && !self.long_format
    }

    /// Root operands are stat'ed through symlinks unless a mode that cares
    /// about the link itself is active.
    pub fn follow_root_links(&self) -> bool {
        !self.long_format && !self.print_indicator && !self.print_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::parse_from(args.iter().copied(), true, false).unwrap()
    }

    #[test]
    fn defaults_on_tty() {
        let cmd = parse(&[]);
        assert!(cmd.by_column);
        assert!(!cmd.raw_print);
        assert!(!cmd.long_format);
        assert_eq!(cmd.sort_mode, SortMode::Name);
        assert_eq!(cmd.paths, vec![PathBuf::from(".")]);
    }

    #[test]
    fn defaults_on_pipe() {
        let cmd = CommandLine::parse_from(Vec::<&str>::new(), false, false).unwrap();
        assert!(!cmd.by_column);
        assert!(cmd.raw_print);
    }

    #[test]
    fn superuser_sees_hidden() {
        let cmd = CommandLine::parse_from(Vec::<&str>::new(), true, true).unwrap();
        assert!(cmd.show_hidden);
    }

    #[test]
    fn bundled_switches() {
        let cmd = parse(&["-lar"]);
        assert!(cmd.long_format);
        assert!(cmd.show_hidden);
        assert!(cmd.include_dots);
        assert!(cmd.reverse);
    }

    #[test]
    fn last_format_switch_wins() {
        let cmd = parse(&["-l1"]);
        assert!(!cmd.long_format);
        assert!(!cmd.by_column);

        let cmd = parse(&["-1l"]);
        assert!(cmd.long_format);

        let cmd = parse(&["-lC"]);
        assert!(!cmd.long_format);
        assert!(cmd.by_column);
    }

    #[test]
    fn raw_switches_last_wins() {
        let cmd = parse(&["-wq"]);
        assert!(!cmd.raw_print);
        let cmd = parse(&["-qw"]);
        assert!(cmd.raw_print);
    }

    #[test]
    fn numeric_implies_long() {
        let cmd = parse(&["-n"]);
        assert!(cmd.long_format);
        assert!(cmd.numeric_ids);
    }

    #[test]
    fn kilobytes_pin_block_size_and_cancel_humanize() {
        let cmd = parse(&["-hk"]);
        assert!(!cmd.humanize);
        assert_eq!(cmd.block_size, 1024);
        assert!(cmd.block_size_pinned);
    }

    #[test]
    fn dir_cancels_recursion() {
        let cmd = parse(&["-Rd"]);
        assert!(cmd.print_dir);
        assert!(!cmd.recurse);
    }

    #[test]
    fn horizontal_layout() {
        let cmd = parse(&["-x"]);
        assert!(cmd.by_column);
        assert!(cmd.horizontal);
    }

    #[test]
    fn operands_collected() {
        let cmd = parse(&["-l", "a", "b"]);
        assert_eq!(cmd.paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn double_dash_ends_switches() {
        let cmd = parse(&["--", "-l"]);
        assert!(!cmd.long_format);
        assert_eq!(cmd.paths, vec![PathBuf::from("-l")]);
    }

    #[test]
    fn lone_dash_is_an_operand() {
        let cmd = parse(&["-"]);
        assert_eq!(cmd.paths, vec![PathBuf::from("-")]);
    }

    #[test]
    fn illegal_option_rejected() {
        let err = CommandLine::parse_from(["-z"], true, false).unwrap_err();
        assert!(matches!(err, AppError::InvalidArg(_)));
    }

    #[test]
    fn grid_mode_requires_columns_without_long() {
        assert!(parse(&[]).grid_mode());
        assert!(!parse(&["-l"]).grid_mode());
        assert!(!parse(&["-1"]).grid_mode());
    }

    #[test]
    fn follow_root_links_disabled_by_long_indicator_dir() {
        assert!(parse(&[]).follow_root_links());
        assert!(!parse(&["-l"]).follow_root_links());
        assert!(!parse(&["-F"]).follow_root_links());
        assert!(!parse(&["-d"]).follow_root_links());
    }
}
