// mode_string.rs — Permission/type string for long-format listings
//
// Produces the classic 11-character strmode(3) form: one type character,
// nine permission characters, and a trailing space where ACL markers
// would otherwise appear.

use crate::entry::{
    S_IFBLK, S_IFCHR, S_IFDIR, S_IFIFO, S_IFLNK, S_IFMT, S_IFREG, S_IFSOCK,
    S_ISGID, S_ISUID, S_ISVTX,
};

/// Render st_mode as an 11-character mode string, e.g. "drwxr-xr-x ".
pub fn mode_string(mode: u32) -> String {
    let mut s = String::with_capacity(11);

    s.push(match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        S_IFREG => '-',
        S_IFLNK => 'l',
        S_IFSOCK => 's',
        S_IFIFO => 'p',
        _ => '?',
    });

    // owner
    s.push(if mode & 0o400 != 0 { 'r' } else { '-' });
    s.push(if mode & 0o200 != 0 { 'w' } else { '-' });
    s.push(match (mode & S_ISUID != 0, mode & 0o100 != 0) {
        (false, false) => '-',
        (false, true) => 'x',
        (true, false) => 'S',
        (true, true) => 's',
    });

    // group
    s.push(if mode & 0o040 != 0 { 'r' } else { '-' });
    s.push(if mode & 0o020 != 0 { 'w' } else { '-' });
    s.push(match (mode & S_ISGID != 0, mode & 0o010 != 0) {
        (false, false) => '-',
        (false, true) => 'x',
        (true, false) => 'S',
        (true, true) => 's',
    });

    // other
    s.push(if mode & 0o004 != 0 { 'r' } else { '-' });
    s.push(if mode & 0o002 != 0 { 'w' } else { '-' });
    s.push(match (mode & S_ISVTX != 0, mode & 0o001 != 0) {
        (false, false) => '-',
        (false, true) => 'x',
        (true, false) => 'T',
        (true, true) => 't',
    });

    s.push(' ');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_file() {
        assert_eq!(mode_string(S_IFREG | 0o644), "-rw-r--r-- ");
    }

    #[test]
    fn directory() {
        assert_eq!(mode_string(S_IFDIR | 0o755), "drwxr-xr-x ");
    }

    #[test]
    fn symlink() {
        assert_eq!(mode_string(S_IFLNK | 0o777), "lrwxrwxrwx ");
    }

    #[test]
    fn setuid_executable() {
        assert_eq!(mode_string(S_IFREG | S_ISUID | 0o755), "-rwsr-xr-x ");
    }

    #[test]
    fn setuid_without_execute() {
        assert_eq!(mode_string(S_IFREG | S_ISUID | 0o644), "-rwSr--r-- ");
    }

    #[test]
    fn sticky_directory() {
        assert_eq!(mode_string(S_IFDIR | S_ISVTX | 0o777), "drwxrwxrwt ");
    }

    #[test]
    fn character_device() {
        assert_eq!(mode_string(S_IFCHR | 0o620), "crw--w---- ");
    }

    #[test]
    fn fifo_and_socket() {
        assert!(mode_string(S_IFIFO | 0o644).starts_with('p'));
        assert!(mode_string(S_IFSOCK | 0o755).starts_with('s'));
    }

    #[test]
    fn always_eleven_chars() {
        for t in [S_IFREG, S_IFDIR, S_IFCHR, S_IFBLK, S_IFLNK, S_IFSOCK, S_IFIFO] {
            assert_eq!(mode_string(t | 0o777).len(), 11);
        }
    }
}
