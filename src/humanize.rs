// humanize.rs — Human-readable byte counts for -h output
//
// Auto-scaled abbreviation in at most MAX_HUMAN_WIDTH visible characters,
// matching the humanize_number(3) fields ls historically prints: "999",
// "1.0K", "150M", "2.4G". Plain byte counts carry no unit letter.

pub const MAX_HUMAN_WIDTH: usize = 4;

const UNITS: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Format a byte count into at most four visible characters.
pub fn format_human(bytes: u64) -> String {
    if bytes < 1000 {
        return bytes.to_string();
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    // 999.5 would round up to a four-digit number, so scale one more step
    while value >= 999.5 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    if value < 9.95 {
        format!("{:.1}{}", value, UNITS[unit])
    } else {
        format!("{:.0}{}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_counts_print_bare() {
        assert_eq!(format_human(0), "0");
        assert_eq!(format_human(7), "7");
        assert_eq!(format_human(999), "999");
    }

    #[test]
    fn kilobyte_scaling_with_decimal() {
        assert_eq!(format_human(1024), "1.0K");
        assert_eq!(format_human(1229), "1.2K");
        assert_eq!(format_human(10240), "10K");
    }

    #[test]
    fn megabyte_scaling() {
        assert_eq!(format_human(3_565_158), "3.4M");
        assert_eq!(format_human(157_286_400), "150M");
    }

    #[test]
    fn gigabyte_scaling() {
        assert_eq!(format_human(2_576_980_378), "2.4G");
    }

    #[test]
    fn never_wider_than_four_columns() {
        let samples = [
            0, 1, 999, 1000, 1023, 1024, 1025, 10_239, 1_048_575, 1_048_576,
            999_999_999, u64::MAX,
        ];
        for n in samples {
            assert!(
                format_human(n).len() <= MAX_HUMAN_WIDTH,
                "{} -> {}",
                n,
                format_human(n)
            );
        }
    }
}
