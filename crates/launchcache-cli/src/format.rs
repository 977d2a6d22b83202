//! String formatting helpers for terminal output.

use launchcache_core::models::Pad;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format pad coordinates as `62.929N 40.457E`
pub fn format_coordinates(pad: &Pad) -> String {
    let ns = if pad.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if pad.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.3}{} {:.3}{}",
        pad.latitude.abs(),
        ns,
        pad.longitude.abs(),
        ew
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 2), "He");
    }

    #[test]
    fn test_format_coordinates() {
        let pad = Pad {
            latitude: 62.92883,
            longitude: 40.457098,
        };
        assert_eq!(format_coordinates(&pad), "62.929N 40.457E");

        let pad = Pad {
            latitude: -5.2,
            longitude: -52.77,
        };
        assert_eq!(format_coordinates(&pad), "5.200S 52.770W");
    }
}
