//! Timestamp formatting

use chrono::{Local, SecondsFormat, Utc};

/// Local wall-clock time for human-readable file headers.
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// UTC time as RFC 3339, for machine-readable records.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        let local = local_timestamp();
        assert_eq!(local.len(), "2024-01-01 00:00:00".len());
        let utc = utc_timestamp();
        assert!(utc.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&utc).is_ok());
    }
}
