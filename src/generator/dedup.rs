use std::collections::HashSet;

/// Pool the lines of every payload, trimmed, without blanks or repeats.
///
/// Lines keep the order in which they were first seen.
pub fn dedup_lines<I, S>(payloads: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for payload in payloads {
        for line in payload.as_ref().lines() {
            let line = line.trim();
            if !line.is_empty() && seen.insert(line.to_string()) {
                lines.push(line.to_string());
            }
        }
    }
    lines
}

/// One entry per line, newline-terminated; empty input renders as "".
pub fn render_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_across_sources() {
        let first = "ss://x\nss://x\n";
        let second = "vmess://y\n\n ";
        assert_eq!(dedup_lines([first, second]), vec!["ss://x", "vmess://y"]);
    }

    #[test]
    fn test_dedup_keeps_first_encounter_order() {
        let lines = dedup_lines(["b\na", "c\nb\r\n  a  "]);
        assert_eq!(lines, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(render_lines(&[]), "");
        assert_eq!(
            render_lines(&["a".to_string(), "b".to_string()]),
            "a\nb\n"
        );
    }
}
