//! Single-line rendering of script text for log output.
//!
//! Script commands and note tags may carry line breaks or control codes
//! (message escape sequences like `\.`); logging them raw splits log lines.

const MAX_PREVIEW: usize = 120;

/// Escape backslashes and control characters, truncating long input with an ellipsis.
pub fn escape_log(line: &str) -> String {
    let mut out = String::with_capacity(line.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in line.chars().enumerate() {
        if count == MAX_PREVIEW {
            out.push('…');
            break;
        }
        if ch == '\\' || ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn escapes_breaks_and_wait_codes() {
        assert_eq!(escape_log("AnimFace Set\n2 3"), "AnimFace Set\\n2 3");
        assert_eq!(escape_log("wait\\."), "wait\\\\.");
        assert_eq!(escape_log("a\tb"), "a\\tb");
    }

    #[test]
    fn truncates_long_lines() {
        let long = "x".repeat(200);
        let esc = escape_log(&long);
        assert_eq!(esc.chars().count(), 121);
        assert!(esc.ends_with('…'));
    }
}
