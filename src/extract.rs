//! Best-effort extraction of a JSON object embedded in model output.

/// Find the first balanced brace-delimited span in `text`.
///
/// Scans from the first `{`, tracking nesting depth and skipping braces
/// inside string literals (escape-aware), and stops at the point depth
/// returns to zero. Returns `None` when no opening brace exists or the
/// braces never balance.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}
