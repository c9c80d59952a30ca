//! Utility functions for loosely typed field values.

/// Interpret a textual field value as a boolean.
///
/// Any number that is not zero is true (`1`, `-3`, `1.0`, `2.5`), as are
/// `yes`, `true`, `enabled`, `on` and `aye` in any case. Surrounding
/// whitespace is ignored. Everything else is false.
pub fn as_bool(value: &str) -> bool {
    let value = value.trim();
    if let Ok(n) = value.parse::<f64>() {
        return n != 0.0;
    }
    matches!(
        value.to_ascii_lowercase().as_str(),
        "yes" | "true" | "enabled" | "on" | "aye"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textual_true_spellings() {
        for v in ["yes", "TRUE", " on ", "Aye", "enabled", "Enabled"] {
            assert!(as_bool(v), "{v:?} should be true");
        }
    }

    #[test]
    fn numeric_values() {
        for v in ["1", "-3", "1.0", "2.5", " 1.5 ", "1e3"] {
            assert!(as_bool(v), "{v:?} should be true");
        }
        for v in ["0", "0.0", "-0", " 0 "] {
            assert!(!as_bool(v), "{v:?} should be false");
        }
    }

    #[test]
    fn false_and_garbage() {
        for v in ["", "no", "false", "off", "disabled", "maybe", "1.2.3"] {
            assert!(!as_bool(v), "{v:?} should be false");
        }
    }
}
