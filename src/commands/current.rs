//! Current command - Show the active cursor scheme

use anyhow::Result;

use crate::store::CurrentScheme;

fn format_current(current: Option<&CurrentScheme>, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&current)?);
    }
    Ok(match current {
        Some(c) => match c.size {
            Some(size) => format!("{} (size {})", c.name, size),
            None => c.name.clone(),
        },
        None => "No active cursor scheme detected.".to_string(),
    })
}

/// Execute the current command and return formatted output.
#[cfg(windows)]
pub fn execute(json: bool) -> Result<String> {
    use crate::store::{ops, registry::RegistryStore};

    let current = ops::current_scheme(&RegistryStore)?;
    format_current(current.as_ref(), json)
}

/// Execute the current command and return formatted output.
#[cfg(not(windows))]
pub fn execute(json: bool) -> Result<String> {
    use crate::store::themes;

    let current = themes::current_theme();
    format_current(current.as_ref(), json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_current_with_size() {
        let current = CurrentScheme {
            name: "Breeze".to_string(),
            size: Some(24),
        };
        assert_eq!(
            format_current(Some(&current), false).unwrap(),
            "Breeze (size 24)"
        );
    }

    #[test]
    fn test_format_current_none() {
        let text = format_current(None, false).unwrap();
        assert!(text.contains("No active"));
        assert_eq!(format_current(None, true).unwrap(), "null");
    }

    #[test]
    fn test_format_current_json() {
        let current = CurrentScheme {
            name: "Breeze".to_string(),
            size: None,
        };
        let text = format_current(Some(&current), true).unwrap();
        assert!(text.contains("\"Breeze\""));
    }
}
