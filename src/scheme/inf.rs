//! Windows INF scheme parsing and emission
//!
//! The INF grammar here is the fixed subset cursor packs use: `[Section]`
//! headers, `;` comments, one registration line in `[Scheme.Reg]` whose
//! last field is a quoted, comma-joined positional path list, and a
//! `[Strings]` variable table. Emission is byte-deterministic because the
//! emitted text is re-parsed on install and must round-trip exactly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::vars;
use super::{CursorRole, Scheme, ROLE_COUNT};
use crate::error::SchemeError;

/// Fields preceding the positional path list in a `[Scheme.Reg]` line
/// (root key, subkey, value name, flags).
const REG_METADATA_FIELDS: usize = 4;

const RUNONCE_LINE: &str = r#"HKLM,"SOFTWARE\Microsoft\Windows\CurrentVersion\Runonce\Setup\","",,"rundll32.exe shell32.dll,Control_RunDLL main.cpl @0""#;

const TEMPLATE: &str = r#"[Version]
signature="$CHICAGO$"


[DefaultInstall]
CopyFiles = Scheme.Cur
AddReg    = Scheme.Reg,Wreg


[DestinationDirs]
Scheme.Cur = {{DESTINATION_DIRS}}


[Scheme.Reg]
{{SCHEME_REG}}


[Wreg]
{{WREG}}


[Scheme.Cur]
{{SCHEME_CUR}}


[Strings]
{{STRING_VARS}}
"#;

/// Split INI-style text into sections: lowercased section name to the
/// non-blank, non-comment lines it contains, in order.
pub fn parse_sections(text: &str) -> HashMap<String, Vec<String>> {
    let mut sections: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_lowercase();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }
        if let Some(ref name) = current {
            sections.get_mut(name).unwrap().push(line.to_string());
        }
    }

    sections
}

/// Parse `KEY = "value"` lines into a map with lowercased, unquoted keys
/// and unquoted values. Lines without `=` are ignored.
pub fn parse_key_values(lines: &[String]) -> HashMap<String, String> {
    lines
        .iter()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            Some((vars::unquote(key).to_lowercase(), vars::unquote(value)))
        })
        .collect()
}

/// Parse native INF scheme text into a canonical [`Scheme`].
///
/// `config_dir` is the directory the INF file was read from; a role's
/// source path is the same-named file beside the config when it exists.
pub fn parse_scheme(text: &str, config_dir: &Path) -> Result<Scheme, SchemeError> {
    let sections = parse_sections(text);

    let strings = sections
        .get("strings")
        .map(|lines| parse_key_values(lines))
        .unwrap_or_default();

    let name = strings
        .get("scheme_name")
        .cloned()
        .ok_or_else(|| SchemeError::Format("missing SCHEME_NAME in [Strings]".to_string()))?;

    let reg_line = sections
        .get("scheme.reg")
        .and_then(|lines| lines.first())
        .ok_or_else(|| SchemeError::Format("missing [Scheme.Reg] registration line".to_string()))?;

    // The quoted path list never contains commas, so the original's naive
    // comma split is safe and kept.
    let fields: Vec<&str> = reg_line.split(',').collect();
    if fields.len() <= REG_METADATA_FIELDS {
        return Err(SchemeError::Format(format!(
            "[Scheme.Reg] line has {} field(s); no cursor paths present",
            fields.len()
        )));
    }
    if fields.len() > REG_METADATA_FIELDS + ROLE_COUNT {
        return Err(SchemeError::Format(format!(
            "[Scheme.Reg] line has {} cursor path fields, more than the {} known roles",
            fields.len() - REG_METADATA_FIELDS,
            ROLE_COUNT
        )));
    }

    let mut tokens: Vec<String> = fields[REG_METADATA_FIELDS..]
        .iter()
        .map(|f| vars::unquote(f))
        .collect();
    tokens.resize(ROLE_COUNT, String::new());

    let mut scheme = Scheme::new(name, config_dir);
    for (key, value) in &strings {
        scheme.set_var(key, value.clone());
    }

    for (role, token) in CursorRole::ALL.into_iter().zip(&tokens) {
        if token.is_empty() {
            continue;
        }
        let resolved = vars::resolve(token, scheme.vars());
        let source = vars::file_name(&resolved)
            .map(|f| config_dir.join(f))
            .filter(|p| p.is_file());
        let entry = scheme.entry_mut(role);
        entry.destination = Some(PathBuf::from(resolved));
        entry.source = source;
    }

    Ok(scheme)
}

/// Per-role file names feeding the emitter, in canonical role order.
/// `None` keeps the role's positional slot empty.
pub type RoleFileNames = [Option<String>; ROLE_COUNT];

/// Render the complete INF install descriptor for a scheme.
///
/// `files` holds the installed cursor file name of each role;
/// `install_path` switches from the system cursor directory layout to an
/// explicit absolute install location. Identical input always produces
/// byte-identical text.
pub fn render_scheme(name: &str, files: &RoleFileNames, install_path: Option<&Path>) -> String {
    let scheme_dir = install_path.map(|p| p.join(name));

    let destination_dirs = match &scheme_dir {
        Some(dir) => format!("\"{}\"", dir.display()),
        None => r#"10,"%CUR_DIR%""#.to_string(),
    };

    let mut reg_tokens: Vec<String> = Vec::with_capacity(ROLE_COUNT);
    let mut wreg = r#"HKCU,"Control Panel\Cursors",,0x00020000,"%SCHEME_NAME%""#.to_string();
    let mut scheme_cur = String::new();
    let mut strings = format!("\"SCHEME_NAME\"=\"{name}\"");

    for role in CursorRole::ALL {
        let value = role.spec().registry_value;
        let file = &files[role.index()];

        let token = match (file, &scheme_dir) {
            (None, _) => String::new(),
            (Some(_), Some(dir)) => dir.join(format!("%{value}%")).display().to_string(),
            (Some(_), None) => format!(r"%10%\%CUR_DIR%\%{value}%"),
        };

        if let Some(file) = file {
            wreg.push('\n');
            wreg.push_str(&format!(
                r#"HKCU,"Control Panel\Cursors",{value},0x00020000,"{token}""#
            ));
            scheme_cur.push('\n');
            scheme_cur.push_str(&format!("\"{file}\""));
            strings.push('\n');
            strings.push_str(&format!("\"{value}\"=\"{file}\""));
        }

        reg_tokens.push(token);
    }

    wreg.push('\n');
    wreg.push_str(RUNONCE_LINE);

    let scheme_reg = format!(
        r#"HKCU,"Control Panel\Cursors\Schemes","%SCHEME_NAME%",,"{}""#,
        reg_tokens.join(",")
    );

    let cur_dir = match &scheme_dir {
        Some(dir) => dir.display().to_string(),
        None => format!(r"Cursors\{name}"),
    };
    strings.push('\n');
    strings.push_str(&format!("\"CUR_DIR\"=\"{cur_dir}\""));

    TEMPLATE
        .replace("{{DESTINATION_DIRS}}", &destination_dirs)
        .replace("{{SCHEME_REG}}", &scheme_reg)
        .replace("{{WREG}}", &wreg)
        .replace("{{SCHEME_CUR}}", scheme_cur.trim_start_matches('\n'))
        .replace("{{STRING_VARS}}", &strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(present: &[(CursorRole, &str)]) -> RoleFileNames {
        let mut files: RoleFileNames = std::array::from_fn(|_| None);
        for (role, file) in present {
            files[role.index()] = Some(file.to_string());
        }
        files
    }

    fn sample_inf(tokens: &[&str]) -> String {
        format!(
            "[Scheme.Reg]\nHKCU,\"Control Panel\\Cursors\\Schemes\",\"%SCHEME_NAME%\",,\"{}\"\n\n[Strings]\n\"SCHEME_NAME\"=\"Sample\"\n\"CUR_DIR\"=\"Cursors\\Sample\"\n",
            tokens.join(",")
        )
    }

    #[test]
    fn test_parse_rejects_short_field_list() {
        let text = "[Scheme.Reg]\nHKCU,\"Control Panel\\Cursors\\Schemes\",\"%SCHEME_NAME%\",\n[Strings]\nSCHEME_NAME = \"X\"\n";
        let err = parse_scheme(text, Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, SchemeError::Format(_)));
    }

    #[test]
    fn test_parse_rejects_overlong_field_list() {
        let tokens: Vec<&str> = std::iter::repeat("a.cur").take(ROLE_COUNT + 1).collect();
        let err = parse_scheme(&sample_inf(&tokens), Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, SchemeError::Format(_)));
    }

    #[test]
    fn test_parse_pads_short_lists_to_role_count() {
        // 6 tokens only; the rest of the positions become holes.
        let scheme = parse_scheme(
            &sample_inf(&["a.cur", "b.cur", "c.ani", "", "e.cur", "f.cur"]),
            Path::new("/tmp"),
        )
        .unwrap();
        assert_eq!(scheme.entries.len(), ROLE_COUNT);
        assert_eq!(scheme.bound_count(), 5);
        assert!(scheme.entry(CursorRole::Busy).is_hole());
        assert!(scheme.entry(CursorRole::WaylandCursor).is_hole());
    }

    #[test]
    fn test_parse_21_tokens_with_trailing_holes() {
        // Full-width field list: 18 non-empty, 3 empty trailing.
        let mut tokens = vec![r"%SYSTEMROOT%\Cursors\x.cur"; 18];
        tokens.extend(["", "", ""]);
        let scheme = parse_scheme(&sample_inf(&tokens), Path::new("/tmp")).unwrap();
        assert_eq!(scheme.bound_count(), 18);
        for role in [CursorRole::ZoomIn, CursorRole::ZoomOut, CursorRole::WaylandCursor] {
            assert!(scheme.entry(role).is_hole());
        }
    }

    #[test]
    fn test_parse_resolves_local_vars_and_finds_sources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("arrow.cur"), b"cur").unwrap();
        let text = sample_inf(&[r"%CUR_DIR%\arrow.cur", r"%CUR_DIR%\missing.cur"]);
        let scheme = parse_scheme(&text, dir.path()).unwrap();

        let arrow = scheme.entry(CursorRole::Arrow);
        assert_eq!(
            arrow.destination.as_deref(),
            Some(Path::new(r"Cursors\Sample\arrow.cur"))
        );
        assert_eq!(arrow.source.as_deref(), Some(dir.path().join("arrow.cur").as_path()));

        // Declared but absent beside the config: destination only.
        let help = scheme.entry(CursorRole::Help);
        assert!(help.destination.is_some());
        assert!(help.source.is_none());
    }

    #[test]
    fn test_render_is_deterministic() {
        let files = names(&[(CursorRole::Arrow, "arrow.cur"), (CursorRole::Busy, "busy.ani")]);
        assert_eq!(
            render_scheme("Demo", &files, None),
            render_scheme("Demo", &files, None)
        );
    }

    #[test]
    fn test_render_positional_tokens_follow_canonical_order() {
        let files = names(&[(CursorRole::Busy, "busy.ani"), (CursorRole::Arrow, "arrow.cur")]);
        let text = render_scheme("Demo", &files, None);
        let reg_line = text
            .lines()
            .find(|l| l.starts_with(r#"HKCU,"Control Panel\Cursors\Schemes""#))
            .unwrap();
        let tokens: Vec<&str> = reg_line.split(',').skip(4).collect();
        assert_eq!(tokens.len(), ROLE_COUNT);
        // Arrow occupies slot 0 no matter the order the files were supplied in.
        assert!(tokens[CursorRole::Arrow.index()].contains("%Arrow%"));
        assert!(tokens[CursorRole::Busy.index()].contains("%Wait%"));
        assert!(tokens[CursorRole::Cross.index()].trim_matches('"').is_empty());
    }

    #[test]
    fn test_render_parse_round_trip_preserves_null_set() {
        let files = names(&[
            (CursorRole::Arrow, "arrow.cur"),
            (CursorRole::TextBeam, "beam.cur"),
            (CursorRole::Hand, "hand.ani"),
        ]);
        let text = render_scheme("Round", &files, None);
        let scheme = parse_scheme(&text, Path::new("/nonexistent")).unwrap();

        assert_eq!(scheme.name, "Round");
        for role in CursorRole::ALL {
            assert_eq!(
                scheme.entry(role).destination.is_some(),
                files[role.index()].is_some(),
                "null mismatch for {role:?}"
            );
        }
        // File names survive the trip even though prefixes are host-dependent.
        let dest = scheme.entry(CursorRole::Hand).destination.clone().unwrap();
        assert_eq!(vars::file_name(dest.to_str().unwrap()), Some("hand.ani"));
    }

    #[test]
    fn test_render_custom_install_path() {
        let files = names(&[(CursorRole::Arrow, "arrow.cur")]);
        let text = render_scheme("Demo", &files, Some(Path::new("/opt/cursors")));
        assert!(text.contains("Scheme.Cur = \"/opt/cursors/Demo\""));
        assert!(!text.contains("%CUR_DIR%\\%Arrow%"));
        assert!(text.contains("\"CUR_DIR\"=\"/opt/cursors/Demo\""));
    }

    #[test]
    fn test_sections_are_case_insensitive_and_skip_comments() {
        let text = "; comment\n[STRINGS]\nA = \"1\"\n\n[scheme.reg]\nline\n";
        let sections = parse_sections(text);
        assert_eq!(sections["strings"], vec!["A = \"1\"".to_string()]);
        assert_eq!(sections["scheme.reg"], vec!["line".to_string()]);
    }
}
