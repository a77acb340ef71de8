//! Convert command - Translate a cursor scheme between platforms

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::convert::{self, CommandConverter, ConvertOptions};
use crate::scheme::{inf, theme};
use crate::store::themes;

/// Default external converter for Windows cursor files.
const WIN_TO_X11_PROGRAM: &str = "win2xcur";
/// Default external converter for X11 cursor files.
const X11_TO_WIN_PROGRAM: &str = "x2wincur";

/// What the input turned out to be.
enum Direction {
    WinToX11,
    X11ToWin,
}

/// Execute the convert command. The direction is inferred from the input:
/// an `.inf` file converts Windows -> X11, a theme directory or descriptor
/// converts X11 -> Windows.
pub fn execute(
    input: &Path,
    output: &Path,
    program: Option<&str>,
    extra_args: &[String],
    completion_dir: Option<&Path>,
) -> Result<()> {
    let (direction, scheme) = load_scheme(input)?;

    let produced = match direction {
        Direction::WinToX11 => {
            let converter = build_converter(program.unwrap_or(WIN_TO_X11_PROGRAM), extra_args);
            let completion_dir = match completion_dir {
                Some(dir) => dir.to_path_buf(),
                None => config::completion_assets_dir()?,
            };
            let options = ConvertOptions { completion_dir };
            convert::win_to_x11(&scheme, output, &converter, &options)
                .with_context(|| format!("Failed to convert: {}", input.display()))?
        }
        Direction::X11ToWin => {
            let converter = build_converter(program.unwrap_or(X11_TO_WIN_PROGRAM), extra_args);
            convert::x11_to_win(&scheme, output, &converter)
                .with_context(|| format!("Failed to convert: {}", input.display()))?
        }
    };

    println!(
        "{} {} ({} cursor roles)",
        "Converted:".green(),
        produced.display(),
        scheme.bound_count()
    );

    Ok(())
}

/// Parse the input into a scheme and tell which way we are converting.
fn load_scheme(input: &Path) -> Result<(Direction, crate::scheme::Scheme)> {
    if input
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("inf"))
    {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read: {}", input.display()))?;
        let config_dir = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let scheme = inf::parse_scheme(&text, &config_dir)
            .with_context(|| format!("Failed to parse: {}", input.display()))?;
        return Ok((Direction::WinToX11, scheme));
    }

    let theme_file = if input.is_dir() {
        themes::theme_file_in(input)
            .with_context(|| format!("No cursor.theme or index.theme in {}", input.display()))?
    } else {
        input.to_path_buf()
    };
    let scheme = theme::parse_scheme(&theme_file)
        .with_context(|| format!("Failed to parse: {}", theme_file.display()))?;
    Ok((Direction::X11ToWin, scheme))
}

fn build_converter(program: &str, extra_args: &[String]) -> CommandConverter {
    CommandConverter::new(program).with_args(extra_args.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_scheme_detects_inf() {
        let dir = tempfile::tempdir().unwrap();
        let inf_path = dir.path().join("Install.inf");
        fs::write(
            &inf_path,
            "[Strings]\nSCHEME_NAME = \"Demo\"\n\n[Scheme.Reg]\nHKCU,\"Control Panel\\Cursors\\Schemes\",\"%SCHEME_NAME%\",,\"\"\n",
        )
        .unwrap();

        let (direction, scheme) = load_scheme(&inf_path).unwrap();
        assert!(matches!(direction, Direction::WinToX11));
        assert_eq!(scheme.name, "Demo");
    }

    #[test]
    fn test_load_scheme_detects_theme_dir() {
        let dir = tempfile::tempdir().unwrap();
        let theme_root = dir.path().join("Demo");
        fs::create_dir_all(theme_root.join("cursors")).unwrap();
        fs::write(
            theme_root.join("cursor.theme"),
            "[Icon Theme]\nName=Demo\n",
        )
        .unwrap();

        let (direction, scheme) = load_scheme(&theme_root).unwrap();
        assert!(matches!(direction, Direction::X11ToWin));
        assert_eq!(scheme.name, "Demo");
    }

    #[test]
    fn test_load_scheme_rejects_bare_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_scheme(dir.path()).is_err());
    }
}
