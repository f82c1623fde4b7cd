//! Canonicalize YAML files: read each one through [`yamline`] and write it
//! back in the printer's canonical form.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bpaf::{Bpaf, ShellComp};
use yamline::{Printer, YamlSource};

/// Canonicalize one YAML text.
///
/// # Errors
///
/// Returns an error if the content is not readable YAML.
pub fn canonicalize(content: &str, indent_width: usize) -> Result<String> {
    let node = YamlSource::from_text(content)
        .read()
        .context("YAML read error")?;
    Ok(Printer::default().indent_width(indent_width).print(&node))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn discover_files(root: &str) -> Result<Vec<PathBuf>> {
    let walker = ignore::WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_yaml(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn collect_files(paths: &[String]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return discover_files(".");
    }
    let mut result = Vec::new();
    for path in paths {
        if Path::new(path).is_dir() {
            result.extend(discover_files(path)?);
        } else {
            result.push(PathBuf::from(path));
        }
    }
    result.sort();
    result.dedup();
    Ok(result)
}

/// CLI arguments.
#[derive(Debug, Clone, Bpaf)]
#[bpaf(generate(format_args_inner))]
pub struct FormatArgs {
    /// Check formatting without writing changes
    #[bpaf(long("check"), switch)]
    pub check: bool,

    /// Spaces per indentation level in the output
    #[bpaf(long("indent"), argument("WIDTH"), fallback(2), display_fallback)]
    pub indent: usize,

    /// The level of logging: debug, info, warn or error
    #[bpaf(long("log-level"), argument("LEVEL"))]
    pub log_level: Option<String>,

    #[bpaf(positional("PATH"), complete_shell(ShellComp::File { mask: None }))]
    pub paths: Vec<String>,
}

/// Construct the bpaf parser for [`FormatArgs`].
pub fn format_args() -> impl bpaf::Parser<FormatArgs> {
    format_args_inner()
}

/// What one run did.
pub struct FormatResult {
    /// Files rewritten in place (or, with `--check`, found unformatted).
    pub changed: Vec<String>,
    /// Files already canonical.
    pub unchanged: usize,
    /// Errors encountered while reading or writing.
    pub errors: Vec<(String, String)>,
}

/// Run the formatter: rewrite files in place, or only report with `--check`.
///
/// # Errors
///
/// Returns an error if file discovery fails.
pub fn run(args: &FormatArgs) -> Result<FormatResult> {
    let files = collect_files(&args.paths)?;
    tracing::debug!(files = files.len(), check = args.check, "formatting");

    let mut result = FormatResult {
        changed: Vec::new(),
        unchanged: 0,
        errors: Vec::new(),
    };

    for file in &files {
        let path_str = file.display().to_string();
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                result.errors.push((path_str, format!("failed to read: {e}")));
                continue;
            }
        };
        match canonicalize(&content, args.indent) {
            Ok(formatted) if formatted == content => result.unchanged += 1,
            Ok(formatted) => {
                if args.check {
                    result.changed.push(path_str);
                } else {
                    match fs::write(file, &formatted) {
                        Ok(()) => result.changed.push(path_str),
                        Err(e) => {
                            result
                                .errors
                                .push((path_str, format!("failed to write: {e}")));
                        }
                    }
                }
            }
            Err(e) => {
                result.errors.push((path_str, format!("{e:#}")));
            }
        }
    }

    Ok(result)
}
