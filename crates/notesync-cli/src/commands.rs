use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::debug;

use notesync_diff::{diff, sorted, Diff};
use notesync_merge::{MergeConfig, Merger};
use notesync_types::Note;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Merge(args) => cmd_merge(args, cli.format),
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let base = load_note(&args.base)?;
    let target = load_note(&args.target)?;
    let diffs = sorted(diff(&base, &target)?);
    println!("{}", render_diffs(&diffs, format)?);
    Ok(())
}

fn cmd_merge(args: MergeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let merged = merge_files(&args)?;
    let json = serde_json::to_string_pretty(&merged).context("failed to serialize merged note")?;

    if let Some(path) = &args.output {
        fs::write(path, &json).with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "{} Merged note written to {}",
            "✓".green().bold(),
            path.display().to_string().bold()
        );
        return Ok(());
    }
    match format {
        OutputFormat::Json => println!("{json}"),
        OutputFormat::Text => {
            println!("{} Merged note {}", "✓".green().bold(), merged.id.to_string().yellow());
            println!("  Kind: {:?}", merged.kind());
            println!("  Color: {}", merged.color.to_string().cyan());
            println!("  Blocks: {}, media: {}", merged.document.blocks.len(), merged.media.len());
            for line in merged.document.plain_text().lines() {
                println!("  | {line}");
            }
        }
    }
    Ok(())
}

/// Load the three snapshots and the configuration named by `args`, and merge.
pub fn merge_files(args: &MergeArgs) -> anyhow::Result<Note> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MergeConfig::default(),
    };
    if let Some(side) = args.selection_from {
        config.selection_from = side.into();
    }
    let merger = Merger::new(config);
    debug!(config = ?merger.config(), "merge configuration");

    let base = load_note(&args.base)?;
    let primary = load_note(&args.primary)?;
    let secondary = load_note(&args.secondary)?;
    Ok(merger.merge(&base, &primary, &secondary)?)
}

pub fn load_note(path: &Path) -> anyhow::Result<Note> {
    let raw = read(path)?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid note snapshot", path.display()))
}

pub fn load_config(path: &Path) -> anyhow::Result<MergeConfig> {
    let raw = read(path)?;
    Ok(MergeConfig::from_toml_str(&raw)?)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn render_diffs(diffs: &[Diff], format: OutputFormat) -> anyhow::Result<String> {
    if let OutputFormat::Json = format {
        return serde_json::to_string_pretty(diffs).context("failed to serialize diffs");
    }
    if diffs.is_empty() {
        return Ok("No changes.".to_string());
    }
    let lines: Vec<String> = diffs
        .iter()
        .map(|d| {
            let text = d.to_string();
            if d.is_deletion() {
                format!("{} {}", "-".red(), text.red())
            } else if is_insertion(d) {
                format!("{} {}", "+".green(), text.green())
            } else {
                format!("{} {}", "~".yellow(), text)
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

fn is_insertion(diff: &Diff) -> bool {
    matches!(
        diff,
        Diff::BlockInsertion { .. }
            | Diff::BlockTextInsertion { .. }
            | Diff::SpanInsertion { .. }
            | Diff::UnorderedListInsertion { .. }
            | Diff::RightToLeftInsertion { .. }
            | Diff::MediaInsertion { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use notesync_types::{Document, Paragraph};
    use std::path::PathBuf;

    fn write_note(dir: &Path, name: &str, text: &str) -> PathBuf {
        let note = Note::new(
            "n",
            Document::rich_text(vec![Paragraph::new("p", text).into()]),
            Utc.timestamp_millis_opt(0).unwrap(),
        );
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(&note).unwrap()).unwrap();
        path
    }

    fn merge_args(dir: &Path) -> MergeArgs {
        MergeArgs {
            base: write_note(dir, "base.json", "the cat sat"),
            primary: write_note(dir, "primary.json", "the dog sat"),
            secondary: write_note(dir, "secondary.json", "the cow sat"),
            selection_from: None,
            config: None,
            output: None,
        }
    }

    #[test]
    fn merge_prefers_primary_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let merged = merge_files(&merge_args(dir.path())).unwrap();
        assert_eq!(merged.document.plain_text(), "the dog sat");
    }

    #[test]
    fn flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("merge.toml");
        fs::write(&config, "selection_from = \"primary\"\nlog_diffs = true\n").unwrap();

        let mut args = merge_args(dir.path());
        args.config = Some(config);
        assert_eq!(merge_files(&args).unwrap().document.plain_text(), "the dog sat");

        args.selection_from = Some(Side::Secondary);
        assert_eq!(merge_files(&args).unwrap().document.plain_text(), "the cow sat");
    }

    #[test]
    fn bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("merge.toml");
        fs::write(&config, "selection_from = 3").unwrap();
        assert!(load_config(&config).is_err());
    }

    #[test]
    fn missing_snapshot_names_the_file() {
        let err = load_note(Path::new("/nonexistent/note.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/note.json"));
    }

    #[test]
    fn output_file_holds_merged_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        let mut args = merge_args(dir.path());
        args.output = Some(out.clone());
        cmd_merge(args, OutputFormat::Text).unwrap();

        let written = load_note(&out).unwrap();
        assert_eq!(written.document.plain_text(), "the dog sat");
    }

    #[test]
    fn renders_diffs() {
        let diffs = vec![
            Diff::BlockTextDeletion {
                block_id: "p".into(),
                start: 0,
                end: 0,
            },
            Diff::BlockTextInsertion {
                block_id: "p".into(),
                text: "l".into(),
                index: 0,
            },
        ];
        let text = render_diffs(&diffs, OutputFormat::Text).unwrap();
        assert!(text.contains("BlockTextDeletion(p, 0, 0)"));
        assert!(text.contains("BlockTextInsertion(p, \"l\", 0)"));

        let json = render_diffs(&diffs, OutputFormat::Json).unwrap();
        let back: Vec<Diff> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diffs);

        assert_eq!(render_diffs(&[], OutputFormat::Text).unwrap(), "No changes.");
    }
}
