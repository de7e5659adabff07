//! # deckgen
//!
//! Command line front end: plan a deck with the language model, lay it out
//! and export it.
//!
//! ## Usage
//!
//! ```bash
//! deckgen generate --title "Q3 Review" --content-file notes.md --tone bold --format png
//! deckgen render --plan plan.json --out deck --format pdf
//! deckgen style --tone luxury
//! deckgen settings set --api-key sk-ant-... --model claude-sonnet-4-5
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - command line parsed with clap
//! - `run` - dispatches a parsed command
//! - `assemble_scene` - drives the assembler event stream into a `SceneHost`
//! - `export_scene` - writes the recorded scene with `deck-renderer`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use deck_core::{
    build_style_guide, extract_plan, Audience, DeckAssembler, DeckEvent, DeckScene, SceneHost,
    SlidesPlan, StyleGuide, Tone,
};
use deck_planner::{
    is_known_model, PlanRequest, PlannerClient, RetryConfig, SettingsStore, SlideCount,
    DEFAULT_API_URL, KNOWN_MODELS,
};
use deck_renderer::{DeckExporter, ExportConfig, ExportFormat};
use futures::StreamExt;
use tokio::io::AsyncReadExt;

/// Command-line arguments for deckgen.
#[derive(Debug, Clone, Parser)]
#[command(name = "deckgen")]
#[command(about = "Plan, lay out and export slide decks")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding settings.json (default: platform config directory)
    #[arg(long, env = "DECKGEN_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// deckgen subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Plan a deck with the language model, then lay it out and export it
    Generate(GenerateArgs),
    /// Lay out and export an existing plan file
    Render(RenderArgs),
    /// Print the resolved style guide for a tone as JSON
    Style(StyleArgs),
    /// Show or change stored settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// Where and how to write the deck.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output directory
    #[arg(long, default_value = "deck")]
    pub out: PathBuf,

    /// Export format: svg, png, pdf or json
    #[arg(long, default_value = "svg")]
    pub format: ExportFormat,

    /// Raster scale factor for png and pdf output
    #[arg(long, default_value = "1.0")]
    pub scale: f32,

    /// Style guide JSON file used instead of the tone's built-in guide
    #[arg(long)]
    pub style_guide: Option<PathBuf>,
}

/// Arguments for `deckgen generate`.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Presentation title
    #[arg(long)]
    pub title: String,

    /// File with the content to present (`-` reads stdin)
    #[arg(long)]
    pub content_file: PathBuf,

    /// Why the deck exists
    #[arg(long, default_value = "")]
    pub purpose: String,

    /// Intended audience: executives, engineers, customers or general
    #[arg(long, default_value = "executives")]
    pub audience: Audience,

    /// Aesthetic direction: minimal, bold, luxury, editorial, technical or playful
    #[arg(long, default_value = "bold")]
    pub tone: Tone,

    /// Number of slides, or `auto`
    #[arg(long, default_value = "auto")]
    pub slides: SlideCount,

    /// Also write the received plan JSON to this file
    #[arg(long)]
    pub save_plan: Option<PathBuf>,

    /// Anthropic API key (overrides the stored key)
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier (overrides the stored model)
    #[arg(long, env = "DECKGEN_MODEL")]
    pub model: Option<String>,

    /// Messages API base URL
    #[arg(long, env = "DECKGEN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Retries for overloaded or unreachable API (0 disables)
    #[arg(long, default_value = "0")]
    pub retries: u32,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `deckgen render`.
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Plan JSON file (prose or code fences around the object are accepted)
    #[arg(long)]
    pub plan: PathBuf,

    /// Tone to style with (default: the plan's aesthetic)
    #[arg(long)]
    pub tone: Option<Tone>,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `deckgen style`.
#[derive(Debug, Clone, Args)]
pub struct StyleArgs {
    /// Tone to resolve
    #[arg(long, default_value = "bold")]
    pub tone: Tone,
}

/// `deckgen settings` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SettingsCommand {
    /// Print the stored settings with the key masked
    Show,
    /// Update stored settings
    Set {
        /// New API key
        #[arg(long)]
        api_key: Option<String>,
        /// New model identifier
        #[arg(long)]
        model: Option<String>,
    },
}

/// Run a parsed command.
///
/// # Errors
///
/// Returns the first failure of the selected pipeline: missing settings,
/// planner errors, an assembly `ERROR` event, or export failures.
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let store = settings_store(args.config_dir.as_deref())?;
    match args.command {
        Command::Generate(generate) => run_generate(generate, &store).await,
        Command::Render(render) => run_render(&render).await,
        Command::Style(style) => {
            let guide = build_style_guide(style.tone);
            println!("{}", serde_json::to_string_pretty(&guide)?);
            Ok(())
        }
        Command::Settings(command) => run_settings(command, &store),
    }
}

/// Settings store in `config_dir`, or in the platform default location.
///
/// # Errors
///
/// Returns an error if no config directory can be determined.
pub fn settings_store(config_dir: Option<&Path>) -> anyhow::Result<SettingsStore> {
    match config_dir {
        Some(dir) => Ok(SettingsStore::new(dir)),
        None => Ok(SettingsStore::default_location()?),
    }
}

/// The tone's style guide, or the guide in `style_guide` when given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the guide is invalid.
pub fn resolve_style(tone: Tone, style_guide: Option<&Path>) -> anyhow::Result<StyleGuide> {
    let Some(path) = style_guide else {
        return Ok(build_style_guide(tone));
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read style guide {}", path.display()))?;
    let guide = StyleGuide::from_json(&json)
        .with_context(|| format!("Invalid style guide {}", path.display()))?;
    tracing::info!(path = %path.display(), direction = %guide.aesthetic.direction, "Loaded style guide");
    Ok(guide)
}

/// Read and validate a plan file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no valid plan.
pub fn load_plan(path: &Path) -> anyhow::Result<SlidesPlan> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan {}", path.display()))?;
    let plan = extract_plan(&text)?;
    plan.validate()?;
    Ok(plan)
}

/// Assemble `plan` into an in-memory scene, logging progress as it streams.
///
/// # Errors
///
/// Fails with the message of the first `ERROR` event.
pub async fn assemble_scene(plan: &SlidesPlan, style: &StyleGuide) -> anyhow::Result<DeckScene> {
    let mut host = SceneHost::default();
    {
        let assembler = DeckAssembler::default();
        let events = assembler.assemble(plan, style, &mut host);
        futures::pin_mut!(events);

        while let Some(event) = events.next().await {
            match event {
                DeckEvent::Progress { message, percent } => tracing::info!(percent, "{message}"),
                DeckEvent::Done { slide_count } => {
                    tracing::info!(slide_count, "Deck assembled");
                }
                DeckEvent::Error { message } => bail!("{message}"),
            }
        }
    }
    Ok(host.into_scene())
}

/// Export `scene` as `output` describes.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn export_scene(scene: &DeckScene, output: &OutputArgs) -> anyhow::Result<Vec<PathBuf>> {
    let exporter = DeckExporter::new(ExportConfig {
        scale: output.scale,
        ..ExportConfig::default()
    });
    Ok(exporter.export(scene, output.format, &output.out)?)
}

async fn read_content(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read content from stdin")?;
        return Ok(content);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read content {}", path.display()))
}

async fn run_generate(args: GenerateArgs, store: &SettingsStore) -> anyhow::Result<()> {
    let settings = store.load();
    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .unwrap_or(settings.api_key);
    let model = args.model.unwrap_or(settings.model);

    let request = PlanRequest {
        title: args.title,
        purpose: args.purpose,
        audience: args.audience,
        tone: args.tone,
        content: read_content(&args.content_file).await?,
        slide_count: args.slides,
    };
    let style = resolve_style(request.tone, args.output.style_guide.as_deref())?;

    let mut client = PlannerClient::new(&args.api_url, api_key, model)?;
    if args.retries > 0 {
        client = client.with_retry_config(RetryConfig {
            max_attempts: args.retries + 1,
            ..RetryConfig::default()
        });
    }
    let plan = client.plan(&request, &style).await?;

    if let Some(path) = &args.save_plan {
        std::fs::write(path, serde_json::to_string_pretty(&plan)?)
            .with_context(|| format!("Failed to write plan {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved plan");
    }

    let scene = assemble_scene(&plan, &style).await?;
    report(&export_scene(&scene, &args.output)?);
    Ok(())
}

async fn run_render(args: &RenderArgs) -> anyhow::Result<()> {
    let plan = load_plan(&args.plan)?;
    let tone = args.tone.unwrap_or(plan.aesthetic);
    let style = resolve_style(tone, args.output.style_guide.as_deref())?;

    let scene = assemble_scene(&plan, &style).await?;
    report(&export_scene(&scene, &args.output)?);
    Ok(())
}

fn run_settings(command: SettingsCommand, store: &SettingsStore) -> anyhow::Result<()> {
    let mut settings = store.load();
    match command {
        SettingsCommand::Show => {
            println!("file:    {}", store.path().display());
            println!("api key: {}", settings.masked_key());
            println!("model:   {}", settings.model);
            println!("models:");
            for (id, label) in KNOWN_MODELS {
                let marker = if id == settings.model { '*' } else { ' ' };
                println!("  {marker} {id:<28} {label}");
            }
        }
        SettingsCommand::Set { api_key, model } => {
            if api_key.is_none() && model.is_none() {
                bail!("Nothing to set; pass --api-key and/or --model");
            }
            if let Some(key) = api_key {
                settings.api_key = key.trim().to_string();
            }
            if let Some(model) = model {
                if !is_known_model(&model) {
                    tracing::warn!(model = %model, "Model is not in the known model list");
                }
                settings.model = model;
            }
            store.save(&settings)?;
        }
    }
    Ok(())
}

fn report(files: &[PathBuf]) {
    for file in files {
        println!("{}", file.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{
      "title": "Offline Deck",
      "aesthetic": "technical",
      "tone": "precise",
      "audience": "engineers",
      "slideCount": 2,
      "slides": [
        {"type": "HERO", "content": {"title": "Offline Deck", "subtitle": "No network"}},
        {"type": "AGENDA", "content": {"heading": "Plan", "items": ["One", "Two"]}}
      ]
    }"#;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).expect("args should parse")
    }

    #[test]
    fn test_generate_defaults() {
        let args = parse(&[
            "deckgen",
            "generate",
            "--title",
            "Q3",
            "--content-file",
            "notes.md",
            "--api-url",
            "http://localhost:9",
        ]);
        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.tone, Tone::Bold);
        assert_eq!(generate.audience, Audience::Executives);
        assert_eq!(generate.slides, SlideCount::Auto);
        assert_eq!(generate.output.format, ExportFormat::Svg);
        assert_eq!(generate.output.out, PathBuf::from("deck"));
        assert_eq!(generate.retries, 0);
    }

    #[test]
    fn test_generate_options() {
        let args = parse(&[
            "deckgen",
            "generate",
            "--title",
            "Q3",
            "--content-file",
            "-",
            "--tone",
            "Luxury",
            "--slides",
            "9",
            "--format",
            "pdf",
            "--audience",
            "customers",
        ]);
        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.tone, Tone::Luxury);
        assert_eq!(generate.slides, SlideCount::Exact(9));
        assert_eq!(generate.output.format, ExportFormat::Pdf);
        assert_eq!(generate.audience, Audience::Customers);
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(CliArgs::try_parse_from(["deckgen", "style", "--tone", "neon"]).is_err());
        assert!(CliArgs::try_parse_from([
            "deckgen", "render", "--plan", "p.json", "--format", "gif"
        ])
        .is_err());
    }

    #[tokio::test]
    async fn test_render_plan_file_offline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let plan_path = dir.path().join("plan.json");
        std::fs::write(&plan_path, PLAN).expect("write plan");
        let out = dir.path().join("out");

        let args = parse(&[
            "deckgen",
            "--config-dir",
            dir.path().to_str().expect("utf-8 path"),
            "render",
            "--plan",
            plan_path.to_str().expect("utf-8 path"),
            "--out",
            out.to_str().expect("utf-8 path"),
        ]);
        run(args).await.expect("render");

        assert!(out.join("01-hero.svg").exists());
        assert!(out.join("02-agenda.svg").exists());
        let hero = std::fs::read_to_string(out.join("01-hero.svg")).expect("read");
        assert!(hero.contains("JetBrains Mono"));
    }

    #[tokio::test]
    async fn test_tone_override_and_custom_style_guide() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut guide = build_style_guide(Tone::Minimal);
        guide.colors.background = "#123456".to_string();
        let guide_path = dir.path().join("style.json");
        std::fs::write(&guide_path, serde_json::to_string(&guide).expect("json")).expect("write");

        let style = resolve_style(Tone::Bold, Some(&guide_path)).expect("style");
        assert_eq!(style.colors.background, "#123456");

        let plan = extract_plan(PLAN).expect("plan");
        let scene = assemble_scene(&plan, &style).await.expect("scene");
        assert_eq!(scene.frame_count(), 2);
        assert!(scene.frames().all(|f| f.background == "#123456"));
    }

    #[test]
    fn test_invalid_style_guide_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut guide = build_style_guide(Tone::Minimal);
        guide.colors.primary = "red".to_string();
        let guide_path = dir.path().join("style.json");
        std::fs::write(&guide_path, serde_json::to_string(&guide).expect("json")).expect("write");

        assert!(resolve_style(Tone::Bold, Some(&guide_path)).is_err());
    }

    #[tokio::test]
    async fn test_settings_set_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().to_str().expect("utf-8 path");

        run(parse(&[
            "deckgen",
            "--config-dir",
            config,
            "settings",
            "set",
            "--api-key",
            " sk-ant-xyz ",
            "--model",
            "claude-opus-4-5",
        ]))
        .await
        .expect("set");

        let settings = SettingsStore::new(dir.path()).load();
        assert_eq!(settings.api_key, "sk-ant-xyz");
        assert_eq!(settings.model, "claude-opus-4-5");

        assert!(run(parse(&["deckgen", "--config-dir", config, "settings", "set"]))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_before_network() {
        let dir = tempfile::tempdir().expect("tempdir");
        let content = dir.path().join("notes.md");
        std::fs::write(&content, "Revenue grew").expect("write");

        let err = run(parse(&[
            "deckgen",
            "--config-dir",
            dir.path().to_str().expect("utf-8 path"),
            "generate",
            "--title",
            "Q3",
            "--content-file",
            content.to_str().expect("utf-8 path"),
            "--api-key",
            "",
            "--api-url",
            "http://127.0.0.1:9",
        ]))
        .await
        .expect_err("missing key");

        assert_eq!(err.to_string(), deck_planner::MISSING_API_KEY);
    }
}
