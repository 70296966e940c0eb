//! `snapscrub` - CLI for scanning and redacting screenshots
//!
//! This binary wires the detection pipeline to the filesystem: it loads a
//! screenshot plus its OCR sidecar, reports what was detected, and writes
//! redacted copies.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use snapscrub::cli::{Cli, Command, ConfigCommand, PatternsCommand, RedactCommand, ScanCommand};
use snapscrub::detect::builtin_rules;
use snapscrub::ocr::{SidecarRecognizer, TextRecognizer};
use snapscrub::{
    apply_redaction, init_logging, Config, Frame, Match, Scanner, TextDetector,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Scan(cmd) => handle_scan(&config, &cmd).await,
        Command::Redact(cmd) => handle_redact(&config, &cmd).await,
        Command::Patterns(cmd) => {
            handle_patterns(&cmd)?;
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Run a detection pass over the image/sidecar pair named by the CLI.
async fn run_detection(
    config: &Config,
    image: &std::path::Path,
    blocks: &std::path::Path,
    scale: f32,
) -> anyhow::Result<(Frame, Vec<Match>)> {
    let frame = Frame::open(image, scale)
        .with_context(|| format!("cannot load screenshot {}", image.display()))?;
    let recognizer: Arc<dyn TextRecognizer> = Arc::new(
        SidecarRecognizer::from_path(blocks)
            .with_context(|| format!("cannot load text blocks {}", blocks.display()))?,
    );

    for (pattern, reason) in config.invalid_custom_rules() {
        tracing::warn!(pattern, reason, "custom rule will be skipped");
    }
    let detector = TextDetector::with_custom_rules(&config.detection.custom_rules);
    let scanner = Scanner::new(detector).with_min_confidence(config.detection.min_confidence);

    let frame = Arc::new(frame);
    let rx = scanner.detect_in_frame(
        Arc::clone(&recognizer),
        Arc::clone(&frame),
        config.recognize_options(),
    );
    let matches = rx.await.unwrap_or_default();

    let frame = Arc::try_unwrap(frame).unwrap_or_else(|shared| (*shared).clone());
    Ok((frame, matches))
}

async fn handle_scan(config: &Config, cmd: &ScanCommand) -> anyhow::Result<()> {
    let (_, matches) = run_detection(config, &cmd.image, &cmd.blocks, cmd.scale).await?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No sensitive data detected.");
        return Ok(());
    }

    println!("Detected {} sensitive region(s):", matches.len());
    for m in &matches {
        println!(
            "  [{}] {}  region=({:.0}, {:.0}, {:.0}, {:.0})  confidence={:.2}",
            m.category,
            m.masked_text,
            m.region.x,
            m.region.y,
            m.region.width,
            m.region.height,
            m.confidence
        );
    }
    Ok(())
}

async fn handle_redact(config: &Config, cmd: &RedactCommand) -> anyhow::Result<()> {
    let (frame, mut matches) = run_detection(config, &cmd.image, &cmd.blocks, cmd.scale).await?;

    // The review step: --only / --skip flip the per-match redaction flag.
    for m in &mut matches {
        if !cmd.only.is_empty() && !cmd.only.contains(&m.category) {
            m.should_redact = false;
        }
        if cmd.skip.contains(&m.category) {
            m.should_redact = false;
        }
    }

    let style = cmd.style.unwrap_or(config.redaction.style);
    let redacted = apply_redaction(&frame, &matches, style);
    redacted
        .save(&cmd.output)
        .with_context(|| format!("cannot write {}", cmd.output.display()))?;

    let applied = matches.iter().filter(|m| m.should_redact).count();
    if cmd.json {
        let summary = serde_json::json!({
            "output": cmd.output,
            "style": style,
            "detected": matches.len(),
            "redacted": applied,
            "matches": matches,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Redacted {applied} of {} detected region(s) with {style} -> {}",
            matches.len(),
            cmd.output.display()
        );
    }
    Ok(())
}

fn handle_patterns(cmd: &PatternsCommand) -> anyhow::Result<()> {
    let rules = builtin_rules();

    if cmd.json {
        let listed: Vec<_> = rules
            .iter()
            .map(|r| {
                serde_json::json!({
                    "name": r.name,
                    "category": r.category,
                    "description": r.description,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    println!("Built-in detection rules");
    println!("------------------------");
    for rule in &rules {
        println!("  {:<12} {:<16} {}", rule.category, rule.name, rule.description);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Detection]");
                println!("  Languages:       {}", config.detection.languages.join(", "));
                println!("  Min confidence:  {}", config.detection.min_confidence);
                println!(
                    "  Custom rules:    {}",
                    config.detection.custom_rules.len()
                );
                println!();
                println!("[Redaction]");
                println!("  Style:           {}", config.redaction.style);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(loaded) => {
                    let invalid = loaded.invalid_custom_rules();
                    if invalid.is_empty() {
                        println!("Configuration is valid.");
                    } else {
                        println!("Configuration is valid, but these custom rules will be skipped:");
                        for (pattern, reason) in invalid {
                            println!("  {pattern}: {reason}");
                        }
                    }
                }
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
