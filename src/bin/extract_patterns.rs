//! Extract a style profile from a corpus file.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin extract-patterns -- data/raw/boardy.json
//! cargo run --bin extract-patterns -- data/raw/boardy.json out/patterns.json
//! ```
//!
//! Without an output path the profile is stored as
//! `<data_dir>/processed/patterns_<stem>.json`. The corpus report is written
//! next to the profile as `<profile stem>_report.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use stylecraft::corpus::CorpusLoader;
use stylecraft::patterns::{CorpusReport, PatternExtractor, StyleProfile};
use stylecraft::profiles::ProfileStore;
use stylecraft::SynthConfig;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,stylecraft=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: extract-patterns <corpus.json> [output.json]");
    };
    let output = args.next().map(PathBuf::from);

    let config = SynthConfig::from_env().context("reading configuration from environment")?;
    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .context("input path has no file name")?;

    let posts = CorpusLoader::load_file(&name, &input)
        .with_context(|| format!("loading {}", input.display()))?;
    println!("Loaded {} posts from {}\n", posts.len(), input.display());

    let profile = PatternExtractor::new(config.limits)
        .extract(&posts)
        .with_context(|| format!("extracting patterns from {}", input.display()))?;
    let report = CorpusReport::build(input.display().to_string(), &posts);

    print_summary(&profile, &report);

    let profile_path = match output {
        Some(path) => {
            write_json(&path, &profile)?;
            path
        }
        None => ProfileStore::new(&config.data_dir)
            .save(&name, &profile)
            .context("saving profile")?,
    };
    let report_path = report_path(&profile_path);
    write_json(&report_path, &report)?;

    println!("\nSaved profile to {}", profile_path.display());
    println!("Saved report to {}", report_path.display());
    Ok(())
}

fn print_summary(profile: &StyleProfile, report: &CorpusReport) {
    println!("Opening patterns ({}):", profile.opening_patterns.len());
    for (i, opening) in profile.opening_patterns.iter().take(5).enumerate() {
        println!("  {}. {}", i + 1, clip(opening, 80));
    }

    println!("\nSentence starters ({}):", profile.sentence_starters.len());
    for (i, starter) in profile.sentence_starters.iter().take(8).enumerate() {
        println!("  {}. '{}...' x{}", i + 1, starter.text, starter.count);
    }

    println!("\nCommon phrases ({}):", profile.common_phrases.len());
    for (i, phrase) in profile.common_phrases.iter().take(8).enumerate() {
        println!("  {}. '{}' x{}", i + 1, phrase.text, phrase.count);
    }

    if !profile.formatting_flags.is_empty() {
        println!("\nFormatting:");
        for flag in &profile.formatting_flags {
            println!("  - {}", flag.as_str().replace('_', " "));
        }
    }

    let tone = &profile.tone_indicators;
    println!("\nTone:");
    println!("  questions: {}, exclamations: {}", tone.questions, tone.exclamations);
    println!(
        "  direct address: {}, first person: {}",
        tone.direct_address, tone.first_person
    );

    if !profile.call_to_actions.is_empty() {
        println!("\nCalls to action:");
        for (i, cta) in profile.call_to_actions.iter().take(3).enumerate() {
            println!("  {}. {}", i + 1, cta);
        }
    }

    let s = &profile.structure;
    println!("\nStructure:");
    println!(
        "  average length: {:.0} chars (range: {}-{})",
        s.avg_length, s.min_length, s.max_length
    );
    println!("  average sentences: {:.1}", s.avg_sentences);
    println!("  average paragraphs: {:.1}", s.avg_paragraphs);
    println!("  average line breaks: {:.1}", s.avg_line_breaks);

    let vocabulary: Vec<&str> = profile.vocabulary.iter().take(15).map(String::as_str).collect();
    println!("\nVocabulary: {}", vocabulary.join(", "));

    let emoji = &report.emoji_usage;
    println!("\nEmoji: total {}, unique {}", emoji.total, emoji.unique);
    if !emoji.most_common.is_empty() {
        let top: Vec<&str> = emoji.most_common.iter().take(5).map(|e| e.emoji.as_str()).collect();
        println!("  most common: {}", top.join(" "));
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn report_path(profile_path: &Path) -> PathBuf {
    let stem = profile_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "patterns".to_string());
    profile_path.with_file_name(format!("{stem}_report.json"))
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
