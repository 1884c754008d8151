//! Converts a scraped post into the body expected by `POST /api/admin/set-puzzle`.
//!
//! INPUT is a JSON object or a JSONL archive (the last record is used).
//! Reads stdin when INPUT is omitted or `-`.

use std::io::Read;
use std::{fs, io};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;

use guess_core::post_format::{MIN_KARMA, RawPost, ensure_min_karma, ensure_sfw, format_puzzle};
use guess_core::{date_key, parse_date_key, puzzle_date};

#[derive(Debug, Parser)]
#[command(name = "format-post", about = "Formats a scraped post as a set-puzzle payload")]
struct Args {
    /// JSON post or JSONL archive; stdin when omitted or `-`
    input: Option<String>,

    /// Puzzle date (YYYY-MM-DD), defaults to today in UTC
    #[arg(long, value_parser = parse_date_key)]
    date: Option<NaiveDate>,

    /// Also write the payload to this file
    #[arg(long)]
    output: Option<String>,
}

fn read_input(input: Option<&str>) -> Result<String> {
    match input.filter(|path| *path != "-") {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {}", path)),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn parse_post(text: &str) -> Result<RawPost> {
    if let Ok(post) = serde_json::from_str::<RawPost>(text) {
        return Ok(post);
    }

    let last_record = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .context("Input is empty")?;
    serde_json::from_str(last_record).context("Input is neither a JSON post nor a JSONL archive")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args = Args::parse();
    let post = parse_post(&read_input(args.input.as_deref())?)?;

    ensure_sfw(&post)?;
    ensure_min_karma(&post, MIN_KARMA)?;

    let date = date_key(args.date.unwrap_or_else(|| puzzle_date(Utc::now())));

    let payload = format_puzzle(&post, &date);
    let json = serde_json::to_string_pretty(&payload)?;

    if let Some(path) = &args.output {
        fs::write(path, &json).with_context(|| format!("Failed to write {}", path))?;
        info!("Puzzle saved to {}", path);
    }

    info!("Puzzle payload for r/{} on {}", post.subreddit, date);
    println!("{}", json);
    Ok(())
}
