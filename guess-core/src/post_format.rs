//! Turns a scraped Reddit post into a puzzle payload ready for upload.

use anyhow::{Result, bail};
use guess_types::{Clues, PuzzlePayload};
use serde::Deserialize;

pub const MAX_BODY_LENGTH: usize = 500;
pub const MAX_COMMENT_LENGTH: usize = 200;
pub const MIN_KARMA: i64 = 1000;

const INVALID_COMMENTS: [&str; 3] = ["[removed]", "[deleted]", ""];

const NSFW_TOKENS: [&str; 14] = [
    "nsfw", "porn", "sex ", "sexual", "explicit", "nude", "nudity", "rape", "gore", "blood",
    "violence", "fuck", "dick", "pussy",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum YearField {
    Number(i64),
    Text(String),
}

impl YearField {
    fn display(&self) -> Option<String> {
        match self {
            YearField::Number(0) => None,
            YearField::Number(year) => Some(year.to_string()),
            YearField::Text(text) if text.trim().is_empty() => None,
            YearField::Text(text) => Some(text.trim().to_string()),
        }
    }
}

/// Post record as produced by the content pipeline. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub redacted_title: Option<String>,
    pub redacted_selftext: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub upvote_ratio: f64,
    #[serde(default)]
    pub top_comment: String,
    #[serde(default)]
    pub subreddit_subscribers: u64,
    pub subreddit_created_year: Option<YearField>,
    pub subreddit_rule: Option<String>,
}

/// Compact subscriber count: `19.2M`, `850K`, `512`.
pub fn format_subscribers(count: u64) -> String {
    fn compact(value: f64, suffix: &str) -> String {
        let formatted = format!("{:.1}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        format!("{}{}", trimmed, suffix)
    }

    if count >= 1_000_000 {
        compact(count as f64 / 1_000_000.0, "M")
    } else if count >= 1_000 {
        compact(count as f64 / 1_000.0, "K")
    } else {
        count.to_string()
    }
}

pub fn format_clues(post: &RawPost) -> Clues {
    let upvote_ratio = if post.upvote_ratio > 0.0 {
        format!("{}% upvoted", (post.upvote_ratio * 100.0) as i64)
    } else {
        "Unknown".to_string()
    };

    let comment = post.top_comment.trim();
    let top_comment = if INVALID_COMMENTS
        .iter()
        .any(|invalid| comment.eq_ignore_ascii_case(invalid))
    {
        "No valid comments".to_string()
    } else if post.top_comment.chars().count() > MAX_COMMENT_LENGTH {
        let cut: String = post
            .top_comment
            .chars()
            .take(MAX_COMMENT_LENGTH - 3)
            .collect();
        format!("\"{}...\"", cut)
    } else {
        format!("\"{}\"", post.top_comment)
    };

    let year = post.subreddit_created_year.as_ref().and_then(YearField::display);
    let community_stats = match (post.subreddit_subscribers, year) {
        (0, _) => "Unknown".to_string(),
        (subs, Some(year)) => format!("{} members, founded {}", format_subscribers(subs), year),
        (subs, None) => format!("{} members", format_subscribers(subs)),
    };

    let sidebar_rule = post
        .subreddit_rule
        .clone()
        .unwrap_or_else(|| "No specific rules".to_string());

    Clues {
        upvote_ratio,
        top_comment,
        community_stats,
        sidebar_rule,
    }
}

/// Cuts long bodies, preferring a word boundary in the last 30% of the limit.
pub fn truncate_body(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_length).collect();
    if let Some(byte_index) = truncated.rfind(' ') {
        let char_index = truncated[..byte_index].chars().count();
        if char_index as f64 > max_length as f64 * 0.7 {
            truncated.truncate(byte_index);
        }
    }

    format!("{}...", truncated.trim_end())
}

pub fn is_nsfw(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NSFW_TOKENS.iter().any(|token| lowered.contains(token))
}

pub fn ensure_sfw(post: &RawPost) -> Result<()> {
    if is_nsfw(&post.title) || is_nsfw(&post.selftext) {
        bail!("Post appears to be NSFW. Please retry to fetch a SFW post.");
    }
    Ok(())
}

pub fn ensure_min_karma(post: &RawPost, min_karma: i64) -> Result<()> {
    if post.score.abs() < min_karma {
        bail!(
            "Post has {} karma, need at least {}. Please retry.",
            post.score,
            min_karma
        );
    }
    Ok(())
}

/// Builds the set-puzzle payload, preferring redacted text over the raw post.
pub fn format_puzzle(post: &RawPost, date: &str) -> PuzzlePayload {
    let body = post
        .redacted_selftext
        .as_deref()
        .unwrap_or(&post.selftext);

    PuzzlePayload {
        post_title: post
            .redacted_title
            .clone()
            .unwrap_or_else(|| post.title.clone()),
        post_body: truncate_body(body, MAX_BODY_LENGTH),
        correct_subreddit: post.subreddit.clone(),
        clues: format_clues(post),
        date: Some(date.to_string()),
        puzzle_number: None,
    }
}
