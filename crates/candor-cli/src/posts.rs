//! Post-level command handlers: sentiment classification and draft preparation.

use std::io::Read;
use std::path::Path;

use candor_core::PostDraft;
use uuid::Uuid;

use crate::input::read_json;

/// Classify `text`, or stdin when no text is given.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub(crate) fn run_classify(text: Option<String>, verbose: bool) -> anyhow::Result<()> {
    let text = if let Some(text) = text {
        text
    } else {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    };

    let score = candor_sentiment::score_sentiment(&text);
    if verbose {
        println!("{:<10}{:<10}{:<8}LABEL", "POSITIVE", "NEGATIVE", "DELTA");
        println!(
            "{:<10}{:<10}{:<8}{}",
            score.positive, score.negative, score.delta, score.label
        );
    } else {
        println!("{}", score.label);
    }
    Ok(())
}

/// Validate a draft, classify it, and print the resulting insert record.
///
/// # Errors
///
/// Returns an error if the draft cannot be read or fails validation.
pub(crate) fn run_draft(input: &Path, author: Option<Uuid>) -> anyhow::Result<()> {
    let draft: PostDraft = read_json(input)?;
    let post = candor_sentiment::prepare_post(draft, author)?;

    tracing::info!(company = %post.company_name, sentiment = %post.sentiment, "draft accepted");
    println!("{}", serde_json::to_string_pretty(&post)?);
    Ok(())
}
