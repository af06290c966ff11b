use candor_core::{CoreError, NewPost, PostDraft};
use uuid::Uuid;

use crate::classifier::classify_sentiment;

/// Turn a submitted draft into the record to insert, tagged with its sentiment.
///
/// Blank drafts are rejected before classification.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the draft is missing a required field.
pub fn prepare_post(draft: PostDraft, author_id: Option<Uuid>) -> Result<NewPost, CoreError> {
    draft.validate()?;
    let sentiment = classify_sentiment(&draft.sentiment_text());

    let post = NewPost::from_draft(draft, author_id, sentiment)?;
    tracing::debug!(
        company_id = %post.company_id,
        sentiment = %post.sentiment,
        anonymous = post.is_anonymous,
        "prepared post"
    );
    Ok(post)
}
