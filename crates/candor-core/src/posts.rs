//! Post drafts as submitted by the "new post" form, and the record that gets
//! persisted once a draft is accepted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, SentimentLabel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub company_id: Uuid,
    pub company_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl PostDraft {
    /// Add a tag after trimming it.
    ///
    /// Returns `false` when the trimmed tag is empty or already present.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Check that the draft can be submitted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first blank required field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("title", &self.title),
            ("content", &self.content),
            ("company_name", &self.company_name),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!("{field} must be non-empty")));
            }
        }
        Ok(())
    }

    /// Text handed to the sentiment classifier: title and body joined by a space.
    #[must_use]
    pub fn sentiment_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// A post ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub company_id: Uuid,
    pub company_name: String,
    /// Always `None` for anonymous posts.
    pub user_id: Option<Uuid>,
    pub sentiment: SentimentLabel,
    pub tags: Vec<String>,
    pub is_anonymous: bool,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comment_count: u32,
}

impl NewPost {
    /// Build the insert record from a validated draft.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the draft fails [`PostDraft::validate`].
    pub fn from_draft(
        draft: PostDraft,
        author_id: Option<Uuid>,
        sentiment: SentimentLabel,
    ) -> Result<Self, CoreError> {
        draft.validate()?;

        let user_id = if draft.is_anonymous { None } else { author_id };

        Ok(Self {
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            company_id: draft.company_id,
            company_name: draft.company_name,
            user_id,
            sentiment,
            tags: draft.tags,
            is_anonymous: draft.is_anonymous,
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
        })
    }
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;
