use std::collections::HashMap;

use serde::Serialize;

pub const DEFAULT_TAG_CLOUD_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Display weight of a tag relative to the most used tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSize {
    Small,
    Medium,
    Large,
}

impl TagSize {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TagSize::Small => "small",
            TagSize::Medium => "medium",
            TagSize::Large => "large",
        }
    }
}

/// Count tag usage across posts and return the `limit` most used.
///
/// Every occurrence counts. Tags with equal counts keep the order in which
/// they were first seen.
#[must_use]
pub fn top_tags<'a, I>(tag_lists: I, limit: usize) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut counts: Vec<TagCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for tag in tag_lists.into_iter().flatten() {
        if let Some(&i) = index.get(tag.as_str()) {
            counts[i].count += 1;
        } else {
            index.insert(tag.as_str(), counts.len());
            counts.push(TagCount {
                tag: tag.clone(),
                count: 1,
            });
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Bucket `count` against the largest count in the cloud.
#[must_use]
pub fn tag_size(count: usize, max_count: usize) -> TagSize {
    if max_count == 0 {
        return TagSize::Small;
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = count as f64 / max_count as f64;

    if ratio > 0.7 {
        TagSize::Large
    } else if ratio > 0.4 {
        TagSize::Medium
    } else {
        TagSize::Small
    }
}
