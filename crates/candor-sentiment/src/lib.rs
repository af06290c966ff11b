//! Lexical sentiment classification for Candor posts.
//!
//! Every new post is tagged positive, negative or neutral by counting
//! whole-word hits against two fixed workplace-review vocabularies. A net
//! difference of one keyword is not enough to polarize a post.

pub mod classifier;
pub mod lexicon;
pub mod posts;

pub use classifier::{classify_sentiment, score_sentiment, SentimentScore};
pub use lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};
pub use posts::prepare_post;
