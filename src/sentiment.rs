// src/sentiment.rs

use log::debug;
use std::collections::HashMap;

use crate::models::SocialPost;

/// Average sentiment score per category over a recent window of posts.
///
/// A category with no posts in the window is absent from the map. Absence
/// means "no signal": consumers must not read it as neutral, though the
/// fusion pass adds zero for absent categories.
pub fn average_sentiment_by_category(posts: &[SocialPost]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
    for post in posts {
        let entry = totals.entry(post.category.clone()).or_insert((0.0, 0));
        entry.0 += post.sentiment_score;
        entry.1 += 1;
    }

    let averages: HashMap<String, f64> = totals
        .into_iter()
        .map(|(category, (sum, count))| (category, sum / count as f64))
        .collect();

    debug!(
        "Aggregated sentiment for {} categories over {} posts",
        averages.len(),
        posts.len()
    );
    averages
}
