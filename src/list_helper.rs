//! Aggregation helpers over a list of blogs
//!
//! Pure functions with no I/O. Empty input yields `0` for sums and `None`
//! for "best of" queries. Like sums saturate at `u64::MAX`.

use crate::blogs::Blog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Author with the highest number of blogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    /// Author name; `None` groups blogs without an author
    pub author: Option<String>,
    /// Number of blogs by the author
    pub blogs: u64,
}

/// Author with the highest cumulative likes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    /// Author name; `None` groups blogs without an author
    pub author: Option<String>,
    /// Sum of likes over the author's blogs
    pub likes: u64,
}

/// Sum of likes across all blogs
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |total, blog| total.saturating_add(blog.likes))
}

/// The blog with the most likes
///
/// On a tie the earliest blog in the list wins.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs
        .iter()
        .reduce(|max, blog| if blog.likes > max.likes { blog } else { max })
}

/// The author who wrote the most blogs
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    top_author(blogs, |_| 1).map(|(author, blogs)| AuthorBlogs { author, blogs })
}

/// The author whose blogs have the most likes in total
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    top_author(blogs, |blog| blog.likes).map(|(author, likes)| AuthorLikes { author, likes })
}

/// Group blogs by author, summing `weight` per blog, and pick the largest total.
///
/// Authors are kept in order of first appearance so a tie resolves to the
/// author seen first.
fn top_author<F>(blogs: &[Blog], weight: F) -> Option<(Option<String>, u64)>
where
    F: Fn(&Blog) -> u64,
{
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut totals: Vec<(Option<&str>, u64)> = Vec::new();

    for blog in blogs {
        let author = blog.author.as_deref();
        let slot = *index.entry(author).or_insert_with(|| {
            totals.push((author, 0));
            totals.len() - 1
        });
        totals[slot].1 = totals[slot].1.saturating_add(weight(blog));
    }

    totals
        .into_iter()
        .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })
        .map(|(author, total)| (author.map(str::to_string), total))
}
