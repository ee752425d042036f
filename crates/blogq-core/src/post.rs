//! # Post View
//!
//! Post records are semi-structured: any field may be missing or hold the
//! wrong type, and semantic rules must never fail because of that. [`Post`]
//! borrows one raw record together with its position in the `posts` array
//! and exposes safe-default accessors.

use serde_json::Value;

/// Read-only view over the post at `index` of the `posts` array.
#[derive(Debug, Clone, Copy)]
pub struct Post<'a> {
    index: usize,
    raw: &'a Value,
}

impl<'a> Post<'a> {
    pub fn new(index: usize, raw: &'a Value) -> Self {
        Self { index, raw }
    }

    /// Position of this post in the `posts` array.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The underlying record.
    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// The `slug` field when it is a non-empty string.
    pub fn slug(&self) -> Option<&'a str> {
        self.str_field("slug").filter(|s| !s.is_empty())
    }

    /// The slug shown in diagnostics: the post's own slug, or `<post:{i}>`.
    pub fn display_slug(&self) -> String {
        match self.slug() {
            Some(slug) => slug.to_string(),
            None => format!("<post:{}>", self.index),
        }
    }

    /// The HTML `content`, or `""` when absent or not a string.
    pub fn content(&self) -> &'a str {
        self.str_field("content").unwrap_or("")
    }

    /// The `tags` entries with their subindex. Non-array `tags` yield nothing;
    /// entries are returned as-is, so callers decide how to treat non-strings.
    pub fn tags(&self) -> impl Iterator<Item = (usize, &'a Value)> + 'a {
        self.raw
            .get("tags")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .enumerate()
    }

    /// JSON Pointer to a top-level field of this post.
    pub fn pointer(&self, field: &str) -> String {
        format!("/posts/{}/{}", self.index, field)
    }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.raw.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_post() {
        let raw = json!({
            "slug": "hello",
            "content": "<p>hi</p>",
            "tags": ["a", "b"]
        });
        let post = Post::new(3, &raw);
        assert_eq!(post.index(), 3);
        assert_eq!(post.slug(), Some("hello"));
        assert_eq!(post.display_slug(), "hello");
        assert_eq!(post.content(), "<p>hi</p>");
        let tags: Vec<_> = post.tags().map(|(k, t)| (k, t.as_str().unwrap())).collect();
        assert_eq!(tags, vec![(0, "a"), (1, "b")]);
        assert_eq!(post.pointer("slug"), "/posts/3/slug");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let raw = json!({});
        let post = Post::new(7, &raw);
        assert_eq!(post.slug(), None);
        assert_eq!(post.display_slug(), "<post:7>");
        assert_eq!(post.content(), "");
        assert_eq!(post.tags().count(), 0);
    }

    #[test]
    fn wrong_types_use_defaults() {
        let raw = json!({
            "slug": 42,
            "content": ["<a target=\"_blank\">"],
            "tags": " not-a-list "
        });
        let post = Post::new(0, &raw);
        assert_eq!(post.slug(), None);
        assert_eq!(post.display_slug(), "<post:0>");
        assert_eq!(post.content(), "");
        assert_eq!(post.tags().count(), 0);
    }

    #[test]
    fn empty_slug_is_absent() {
        let raw = json!({ "slug": "" });
        let post = Post::new(1, &raw);
        assert_eq!(post.slug(), None);
        assert_eq!(post.display_slug(), "<post:1>");
    }

    #[test]
    fn non_object_post_is_tolerated() {
        for raw in [json!(null), json!(5), json!("slug"), json!([1, 2])] {
            let post = Post::new(2, &raw);
            assert_eq!(post.slug(), None);
            assert_eq!(post.content(), "");
            assert_eq!(post.tags().count(), 0);
        }
    }
}
