//! # Semantic Rules
//!
//! Policy checks that go beyond structural schema conformance. Each rule
//! looks at one post at a time and pushes zero or more diagnostics.
//!
//! ## Ordering
//!
//! [`RuleRegistry::check`] walks posts in index order and, for each post,
//! runs rules in registration order. Output is therefore sorted by post
//! index first and rule order second, and is identical across runs.
//!
//! ## State
//!
//! Rules may keep state across posts within one run (slug uniqueness does).
//! A registry is built fresh for every run, so nothing leaks between runs.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::post::Post;

/// Allowed slug shape: `[a-z0-9]+` segments joined by single hyphens.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_REGEX.get_or_init(|| Regex::new(SLUG_PATTERN).expect("invalid slug pattern"))
}

/// True when `slug` satisfies the slug policy.
pub fn is_valid_slug(slug: &str) -> bool {
    slug_regex().is_match(slug)
}

/// A semantic check applied to every post.
pub trait SemanticRule {
    /// Stable identifier (e.g. `"slug-format"`).
    fn id(&self) -> &'static str;

    /// One-line human-readable description.
    fn description(&self) -> &'static str;

    /// Inspect one post. Must not panic on malformed data.
    fn check(&mut self, post: &Post<'_>, out: &mut Vec<Diagnostic>);
}

/// Slugs must be lowercase alphanumeric segments separated by single hyphens.
#[derive(Debug, Default)]
pub struct SlugFormat;

impl SemanticRule for SlugFormat {
    fn id(&self) -> &'static str {
        "slug-format"
    }

    fn description(&self) -> &'static str {
        "Slug must be lowercase letters and digits joined by single hyphens."
    }

    fn check(&mut self, post: &Post<'_>, out: &mut Vec<Diagnostic>) {
        if let Some(slug) = post.slug() {
            if !is_valid_slug(slug) {
                out.push(Diagnostic::error(
                    post.display_slug(),
                    post.pointer("slug"),
                    "Slug violates policy.",
                ));
            }
        }
    }
}

/// Every slug may appear once; later occurrences point back at the first.
#[derive(Debug, Default)]
pub struct SlugUnique {
    first_seen: HashMap<String, usize>,
}

impl SemanticRule for SlugUnique {
    fn id(&self) -> &'static str {
        "slug-unique"
    }

    fn description(&self) -> &'static str {
        "Slug must not repeat an earlier post's slug."
    }

    fn check(&mut self, post: &Post<'_>, out: &mut Vec<Diagnostic>) {
        let Some(slug) = post.slug() else {
            return;
        };
        match self.first_seen.get(slug) {
            Some(&first) => out.push(Diagnostic::error(
                post.display_slug(),
                post.pointer("slug"),
                format!("Duplicate slug (also at /posts/{first}/slug)."),
            )),
            None => {
                self.first_seen.insert(slug.to_string(), post.index());
            }
        }
    }
}

/// Links opened in a new browsing context must carry `rel="noopener"`.
///
/// This is a substring check over the raw HTML, not a parse: any
/// `target="_blank"` requires both a `rel=` and a `noopener` somewhere in
/// the content.
#[derive(Debug, Default)]
pub struct ExternalLinkSafety;

impl SemanticRule for ExternalLinkSafety {
    fn id(&self) -> &'static str {
        "external-link-safety"
    }

    fn description(&self) -> &'static str {
        r#"Content with target="_blank" must declare rel including "noopener"."#
    }

    fn check(&mut self, post: &Post<'_>, out: &mut Vec<Diagnostic>) {
        let html = post.content();
        if html.contains(r#"target="_blank""#)
            && (!html.contains("rel=") || !html.contains("noopener"))
        {
            out.push(Diagnostic::error(
                post.display_slug(),
                post.pointer("content"),
                r#"Found target="_blank" without rel including "noopener"."#,
            ));
        }
    }
}

/// Tags should not carry leading or trailing whitespace.
#[derive(Debug, Default)]
pub struct TagWhitespace;

impl SemanticRule for TagWhitespace {
    fn id(&self) -> &'static str {
        "tag-whitespace"
    }

    fn description(&self) -> &'static str {
        "Tags must not have leading or trailing whitespace."
    }

    fn check(&mut self, post: &Post<'_>, out: &mut Vec<Diagnostic>) {
        for (k, tag) in post.tags() {
            if let Some(tag) = tag.as_str() {
                if tag != tag.trim() {
                    out.push(Diagnostic::warn(
                        post.display_slug(),
                        format!("{}/{k}", post.pointer("tags")),
                        "Tag has leading/trailing whitespace.",
                    ));
                }
            }
        }
    }
}

/// Id and description of a registered rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMetadata {
    pub id: &'static str,
    pub description: &'static str,
}

/// Ordered set of semantic rules for a single run.
pub struct RuleRegistry {
    rules: Vec<Box<dyn SemanticRule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard rule set, in reporting order: slug format, slug
    /// uniqueness, external-link safety, tag whitespace.
    pub fn default_rules() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SlugFormat));
        registry.register(Box::new(SlugUnique::default()));
        registry.register(Box::new(ExternalLinkSafety));
        registry.register(Box::new(TagWhitespace));
        registry
    }

    /// Append a rule; it runs after every rule registered before it.
    pub fn register(&mut self, rule: Box<dyn SemanticRule>) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_metadata(&self) -> Vec<RuleMetadata> {
        self.rules
            .iter()
            .map(|r| RuleMetadata {
                id: r.id(),
                description: r.description(),
            })
            .collect()
    }

    /// Run every rule over every post and collect all diagnostics.
    ///
    /// Consumes the registry: rule state belongs to exactly one run.
    pub fn check(mut self, posts: &[Value]) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for (index, raw) in posts.iter().enumerate() {
            let post = Post::new(index, raw);
            for rule in &mut self.rules {
                rule.check(&post, &mut out);
            }
        }
        tracing::debug!(
            posts = posts.len(),
            rules = self.rules.len(),
            diagnostics = out.len(),
            "semantic checks complete"
        );
        out
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::default_rules()
    }
}

/// Run the standard rule set over `posts`.
pub fn semantic_diagnostics(posts: &[Value]) -> Vec<Diagnostic> {
    RuleRegistry::default_rules().check(posts)
}
