//! Integration test: run the `blogq` binary against posts files on disk and
//! check stdout and exit codes.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn blogq(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blogq"))
        .args(args)
        .output()
        .expect("failed to run blogq")
}

fn check(path: &Path) -> (String, i32) {
    let out = blogq(&["check", path.to_str().unwrap()]);
    (
        String::from_utf8(out.stdout).unwrap(),
        out.status.code().expect("terminated by signal"),
    )
}

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// A post that passes both the schema and every semantic rule.
fn post(slug: &str, tags: &str, content: &str) -> String {
    format!(
        r#"{{
  "title": "Post {slug}",
  "slug": "{slug}",
  "publishedAt": "2024-05-01T10:00:00Z",
  "summary": "Summary.",
  "tags": {tags},
  "content": {content}
}}"#
    )
}

fn posts_doc(posts: &[String]) -> String {
    format!(r#"{{ "posts": [{}] }}"#, posts.join(","))
}

#[test]
fn clean_file_exits_zero_with_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "posts.json",
        &posts_doc(&[
            post("hello-world", r#"["rust"]"#, r#""<p>hi</p>""#),
            post("second-post", r#"["a", "b"]"#, r#""<a href=\"x\" target=\"_blank\" rel=\"noopener\">x</a>""#),
        ]),
    );
    let (stdout, code) = check(&path);
    assert_eq!(stdout, "");
    assert_eq!(code, 0);
}

#[test]
fn warnings_alone_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "posts.json",
        &posts_doc(&[post("tagged", r#"["clean", " dirty "]"#, r#""""#)]),
    );
    let (stdout, code) = check(&path);
    assert_eq!(
        stdout,
        "WARN  tagged /posts/0/tags/1: Tag has leading/trailing whitespace.\n"
    );
    assert_eq!(code, 0);
}

#[test]
fn duplicates_and_link_errors_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "posts.json",
        &posts_doc(&[
            post("same", r#"["t"]"#, r#""""#),
            post("same", r#"["t"]"#, r#""<a href=\"x\" target=\"_blank\">x</a>""#),
            post("same", r#"["t"]"#, r#""""#),
        ]),
    );
    let (stdout, code) = check(&path);
    assert_eq!(
        stdout,
        "ERROR same /posts/1/slug: Duplicate slug (also at /posts/0/slug).\n\
         ERROR same /posts/1/content: Found target=\"_blank\" without rel including \"noopener\".\n\
         ERROR same /posts/2/slug: Duplicate slug (also at /posts/0/slug).\n"
    );
    assert_eq!(code, 1);
}

#[test]
fn schema_violation_is_reported_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "posts.json",
        r#"{ "posts": [{ "slug": "My Post", "tags": ["x "] }] }"#,
    );
    let (stdout, code) = check(&path);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "got: {stdout}");
    assert!(lines[0].starts_with("ERROR <schema> /posts/0: "), "got: {}", lines[0]);
    assert_eq!(lines[1], "ERROR My Post /posts/0/slug: Slug violates policy.");
    assert_eq!(lines[2], "WARN  My Post /posts/0/tags/0: Tag has leading/trailing whitespace.");
    assert_eq!(code, 1);
}

#[test]
fn missing_posts_key_is_single_fatal_line() {
    let dir = tempfile::tempdir().unwrap();
    for body in [r#"{ "articles": [] }"#, r#"{ "posts": {} }"#, "[]"] {
        let path = write(&dir, "posts.json", body);
        let (stdout, code) = check(&path);
        assert_eq!(
            stdout,
            format!(
                "ERROR <file> {}: Expected top-level object with key \"posts\": {{ \"posts\": [ ... ] }}\n",
                path.display()
            )
        );
        assert_eq!(code, 1);
    }
}

#[test]
fn invalid_json_is_single_fatal_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "posts.json", "{\n  \"posts\": [\n");
    let (stdout, code) = check(&path);
    let prefix = format!("ERROR <file> {}: Invalid JSON at line ", path.display());
    assert!(stdout.starts_with(&prefix), "got: {stdout}");
    assert_eq!(stdout.lines().count(), 1);
    assert_eq!(code, 1);
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let (stdout, code) = check(&path);
    assert!(
        stdout.starts_with(&format!("ERROR <file> {}: ", path.display())),
        "got: {stdout}"
    );
    assert_eq!(code, 1);
}

#[test]
fn yaml_input_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "posts.yaml",
        r#"
posts:
  - title: Hello
    slug: Hello
    publishedAt: "2024-05-01T10:00:00Z"
    summary: Hi.
    tags: [greeting]
    content: "<p>hi</p>"
"#,
    );
    let (stdout, code) = check(&path);
    assert_eq!(stdout, "ERROR Hello /posts/0/slug: Slug violates policy.\n");
    assert_eq!(code, 1);
}

#[test]
fn json_format_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "posts.json",
        &posts_doc(&[post("tagged", r#"[" dirty"]"#, r#""""#)]),
    );
    let out = blogq(&["check", path.to_str().unwrap(), "--format", "json"]);
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([{
            "severity": "WARN",
            "slug": "tagged",
            "pointer": "/posts/0/tags/0",
            "message": "Tag has leading/trailing whitespace."
        }])
    );
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "posts.json",
        r#"{ "posts": [{ "slug": "a b" }, { "slug": "a b", "tags": [" x"] }, 3] }"#,
    );
    let first = blogq(&["check", path.to_str().unwrap()]);
    let second = blogq(&["check", path.to_str().unwrap()]);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}

#[test]
fn verbose_logging_stays_off_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "posts.json", &posts_doc(&[post("ok", r#"["t"]"#, r#""""#)]));
    let out = blogq(&["-vv", "check", path.to_str().unwrap()]);
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn rules_subcommand_lists_rules() {
    let out = blogq(&["rules"]);
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.starts_with("slug-format: "));
    assert_eq!(out.status.code(), Some(0));
}
