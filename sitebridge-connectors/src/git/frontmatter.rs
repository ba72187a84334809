//! Markdown documents with a `---` delimited frontmatter block.
//!
//! Writing emits a small YAML subset: double-quoted strings, bare booleans
//! and block sequences of strings. Reading is deliberately flat: only
//! `key: value` scalar lines are understood. Inline lists (`[a, b]` or
//! `"a, b"`) are split on commas; block sequences are skipped.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;
use sitebridge_core::{ArticleInput, ContentKind, ContentPage};

use super::config::{GitConfig, SiteGenerator};

/// Date layout written to frontmatter, e.g. `2024-03-01T09:30:00+01:00`.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

static DOCUMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*\n(.*)$").expect("Invalid regex")
});

static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+):\s*(.*)$").expect("Invalid regex"));

// ============================================================================
// Writing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Bool(bool),
    List(&'a [String]),
}

impl<'a> FieldValue<'a> {
    fn text(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

/// Renders the full Markdown file for `article`.
pub fn render_document(
    article: &ArticleInput,
    generator: SiteGenerator,
    now: DateTime<FixedOffset>,
) -> String {
    let date = now.format(DATE_FORMAT).to_string();
    let fields = fields_for(article, generator, &date);
    format!("---\n{}---\n\n{}", emit_yaml(&fields), article.content)
}

/// File name for a new post. Jekyll requires a date prefix.
pub fn file_name(slug: &str, generator: SiteGenerator, now: DateTime<FixedOffset>) -> String {
    match generator {
        SiteGenerator::Jekyll => format!("{}-{slug}.md", now.format("%Y-%m-%d")),
        _ => format!("{slug}.md"),
    }
}

fn fields_for<'a>(
    article: &'a ArticleInput,
    generator: SiteGenerator,
    date: &'a str,
) -> Vec<(&'static str, FieldValue<'a>)> {
    let title = FieldValue::text(&article.title);
    let excerpt = FieldValue::text(article.excerpt.as_deref().unwrap_or_default());
    let tags = FieldValue::List(&article.tags);
    let draft = article.is_draft();

    match generator {
        SiteGenerator::Hugo => vec![
            ("title", title),
            ("date", FieldValue::text(date)),
            ("draft", FieldValue::Bool(draft)),
            ("description", excerpt),
            ("categories", FieldValue::List(&article.categories)),
            ("tags", tags),
        ],
        SiteGenerator::Jekyll => vec![
            ("layout", FieldValue::text("post")),
            ("title", title),
            ("date", FieldValue::text(date)),
            ("categories", FieldValue::Text(Cow::Owned(article.categories.join(" ")))),
            ("tags", tags),
            ("excerpt", excerpt),
        ],
        SiteGenerator::Gatsby | SiteGenerator::NextJs => vec![
            ("title", title),
            ("date", FieldValue::text(date)),
            ("published", FieldValue::Bool(!draft)),
            ("description", excerpt),
            ("tags", tags),
        ],
        SiteGenerator::Astro => vec![
            ("title", title),
            ("pubDate", FieldValue::text(date)),
            ("draft", FieldValue::Bool(draft)),
            ("description", excerpt),
            ("tags", tags),
        ],
        SiteGenerator::Eleventy | SiteGenerator::Other => vec![
            ("title", title),
            ("date", FieldValue::text(date)),
            ("draft", FieldValue::Bool(draft)),
        ],
    }
}

fn emit_yaml(fields: &[(&str, FieldValue<'_>)]) -> String {
    let mut yaml = String::new();
    for (key, value) in fields {
        match value {
            FieldValue::Text(text) => yaml.push_str(&format!("{key}: {}\n", quote(text))),
            FieldValue::Bool(flag) => yaml.push_str(&format!("{key}: {flag}\n")),
            FieldValue::List([]) => yaml.push_str(&format!("{key}: []\n")),
            FieldValue::List(items) => {
                yaml.push_str(&format!("{key}:\n"));
                for item in *items {
                    yaml.push_str(&format!("  - {}\n", quote(item)));
                }
            }
        }
    }
    yaml
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ============================================================================
// Reading
// ============================================================================

/// A Markdown file split into flat frontmatter fields and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownFile {
    /// Scalar frontmatter fields. Later duplicates win.
    pub fields: BTreeMap<String, String>,
    /// Everything after the closing delimiter.
    pub body: String,
}

impl MarkdownFile {
    /// Splits `content`. Files without a frontmatter block are all body.
    pub fn parse(content: &str) -> Self {
        let Some(captures) = DOCUMENT_RE.captures(content) else {
            return Self {
                fields: BTreeMap::new(),
                body: content.to_string(),
            };
        };

        let fields = captures[1]
            .lines()
            .filter_map(|line| {
                let field = FIELD_RE.captures(line.trim())?;
                Some((field[1].to_string(), unquote(field[2].trim())))
            })
            .collect();

        Self {
            fields,
            body: captures[2].to_string(),
        }
    }

    /// First non-empty value among `keys`.
    pub fn get(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }

    /// Inline list value of `key`, split on commas.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.fields.get(key).map(|v| split_list(v)).unwrap_or_default()
    }

    /// Whether the frontmatter marks the file as a draft.
    pub fn is_draft(&self) -> bool {
        self.fields.get("draft").is_some_and(|v| v == "true")
            || self.fields.get("published").is_some_and(|v| v == "false")
    }

    /// Converts the file into a content item.
    ///
    /// `file_name` becomes the id; its stem is the slug.
    pub fn into_content_page(self, file_name: &str, config: &GitConfig, kind: ContentKind) -> ContentPage {
        let slug = file_name.strip_suffix(".md").unwrap_or(file_name).to_string();
        let categories = match (config.generator, self.fields.get("categories")) {
            (SiteGenerator::Jekyll, Some(value)) => {
                value.split_whitespace().map(String::from).collect()
            }
            _ => self.list("categories"),
        };

        ContentPage {
            id: file_name.to_string(),
            title: self.get(&["title"]).unwrap_or(&slug).to_string(),
            excerpt: self.get(&["description", "excerpt"]).unwrap_or_default().to_string(),
            status: if self.is_draft() { "draft" } else { "publish" }.to_string(),
            url: config.post_url(&slug).unwrap_or_default(),
            date: self.get(&["date", "pubDate"]).map(String::from),
            modified_date: self.get(&["lastmod", "modified"]).map(String::from),
            tags: self.list("tags"),
            categories,
            featured_image: self.get(&["image", "cover"]).map(String::from),
            author: self.get(&["author"]).map(String::from),
            kind,
            content: self.body,
            slug,
        }
    }
}

/// Local date-time layouts read as UTC, e.g. Hugo's `2024-01-15T10:00:00`.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Sort key for a frontmatter date.
///
/// Accepts RFC 3339, Jekyll's `YYYY-MM-DD HH:MM:SS +ZZZZ`, offset-less
/// date-times (as UTC) and `YYYY-MM-DD` at midnight UTC.
pub fn date_sort_key(date: Option<&str>) -> Option<i64> {
    let date = date?.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.timestamp());
    }
    if let Ok(parsed) = DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z") {
        return Some(parsed.timestamp());
    }
    if let Some(parsed) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
    {
        return Some(parsed.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
}

/// Strips one pair of surrounding quotes and resolves backslash escapes in
/// double-quoted values.
fn unquote(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let quoted = bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0];
    if !quoted {
        return raw.to_string();
    }

    let inner = &raw[1..raw.len() - 1];
    if bytes[0] == b'\'' {
        return inner.replace("''", "'");
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Splits an inline list value on commas.
fn split_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    value
        .split(',')
        .map(|item| unquote(item.trim()))
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use sitebridge_core::{ArticleStatus, SiteConfig};

    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-01T09:30:00+01:00").unwrap()
    }

    fn config(generator: &str) -> GitConfig {
        GitConfig::from_site(
            &SiteConfig::new("Blog", "git", "https://github.com/me/blog", "t")
                .with_config("siteGenerator", generator)
                .with_config("siteUrl", "https://blog.example"),
        )
    }

    fn article() -> ArticleInput {
        ArticleInput::new("Say \"hi\"", "Body text\n")
            .with_excerpt("Short")
            .with_categories(["Rust", "Web Dev"])
            .with_tags(["async"])
    }

    #[test]
    fn test_hugo_document() {
        let doc = render_document(&article(), SiteGenerator::Hugo, now());
        assert_eq!(
            doc,
            "---\n\
             title: \"Say \\\"hi\\\"\"\n\
             date: \"2024-03-01T09:30:00+01:00\"\n\
             draft: true\n\
             description: \"Short\"\n\
             categories:\n  - \"Rust\"\n  - \"Web Dev\"\n\
             tags:\n  - \"async\"\n\
             ---\n\nBody text\n"
        );
    }

    #[test]
    fn test_hugo_draft_round_trip() {
        let doc = render_document(&article(), SiteGenerator::Hugo, now());
        let page = MarkdownFile::parse(&doc).into_content_page("say-hi.md", &config("hugo"), ContentKind::Post);

        assert_eq!(page.status, "draft");
        assert_eq!(page.title, "Say \"hi\"");
        assert_eq!(page.excerpt, "Short");
        assert_eq!(page.date.as_deref(), Some("2024-03-01T09:30:00+01:00"));
        assert_eq!(page.content, "Body text\n");
        // Block sequences are not read back.
        assert!(page.categories.is_empty());
        assert_eq!(page.url, "https://blog.example/posts/say-hi/");
    }

    #[test]
    fn test_published_flag_inverted() {
        let published = article().with_status(ArticleStatus::Publish);
        let doc = render_document(&published, SiteGenerator::Gatsby, now());
        assert!(doc.contains("published: true\n"));
        let page = MarkdownFile::parse(&doc).into_content_page("a.md", &config("gatsby"), ContentKind::Post);
        assert_eq!(page.status, "publish");

        let doc = render_document(&article(), SiteGenerator::NextJs, now());
        assert!(doc.contains("published: false\n"));
        assert!(MarkdownFile::parse(&doc).is_draft());
    }

    #[test]
    fn test_jekyll_layout_and_categories() {
        let doc = render_document(&article(), SiteGenerator::Jekyll, now());
        assert!(doc.starts_with("---\nlayout: \"post\"\n"));
        assert!(doc.contains("categories: \"Rust Web Dev\"\n"));
        assert!(doc.contains("excerpt: \"Short\"\n"));

        let page = MarkdownFile::parse(&doc).into_content_page(
            "2024-03-01-say-hi.md",
            &config("jekyll"),
            ContentKind::Post,
        );
        assert_eq!(page.categories, vec!["Rust", "Web", "Dev"]);
        assert_eq!(page.excerpt, "Short");
        assert_eq!(page.slug, "2024-03-01-say-hi");
    }

    #[test]
    fn test_astro_and_minimal_layouts() {
        let astro = render_document(&article(), SiteGenerator::Astro, now());
        assert!(astro.contains("pubDate: \"2024-03-01T09:30:00+01:00\"\n"));
        assert!(!astro.contains("\ndate:"));
        let page = MarkdownFile::parse(&astro).into_content_page("a.md", &config("astro"), ContentKind::Post);
        assert_eq!(page.date.as_deref(), Some("2024-03-01T09:30:00+01:00"));

        let minimal = render_document(&ArticleInput::new("T", "B"), SiteGenerator::Other, now());
        assert_eq!(
            minimal,
            "---\ntitle: \"T\"\ndate: \"2024-03-01T09:30:00+01:00\"\ndraft: true\n---\n\nB"
        );
    }

    #[test]
    fn test_empty_lists() {
        let doc = render_document(&ArticleInput::new("T", "B"), SiteGenerator::Hugo, now());
        assert!(doc.contains("categories: []\n"));
        assert!(doc.contains("tags: []\n"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("hello", SiteGenerator::Hugo, now()), "hello.md");
        assert_eq!(file_name("hello", SiteGenerator::Jekyll, now()), "2024-03-01-hello.md");
    }

    #[test]
    fn test_parse_inline_lists_and_fallbacks() {
        let file = MarkdownFile::parse(
            "---\ntitle: 'It''s here'\ntags: [rust, \"web\"]\ncategories: a, b\nlastmod: 2024-02-02\n---\nBody",
        );
        let page = file.into_content_page("post.md", &config("hugo"), ContentKind::Page);
        assert_eq!(page.title, "It's here");
        assert_eq!(page.tags, vec!["rust", "web"]);
        assert_eq!(page.categories, vec!["a", "b"]);
        assert_eq!(page.modified_date.as_deref(), Some("2024-02-02"));
        assert_eq!(page.content, "Body");
        assert_eq!(page.kind, ContentKind::Page);
        assert!(page.date.is_none());
    }

    #[test]
    fn test_parse_without_frontmatter() {
        let page = MarkdownFile::parse("# Just markdown").into_content_page(
            "notes.md",
            &config("hugo"),
            ContentKind::Post,
        );
        assert_eq!(page.title, "notes");
        assert_eq!(page.content, "# Just markdown");
        assert_eq!(page.status, "publish");
    }

    #[test]
    fn test_multiline_excerpt_survives() {
        let input = ArticleInput::new("T", "B").with_excerpt("line one\nline two");
        let doc = render_document(&input, SiteGenerator::Hugo, now());
        let file = MarkdownFile::parse(&doc);
        assert_eq!(file.get(&["description"]), Some("line one\nline two"));
    }

    #[test]
    fn test_date_sort_key() {
        assert_eq!(date_sort_key(Some("1970-01-02")), Some(86_400));
        assert_eq!(date_sort_key(Some("1970-01-01T01:00:00+01:00")), Some(0));
        assert!(date_sort_key(Some("yesterday")).is_none());
        assert!(date_sort_key(None).is_none());
    }

    #[test]
    fn test_date_sort_key_generator_layouts() {
        assert_eq!(date_sort_key(Some("2024-01-15T10:00:00Z")), Some(1_705_312_800));
        assert_eq!(date_sort_key(Some("2024-01-15 10:00:00 +0100")), Some(1_705_309_200));
        assert_eq!(date_sort_key(Some("2024-01-15T10:00:00")), Some(1_705_312_800));
        assert_eq!(date_sort_key(Some("2024-01-15 10:00:00")), Some(1_705_312_800));
        assert_eq!(date_sort_key(Some("2024-01-15 10:00")), Some(1_705_312_800));
        assert_eq!(date_sort_key(Some("2024-01-15")), Some(1_705_276_800));
    }
}
