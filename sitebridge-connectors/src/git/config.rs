//! Typed view of a Git site's configuration map.

use std::fmt;

use sitebridge_core::SiteConfig;

const DEFAULT_BRANCH: &str = "main";
const DEFAULT_CONTENT_PATH: &str = "content/posts";

// ============================================================================
// Provider
// ============================================================================

/// Hosting platform of the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GitProvider {
    /// github.com, through the REST v3 API.
    #[default]
    GitHub,
    /// gitlab.com, through the v4 API.
    GitLab,
    /// bitbucket.org. Accepted in configuration, no API support.
    Bitbucket,
    /// Anything else.
    Other(String),
}

impl GitProvider {
    /// Parses the `provider` config value, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "github" => Self::GitHub,
            "gitlab" => Self::GitLab,
            "bitbucket" => Self::Bitbucket,
            other => Self::Other(other.to_string()),
        }
    }

    /// Config name of the provider.
    pub fn as_str(&self) -> &str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for GitProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Site Generator
// ============================================================================

/// Static site generator, which decides the frontmatter layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiteGenerator {
    /// Hugo: `date`, boolean `draft`, `description`.
    #[default]
    Hugo,
    /// Jekyll: `layout: post`, date-prefixed file names.
    Jekyll,
    /// Gatsby: inverted `published` flag.
    Gatsby,
    /// Next.js: same layout as Gatsby.
    NextJs,
    /// Astro: `pubDate` instead of `date`.
    Astro,
    /// Eleventy: minimal layout.
    Eleventy,
    /// Any other generator: minimal layout.
    Other,
}

impl SiteGenerator {
    /// Parses the `siteGenerator` config value. Unknown names map to
    /// [`SiteGenerator::Other`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hugo" => Self::Hugo,
            "jekyll" => Self::Jekyll,
            "gatsby" => Self::Gatsby,
            "nextjs" | "next.js" => Self::NextJs,
            "astro" => Self::Astro,
            "eleventy" | "11ty" => Self::Eleventy,
            _ => Self::Other,
        }
    }
}

// ============================================================================
// Git Config
// ============================================================================

/// Git adapter settings read from [`SiteConfig::config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitConfig {
    /// Hosting platform.
    pub provider: GitProvider,
    /// Branch that receives commits and is read from.
    pub branch: String,
    /// Directory holding posts, without surrounding slashes.
    pub content_path: String,
    /// Frontmatter flavor.
    pub generator: SiteGenerator,
    /// Public URL of the deployed site, without trailing slash.
    pub site_url: Option<String>,
    /// Directory holding pages, when the site has one.
    pub pages_path: Option<String>,
}

impl GitConfig {
    /// Reads the configuration, applying defaults.
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            provider: site
                .config_str("provider")
                .map(GitProvider::parse)
                .unwrap_or_default(),
            branch: site.config_or("branch", DEFAULT_BRANCH).to_string(),
            content_path: trim_path(site.config_or("contentPath", DEFAULT_CONTENT_PATH)),
            generator: site
                .config_str("siteGenerator")
                .map(SiteGenerator::parse)
                .unwrap_or_default(),
            site_url: site
                .config_str("siteUrl")
                .map(|url| url.trim_end_matches('/').to_string()),
            pages_path: site
                .config_str("pagesPath")
                .map(trim_path)
                .filter(|p| !p.is_empty()),
        }
    }

    /// Public URL of a post, when `siteUrl` is configured.
    pub fn post_url(&self, slug: &str) -> Option<String> {
        self.site_url
            .as_ref()
            .map(|base| format!("{base}/posts/{slug}/"))
    }

    /// Repository path of a file inside `dir`.
    pub fn file_path(dir: &str, name: &str) -> String {
        if dir.is_empty() {
            name.to_string()
        } else {
            format!("{dir}/{name}")
        }
    }
}

fn trim_path(path: &str) -> String {
    path.trim().trim_matches('/').to_string()
}
