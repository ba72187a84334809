//! GitHub and GitLab content APIs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use sitebridge_core::{RemoteId, SiteConfig};
use sitebridge_fetch::{HttpRequest, RequestExecutor};
use url::form_urlencoded::byte_serialize;

use super::config::{GitConfig, GitProvider};
use super::error::GitError;
use crate::fields::{first_remote_id, first_str};

const GITHUB_API: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const GITLAB_API: &str = "https://gitlab.com/api/v4";
const GITLAB_TREE_PAGE_SIZE: u32 = 100;

const KNOWN_HOSTS: &[&str] = &["github.com/", "gitlab.com/", "bitbucket.org/"];

/// Extracts `owner/name` from a repository URL.
///
/// Handles `https://`, `www.`, SSH `git@host:` forms and a trailing `.git`.
pub fn repo_path(url: &str) -> String {
    let mut path = url.trim();
    for scheme in ["https://", "http://"] {
        if let Some(rest) = path.strip_prefix(scheme) {
            path = rest;
        }
    }
    if let Some(rest) = path.strip_prefix("git@") {
        path = rest.split_once(':').map_or(rest, |(_, repo)| repo);
    }
    path = path.strip_prefix("www.").unwrap_or(path);
    for host in KNOWN_HOSTS {
        if let Some(rest) = path.strip_prefix(host) {
            path = rest;
        }
    }

    let path = path.trim_matches('/');
    path.strip_suffix(".git").unwrap_or(path).trim_matches('/').to_string()
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

// ============================================================================
// Repository Client
// ============================================================================

/// A Markdown file found in a repository directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// File name, used as the content id.
    pub name: String,
    /// Path from the repository root.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostApi {
    GitHub { repo_url: String },
    GitLab { project_url: String },
}

/// Content API client bound to one site's repository and branch.
pub(crate) struct RepoClient<'a> {
    executor: &'a RequestExecutor,
    api: HostApi,
    token: &'a str,
    branch: &'a str,
}

impl<'a> RepoClient<'a> {
    /// Binds a client to the site's repository.
    pub(crate) fn new(
        executor: &'a RequestExecutor,
        site: &'a SiteConfig,
        config: &'a GitConfig,
    ) -> Result<Self, GitError> {
        let repo = repo_path(&site.base_url);
        if repo.is_empty() {
            return Err(GitError::InvalidRepository(site.base_url.clone()));
        }

        let api = match &config.provider {
            GitProvider::GitHub => HostApi::GitHub {
                repo_url: format!("{GITHUB_API}/repos/{repo}"),
            },
            GitProvider::GitLab => HostApi::GitLab {
                project_url: format!("{GITLAB_API}/projects/{}", encode(&repo)),
            },
            other => return Err(GitError::UnsupportedProvider(other.to_string())),
        };

        Ok(Self {
            executor,
            api,
            token: &site.api_token,
            branch: &config.branch,
        })
    }

    fn authorized(&self, request: HttpRequest) -> HttpRequest {
        match self.api {
            HostApi::GitHub { .. } => request.bearer(self.token).header("Accept", GITHUB_ACCEPT),
            HostApi::GitLab { .. } => request.header("PRIVATE-TOKEN", self.token),
        }
    }

    /// Repository display name.
    pub(crate) async fn repo_name(&self) -> Result<Option<String>, GitError> {
        let url = match &self.api {
            HostApi::GitHub { repo_url } => repo_url.clone(),
            HostApi::GitLab { project_url } => project_url.clone(),
        };
        let info = self.executor.send_json(self.authorized(HttpRequest::get(url))).await?;
        Ok(first_str(&info, &["name"]))
    }

    /// Markdown files directly inside `dir`.
    pub(crate) async fn list_markdown(&self, dir: &str) -> Result<Vec<RepoEntry>, GitError> {
        let request = match &self.api {
            HostApi::GitHub { repo_url } => {
                HttpRequest::get(format!("{repo_url}/contents/{dir}")).query("ref", self.branch)
            }
            HostApi::GitLab { project_url } => {
                HttpRequest::get(format!("{project_url}/repository/tree"))
                    .query("path", dir)
                    .query("ref", self.branch)
                    .query("per_page", GITLAB_TREE_PAGE_SIZE)
            }
        };

        let listing = self.executor.send_json(self.authorized(request)).await?;
        Ok(markdown_entries(&listing))
    }

    /// Raw content of the file at `path`, `None` when it does not exist.
    pub(crate) async fn read_file(&self, path: &str) -> Result<Option<String>, GitError> {
        let result = match &self.api {
            HostApi::GitHub { repo_url } => {
                let request = HttpRequest::get(format!("{repo_url}/contents/{path}"))
                    .query("ref", self.branch);
                match self.executor.send_json(self.authorized(request)).await {
                    Ok(file) => decode_github_content(&file, path).map(Some),
                    Err(e) => Err(e.into()),
                }
            }
            HostApi::GitLab { project_url } => {
                let request = HttpRequest::get(format!(
                    "{project_url}/repository/files/{}/raw",
                    encode(path)
                ))
                .query("ref", self.branch)
                .header("Accept", "text/plain");
                self.executor
                    .send_text(self.authorized(request))
                    .await
                    .map(Some)
                    .map_err(GitError::from)
            }
        };

        match result {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }

    /// Commits a new file. Returns the content SHA (GitHub) or the file
    /// path (GitLab).
    pub(crate) async fn create_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<Option<RemoteId>, GitError> {
        let (request, id_keys): (HttpRequest, &[&str]) = match &self.api {
            HostApi::GitHub { repo_url } => (
                HttpRequest::put(format!("{repo_url}/contents/{path}")).json(json!({
                    "message": message,
                    "content": STANDARD.encode(content),
                    "branch": self.branch,
                })),
                &["content.sha", "commit.sha"],
            ),
            HostApi::GitLab { project_url } => (
                HttpRequest::post(format!("{project_url}/repository/files/{}", encode(path)))
                    .json(json!({
                        "branch": self.branch,
                        "content": content,
                        "commit_message": message,
                    })),
                &["file_path"],
            ),
        };

        let response = self.executor.send_json(self.authorized(request)).await?;
        Ok(first_remote_id(&response, id_keys))
    }
}

fn markdown_entries(listing: &Value) -> Vec<RepoEntry> {
    let Some(items) = listing.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| {
            !matches!(
                item.get("type").and_then(Value::as_str),
                Some("dir" | "tree")
            )
        })
        .filter_map(|item| {
            let name = first_str(item, &["name"])?;
            if !name.ends_with(".md") {
                return None;
            }
            let path = first_str(item, &["path"]).unwrap_or_else(|| name.clone());
            Some(RepoEntry { name, path })
        })
        .collect()
}

fn decode_github_content(file: &Value, path: &str) -> Result<String, GitError> {
    let encoded: String = file
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD.decode(encoded).map_err(|e| GitError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| GitError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use sitebridge_fetch::testing::ScriptedTransport;
    use sitebridge_fetch::{Method, RetryPolicy};

    use super::*;

    fn executor(transport: &Arc<ScriptedTransport>) -> RequestExecutor {
        RequestExecutor::new(transport.clone())
            .with_policy(RetryPolicy::default().with_base_delay(Duration::ZERO))
    }

    fn site(provider: &str) -> SiteConfig {
        SiteConfig::new("Blog", "git", "https://github.com/me/blog", "tok")
            .with_config("provider", provider)
    }

    #[test]
    fn test_repo_path() {
        assert_eq!(repo_path("https://github.com/me/blog"), "me/blog");
        assert_eq!(repo_path("https://www.github.com/me/blog.git"), "me/blog");
        assert_eq!(repo_path("http://gitlab.com/group/sub/project/"), "group/sub/project");
        assert_eq!(repo_path("git@github.com:me/blog.git"), "me/blog");
        assert_eq!(repo_path("bitbucket.org/team/site"), "team/site");
        assert_eq!(repo_path("https://github.com/"), "");
    }

    #[test]
    fn test_unsupported_provider() {
        let transport = Arc::new(ScriptedTransport::new());
        let executor = executor(&transport);
        let site = site("bitbucket");
        let config = GitConfig::from_site(&site);
        let err = RepoClient::new(&executor, &site, &config).err().unwrap();
        assert_eq!(err.to_string(), "Provider non supporte: bitbucket");
    }

    #[test]
    fn test_invalid_repository() {
        let transport = Arc::new(ScriptedTransport::new());
        let executor = executor(&transport);
        let site = SiteConfig::new("Blog", "git", "https://github.com/", "tok");
        let config = GitConfig::from_site(&site);
        assert!(matches!(
            RepoClient::new(&executor, &site, &config),
            Err(GitError::InvalidRepository(_))
        ));
    }

    #[test]
    fn test_markdown_entries_filter() {
        let entries = markdown_entries(&serde_json::json!([
            {"name": "a.md", "path": "content/posts/a.md", "type": "file"},
            {"name": "b.txt", "path": "content/posts/b.txt", "type": "file"},
            {"name": "drafts.md", "path": "content/posts/drafts.md", "type": "dir"},
            {"name": "c.md", "path": "content/posts/c.md", "type": "blob"}
        ]));
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "c.md"]);
        assert!(markdown_entries(&serde_json::json!({"message": "x"})).is_empty());
    }

    #[tokio::test]
    async fn test_github_create_file() {
        let transport = Arc::new(ScriptedTransport::new().respond(
            201,
            r#"{"content": {"sha": "abc123"}, "commit": {"sha": "def456"}}"#,
        ));
        let executor = executor(&transport);
        let site = site("github");
        let config = GitConfig::from_site(&site);
        let client = RepoClient::new(&executor, &site, &config).unwrap();

        let id = client
            .create_file("content/posts/hello.md", "hi", "Add: Hello")
            .await
            .unwrap();
        assert_eq!(id, Some(RemoteId::Text("abc123".to_string())));

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "https://api.github.com/repos/me/blog/contents/content/posts/hello.md");
        assert_eq!(sent.header_value("Accept"), Some(GITHUB_ACCEPT));
        let body = sent.body.as_ref().unwrap();
        assert_eq!(body["content"], "aGk=");
        assert_eq!(body["branch"], "main");
        assert_eq!(body["message"], "Add: Hello");
    }

    #[tokio::test]
    async fn test_gitlab_create_file() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(201, r#"{"file_path": "content/posts/hello.md", "branch": "main"}"#),
        );
        let executor = executor(&transport);
        let site = site("gitlab");
        let config = GitConfig::from_site(&site);
        let client = RepoClient::new(&executor, &site, &config).unwrap();

        let id = client
            .create_file("content/posts/hello.md", "hi", "Add: Hello")
            .await
            .unwrap();
        assert_eq!(id, Some(RemoteId::Text("content/posts/hello.md".to_string())));

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(
            sent.url,
            "https://gitlab.com/api/v4/projects/me%2Fblog/repository/files/content%2Fposts%2Fhello.md"
        );
        assert_eq!(sent.header_value("PRIVATE-TOKEN"), Some("tok"));
        assert_eq!(sent.body.as_ref().unwrap()["content"], "hi");
    }

    #[tokio::test]
    async fn test_read_file_variants() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, r#"{"content": "aGVs\nbG8=\n", "encoding": "base64"}"#)
                .respond(404, r#"{"message": "Not Found"}"#)
                .respond(200, r#"{"content": "!!!"}"#),
        );
        let executor = executor(&transport);
        let site = site("github");
        let config = GitConfig::from_site(&site);
        let client = RepoClient::new(&executor, &site, &config).unwrap();

        assert_eq!(client.read_file("a.md").await.unwrap().as_deref(), Some("hello"));
        assert!(client.read_file("missing.md").await.unwrap().is_none());
        assert!(matches!(
            client.read_file("bad.md").await,
            Err(GitError::Decode { .. })
        ));
        assert_eq!(transport.requests()[0].query_value("ref"), Some("main"));
    }

    #[tokio::test]
    async fn test_gitlab_read_raw() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, "---\ntitle: x\n---\nbody"));
        let executor = executor(&transport);
        let site = site("gitlab").with_config("branch", "pages");
        let config = GitConfig::from_site(&site);
        let client = RepoClient::new(&executor, &site, &config).unwrap();

        let raw = client.read_file("content/posts/x.md").await.unwrap().unwrap();
        assert!(raw.starts_with("---"));

        let sent = &transport.requests()[0];
        assert!(sent.url.ends_with("/repository/files/content%2Fposts%2Fx.md/raw"));
        assert_eq!(sent.query_value("ref"), Some("pages"));
        assert_eq!(sent.header_value("Accept"), Some("text/plain"));
    }
}
