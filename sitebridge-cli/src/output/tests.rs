//! CLI output formatting tests.

#[cfg(test)]
mod text_formatter_tests {
    use sitebridge_connectors::{SiteOutcome, builtin_descriptors};
    use sitebridge_core::{
        ContentKind, ContentList, ContentPage, PublishResult, RemoteId, SiteConfig, StatsSnapshot,
    };
    use sitebridge_fetch::ConnectorError;

    use super::super::text::{TextFormatter, truncate};

    fn site() -> SiteConfig {
        SiteConfig::new("Mon Blog", "wordpress", "https://blog.example/", "t")
    }

    fn page(id: &str, title: &str, status: &str) -> ContentPage {
        ContentPage {
            id: id.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            date: Some("2024-03-01T10:00:00Z".to_string()),
            kind: ContentKind::Post,
            ..ContentPage::default()
        }
    }

    #[test]
    fn test_connector_line_lists_features() {
        let formatter = TextFormatter::new(false);
        let git = &builtin_descriptors()[2];
        let line = formatter.format_connector_line(git);

        assert!(line.starts_with("Git / Sites Statiques"));
        assert!(line.contains("git"));
        assert!(line.contains("publish, categories, tags, draft"));
    }

    #[test]
    fn test_connector_fields_mark_required_and_options() {
        let formatter = TextFormatter::new(false);
        let api = &builtin_descriptors()[1];
        let fields = formatter.format_connector_fields(api);

        assert!(fields.lines().any(|l| l.contains("url") && l.contains("(required)")));
        assert!(fields.contains("authType"));
        assert!(fields.contains('['));
    }

    #[test]
    fn test_check_line() {
        let formatter = TextFormatter::new(false);
        assert!(formatter.format_check(&site(), true).contains("✓ Connected"));
        assert!(formatter.format_check(&site(), false).contains("✗ Unreachable"));
    }

    #[test]
    fn test_check_line_with_colors() {
        let formatter = TextFormatter::new(true);
        assert!(formatter.format_check(&site(), true).contains("\x1b[32m"));
        assert!(formatter.format_check(&site(), false).contains("\x1b[31m"));
    }

    #[test]
    fn test_stats_block() {
        let formatter = TextFormatter::new(false);
        let mut stats = StatsSnapshot::new();
        stats.total_posts = 12;
        stats.total_categories = 4;
        stats.total_comments = 27;
        stats.site_title = Some("Blog".to_string());
        stats.platform_version = Some("6.4.2".to_string());

        let output = formatter.format_stats(&site(), &stats);
        assert!(output.starts_with("Blog (wordpress)"));
        assert!(output.contains("Posts:      12"));
        assert!(output.contains("Comments:   27"));
        assert!(!output.contains("Users"));
        assert!(output.contains("Version:    6.4.2"));
    }

    #[test]
    fn test_degraded_stats_are_flagged() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_stats(&site(), &StatsSnapshot::degraded("Mon Blog"));
        assert!(output.starts_with("Mon Blog"));
        assert!(output.contains("No content reported"));
    }

    #[test]
    fn test_content_list() {
        let formatter = TextFormatter::new(false);
        let list = ContentList {
            items: vec![page("1", "Hello", "publish"), page("2", "Draft", "draft")],
            total: 12,
            page_count: 6,
        };

        let output = formatter.format_content_list(&list, 2);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("2024-03-01"));
        assert!(!lines[1].contains("T10"));
        assert_eq!(lines[3], "Page 2/6 (12 total)");
    }

    #[test]
    fn test_empty_content_list() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_content_list(&ContentList::empty(), 1), "No content found");
    }

    #[test]
    fn test_content_page_detail() {
        let formatter = TextFormatter::new(false);
        let mut item = page("hello.md", "Hello", "draft");
        item.tags = vec!["rust".to_string(), "web".to_string()];
        item.content = "Body\n".to_string();

        let output = formatter.format_content_page(&item);
        assert!(output.starts_with("Hello\n"));
        assert!(output.contains("Tags:       rust, web"));
        assert!(!output.contains("URL:"));
        assert!(output.ends_with("Body"));
    }

    #[test]
    fn test_outcome_lines() {
        let formatter = TextFormatter::new(false);
        let ok = SiteOutcome {
            site_name: "Mon Blog".to_string(),
            result: Ok(PublishResult::published(
                Some(RemoteId::Number(42)),
                Some("https://blog.example/?p=42".to_string()),
                "Article publie avec succes",
            )),
        };
        let failed = SiteOutcome {
            site_name: "Docs".to_string(),
            result: Err(ConnectorError::from_status(401, "Unauthorized", "https://docs.example")),
        };

        let output = formatter.format_outcome(&ok);
        assert!(output.starts_with("✓ Mon Blog"));
        assert!(output.contains("https://blog.example/?p=42"));
        assert!(output.contains("id: 42"));

        let output = formatter.format_outcome(&failed);
        assert!(output.starts_with("✗ Docs"));
        assert!(output.contains("invalide"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("éèêëà", 3), "éè…");
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use serde_json::Value;
    use sitebridge_connectors::SiteOutcome;
    use sitebridge_core::{PublishResult, SiteConfig, StatsSnapshot};
    use sitebridge_fetch::ConnectorError;

    use super::super::json::{JsonFormatter, PublishOutput, SiteOutput, StatsOutput};

    #[test]
    fn test_compact_and_pretty() {
        let value = serde_json::json!({"a": 1});
        assert_eq!(JsonFormatter::new(false).format(&value).unwrap(), r#"{"a":1}"#);
        assert!(JsonFormatter::new(true).format(&value).unwrap().contains('\n'));
    }

    #[test]
    fn test_stats_output_is_flattened() {
        let mut stats = StatsSnapshot::new();
        stats.total_posts = 7;
        let output = StatsOutput {
            site: "Docs",
            stats: &stats,
        };

        let json: Value = serde_json::from_str(&JsonFormatter::new(false).format(&output).unwrap()).unwrap();
        assert_eq!(json["site"], "Docs");
        assert_eq!(json["totalPosts"], 7);
        assert!(json.get("fetchedAt").is_some());
    }

    #[test]
    fn test_publish_output() {
        let failed = SiteOutcome {
            site_name: "Docs".to_string(),
            result: Err(ConnectorError::from_status(500, "boom", "https://docs.example")),
        };
        let rejected = SiteOutcome {
            site_name: "Git".to_string(),
            result: Ok(PublishResult::failed("Provider non supporte: bitbucket")),
        };

        let json = serde_json::to_value(PublishOutput::from(&failed)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "server_error");
        assert!(json.get("url").is_none());

        let json = serde_json::to_value(PublishOutput::from(&rejected)).unwrap();
        assert_eq!(json["message"], "Provider non supporte: bitbucket");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_site_output_hides_token() {
        let site = SiteConfig::new("Blog", "wordpress", "https://blog.example", "secret");
        let json = serde_json::to_string(&SiteOutput::from(&site)).unwrap();

        assert!(!json.contains("secret"));
        assert!(json.contains(r#""hasToken":true"#));
        assert!(json.contains(r#""type":"wordpress""#));
    }
}
