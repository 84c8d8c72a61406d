//! Unit tests for the `wlab` CLI entrypoint module.

use super::{
    api_url, error_message_for_response, format_delete_output, format_get_output,
    format_summary_output, normalize_server, project_body, project_id_and_name, read_sources,
    requested_visibility, resolve_server, token_from_link, write_artifact, write_sources, Cli,
    Commands, ExportFormat, SourceArgs,
};
use clap::Parser;
use weblab_core::env::{env_lock, EnvGuard};
use weblab_core::export::export_single_file;
use weblab_core::share;
use weblab_core::{SourceBundle, DEFAULT_PORT};
use weblab_core::constants::DEFAULT_CLI_SERVER_URL;

fn sample_bundle() -> SourceBundle {
    SourceBundle {
        markup: "<h1>Hi</h1>".to_string(),
        style: "h1 { color: red; }".to_string(),
        script: "console.log(1);".to_string(),
    }
}

#[test]
fn normalize_server_matrix() {
    let cases = [
        (
            DEFAULT_CLI_SERVER_URL.to_string(),
            format!("http://127.0.0.1:{}", DEFAULT_PORT),
        ),
        (
            format!("https://localhost:{}", DEFAULT_PORT),
            format!("https://localhost:{}", DEFAULT_PORT),
        ),
        (
            format!("http://127.0.0.1:{}/", DEFAULT_PORT),
            format!("http://127.0.0.1:{}", DEFAULT_PORT),
        ),
        ("not a url".to_string(), "not a url".to_string()),
    ];
    for (input, expected) in cases {
        assert_eq!(normalize_server(input), expected);
    }
}

#[test]
fn resolve_server_ignores_blank_values() {
    assert_eq!(resolve_server(None), DEFAULT_CLI_SERVER_URL);
    assert_eq!(resolve_server(Some("   ".to_string())), DEFAULT_CLI_SERVER_URL);
    assert_eq!(
        resolve_server(Some(" http://lab.test ".to_string())),
        "http://lab.test"
    );
}

#[test]
fn error_message_for_response_matrix_covers_json_reason_and_passthrough() {
    let cases = [
        (
            reqwest::StatusCode::FORBIDDEN,
            r#"{"error":"You do not have permission to edit this project"}"#,
            "You do not have permission to edit this project",
        ),
        (reqwest::StatusCode::NOT_FOUND, "  ", "Not Found"),
        (reqwest::StatusCode::BAD_GATEWAY, "upstream down", "upstream down"),
        (
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"detail":"x"}"#,
            r#"{"detail":"x"}"#,
        ),
    ];
    for (status, body, expected) in cases {
        assert_eq!(error_message_for_response(status, body), expected);
    }
}

#[test]
fn project_id_and_name_requires_both_fields() {
    let full = serde_json::json!({"id": "abc", "name": "Site"});
    assert_eq!(project_id_and_name(&full), Some(("abc", "Site")));
    assert_eq!(project_id_and_name(&serde_json::json!({"id": "abc"})), None);
    assert_eq!(project_id_and_name(&serde_json::json!({"name": "Site"})), None);
}

#[test]
fn summary_output_lists_visibility_and_rejects_incomplete_rows() {
    let projects = vec![
        serde_json::json!({"id": "a", "name": "Open", "is_public": true}),
        serde_json::json!({"id": "b", "name": "Closed", "is_public": false}),
    ];
    let text = format_summary_output(&projects, false).expect("format");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("public") && lines[0].contains("Open"));
    assert!(lines[1].contains("private") && lines[1].contains("Closed"));

    let broken = vec![serde_json::json!({"id": "a"})];
    let err = format_summary_output(&broken, false).expect_err("missing name");
    assert!(err.contains("item 0"));
}

#[test]
fn json_output_helpers_preserve_payload_shape() {
    let project = serde_json::json!({"id": "a", "name": "n", "html": "", "css": "", "js": ""});
    let rendered = format_get_output(&project, true).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("parse");
    assert_eq!(parsed, project);

    let deleted = serde_json::json!({"success": true});
    let rendered = format_delete_output("a", &deleted, true).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("parse");
    assert_eq!(parsed, deleted);
    assert_eq!(
        format_delete_output("a", &deleted, false).expect("text"),
        "Deleted project: a"
    );
}

#[test]
fn get_output_composes_the_project_document() {
    let project = serde_json::json!({
        "id": "a",
        "name": "n",
        "html": "<p>x</p>",
        "css": "p{}",
        "js": "let y;",
    });
    let document = format_get_output(&project, false).expect("compose");
    assert!(document.contains("<p>x</p>"));
    assert!(document.contains("p{}"));
    assert!(document.contains("let y;"));

    let missing = serde_json::json!({"id": "a", "html": ""});
    let err = format_get_output(&missing, false).expect_err("missing css");
    assert!(err.contains("'css'"));
}

#[test]
fn api_url_matrix_covers_encoding_and_base_path_append() {
    let url = api_url("http://127.0.0.1:38420", &["api", "project", "a b/c"]).expect("url");
    assert_eq!(url.as_str(), "http://127.0.0.1:38420/api/project/a%20b%2Fc");

    let url = api_url("http://lab.test/base/", &["api", "projects"]).expect("url");
    assert_eq!(url.as_str(), "http://lab.test/base/api/projects");

    assert!(api_url("nope", &["api"]).is_err());
}

#[test]
fn project_body_sets_visibility_and_optional_name() {
    let body = project_body(&sample_bundle(), None, Some(false));
    assert_eq!(body["is_public"], false);
    assert_eq!(body["html"], "<h1>Hi</h1>");
    assert!(body.get("name").is_none());

    let body = project_body(&sample_bundle(), Some("Site".to_string()), Some(true));
    assert_eq!(body["is_public"], true);
    assert_eq!(body["name"], "Site");
}

#[test]
fn updates_keep_stored_visibility_unless_a_flag_is_given() {
    assert_eq!(requested_visibility(false, false, false), Some(true));
    assert_eq!(requested_visibility(false, false, true), None);
    assert_eq!(requested_visibility(true, false, true), Some(false));
    assert_eq!(requested_visibility(false, true, true), Some(true));

    let body = project_body(&sample_bundle(), None, None);
    assert!(body.get("is_public").is_none());
    assert_eq!(body["css"], "h1 { color: red; }");
}

#[test]
fn cli_rejects_private_with_public() {
    assert!(Cli::try_parse_from(["wlab", "push", "--private", "--public"]).is_err());
}

#[test]
fn read_sources_uses_dir_defaults_and_explicit_overrides() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("index.html"), "<p>dir</p>").expect("write");
    std::fs::write(dir.path().join("styles.css"), "p{}").expect("write");
    let override_js = dir.path().join("other.js");
    std::fs::write(&override_js, "run();").expect("write");

    let args = SourceArgs {
        dir: Some(dir.path().to_path_buf()),
        js: Some(override_js),
        ..SourceArgs::default()
    };
    let bundle = read_sources(&args).expect("read");
    assert_eq!(bundle.markup, "<p>dir</p>");
    assert_eq!(bundle.style, "p{}");
    assert_eq!(bundle.script, "run();");

    let only_dir = SourceArgs {
        dir: Some(dir.path().to_path_buf()),
        ..SourceArgs::default()
    };
    assert_eq!(read_sources(&only_dir).expect("read").script, "");

    let missing = SourceArgs {
        html: Some(dir.path().join("absent.html")),
        ..SourceArgs::default()
    };
    assert!(read_sources(&missing).is_err());

    assert!(read_sources(&SourceArgs::default())
        .expect("read")
        .is_empty());
}

#[test]
fn open_round_trips_a_share_link_into_files() {
    let bundle = sample_bundle();
    let token = share::encode(&bundle);
    let url = share::share_url("http://lab.test", "/", &token);

    let from_url = token_from_link(&url);
    assert_eq!(from_url.as_str(), token.as_str());
    let bare = token_from_link(&format!("  {}  ", token.as_str()));
    assert_eq!(bare.as_str(), token.as_str());

    let decoded = share::decode(from_url.as_str()).expect("decode").normalize();
    let dir = tempfile::TempDir::new().expect("temp dir");
    let written = write_sources(dir.path(), &decoded).expect("write");
    assert_eq!(written.len(), 3);

    let args = SourceArgs {
        dir: Some(dir.path().to_path_buf()),
        ..SourceArgs::default()
    };
    assert_eq!(read_sources(&args).expect("read"), bundle);
}

#[test]
fn write_artifact_uses_export_file_name() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let artifact = export_single_file(&sample_bundle(), Some("My Site"));
    let path = write_artifact(&dir.path().join("out"), &artifact).expect("write");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("My-Site.html"));
    let text = std::fs::read_to_string(path).expect("read back");
    assert!(text.contains("<h1>Hi</h1>"));
}

#[test]
fn cli_parses_export_subcommand() {
    let cli = Cli::try_parse_from([
        "wlab", "export", "--format", "zip", "--name", "Site", "--dir", "src",
    ])
    .expect("cli should parse export");
    match cli.command {
        Commands::Export {
            sources,
            format,
            name,
            ..
        } => {
            assert_eq!(format, ExportFormat::Zip);
            assert_eq!(name.as_deref(), Some("Site"));
            assert_eq!(
                sources.dir.as_deref(),
                Some(std::path::Path::new("src"))
            );
        }
        _ => panic!("expected export command"),
    }
}

#[test]
fn cli_parses_push_with_private_and_id() {
    let cli = Cli::try_parse_from(["wlab", "push", "--private", "--id", "abc", "--html", "a.html"])
        .expect("cli should parse push");
    match cli.command {
        Commands::Push {
            private, id, sources, ..
        } => {
            assert!(private);
            assert_eq!(id.as_deref(), Some("abc"));
            assert!(sources.html.is_some());
        }
        _ => panic!("expected push command"),
    }
}

#[test]
fn cli_reads_account_from_env() {
    let _lock = env_lock().lock().expect("env lock");
    let _account = EnvGuard::set("WLAB_ACCOUNT", "ada");
    let _server = EnvGuard::remove("WLAB_SERVER");

    let cli = Cli::try_parse_from(["wlab", "list", "--mine"]).expect("cli should parse list");
    assert_eq!(cli.account.as_deref(), Some("ada"));
    assert!(cli.server.is_none());
    match cli.command {
        Commands::List { mine, limit } => {
            assert!(mine);
            assert_eq!(limit, 10);
        }
        _ => panic!("expected list command"),
    }
}
