//! Command-line client for WebLab: offline composition and sharing, plus the
//! project API.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use weblab_core::constants::{ACCOUNT_HEADER, DEFAULT_CLI_SERVER_URL};
use weblab_core::export::{
    export_archive, export_single_file, ExportArtifact, ARCHIVE_MARKUP_FILE, ARCHIVE_SCRIPT_FILE,
    ARCHIVE_STYLE_FILE,
};
use weblab_core::share::{self, ShareToken};
use weblab_core::{compose, SourceBundle};

#[derive(Parser)]
#[command(name = "wlab", about = "WebLab CLI", version)]
struct Cli {
    /// Server URL (can also be set via WLAB_SERVER env var)
    #[arg(short, long, env = "WLAB_SERVER")]
    server: Option<String>,

    /// Account sent with API requests (can also be set via WLAB_ACCOUNT env var)
    #[arg(short, long, global = true, env = "WLAB_ACCOUNT")]
    account: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for API requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Where to read the three sources from.
#[derive(Args, Debug, Clone, Default)]
struct SourceArgs {
    /// Directory holding index.html, styles.css and script.js
    #[arg(short, long)]
    dir: Option<PathBuf>,
    /// Markup file (overrides the one in --dir)
    #[arg(long)]
    html: Option<PathBuf>,
    /// Style file (overrides the one in --dir)
    #[arg(long)]
    css: Option<PathBuf>,
    /// Script file (overrides the one in --dir)
    #[arg(long)]
    js: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Html,
    Zip,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the composed HTML document
    Compose {
        #[command(flatten)]
        sources: SourceArgs,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a share link for the sources
    Share {
        #[command(flatten)]
        sources: SourceArgs,
        /// Origin of the editor the link points at
        #[arg(long, env = "WLAB_ORIGIN", default_value = DEFAULT_CLI_SERVER_URL)]
        origin: String,
        /// Path of the editor page
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Decode a share token or link into source files
    Open {
        /// Share token or full share URL
        link: String,
        /// Directory to write index.html, styles.css and script.js into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Write a downloadable export
    Export {
        #[command(flatten)]
        sources: SourceArgs,
        #[arg(short, long, value_enum, default_value = "html")]
        format: ExportFormat,
        /// Project name used for the file name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Save the sources as a project on the server
    Push {
        #[command(flatten)]
        sources: SourceArgs,
        #[arg(short, long)]
        name: Option<String>,
        /// Save as private (requires --account)
        #[arg(long, conflicts_with = "public")]
        private: bool,
        /// Save as public (the default for new projects)
        #[arg(long)]
        public: bool,
        /// Update this project instead of creating a new one
        #[arg(long)]
        id: Option<String>,
    },
    Get {
        id: String,
    },
    List {
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Only projects owned by --account
        #[arg(long)]
        mine: bool,
    },
    Delete {
        id: String,
    },
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

async fn ensure_success_or_exit(res: reqwest::Response, action: &str) -> reqwest::Response {
    let status = res.status();
    if status.is_success() {
        return res;
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    let message = error_message_for_response(status, &body);
    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn exit_with(action: &str, message: impl std::fmt::Display) -> ! {
    eprintln!("{} failed: {}", action, message);
    std::process::exit(1);
}

fn read_source(explicit: Option<&Path>, dir: Option<&Path>, default_name: &str) -> io::Result<String> {
    if let Some(path) = explicit {
        return std::fs::read_to_string(path);
    }
    let Some(dir) = dir else {
        return Ok(String::new());
    };
    match std::fs::read_to_string(dir.join(default_name)) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err),
    }
}

/// Read the bundle named by `args`. Files missing from `--dir` are empty;
/// explicitly named files must exist.
fn read_sources(args: &SourceArgs) -> io::Result<SourceBundle> {
    let dir = args.dir.as_deref();
    Ok(SourceBundle {
        markup: read_source(args.html.as_deref(), dir, ARCHIVE_MARKUP_FILE)?,
        style: read_source(args.css.as_deref(), dir, ARCHIVE_STYLE_FILE)?,
        script: read_source(args.js.as_deref(), dir, ARCHIVE_SCRIPT_FILE)?,
    })
}

/// Write the three sources into `dir` using the archive file names.
fn write_sources(dir: &Path, bundle: &SourceBundle) -> io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(3);
    for (name, contents) in [
        (ARCHIVE_MARKUP_FILE, &bundle.markup),
        (ARCHIVE_STYLE_FILE, &bundle.style),
        (ARCHIVE_SCRIPT_FILE, &bundle.script),
    ] {
        let path = dir.join(name);
        std::fs::write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}

fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.filename);
    std::fs::write(&path, &artifact.bytes)?;
    Ok(path)
}

/// Accept either a bare token or anything carrying `?code=`.
fn token_from_link(link: &str) -> ShareToken {
    let trimmed = link.trim();
    share::token_from_url(trimmed).unwrap_or_else(|| ShareToken::from_raw(trimmed))
}

fn project_id_and_name(project: &Value) -> Option<(&str, &str)> {
    let id = project.get("id").and_then(Value::as_str)?;
    let name = project.get("name").and_then(Value::as_str)?;
    Some((id, name))
}

fn format_summary_output(projects: &[Value], json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(projects)
            .map_err(|err| format!("response encoding error: {}", err));
    }

    let mut rows = Vec::with_capacity(projects.len());
    for (index, p) in projects.iter().enumerate() {
        let Some((id, name)) = project_id_and_name(p) else {
            return Err(format!(
                "response item {} missing 'id' or 'name' field",
                index
            ));
        };
        let visibility = match p.get("is_public").and_then(Value::as_bool) {
            Some(false) => "private",
            _ => "public",
        };
        rows.push(format!("{:<36} {:<8} {:<30}", id, visibility, name));
    }

    Ok(rows.join("\n"))
}

/// The composed document for a project, or the raw JSON with `--json`.
fn format_get_output(project: &Value, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(project)
            .map_err(|err| format!("response encoding error: {}", err));
    }

    let field = |name: &str| {
        project
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| format!("response missing '{}' field", name))
    };
    Ok(compose(field("html")?, field("css")?, field("js")?))
}

fn format_delete_output(id: &str, response: &Value, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(response)
            .map_err(|err| format!("response encoding error: {}", err));
    }

    Ok(format!("Deleted project: {}", id))
}

/// Request body for a push. Visibility is omitted when `is_public` is
/// `None` so an update keeps the stored value.
fn project_body(bundle: &SourceBundle, name: Option<String>, is_public: Option<bool>) -> Value {
    let mut body = serde_json::json!({
        "html": bundle.markup,
        "css": bundle.style,
        "js": bundle.script,
    });
    if let Some(name) = name {
        body["name"] = name.into();
    }
    if let Some(is_public) = is_public {
        body["is_public"] = is_public.into();
    }
    body
}

/// Visibility requested by the push flags. New projects default to public.
fn requested_visibility(private: bool, public: bool, updating: bool) -> Option<bool> {
    match (private, public) {
        (true, _) => Some(false),
        (_, true) => Some(true),
        _ if updating => None,
        _ => Some(true),
    }
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| format!("Invalid server URL '{}': {}", server, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

fn api_url_or_exit(server: &str, action: &str, segments: &[&str]) -> reqwest::Url {
    match api_url(server, segments) {
        Ok(url) => url,
        Err(message) => exit_with(action, message),
    }
}

fn normalize_server(server: String) -> String {
    if let Ok(mut url) = reqwest::Url::parse(&server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server;
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server
}

fn explicit_value(value: Option<String>) -> Option<String> {
    weblab_core::text::normalize_optional_nonempty(value)
}

fn resolve_server(server: Option<String>) -> String {
    explicit_value(server).unwrap_or_else(|| DEFAULT_CLI_SERVER_URL.to_string())
}

/// Run a command that needs no server. Returns `false` for API commands.
fn run_offline(command: &Commands, json: bool) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
        }
        Commands::Compose { sources, output } => {
            let bundle = read_sources(sources)?;
            let document = compose(&bundle.markup, &bundle.style, &bundle.script);
            match output {
                Some(path) => std::fs::write(path, document)?,
                None => println!("{}", document),
            }
        }
        Commands::Share {
            sources,
            origin,
            path,
        } => {
            let bundle = read_sources(sources)?;
            let token = share::encode(&bundle);
            if json {
                let body = serde_json::json!({
                    "token": token.as_str(),
                    "url": share::share_url(origin, path, &token),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", share::share_url(origin, path, &token));
            }
        }
        Commands::Open { link, out_dir } => {
            let token = token_from_link(link);
            let bundle = match share::decode(token.as_str()) {
                Ok(partial) => partial.normalize(),
                Err(err) => exit_with("Open", err),
            };
            for path in write_sources(out_dir, &bundle)? {
                println!("Wrote {}", path.display());
            }
        }
        Commands::Export {
            sources,
            format,
            name,
            out_dir,
        } => {
            let bundle = read_sources(sources)?;
            let artifact = match format {
                ExportFormat::Html => export_single_file(&bundle, name.as_deref()),
                ExportFormat::Zip => export_archive(&bundle, name.as_deref())?,
            };
            let path = write_artifact(out_dir, &artifact)?;
            println!("Wrote {}", path.display());
        }
        _ => return Ok(false),
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        server,
        account,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    if run_offline(&command, json)? {
        return Ok(());
    }

    let mut headers = reqwest::header::HeaderMap::new();
    if let Some(account) = explicit_value(account) {
        headers.insert(ACCOUNT_HEADER, reqwest::header::HeaderValue::from_str(&account)?);
    }
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .default_headers(headers)
        .build()?;
    let server = normalize_server(resolve_server(server));

    match command {
        Commands::Push {
            sources,
            name,
            private,
            public,
            id,
        } => {
            let bundle = read_sources(&sources)?;
            let is_public = requested_visibility(private, public, id.is_some());
            let body = project_body(&bundle, name, is_public);
            let request = match id.as_deref() {
                Some(id) => client.put(api_url_or_exit(&server, "Push", &["api", "project", id])),
                None => client.post(api_url_or_exit(&server, "Push", &["api", "project"])),
            };

            let request_start = Instant::now();
            let res = request.json(&body).send().await?;
            log_timing(timing, "push", request_start.elapsed());
            let res = ensure_success_or_exit(res, "Push").await;
            let project: Value = res.json().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                let Some((id, name)) = project_id_and_name(&project) else {
                    exit_with("Push", "response missing 'id' or 'name' field");
                };
                println!("Saved: {} ({})", name, id);
            }
        }
        Commands::Get { id } => {
            let endpoint = api_url_or_exit(&server, "Get", &["api", "project", id.as_str()]);
            let request_start = Instant::now();
            let res = client.get(endpoint).send().await?;
            log_timing(timing, "get", request_start.elapsed());
            let res = ensure_success_or_exit(res, "Get").await;
            let project: Value = res.json().await?;

            match format_get_output(&project, json) {
                Ok(output) => println!("{}", output),
                Err(message) => exit_with("Get", message),
            }
        }
        Commands::List { limit, mine } => {
            let endpoint = api_url_or_exit(&server, "List", &["api", "projects"]);
            let request_start = Instant::now();
            let res = client
                .get(endpoint)
                .query(&[("limit", limit.to_string()), ("mine", mine.to_string())])
                .send()
                .await?;
            log_timing(timing, "list", request_start.elapsed());
            let res = ensure_success_or_exit(res, "List").await;
            let projects: Vec<Value> = res.json().await?;

            match format_summary_output(&projects, json) {
                Ok(output) if output.is_empty() => {}
                Ok(output) => println!("{}", output),
                Err(message) => exit_with("List", message),
            }
        }
        Commands::Delete { id } => {
            let endpoint = api_url_or_exit(&server, "Delete", &["api", "project", id.as_str()]);
            let request_start = Instant::now();
            let res = client.delete(endpoint).send().await?;
            log_timing(timing, "delete", request_start.elapsed());
            let res = ensure_success_or_exit(res, "Delete").await;
            let response: Value = res.json().await?;

            match format_delete_output(&id, &response, json) {
                Ok(output) => println!("{}", output),
                Err(message) => exit_with("Delete", message),
            }
        }
        Commands::Completions { .. }
        | Commands::Compose { .. }
        | Commands::Share { .. }
        | Commands::Open { .. }
        | Commands::Export { .. } => unreachable!("offline commands handled before client setup"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
