use std::env;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Assignments found in a `.env`-style file. When the file has content but no
/// `KEY=VALUE` lines at all, the first line is kept as a bare API token.
#[derive(Debug, Default, PartialEq)]
struct EnvFileContents {
    assignments: Vec<(String, String)>,
    bare_token: Option<String>,
}

fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches('"').trim_matches('\'')
}

fn parse_env_contents(contents: &str) -> EnvFileContents {
    let lines: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let mut parsed = EnvFileContents::default();
    for line in &lines {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        parsed
            .assignments
            .push((key.trim().to_string(), strip_quotes(value).to_string()));
    }

    if parsed.assignments.is_empty() {
        if let Some(first) = lines.first() {
            let token = strip_quotes(first);
            if !token.is_empty() {
                parsed.bare_token = Some(token.to_string());
            }
        }
    }

    parsed
}

/// Load `KEY=VALUE` lines from a `.env`-like file into the process
/// environment without overriding variables that are already set. A file
/// holding a single bare token is treated as `GEMINI_API_KEY`.
pub fn load_env_file(path: impl AsRef<Path>) {
    let Ok(contents) = std::fs::read_to_string(path.as_ref()) else {
        return;
    };

    let parsed = parse_env_contents(&contents);
    for (key, value) in &parsed.assignments {
        if !key.is_empty() && env::var_os(key).is_none() {
            env::set_var(key, value);
        }
    }

    if let Some(token) = parsed.bare_token {
        if env::var_os("GEMINI_API_KEY").is_none() && env::var_os("GOOGLE_API_KEY").is_none() {
            env::set_var("GEMINI_API_KEY", token);
        }
    }
}

/// Re-read the env files so edits take effect without a restart.
/// `api.env` is the legacy location, `.env` the current one.
pub fn refresh_env() {
    load_env_file("api.env");
    load_env_file(".env");
}

pub fn get_api_key() -> Option<String> {
    refresh_env();
    env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .or_else(|| env::var("GOOGLE_API_KEY").ok().filter(|key| !key.is_empty()))
}

pub fn get_model_name() -> String {
    refresh_env();
    env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
}
