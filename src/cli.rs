use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::request::HttpMethod;

#[derive(Debug, Parser)]
#[command(
    name = "creatilink-client",
    about = "CreatiLink page client: project chat and page utilities, run headless"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load a project's chat history from the server and render it
    History {
        #[arg(long)]
        project: i64,
        /// Current user; their own messages render right-aligned
        #[arg(long)]
        user: i64,
        #[arg(long, value_enum, default_value_t = HistoryFormat::Html)]
        format: HistoryFormat,
    },
    /// Send a JSON request through the fetch wrapper
    Fetch {
        url: String,
        #[arg(short = 'X', long, default_value = "GET", value_parser = parse_method)]
        method: HttpMethod,
        /// Extra request header as `Name: value`; repeatable
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Print the chat time label for a timestamp, relative to now
    FormatTime { timestamp: String },
    /// Replay a timed page event script against a page skeleton
    Replay { script: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    Html,
    Text,
}

fn parse_method(raw: &str) -> Result<HttpMethod, String> {
    match raw.to_ascii_uppercase().as_str() {
        "GET" => Ok(HttpMethod::Get),
        "POST" => Ok(HttpMethod::Post),
        "PUT" => Ok(HttpMethod::Put),
        "PATCH" => Ok(HttpMethod::Patch),
        "DELETE" => Ok(HttpMethod::Delete),
        other => Err(format!("unsupported method `{other}`")),
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("header `{raw}` must look like `Name: value`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header `{raw}` has an empty name"));
    }

    Ok((name.to_owned(), value.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_history_with_default_format() {
        let cli = Cli::parse_from(["creatilink-client", "history", "--project", "4", "--user", "9"]);

        match cli.command {
            Command::History {
                project,
                user,
                format,
            } => {
                assert_eq!((project, user), (4, 9));
                assert_eq!(format, HistoryFormat::Html);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_fetch_with_method_headers_and_global_config() {
        let cli = Cli::parse_from([
            "creatilink-client",
            "fetch",
            "/api/reviews",
            "-X",
            "post",
            "-H",
            "X-CSRFToken: abc",
            "--body",
            r#"{"rating":5}"#,
            "--config",
            "custom.toml",
        ]);

        assert_eq!(
            cli.config
                .as_deref()
                .map(|p| p.to_string_lossy().to_string()),
            Some("custom.toml".to_owned())
        );
        match cli.command {
            Command::Fetch {
                url,
                method,
                headers,
                body,
            } => {
                assert_eq!(url, "/api/reviews");
                assert_eq!(method, HttpMethod::Post);
                assert_eq!(headers, vec![("X-CSRFToken".to_owned(), "abc".to_owned())]);
                assert_eq!(body.as_deref(), Some(r#"{"rating":5}"#));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_header_without_colon() {
        let result = Cli::try_parse_from(["creatilink-client", "fetch", "/x", "-H", "broken"]);

        assert!(result.is_err());
    }

    #[test]
    fn format_time_uses_kebab_case_name() {
        let cli = Cli::parse_from(["creatilink-client", "format-time", "2026-03-10 14:00:00"]);

        assert!(matches!(cli.command, Command::FormatTime { .. }));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["creatilink-client"]).is_err());
    }
}
