use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::sync::Arc;
use timeline_client::{ApiClient, ClientConfig};
use timeline_core::prelude::*;
use timeline_core::RouterError;
use timeline_types::TimelineItem;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("timeline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reveal revision timeline items and run confirmed deletes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML client configuration file"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .help("API origin relative paths resolve against"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .help("Bearer token sent with every request"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log verbosity (repeatable)"),
        )
        .subcommand(
            Command::new("show")
                .about("Reveal one timeline item and print its detail pane")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(["edit", "experiment", "createEdit"])
                        .help("Item kind marker"),
                )
                .arg(Arg::new("id").required(true).help("Item id"))
                .arg(
                    Arg::new("auth")
                        .long("auth")
                        .help("Auth marker; 'logged-in' attaches the delete control"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("text")
                        .value_parser(["html", "text"])
                        .help("Output format"),
                )
                .arg(
                    Arg::new("context-lines")
                        .long("context-lines")
                        .default_value("3")
                        .value_parser(value_parser!(usize))
                        .help("Unchanged lines shown around each diff hunk"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Open the matching confirmation flow and confirm it")
                .arg(
                    Arg::new("target")
                        .required(true)
                        .help("Delete target URL, e.g. /api/edit/12"),
                )
                .arg(
                    Arg::new("owner")
                        .long("owner")
                        .help("Owner username; makes this a resource delete"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Defaults, then the config file, then environment, then flags
fn resolve_config(
    matches: &ArgMatches,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::new(),
    };
    let mut config = config.apply_env_from(env);

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url);
    }
    if let Some(token) = matches.get_one::<String>("token") {
        config = config.with_bearer_token(token);
    }
    Ok(config)
}

/// Prints the completion action instead of navigating
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn reload(&self) {
        println!("reload");
    }

    fn redirect(&self, path: &str) {
        println!("redirect {path}");
    }
}

async fn show(config: ClientConfig, args: &ArgMatches) -> Result<()> {
    let kind = args.get_one::<String>("kind").map_or("", String::as_str);
    let id = args.get_one::<String>("id").map_or("", String::as_str);
    let auth = args.get_one::<String>("auth").map(String::as_str);
    let context_lines = args.get_one::<usize>("context-lines").copied().unwrap_or(3);

    let item = TimelineItem::from_markers(id, kind, auth)?;
    let page = Arc::new(TimelinePage::new([item.clone()])?);
    let client = Arc::new(ApiClient::new(config)?);
    let controller = ItemExpansionController::new(
        page.clone(),
        client,
        DiffRenderer::new().with_context_lines(context_lines),
        AuthGate::new(),
    );

    controller
        .reveal(&item.id)
        .await
        .with_context(|| format!("revealing {kind} {id}"))?;

    let rendered = match args.get_one::<String>("format").map(String::as_str) {
        Some("html") => page.to_html(),
        _ => page.to_text(),
    };
    print!("{rendered}");
    Ok(())
}

async fn delete(config: ClientConfig, args: &ArgMatches) -> Result<()> {
    let target = args.get_one::<String>("target").map_or("", String::as_str);
    let owner = args.get_one::<String>("owner").map(String::as_str);

    let trigger = DeleteTrigger::from_markers(target, owner)?;
    let router = DeleteActionRouter::new(
        Arc::new(ApiClient::new(config)?),
        Arc::new(StdoutNavigator),
    );

    router.open(&trigger)?;
    match router.confirm(trigger.flow()).await {
        Ok(_) => Ok(()),
        Err(RouterError::Delete(e)) => {
            anyhow::bail!("{} ({e})", e.user_message())
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let config = resolve_config(&matches, |key| std::env::var(key).ok())?;
    tracing::debug!(base_url = %config.base_url, "client configured");

    match matches.subcommand() {
        Some(("show", args)) => show(config, args).await,
        Some(("delete", args)) => delete(config, args).await,
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use timeline_client::ENV_BASE_URL;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn command_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn show_parses_markers() {
        let matches = cli()
            .try_get_matches_from(["timeline", "show", "createEdit", "7", "--auth", "logged-in"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "show");
        assert_eq!(args.get_one::<String>("kind").unwrap(), "createEdit");
        assert_eq!(args.get_one::<String>("format").unwrap(), "text");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(cli()
            .try_get_matches_from(["timeline", "show", "recipe", "7"])
            .is_err());
    }

    #[test]
    fn flags_override_file_and_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://file:1\"").unwrap();
        writeln!(file, "bearer_token = \"from-file\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let matches = cli()
            .try_get_matches_from([
                "timeline",
                "--config",
                path.as_str(),
                "--token",
                "from-flag",
                "delete",
                "/api/edit/1",
            ])
            .unwrap();
        let config = resolve_config(&matches, |key| {
            (key == ENV_BASE_URL).then(|| "http://env:2".to_string())
        })
        .unwrap();

        assert_eq!(config.base_url, "http://env:2");
        assert_eq!(config.bearer_token.as_deref(), Some("from-flag"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let matches = cli()
            .try_get_matches_from([
                "timeline",
                "--config",
                "/no/such/timeline.toml",
                "delete",
                "/api/edit/1",
            ])
            .unwrap();
        assert!(resolve_config(&matches, no_env).is_err());
    }
}
