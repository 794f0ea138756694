//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::ini_config_adapter::IniConfigAdapter;
use crate::domain::error::RestConfigError;
use crate::domain::settings::ServerSettings;
use crate::logging::init_logging;
#[cfg(feature = "client")]
use crate::ports::config_source::ConfigSource;

#[derive(Parser, Debug)]
#[command(name = "restconfig", about = "Serve and query INI configuration over HTTP")]
pub struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Connection options shared by every client subcommand.
#[derive(Args, Debug, Clone)]
pub struct RemoteArgs {
    /// Base URL of the config API, e.g. http://127.0.0.1:5000/config
    #[arg(long)]
    pub url: String,
    #[arg(short, long)]
    pub username: Option<String>,
    #[arg(short, long)]
    pub password: Option<String>,
    /// Extra request header, repeatable
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve an INI file over the config API
    Serve {
        #[arg(short, long)]
        config: PathBuf,
        /// INI file with a [server] section (listen, prefix)
        #[arg(short, long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        listen: Option<String>,
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Check that a config API is reachable and well-formed
    Check {
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// List section names
    Sections {
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// List the option names of a section
    Section {
        #[command(flatten)]
        remote: RemoteArgs,
        name: String,
    },
    /// Print the default section's options
    Defaults {
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Print a single option value
    Get {
        #[command(flatten)]
        remote: RemoteArgs,
        section: String,
        option: String,
        /// Printed instead when the section or option does not exist
        #[arg(long)]
        fallback: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);
    let result = match cli.command {
        Command::Serve {
            config,
            settings,
            listen,
            prefix,
        } => run_serve(&config, settings.as_deref(), listen.as_deref(), prefix.as_deref()),
        Command::Check { remote } => run_check(&remote),
        Command::Sections { remote } => run_sections(&remote),
        Command::Section { remote, name } => run_section(&remote, &name),
        Command::Defaults { remote } => run_defaults(&remote),
        Command::Get {
            remote,
            section,
            option,
            fallback,
        } => run_get(&remote, &section, &option, fallback.as_deref()),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

pub fn load_config(path: &Path) -> Result<IniConfigAdapter, RestConfigError> {
    tracing::info!(path = %path.display(), "loading config");
    IniConfigAdapter::from_file(path)
}

/// Settings file values first, then command-line overrides.
pub fn resolve_settings(
    settings_path: Option<&Path>,
    listen: Option<&str>,
    prefix: Option<&str>,
) -> Result<ServerSettings, RestConfigError> {
    let settings = match settings_path {
        Some(path) => ServerSettings::from_source(&load_config(path)?)?,
        None => ServerSettings::default(),
    };
    settings.with_overrides(listen, prefix)
}

/// Split a `NAME:VALUE` header argument.
pub fn parse_header_arg(arg: &str) -> Result<(String, String), RestConfigError> {
    match arg.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(RestConfigError::InvalidHeader {
            name: arg.to_string(),
        }),
    }
}

fn run_serve(
    config_path: &Path,
    settings_path: Option<&Path>,
    listen: Option<&str>,
    prefix: Option<&str>,
) -> Result<ExitCode, RestConfigError> {
    let config = load_config(config_path)?;
    let settings = resolve_settings(settings_path, listen, prefix)?;

    #[cfg(feature = "server")]
    {
        use crate::adapters::web::{AppState, build_app, serve};

        let app = build_app(AppState::new(config), &settings.prefix);
        tracing::info!(listen = %settings.listen, prefix = %settings.prefix, "starting config API");
        tokio::runtime::Runtime::new()?.block_on(serve(settings.listen, app))?;
        Ok(ExitCode::SUCCESS)
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (config, settings);
        eprintln!("error: server feature is required for serve");
        Ok(ExitCode::from(1))
    }
}

#[cfg(feature = "client")]
pub fn build_client(
    remote: &RemoteArgs,
) -> Result<crate::adapters::rest_client::ConfigClient, RestConfigError> {
    let mut client = crate::adapters::rest_client::ConfigClient::new(&remote.url)?
        .with_basic_auth(
            remote.username.as_deref().unwrap_or_default(),
            remote.password.as_deref().unwrap_or_default(),
        );
    for arg in &remote.headers {
        let (name, value) = parse_header_arg(arg)?;
        client = client.with_header(&name, &value)?;
    }
    Ok(client)
}

#[cfg(feature = "client")]
fn run_check(remote: &RemoteArgs) -> Result<ExitCode, RestConfigError> {
    if build_client(remote)?.working() {
        println!("ok");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("unreachable");
        Ok(ExitCode::from(1))
    }
}

#[cfg(feature = "client")]
fn run_sections(remote: &RemoteArgs) -> Result<ExitCode, RestConfigError> {
    for name in build_client(remote)?.sections()? {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "client")]
fn run_section(remote: &RemoteArgs, name: &str) -> Result<ExitCode, RestConfigError> {
    for option in build_client(remote)?.get_section(name)? {
        println!("{option}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "client")]
fn run_defaults(remote: &RemoteArgs) -> Result<ExitCode, RestConfigError> {
    for (option, value) in build_client(remote)?.defaults()? {
        println!("{option} = {value}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "client")]
fn run_get(
    remote: &RemoteArgs,
    section: &str,
    option: &str,
    fallback: Option<&str>,
) -> Result<ExitCode, RestConfigError> {
    println!("{}", build_client(remote)?.get(section, option, fallback)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "client"))]
fn client_required() -> Result<ExitCode, RestConfigError> {
    eprintln!("error: client feature is required for remote commands");
    Ok(ExitCode::from(1))
}

#[cfg(not(feature = "client"))]
fn run_check(_: &RemoteArgs) -> Result<ExitCode, RestConfigError> {
    client_required()
}

#[cfg(not(feature = "client"))]
fn run_sections(_: &RemoteArgs) -> Result<ExitCode, RestConfigError> {
    client_required()
}

#[cfg(not(feature = "client"))]
fn run_section(_: &RemoteArgs, _: &str) -> Result<ExitCode, RestConfigError> {
    client_required()
}

#[cfg(not(feature = "client"))]
fn run_defaults(_: &RemoteArgs) -> Result<ExitCode, RestConfigError> {
    client_required()
}

#[cfg(not(feature = "client"))]
fn run_get(_: &RemoteArgs, _: &str, _: &str, _: Option<&str>) -> Result<ExitCode, RestConfigError> {
    client_required()
}
