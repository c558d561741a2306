use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::help_text;

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("PDFCHAT_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return env::temp_dir())
        .join("pdfchat");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for PdfChat")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running PdfChat with environment variable RUST_LOG=pdfchat")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_document() -> Arg {
    return Arg::new(ConfigKey::Document.to_string())
        .short('d')
        .long(ConfigKey::Document.to_string())
        .num_args(1)
        .help("Path to a PDF contract to load as soon as the chat starts.");
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat session.")
        .arg(arg_document());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("pdfchat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_document())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PDFCHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiKey.to_string())
                .long(ConfigKey::ApiKey.to_string())
                .env("GROQ_API_KEY")
                .hide_env_values(true)
                .num_args(1)
                .help("API key for the completion endpoint.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ApiUrl.to_string())
                .long(ConfigKey::ApiUrl.to_string())
                .env("PDFCHAT_API_URL")
                .num_args(1)
                .help(format!("Base URL of an OpenAI compatible chat completions API. [default: {}]", Config::default(ConfigKey::ApiUrl)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .short('m')
                .long(ConfigKey::Model.to_string())
                .env("PDFCHAT_MODEL")
                .num_args(1)
                .help(format!("The model used to answer questions. [default: {}]", Config::default(ConfigKey::Model)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HealthCheckTimeout.to_string())
                .long(ConfigKey::HealthCheckTimeout.to_string())
                .env("PDFCHAT_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when health checking the completion endpoint at startup. [default: {}]", Config::default(ConfigKey::HealthCheckTimeout)))
                .global(true),
        );
}

async fn load_config(matches: Vec<&ArgMatches>) -> Result<()> {
    Config::load(matches).await?;
    return Ok(());
}

/// Parses arguments and loads configuration. Returns false when a
/// subcommand already did its work and the chat should not start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            load_config(vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            load_config(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
