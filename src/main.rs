#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use domain::models::Action;
use domain::models::Event;
use domain::models::ServiceError;
use infrastructure::backends::BackendManager;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigError;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::AnswerService;

fn handle_error(err: Error) {
    eprintln!(
            "{}",
            Paint::red(format!(
                "Oh no! PdfChat has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
                env!("CARGO_PKG_VERSION"),
                env!("VERGEN_GIT_DESCRIBE"),
                err
            ))
        );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

/// Startup problems the user has to fix before chatting, printed without
/// the crash report.
fn exit_with_diagnostic(message: String) -> ! {
    eprintln!("{}", Paint::red(message));
    process::exit(1);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("pdfchat")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    if let Err(err) = Config::load_env_file() {
        exit_with_diagnostic(err.to_string());
    }

    match cli::parse().await {
        Ok(true) => (),
        Ok(false) => process::exit(0),
        Err(err) => {
            if let Some(config_err) = err.downcast_ref::<ConfigError>() {
                exit_with_diagnostic(config_err.to_string());
            }
            handle_error(err);
            return;
        }
    }

    let backend = match BackendManager::get() {
        Ok(backend) => backend,
        Err(err) => {
            tracing::error!(error = %err, "Unable to create backend");
            exit_with_diagnostic(err.to_string());
        }
    };

    let mut health_check_error = None;
    if let Err(err) = backend.health_check().await {
        if let ServiceError::Unauthorized(_) = err {
            exit_with_diagnostic(format!(
                "{err}. Check the GROQ_API_KEY environment variable or the --api-key flag."
            ));
        }

        tracing::warn!(error = %err, "Health check failed");
        health_check_error = Some(err);
    }

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(AnswerService::new(backend), event_tx, &mut action_rx)
            .await;
    });

    let ui_future = ui::start(action_tx, event_rx, health_check_error);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(Error::from(err)),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if let Err(err) = res {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    process::exit(0);
}
