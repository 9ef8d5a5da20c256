//! `analog-clock` - runs a desklet instance or edits its settings.

use std::{error::Error, process, sync::Arc};

use analog_clock::{
    cli::{
        Cli, CliService, Commands,
        formatting::{
            format_category, format_command, format_description, format_error, format_header,
        },
    },
    desklet::{self, AnalogClock, DeskletEvent, HeadlessHost, event_channel},
    paths::DeskletPaths,
    render::Layer,
    tracing_config,
};
use clap::Parser;
use tracing::{info, instrument, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { instance, log_file } => {
            if *log_file {
                tracing_config::init_with_file()?;
            } else {
                tracing_config::init()?;
            }

            run_desklet(instance).await?;
        }
        command => {
            tracing_config::init_cli_mode()?;

            if let Some((category, name, args)) = command.registry_call() {
                run_cli_command(category, name, args)?;
            }
        }
    }

    Ok(())
}

/// Runs one desklet against the headless host until interrupted.
#[instrument]
async fn run_desklet(instance: &str) -> Result<(), Box<dyn Error>> {
    let paths = DeskletPaths::from_env()?;
    let host = Arc::new(HeadlessHost::default());
    let (events, receiver) = event_channel();

    let clock = AnalogClock::new(host.clone(), &paths, instance, events.clone())?;

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupted, removing desklet"),
            Err(e) => warn!(error = %e, "cannot listen for interrupt"),
        }

        if events.send(DeskletEvent::Remove).is_err() {
            warn!("desklet already stopped");
        }
    });

    desklet::run(clock, receiver).await?;

    if let Some(surface) = host.surface() {
        info!(
            backdrop_paints = surface.paint_count(Layer::Backdrop),
            hands_paints = surface.paint_count(Layer::Hands),
            "desklet stopped"
        );
    }

    Ok(())
}

/// Executes a registry command and prints its output.
///
/// Without a command name, prints the commands of the category.
fn run_cli_command(
    category: &str,
    name: Option<&str>,
    args: &[String],
) -> Result<(), Box<dyn Error>> {
    let cli_service = CliService::new(DeskletPaths::from_env()?);

    let Some(name) = name else {
        println!("{}", category_help(&cli_service, category));
        return Ok(());
    };

    match cli_service.execute_command(category, name, args) {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {}", format_error("Error"), e);
            process::exit(1);
        }
    }
}

fn category_help(cli_service: &CliService, category: &str) -> String {
    let mut lines = vec![format_header(&format!("analog-clock {category}"))];

    let commands = cli_service
        .list_all()
        .into_iter()
        .find(|(name, _)| name == category)
        .map(|(_, commands)| commands)
        .unwrap_or_default();

    for command in commands {
        let Some(metadata) = cli_service.describe(category, &command) else {
            continue;
        };

        let usage: Vec<String> = metadata
            .args
            .iter()
            .map(|arg| format!("<{}>", arg.name))
            .collect();

        lines.push(format!(
            "  {} {} {}",
            format_command(&metadata.name),
            usage.join(" "),
            format_description(&metadata.description)
        ));

        for example in &metadata.examples {
            lines.push(format!("      {}", format_description(example)));
        }
    }

    if lines.len() == 1 {
        lines.push(format!("  no commands in {}", format_category(category)));
    }

    lines.join("\n")
}
