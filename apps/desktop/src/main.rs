use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use form_core::{
    config::process_env, load_settings, load_settings_from, AffixEngine, InteractionController,
    Settings,
};
use shared::error::FormError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::FormCommand;
use render::Renderer;

#[derive(Parser, Debug)]
#[command(about = "Type a line, see it rendered in olde English")]
struct Args {
    /// Settings file (defaults to ./yeold.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    debounce_ms: Option<u64>,
    #[arg(long)]
    no_prepend: bool,
    #[arg(long)]
    no_append: bool,
    /// Print each state as JSON instead of just the output
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = match &self.config {
            Some(path) => load_settings_from(path, process_env),
            None => load_settings(),
        };
        if let Some(ms) = self.debounce_ms {
            settings.debounce_ms = ms;
        }
        if self.no_prepend {
            settings.prepend = false;
        }
        if self.no_append {
            settings.append = false;
        }
        settings
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

type Widget = InteractionController<AffixEngine>;

/// Returns false once the user asked to quit.
fn handle_line(widget: &mut Widget, renderer: &Renderer, line: &str) -> Result<bool, FormError> {
    match FormCommand::parse(line) {
        FormCommand::Input(text) => {
            widget.on_input_change(text)?;
        }
        FormCommand::Prepend(on) => {
            widget.on_prepend_toggle(on)?;
        }
        FormCommand::Append(on) => {
            widget.on_append_toggle(on)?;
        }
        FormCommand::Submit => {
            widget.on_submit()?;
        }
        FormCommand::Show => {
            if let Err(err) = renderer.show(&widget.state()) {
                warn!(error = %err, "failed to print state");
            }
        }
        FormCommand::Quit => return Ok(false),
        FormCommand::Unknown(raw) => renderer.unknown(&raw),
    }
    Ok(true)
}

// Single-threaded on purpose: stdin lines and timer tokens are handled one at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = args.settings();
    init_tracing(&settings.log_filter);

    info!(
        debounce_ms = settings.debounce_ms,
        prepend = settings.prepend,
        append = settings.append,
        "form ready"
    );

    let engine = AffixEngine::new(settings.prefix.clone(), settings.suffix.clone());
    let mut widget = InteractionController::from_settings(engine, &settings);
    let mut renders = widget.subscribe();
    let mut renderer = Renderer::new(args.json);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match handle_line(&mut widget, &renderer, &line) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(err) => renderer.fault(&err),
                }
            }
            Some(fired) = widget.next_fired() => {
                if let Err(err) = widget.on_timer_fired(fired) {
                    renderer.fault(&err);
                }
            }
        }

        if renders.has_changed().unwrap_or(false) {
            let state = renders.borrow_and_update().clone();
            renderer.state_changed(&state)?;
        }
    }

    if let Err(err) = widget.settle().await {
        renderer.fault(&err);
    }
    if renders.has_changed().unwrap_or(false) {
        let state = renders.borrow_and_update().clone();
        renderer.state_changed(&state)?;
    }

    info!("form closed");
    Ok(())
}
