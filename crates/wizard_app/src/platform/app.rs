use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use wizard_core::{AppState, Msg};
use wizard_logging::{wizard_debug, wizard_info};

use super::cli::Cli;
use super::commands::{parse_command, Command, USAGE};
use super::config;
use super::dispatch::{Dispatched, Dispatcher};
use super::effects::EffectRunner;
use super::logging;
use super::ui;

/// Input to the app loop from stdin and the engine.
pub enum AppEvent {
    Input(Msg),
    Engine(Msg),
    /// Stdin reached end of file.
    InputClosed,
    Quit,
}

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load_settings(&cli)?;
    logging::initialize(&settings);
    wizard_info!(
        "Starting wizard variant={} content={:?}",
        settings.variant.name(),
        settings.content
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&settings, event_tx.clone())?;
    spawn_input_reader(event_tx)?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{USAGE}")?;

    let mut dispatcher = Dispatcher::new(AppState::with_variant(settings.variant));
    let started = dispatcher.start(settings.page_url.clone());
    present(&mut stdout, &runner, started)?;

    while let Ok(event) = event_rx.recv() {
        let dispatched = match event {
            AppEvent::Input(msg) => {
                wizard_debug!("Input {:?}", msg);
                dispatcher.input(msg)
            }
            AppEvent::Engine(msg) => dispatcher.engine_event(msg),
            AppEvent::InputClosed => {
                wizard_debug!("Input closed; waiting for outstanding work");
                dispatcher.close_input();
                Dispatched::default()
            }
            AppEvent::Quit => break,
        };
        present(&mut stdout, &runner, dispatched)?;
        if dispatcher.is_done() {
            break;
        }
    }

    wizard_info!("Wizard closed");
    Ok(())
}

fn present(stdout: &mut io::Stdout, runner: &EffectRunner, dispatched: Dispatched) -> Result<()> {
    for view in &dispatched.renders {
        write!(stdout, "\n{}", ui::render::render(view))?;
    }
    stdout.flush()?;
    runner.run(dispatched.effects);
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> Result<()> {
    thread::Builder::new()
        .name("wizard-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let event = match parse_command(&line) {
                    Ok(Command::Msg(msg)) => AppEvent::Input(msg),
                    Ok(Command::Quit) => AppEvent::Quit,
                    Err(err) => {
                        eprintln!("{err}\n{USAGE}");
                        continue;
                    }
                };
                let quit = matches!(event, AppEvent::Quit);
                if tx.send(event).is_err() || quit {
                    return;
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })
        .context("starting input thread")?;
    Ok(())
}
