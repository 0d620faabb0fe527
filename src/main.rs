//! Console entry point: Jarvis voice command interpreter.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the interpreter, simulated synthesizer and console display.
//! 5. Announce the console voice, press "start", open the recognizer.
//! 6. Spawn the stdin reader thread: every line is a final transcript,
//!    lines starting with `/` are UI commands.
//! 7. Run the orchestrator until stdin closes and pending speech finished.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use jarvis_voice::{
    config::AppConfig,
    display::{new_shared_display, ConsoleDisplay, HttpPhotoFetcher},
    interpreter::{Event, Interpreter, Orchestrator, RecognitionError, RecognizerEvent, UiEvent},
    speech::{ConsoleSynthesizer, SynthEvent, VoiceInfo},
    wake::SystemClock,
};

// ---------------------------------------------------------------------------
// stdin reader
// ---------------------------------------------------------------------------

/// Turn one console line into an event.  Blank lines and unknown commands
/// yield `None`.
fn line_to_event(line: &str) -> Option<Event> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('/') {
        let command = UiEvent::from_command(line);
        if command.is_none() {
            log::warn!("unknown command {line:?} (try /start, /clear-text, /clear-photos, /clear-log, /quit)");
        }
        return command.map(Event::Ui);
    }
    Some(Event::Recognizer(RecognizerEvent::heard(line)))
}

/// Read stdin on a dedicated thread, the console stand-in for a recognizer
/// that only reports final results.
fn spawn_stdin_reader(events: mpsc::Sender<Event>) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-recognizer".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        let error = RecognitionError::Session(e.to_string());
                        let _ = events.blocking_send(Event::Recognizer(RecognizerEvent::Error(error)));
                        break;
                    }
                };
                if let Some(event) = line_to_event(&line) {
                    if events.blocking_send(event).is_err() {
                        return;
                    }
                }
            }
            log::info!("stdin closed");
            let _ = events.blocking_send(Event::Recognizer(RecognizerEvent::Ended));
            let _ = events.blocking_send(Event::Ui(UiEvent::Quit));
        })
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Jarvis starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Interpreter and collaborators
    let interpreter = Interpreter::new(&config, Box::new(SystemClock))
        .with_context(|| format!("invalid assistant name {:?}", config.assistant.name))?;

    let (event_tx, event_rx) = mpsc::channel::<Event>(64);

    let synth = Arc::new(ConsoleSynthesizer::new(
        event_tx.clone(),
        config.speech.simulated_words_per_minute,
    ));
    let display = Arc::new(ConsoleDisplay::new(
        new_shared_display(&config.display, &config.assistant.name),
        Arc::new(HttpPhotoFetcher::from_config(&config.display)),
        Box::new(std::io::stdout()),
    ));

    // 5. Startup events, in the order a browser session delivers them
    let voices = vec![VoiceInfo::new("console", config.assistant.language.clone())];
    for event in [
        Event::Synth(SynthEvent::VoicesChanged(voices)),
        Event::Ui(UiEvent::Start),
        Event::Recognizer(RecognizerEvent::Started),
    ] {
        event_tx
            .try_send(event)
            .context("event channel rejected startup event")?;
    }

    // 6. stdin reader
    let _reader = spawn_stdin_reader(event_tx).context("failed to spawn stdin reader")?;

    // 7. Orchestrator (returns after Quit once speech has drained)
    let orchestrator = Orchestrator::new(interpreter, synth, display);
    let interpreter = rt.block_on(orchestrator.run(event_rx));

    log::info!("Jarvis stopped ({})", interpreter.state().label());
    Ok(())
}
