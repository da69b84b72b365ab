//! Replays a landmark recording through the sign pipeline and prints the
//! resulting translator text.
//!
//! Usage: gestureai-replay <recording.jsonl|-> [--config <path>] [--realtime] [--ask <question>]

mod recording;
mod runner;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use gestureai_application::AppConfig;
use gestureai_chat::{ChatAvailability, ChatConfig, ChatConversation, OpenAiClient};
use gestureai_events::{EventBusRef, TracingEventBus};
use tracing_subscriber::EnvFilter;

use crate::recording::{read_file, read_steps};

struct Args {
    recording: String,
    config: Option<PathBuf>,
    realtime: bool,
    ask: Option<String>,
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <recording.jsonl|-> [--config <path>] [--realtime] [--ask <question>]")
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "gestureai-replay".to_string());

    let mut recording = None;
    let mut config = None;
    let mut realtime = false;
    let mut ask = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().with_context(|| usage(&program))?;
                config = Some(PathBuf::from(path));
            }
            "--realtime" => realtime = true,
            "--ask" => ask = Some(args.next().with_context(|| usage(&program))?),
            "-h" | "--help" => {
                println!("{}", usage(&program));
                std::process::exit(0);
            }
            _ if recording.is_none() => recording = Some(arg),
            other => anyhow::bail!("unexpected argument '{other}'\n{}", usage(&program)),
        }
    }

    Ok(Args {
        recording: recording.with_context(|| usage(&program))?,
        config,
        realtime,
        ask,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gestureai=debug")),
        )
        .init();

    let args = parse_args()?;
    let config = AppConfig::load(args.config.as_deref())?;
    tracing::info!(?config, "Starting replay");

    let steps = if args.recording == "-" {
        read_steps(std::io::stdin().lock())?
    } else {
        read_file(Path::new(&args.recording))?
    };
    tracing::info!(steps = steps.len(), "Recording loaded");

    let events: EventBusRef = Arc::new(TracingEventBus);
    let summary = if args.realtime {
        runner::run_realtime(config, events.clone(), steps).await?
    } else {
        runner::run_simulated(config, events.clone(), steps)?
    };

    println!("{}", summary.text);
    tracing::info!(
        frames = summary.pipeline.frames_processed,
        detected = summary.detector_frames,
        skipped = summary.pipeline.frames_skipped,
        polls = summary.pipeline.polls,
        commits = summary.pipeline.commits,
        "Replay finished"
    );

    if let Some(question) = args.ask {
        ask_assistant(events, &question, &summary.text).await;
    }

    Ok(())
}

/// Send one question to the assistant, with the translated text as context.
async fn ask_assistant(events: EventBusRef, question: &str, translated: &str) {
    let chat_config = ChatConfig::from_env();
    if let ChatAvailability::Disabled { notice } = chat_config.availability() {
        eprintln!("{notice}");
        return;
    }

    let client = OpenAiClient::new(chat_config);
    let mut conversation = ChatConversation::with_events(events);
    let prompt = if translated.trim().is_empty() {
        question.to_string()
    } else {
        format!("{question}\n\nSigned text: {}", translated.trim())
    };

    if let Some(exchange) = conversation.send(&client, &prompt).await {
        match (&exchange.reply, &exchange.error) {
            (Some(reply), _) => println!("{reply}"),
            (None, Some(error)) => eprintln!("Assistant error: {error}"),
            (None, None) => {}
        }
    }
}
