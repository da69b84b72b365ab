//! Poll loop: drains the symbol bus and ticks the session on a fixed cadence.

use std::time::Duration;

use gestureai_bus::SymbolBusReceiver;
use gestureai_practice::TargetPicker;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::session::{SessionCommand, SignSession};

const COMMAND_CAPACITY: usize = 64;

/// Controls a spawned poll loop.
pub struct PollLoopHandle<P: TargetPicker> {
    cancel_token: CancellationToken,
    commands: mpsc::Sender<SessionCommand>,
    task: JoinHandle<SignSession<P>>,
}

impl<P: TargetPicker> PollLoopHandle<P> {
    /// Sender for user actions.
    pub fn commands(&self) -> mpsc::Sender<SessionCommand> {
        self.commands.clone()
    }

    /// Queue a user action. Returns false if the loop has exited.
    pub async fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the loop and take the session back.
    pub async fn stop(self) -> Option<SignSession<P>> {
        self.cancel_token.cancel();
        match self.task.await {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::error!(error = %e, "Poll loop task failed");
                None
            }
        }
    }
}

/// Spawn [`run_poll_loop`] on the current runtime.
pub fn spawn_poll_loop<P>(
    session: SignSession<P>,
    frames: SymbolBusReceiver,
    interval: Duration,
) -> PollLoopHandle<P>
where
    P: TargetPicker + 'static,
{
    let cancel_token = CancellationToken::new();
    let (commands, command_rx) = mpsc::channel(COMMAND_CAPACITY);

    let task = tokio::spawn(run_poll_loop(
        session,
        frames,
        command_rx,
        interval,
        cancel_token.child_token(),
    ));

    PollLoopHandle {
        cancel_token,
        commands,
        task,
    }
}

/// Drive `session` until cancelled, then hand it back.
///
/// Each tick drains the bus to the newest frame before polling, so a slow
/// tick never works through a backlog. Commands are applied as they arrive.
pub async fn run_poll_loop<P: TargetPicker>(
    mut session: SignSession<P>,
    mut frames: SymbolBusReceiver,
    mut commands: mpsc::Receiver<SessionCommand>,
    interval: Duration,
    cancel_token: CancellationToken,
) -> SignSession<P> {
    let started = Instant::now();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut commands_open = true;

    tracing::info!(interval_ms = interval.as_millis() as u64, "Poll loop started");

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                tracing::info!("Poll loop cancelled");
                break;
            }
            command = commands.recv(), if commands_open => {
                match command {
                    Some(command) => session.apply(command),
                    None => {
                        tracing::debug!("Command channel closed");
                        commands_open = false;
                    }
                }
            }
            _ = ticker.tick() => {
                if let Some(frame) = frames.drain_to_latest() {
                    session.on_frame(frame);
                }
                let now_ms = started.elapsed().as_millis() as u64;
                session.poll(now_ms);
            }
        }
    }

    let status = session.pipeline_status().snapshot();
    tracing::info!(
        polls = status.polls,
        commits = status.commits,
        gaps = frames.gaps_detected(),
        "Poll loop stopped"
    );
    session
}
