//! Widget runtime task
//!
//! One task owns the controller. Triggers from front-ends and ticks from the
//! scheduler share a single queue, so every event runs to completion before
//! the next one is looked at.

use std::time::Duration;

use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::ticker::TokioTickScheduler;
use crate::{
    controller::{Clock, CountdownController, StartError, TickHandle, UiPort},
    state::WidgetView,
    ui::WatchedView,
};

type WidgetController<C> = CountdownController<WatchedView, TokioTickScheduler, C>;

/// Events handled by the widget task
#[derive(Debug)]
pub enum WidgetCommand {
    /// Start trigger, optionally typing a new target into the input first
    Start {
        target: Option<String>,
        reply: oneshot::Sender<Result<WidgetView, StartError>>,
    },
    Stop {
        reply: oneshot::Sender<WidgetView>,
    },
    Tick(TickHandle),
    Shutdown,
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Rejected(#[from] StartError),
    #[error("countdown widget is no longer running")]
    Closed,
}

/// Cloneable handle used by front-ends to drive the widget
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    commands: mpsc::UnboundedSender<WidgetCommand>,
    view: watch::Receiver<WidgetView>,
}

impl WidgetHandle {
    /// Press the start/restart trigger
    pub async fn start(&self, target: Option<String>) -> Result<WidgetView, WidgetError> {
        let (reply, rx) = oneshot::channel();
        self.send(WidgetCommand::Start { target, reply })?;
        let result = rx.await.map_err(|_| WidgetError::Closed)?;
        Ok(result?)
    }

    /// Press the stop trigger
    pub async fn stop(&self) -> Result<WidgetView, WidgetError> {
        let (reply, rx) = oneshot::channel();
        self.send(WidgetCommand::Stop { reply })?;
        rx.await.map_err(|_| WidgetError::Closed)
    }

    /// Current view snapshot
    pub fn view(&self) -> WidgetView {
        self.view.borrow().clone()
    }

    /// Receiver that is notified on every view change
    pub fn subscribe(&self) -> watch::Receiver<WidgetView> {
        self.view.clone()
    }

    /// Stop ticking and end the widget task
    pub fn shutdown(&self) -> Result<(), WidgetError> {
        self.send(WidgetCommand::Shutdown)
    }

    fn send(&self, command: WidgetCommand) -> Result<(), WidgetError> {
        self.commands.send(command).map_err(|_| WidgetError::Closed)
    }
}

/// Create and initialize a widget, then spawn the task that drives it
pub fn spawn_widget<C>(clock: C, tick_interval: Duration) -> (WidgetHandle, JoinHandle<()>)
where
    C: Clock + Send + 'static,
{
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (port, view) = WatchedView::new();
    let scheduler = TokioTickScheduler::new(commands_tx.downgrade());

    let mut controller = CountdownController::new(port, scheduler, clock, tick_interval);
    controller.initialize();
    publish_run_state(&controller);

    let task = tokio::spawn(widget_task(controller, commands_rx));
    let handle = WidgetHandle {
        commands: commands_tx,
        view,
    };
    (handle, task)
}

async fn widget_task<C: Clock>(
    mut controller: WidgetController<C>,
    mut commands: mpsc::UnboundedReceiver<WidgetCommand>,
) {
    info!("Starting countdown widget task");

    // Ends on `Shutdown` or once the last `WidgetHandle` is dropped.
    while let Some(command) = commands.recv().await {
        match command {
            WidgetCommand::Start { target, reply } => {
                if let Some(target) = target {
                    controller.ui_mut().set_target_input(&target);
                }
                let result = controller.start();
                publish_run_state(&controller);
                let outcome = result.map(|()| controller.ui().snapshot());
                if reply.send(outcome).is_err() {
                    debug!("Start caller went away before the reply");
                }
            }
            WidgetCommand::Stop { reply } => {
                controller.stop();
                publish_run_state(&controller);
                if reply.send(controller.ui().snapshot()).is_err() {
                    debug!("Stop caller went away before the reply");
                }
            }
            WidgetCommand::Tick(handle) => {
                controller.on_tick(handle);
                publish_run_state(&controller);
            }
            WidgetCommand::Shutdown => {
                info!("Countdown widget shutting down");
                if controller.is_running() {
                    controller.stop();
                    publish_run_state(&controller);
                }
                break;
            }
        }
    }

    if controller.is_running() {
        debug!("All widget handles dropped, cancelling countdown");
        controller.stop();
        publish_run_state(&controller);
    }

    if controller.scheduler().live_count() > 0 {
        warn!("Widget task ended with live tick registrations");
    }
}

fn publish_run_state<C: Clock>(controller: &WidgetController<C>) {
    let run_state = controller.run_state();
    controller.ui().publish_run_state(run_state);
}
