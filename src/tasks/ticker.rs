//! Tokio-backed tick scheduler

use std::{collections::HashMap, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use super::widget::WidgetCommand;
use crate::controller::{TickHandle, TickScheduler};

/// Runs one interval task per registration and posts its ticks into the
/// widget's command queue. Only a weak sender is held, so the queue closes
/// once every `WidgetHandle` is gone.
#[derive(Debug)]
pub struct TokioTickScheduler {
    commands: mpsc::WeakUnboundedSender<WidgetCommand>,
    next_id: u64,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioTickScheduler {
    pub fn new(commands: mpsc::WeakUnboundedSender<WidgetCommand>) -> Self {
        Self {
            commands,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Number of registrations with a live interval task
    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule(&mut self, every: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        let commands = self.commands.clone();

        let task = tokio::spawn(async move {
            // The controller renders on start, so the first tick is one
            // period out.
            let mut interval = interval_at(Instant::now() + every, every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let Some(commands) = commands.upgrade() else {
                    break;
                };
                if commands.send(WidgetCommand::Tick(handle)).is_err() {
                    break;
                }
            }
        });

        debug!("Scheduled tick {} every {:?}", handle.id(), every);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Cancelled tick {}", handle.id());
        }
    }
}

impl Drop for TokioTickScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
