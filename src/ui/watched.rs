//! UI port backed by a watch channel

use tokio::sync::watch;

use crate::{
    controller::UiPort,
    state::{DisplayFields, MessageCategory, RunState, WidgetView},
};

/// Publishes every UI change as a new `WidgetView` snapshot
#[derive(Debug)]
pub struct WatchedView {
    tx: watch::Sender<WidgetView>,
}

impl WatchedView {
    /// Create the port together with a receiver for front-ends
    pub fn new() -> (Self, watch::Receiver<WidgetView>) {
        let (tx, rx) = watch::channel(WidgetView::default());
        (Self { tx }, rx)
    }

    pub fn snapshot(&self) -> WidgetView {
        self.tx.borrow().clone()
    }

    /// Mirror the controller's run state into the view
    pub fn publish_run_state(&self, run_state: RunState) {
        self.tx.send_if_modified(|view| {
            if view.run_state == run_state {
                return false;
            }
            view.run_state = run_state;
            true
        });
    }
}

impl UiPort for WatchedView {
    fn target_input(&self) -> String {
        self.tx.borrow().target_input.clone()
    }

    fn set_target_input(&mut self, value: &str) {
        self.tx.send_modify(|view| view.target_input = value.to_string());
    }

    fn set_display(&mut self, fields: &DisplayFields) {
        self.tx.send_if_modified(|view| {
            if view.display == *fields {
                return false;
            }
            view.display = fields.clone();
            true
        });
    }

    fn set_message(&mut self, text: &str, category: MessageCategory) {
        self.tx.send_modify(|view| {
            view.message = text.to_string();
            view.message_category = category;
        });
    }

    fn set_start_label(&mut self, label: &str) {
        self.tx.send_modify(|view| view.start_label = label.to_string());
    }
}
