//! Terminal front-end

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::watch,
};
use tracing::debug;

use crate::state::{RunState, WidgetView};

/// Format one status line, e.g. `00 days 01:01:01 | Countdown is running...`
pub fn render_line(view: &WidgetView) -> String {
    let display = &view.display;
    format!(
        "{} days {}:{}:{} | {}",
        display.days, display.hours, display.minutes, display.seconds, view.message
    )
}

/// Print a line whenever the rendered text changes. Returns once the
/// countdown has expired or the widget is gone.
pub async fn run_terminal<W: AsyncWrite + Unpin>(
    mut rx: watch::Receiver<WidgetView>,
    mut out: W,
) -> std::io::Result<()> {
    let mut last_line = String::new();

    loop {
        let view = rx.borrow_and_update().clone();
        let line = render_line(&view);
        if line != last_line {
            out.write_all(format!("{}\n", line).as_bytes()).await?;
            out.flush().await?;
            last_line = line;
        }

        if view.run_state == RunState::Expired {
            debug!("Countdown expired, terminal renderer done");
            return Ok(());
        }

        if rx.changed().await.is_err() {
            debug!("Widget closed, terminal renderer done");
            return Ok(());
        }
    }
}
