use crate::control::{ControlCommand, ControlReply, apply};
use crate::pipeline::ShutdownHandle;
use crate::snapshot::CaptureState;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Serve control commands from `reader` until `quit`, end of input, or
/// shutdown. Only `quit` stops the pipeline.
pub async fn run_control<R>(reader: R, state: CaptureState, shutdown: ShutdownHandle)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut stop = shutdown.subscribe();

    loop {
        let line = tokio::select! {
            _ = stop.wait_for(|stopped| *stopped) => break,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::debug!("control channel closed");
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "control channel read failed");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let Ok(cmd) = line.parse::<ControlCommand>();
        let reply = apply(&cmd, &state);
        match &reply {
            ControlReply::Unknown(_) => tracing::warn!("{reply}"),
            _ => tracing::info!(command = line.trim(), "{reply}"),
        }

        if cmd == ControlCommand::Quit {
            shutdown.trigger();
            break;
        }
    }
}
