use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::console::commands::{CommandStatus, parse_command};
use crate::console::handlers::{handle_app_error, handle_command};
use crate::console::responses::{READY, format_response};
use crate::console::state::Console;
use crate::error::{AppError, ConsoleError};

/// Runs a console session over a line-based reader and writer.
///
/// - Greets with a 220 reply, then answers one reply per non-empty line.
/// - Lines longer than `max_command_length` are refused without parsing.
/// - Returns when the input ends or the user sends QUIT.
pub async fn run_console<R, W>(
    console: &mut Console,
    mut reader: R,
    mut writer: W,
    max_command_length: usize,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    send(&mut writer, &format_response(READY, "LiquidDoc ready. Type HELP")).await?;

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            info!("Input closed");
            break;
        }

        // Enforce command length limit
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.len() > max_command_length {
            let result = handle_app_error(ConsoleError::CommandTooLong(trimmed.len()).into());
            if let Some(msg) = result.message {
                send(&mut writer, &msg).await?;
            }
            continue;
        }
        if trimmed.trim().is_empty() {
            continue;
        }

        let result = match parse_command(trimmed) {
            Ok(command) => {
                debug!("Received: {:?}", command);
                handle_command(console, &command)
            }
            Err(e) => handle_app_error(e.into()),
        };

        if let CommandStatus::Failure(reason) = &result.status {
            warn!("Command failed: {}", reason);
        }
        if let Some(msg) = &result.message {
            send(&mut writer, msg).await?;
        }
        if result.status == CommandStatus::CloseSession {
            info!("Session closed by QUIT");
            break;
        }
    }

    Ok(())
}

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, msg: &str) -> Result<(), AppError> {
    writer.write_all(msg.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
