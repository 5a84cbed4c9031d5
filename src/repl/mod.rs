//! REPL Module
//!
//! Interactive read-eval-print loop over any async line source.

mod command;
mod session;

pub use command::{Command, COMMANDS};
pub use session::{Reply, Session, CATCH_ROLL_MAX};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::Result;

/// Prompt printed before each line is read.
pub const PROMPT: &str = "pokedex > ";

/// Runs the loop until `exit` or end of input.
///
/// Command failures (unknown command, upstream error, ...) are written to
/// `output` and the loop continues. Only I/O errors on `input` or `output`
/// end it early.
pub async fn run<R, W>(session: &mut Session, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input, leaving REPL");
            output.write_all(b"\n").await?;
            break;
        };

        let reply = match Command::parse(&line) {
            Ok(Some(command)) => session.execute(command).await,
            Ok(None) => continue,
            Err(e) => Err(e),
        };

        match reply {
            Ok(Reply::Print(text)) => output.write_all(text.as_bytes()).await?,
            Ok(Reply::Exit(text)) => {
                output.write_all(text.as_bytes()).await?;
                break;
            }
            Err(e) => output.write_all(format!("{}\n", e).as_bytes()).await?,
        }
    }

    output.flush().await?;
    Ok(())
}
