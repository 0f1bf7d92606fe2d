//! Program errors.

use std::io;

use thiserror::Error;

/// Failures of the host program itself.
///
/// Commands never fail the program: they report failure as messages.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// The OS refused to start a command thread.
    #[error("failed to spawn command thread: {0}")]
    Spawn(#[source] io::Error),

    /// Writing a frame to the output sink failed.
    #[error("failed to write frame: {0}")]
    Output(#[source] io::Error),
}
