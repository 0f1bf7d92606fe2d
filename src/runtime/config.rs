//! Program configuration.

use std::time::Duration;

/// Configuration for a [`Program`](super::Program).
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Capacity of the message queue shared by all command threads.
    pub queue_capacity: usize,
    /// How long `run` waits for a message before checking for idleness.
    pub poll_interval: Duration,
    /// Whether `run` returns once no command is in flight and no message is
    /// queued. Programs with a perpetual tick or channel bridge never go idle.
    pub exit_when_idle: bool,
    /// Name given to command worker threads.
    pub thread_name: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            poll_interval: Duration::from_millis(10),
            exit_when_idle: true,
            thread_name: String::from("bramble-cmd"),
        }
    }
}
