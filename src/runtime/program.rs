//! Program: the update loop and command scheduler.

use super::{ProgramConfig, ProgramError};
use crate::command::{filter, Cmd, Command, NativeScheduler};
use crate::message::{Msg, NativeMsg};
use crate::model::Model;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Drives a root [`Model`]: runs its commands and feeds their messages back.
pub struct Program<M: Model> {
    /// The root component.
    model: M,
    /// Configuration.
    config: ProgramConfig,
    /// Sender cloned into every command thread.
    msg_tx: Sender<Msg>,
    /// Inbound messages.
    msg_rx: Receiver<Msg>,
    /// Commands spawned but not yet finished.
    in_flight: Arc<AtomicUsize>,
    /// Where frames are written, if anywhere.
    output: Option<Box<dyn Write + Send>>,
    /// Last rendered view.
    view: String,
    /// Frames rendered so far.
    frame_count: u64,
    /// Whether `init` has run.
    started: bool,
    /// Cleared by `Msg::Quit`.
    running: bool,
}

impl<M: Model> Program<M> {
    /// Create a program with default configuration.
    pub fn new(model: M) -> Self {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Create a program with custom configuration.
    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        let (msg_tx, msg_rx) = bounded(config.queue_capacity.max(1));
        Self {
            model,
            config,
            msg_tx,
            msg_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
            output: None,
            view: String::new(),
            frame_count: 0,
            started: false,
            running: true,
        }
    }

    /// Write every changed frame to `output` using terminal escape sequences.
    #[must_use]
    pub fn with_output<W: Write + Send + 'static>(mut self, output: W) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Get a reference to the root model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the root model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// The most recently rendered view.
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Number of frames rendered.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the program has not been asked to quit.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether no command is in flight and no message is waiting.
    pub fn is_idle(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) == 0 && self.msg_rx.is_empty()
    }

    /// Inject a message from outside.
    ///
    /// Blocks while the queue is full. The program holds the receiving end,
    /// so the send cannot fail.
    pub fn send(&self, msg: Msg) {
        self.msg_tx.send(msg).ok();
    }

    /// A sender for background producers.
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Run the model's `init`, render the first frame and dispatch its command.
    ///
    /// Subsequent calls do nothing.
    pub fn start(&mut self) -> Result<(), ProgramError> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        let cmd = self.model.init();
        self.render(true)?;
        self.dispatch(cmd)
    }

    /// Process at most one message, waiting up to `timeout` for it.
    ///
    /// Returns whether a message was processed.
    pub fn step(&mut self, timeout: Duration) -> Result<bool, ProgramError> {
        self.start()?;
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.process(msg)?;
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => Ok(false),
        }
    }

    /// Run until quit or, if configured, until idle. Returns the final model.
    pub fn run(mut self) -> Result<M, ProgramError> {
        self.start()?;
        while self.running {
            let processed = self.step(self.config.poll_interval)?;
            if !processed && self.config.exit_when_idle && self.is_idle() {
                debug!(frames = self.frame_count, "program idle");
                break;
            }
        }
        Ok(self.model)
    }

    /// Handle one inbound message.
    fn process(&mut self, msg: Msg) -> Result<(), ProgramError> {
        let Some(msg) = filter(&NativeScheduler, msg) else {
            return Ok(());
        };
        trace!(kind = msg.kind(), "processing message");
        match msg {
            Msg::Quit => {
                debug!("quit requested");
                self.running = false;
            }
            Msg::Frame => self.render(true)?,
            Msg::Native(NativeMsg::Batch(cmds)) => {
                for cmd in cmds {
                    self.spawn(cmd)?;
                }
            }
            Msg::Native(NativeMsg::Sequence(cmds)) => self.spawn_sequence(cmds)?,
            other => {
                let cmd = self.model.update(other);
                self.render(false)?;
                self.dispatch(cmd)?;
            }
        }
        Ok(())
    }

    fn dispatch(&self, cmd: Cmd) -> Result<(), ProgramError> {
        match cmd {
            Some(cmd) => self.spawn(cmd),
            None => Ok(()),
        }
    }

    /// Run one command on its own thread.
    fn spawn(&self, cmd: Command) -> Result<(), ProgramError> {
        let tx = self.msg_tx.clone();
        self.spawn_worker(move || {
            let _ = tx.send(cmd.run());
        })
    }

    /// Run commands on one thread, delivering each result before the next starts.
    fn spawn_sequence(&self, cmds: Vec<Command>) -> Result<(), ProgramError> {
        debug!(len = cmds.len(), "running sequence");
        let tx = self.msg_tx.clone();
        self.spawn_worker(move || {
            for cmd in cmds {
                deliver_in_order(cmd.run(), &tx);
            }
        })
    }

    fn spawn_worker<F>(&self, work: F) -> Result<(), ProgramError>
    where
        F: FnOnce() + Send + 'static,
    {
        let guard = InFlight::enter(&self.in_flight);
        thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || {
                let _guard = guard;
                work();
            })
            .map(drop)
            .map_err(ProgramError::Spawn)
    }

    /// Re-render, writing the frame if it changed (or if forced).
    fn render(&mut self, force: bool) -> Result<(), ProgramError> {
        let view = self.model.view();
        if !force && view == self.view {
            return Ok(());
        }
        self.frame_count += 1;
        if let Some(output) = self.output.as_mut() {
            write_frame(output, &view).map_err(ProgramError::Output)?;
        }
        self.view = view;
        Ok(())
    }
}

/// Expand nested collections inline so a sequence step completes, batches
/// included, before the next step starts.
fn deliver_in_order(msg: Msg, tx: &Sender<Msg>) {
    match filter(&NativeScheduler, msg) {
        Some(Msg::Native(NativeMsg::Sequence(cmds))) => {
            for cmd in cmds {
                deliver_in_order(cmd.run(), tx);
            }
        }
        Some(Msg::Native(NativeMsg::Batch(cmds))) => {
            thread::scope(|scope| {
                for cmd in cmds {
                    scope.spawn(move || deliver_in_order(cmd.run(), tx));
                }
            });
        }
        Some(msg) => {
            let _ = tx.send(msg);
        }
        None => {}
    }
}

fn write_frame<W: Write>(output: &mut W, view: &str) -> std::io::Result<()> {
    queue!(output, Clear(ClearType::All))?;
    for (row, line) in view.lines().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(output, cursor::MoveTo(0, row), Print(line))?;
    }
    output.flush()
}

/// Counts a command as in flight until dropped, even if the command panics.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if thread::panicking() {
            warn!("command panicked");
        }
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
