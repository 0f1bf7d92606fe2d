//! Periodic driver: a self-rescheduling tick command.
//!
//! [`tick`] sleeps for the component's frame duration and yields a
//! [`TickMsg`]. [`update_tick_model`] issues the next one whenever a tick is
//! observed, so the cycle is carried by the update loop itself rather than a
//! timer thread.

use std::thread;
use std::time::{Duration, Instant};

use super::Model;
use crate::command::{Cmd, Command};
use crate::message::Msg;

/// A component that updates on a fixed frame interval.
pub trait TickModel: Model {
    /// Time between ticks (e.g. 16ms for ~60 FPS).
    fn frame_duration(&self) -> Duration;
}

/// A tick, carrying the instant it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMsg(pub Instant);

impl TickMsg {
    /// When the tick fired.
    pub const fn instant(&self) -> Instant {
        self.0
    }
}

/// A command yielding a [`TickMsg`] once the frame duration has elapsed.
pub fn tick<M>(model: &M) -> Cmd
where
    M: TickModel + ?Sized,
{
    let interval = model.frame_duration();
    Some(Command::new(move || {
        thread::sleep(interval);
        Msg::Tick(TickMsg(Instant::now()))
    }))
}

/// Schedule the next tick when `msg` is a tick; otherwise no command.
pub fn update_tick_model<M>(model: &M, msg: &Msg) -> Cmd
where
    M: TickModel + ?Sized,
{
    match msg {
        Msg::Tick(_) => tick(model),
        _ => None,
    }
}
