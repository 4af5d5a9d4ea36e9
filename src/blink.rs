//! Modulo-based blink schedule
//!
//! Each tick is folded into a [`BlinkState`] by [`advance`], which is a pure
//! function of the previous state and the channel table. The caller applies
//! the resulting pin writes and performs the shutdown when it is signalled.

use crate::reference::ReferenceDevice;

pub const CHANNEL_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<Level> for bool {
    #[inline]
    fn from(level: Level) -> bool {
        level == Level::High
    }
}

/// One LED's schedule, all values in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkChannel {
    pub device: ReferenceDevice,
    pub on_period: u16,
    pub off_period: u16,
    pub off_deadline: u16,
}

impl BlinkChannel {
    pub const fn new(
        device: ReferenceDevice,
        on_period: u16,
        off_period: u16,
        off_deadline: u16,
    ) -> Self {
        assert!(on_period > 0 && off_period > 0);
        Self {
            device,
            on_period,
            off_period,
            off_deadline,
        }
    }

    /// Level to drive at `tick`, if any. The on-check wins when both
    /// periods divide the tick.
    #[inline]
    pub fn decide(&self, tick: u16) -> Option<Level> {
        if tick % self.on_period == 0 {
            Some(Level::High)
        } else if tick % self.off_period == 0 && tick < self.off_deadline {
            Some(Level::Low)
        } else {
            None
        }
    }

    /// Past the deadline the channel is latched high
    #[inline]
    pub fn is_complete(&self, tick: u16) -> bool {
        tick >= self.off_deadline
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Asleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkState {
    pub tick: u16,
    /// Last level written per channel, `None` before the first write
    pub levels: [Option<Level>; CHANNEL_COUNT],
    pub phase: Phase,
}

impl BlinkState {
    pub const fn new() -> Self {
        Self {
            tick: 0,
            levels: [None; CHANNEL_COUNT],
            phase: Phase::Running,
        }
    }
}

impl Default for BlinkState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: BlinkState,
    pub writes: [Option<Level>; CHANNEL_COUNT],
    /// Channels that reached their off deadline on this tick
    pub completed: [bool; CHANNEL_COUNT],
    pub shutdown: bool,
}

impl Step {
    fn idle(state: BlinkState) -> Self {
        Self {
            state,
            writes: [None; CHANNEL_COUNT],
            completed: [false; CHANNEL_COUNT],
            shutdown: false,
        }
    }
}

pub fn advance(
    prev: BlinkState,
    channels: &[BlinkChannel; CHANNEL_COUNT],
    shutdown_tick: u16,
) -> Step {
    if prev.phase == Phase::Asleep {
        return Step::idle(prev);
    }

    let tick = prev.tick.wrapping_add(1);
    let mut step = Step::idle(BlinkState { tick, ..prev });

    for (idx, channel) in channels.iter().enumerate() {
        let write = channel.decide(tick);
        if write.is_some() {
            step.state.levels[idx] = write;
        }
        step.writes[idx] = write;
        step.completed[idx] = channel.is_complete(tick) && !channel.is_complete(prev.tick);
    }

    if tick == shutdown_tick {
        step.state.levels = [Some(Level::Low); CHANNEL_COUNT];
        step.state.phase = Phase::Asleep;
        step.shutdown = true;
    }

    step
}
