//! Per-message portrait sweep.
//!
//! The frame index sweeps 0 → ceiling → 0 one step every
//! `frame_interval` ticks. The ceiling depends on the phase: the speaking
//! ceiling while text is being revealed, the idle ceiling otherwise. Back at
//! frame 0 in the idle phase, a random pause may hold the face at rest. A
//! message wait (`\.`, `\|`) snaps everything back to the resting pose.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::settings::MessageSettings;
use crate::ledger::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepState {
    /// Holding frame 0 until the pause countdown expires.
    AtRest,
    Advancing,
    Retreating,
}

/// Sheet row a frame is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceRow {
    Idle,
    Speaking,
}

impl FaceRow {
    pub fn sheet_row(self) -> u32 {
        match self {
            FaceRow::Idle => 0,
            FaceRow::Speaking => 1,
        }
    }
}

/// The frame to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceFrame {
    pub index: u32,
    pub row: FaceRow,
}

impl FaceFrame {
    /// Source region on a sheet of `face_width × face_height` cells.
    pub fn source_rect(&self, face_width: i32, face_height: i32) -> Rect {
        let col = i32::try_from(self.index).unwrap_or(i32::MAX);
        let row = i32::try_from(self.row.sheet_row()).unwrap_or(i32::MAX);
        Rect::new(
            col.saturating_mul(face_width),
            row.saturating_mul(face_height),
            face_width,
            face_height,
        )
    }
}

/// What the host reports for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSignals {
    /// Text is being incrementally revealed.
    pub speaking: bool,
    /// An authored wait is in progress.
    pub waiting: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortraitAnimator {
    frame_interval: u32,
    frame_index: u32,
    state: SweepState,
    tick: u32,
    pause_remaining: u32,
    idle_ceiling: u32,
    speak_ceiling: u32,
    min_pause: u32,
    max_pause: u32,
}

impl PortraitAnimator {
    pub fn new(frame_interval: u32) -> Self {
        Self {
            frame_interval: frame_interval.max(1),
            frame_index: 0,
            state: SweepState::Advancing,
            tick: 0,
            pause_remaining: 0,
            idle_ceiling: 0,
            speak_ceiling: 0,
            min_pause: 0,
            max_pause: 0,
        }
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn pause_remaining(&self) -> u32 {
        self.pause_remaining
    }

    /// Capture the message settings and rewind to the resting pose.
    pub fn start_message(&mut self, settings: &MessageSettings) {
        self.idle_ceiling = settings.idle_ceiling();
        self.speak_ceiling = settings.speak_ceiling();
        self.min_pause = settings.min_pause_ticks;
        self.max_pause = settings.max_pause_ticks;
        self.reset();
    }

    fn reset(&mut self) {
        self.frame_index = 0;
        self.state = SweepState::Advancing;
        self.tick = 0;
        self.pause_remaining = 0;
    }

    pub fn current_frame(&self, speaking: bool) -> FaceFrame {
        FaceFrame {
            index: self.frame_index,
            row: if speaking {
                FaceRow::Speaking
            } else {
                FaceRow::Idle
            },
        }
    }

    fn ceiling(&self, speaking: bool) -> u32 {
        if speaking {
            self.speak_ceiling
        } else {
            self.idle_ceiling
        }
    }

    /// Advance one host tick. Returns the frame to redraw, if any.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        signals: TickSignals,
        rng: &mut R,
    ) -> Option<FaceFrame> {
        if signals.waiting {
            self.reset();
            return Some(self.current_frame(signals.speaking));
        }

        if self.state == SweepState::AtRest {
            self.pause_remaining = self.pause_remaining.saturating_sub(1);
            if self.pause_remaining == 0 {
                self.state = SweepState::Advancing;
            }
            return None;
        }

        self.tick += 1;
        if self.tick < self.frame_interval {
            return None;
        }
        self.tick = 0;

        let ceiling = self.ceiling(signals.speaking);
        match self.state {
            SweepState::Advancing => {
                self.frame_index = (self.frame_index + 1).min(ceiling);
                if self.frame_index >= ceiling {
                    self.state = SweepState::Retreating;
                }
            }
            SweepState::Retreating => {
                self.frame_index = self.frame_index.saturating_sub(1).min(ceiling);
                if self.frame_index == 0 {
                    self.state = SweepState::Advancing;
                    if !signals.speaking && self.max_pause > 0 {
                        self.begin_pause(rng);
                    }
                }
            }
            SweepState::AtRest => {}
        }
        Some(self.current_frame(signals.speaking))
    }

    fn begin_pause<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let low = self.min_pause.min(self.max_pause);
        let high = self.min_pause.max(self.max_pause);
        let pause = rng.gen_range(low..=high);
        if pause > 0 {
            debug!("Portrait resting for {} ticks", pause);
            self.pause_remaining = pause;
            self.state = SweepState::AtRest;
        }
    }
}
