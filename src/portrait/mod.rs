//! Animated message portraits.
//!
//! A face sheet has the idle frames on its top row and the speaking frames
//! below. [`MessageSettings`] holds what script commands configure,
//! [`PortraitAnimator`] is the per-message state machine that turns host
//! ticks into frame redraws.

pub mod animator;
pub mod command;
pub mod settings;

pub use animator::{FaceFrame, FaceRow, PortraitAnimator, SweepState, TickSignals};
pub use command::{AnimFaceCommand, CommandError};
pub use settings::MessageSettings;
