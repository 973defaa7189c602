use serde::{Deserialize, Serialize};

use super::command::AnimFaceCommand;
use crate::config::PortraitConfig;

/// Live animation settings of the message system.
///
/// Commands mutate these at any time; an animator only reads them when a new
/// message starts, so changes land on the next message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageSettings {
    pub min_pause_ticks: u32,
    pub max_pause_ticks: u32,
    /// Highest idle frame index (frame count - 1).
    idle_ceiling: u32,
    /// Highest speaking frame index (frame count - 1).
    speak_ceiling: u32,
    #[serde(default)]
    face_name: String,
}

impl MessageSettings {
    pub fn from_config(config: &PortraitConfig) -> Self {
        Self {
            min_pause_ticks: config.min_pause_ticks,
            max_pause_ticks: config.max_pause_ticks,
            idle_ceiling: config.idle_frames.saturating_sub(1),
            speak_ceiling: config.speak_frames.saturating_sub(1),
            face_name: String::new(),
        }
    }

    pub fn idle_ceiling(&self) -> u32 {
        self.idle_ceiling
    }

    pub fn speak_ceiling(&self) -> u32 {
        self.speak_ceiling
    }

    pub fn face_name(&self) -> &str {
        &self.face_name
    }

    pub fn set_face_name(&mut self, face_name: &str) {
        self.face_name = face_name.to_string();
    }

    /// Face sheets named with the configured prefix are animated.
    pub fn is_animated_face(&self, prefix: &str) -> bool {
        !self.face_name.is_empty() && self.face_name.starts_with(prefix)
    }

    /// Stored as given; an inverted range is normalised when sampled.
    pub fn set_animation_delay(&mut self, min: u32, max: u32) {
        self.min_pause_ticks = min;
        self.max_pause_ticks = max;
    }

    /// Frame counts. Each non-positive argument is ignored on its own.
    pub fn set_animation_frames(&mut self, idle: Option<i64>, speak: Option<i64>) {
        if let Some(ceiling) = idle.and_then(frame_ceiling) {
            self.idle_ceiling = ceiling;
        }
        if let Some(ceiling) = speak.and_then(frame_ceiling) {
            self.speak_ceiling = ceiling;
        }
    }

    pub fn apply(&mut self, command: &AnimFaceCommand) {
        match *command {
            AnimFaceCommand::Delay { min, max } => self.set_animation_delay(min, max),
            AnimFaceCommand::SetFrames { idle, speak } => self.set_animation_frames(idle, speak),
        }
    }
}

fn frame_ceiling(count: i64) -> Option<u32> {
    if count > 0 {
        u32::try_from(count - 1).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_store_ceilings_and_ignore_non_positive() {
        let mut settings = MessageSettings::from_config(&PortraitConfig::default());
        assert_eq!(settings.idle_ceiling(), 1);
        assert_eq!(settings.speak_ceiling(), 2);

        settings.set_animation_frames(Some(4), Some(0));
        assert_eq!(settings.idle_ceiling(), 3);
        assert_eq!(settings.speak_ceiling(), 2);

        settings.set_animation_frames(None, Some(-3));
        assert_eq!(settings.idle_ceiling(), 3);
        assert_eq!(settings.speak_ceiling(), 2);
    }

    #[test]
    fn prefix_marks_animated_faces() {
        let mut settings = MessageSettings::from_config(&PortraitConfig::default());
        assert!(!settings.is_animated_face("anim_"));
        settings.set_face_name("anim_Hero");
        assert!(settings.is_animated_face("anim_"));
        settings.set_face_name("Actor1");
        assert!(!settings.is_animated_face("anim_"));
    }
}
