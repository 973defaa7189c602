//! Common-event trigger on equipment changes.
//!
//! When a watched actor changes the item in a slot of the configured
//! equipment type, the actor id is stored in a variable and a common event
//! is reserved, so a script can swap the character's sprite to match.

use log::debug;

use crate::config::EquipTriggerConfig;
use crate::host::ScriptHost;

/// Which actors fire the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorFilter {
    All,
    Only(Vec<u32>),
}

impl ActorFilter {
    /// A list whose first entry is 0 selects every actor.
    pub fn from_ids(ids: &[u32]) -> Self {
        match ids.first() {
            None | Some(0) => ActorFilter::All,
            Some(_) => ActorFilter::Only(ids.to_vec()),
        }
    }

    pub fn matches(&self, actor_id: u32) -> bool {
        match self {
            ActorFilter::All => true,
            ActorFilter::Only(ids) => ids.contains(&actor_id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EquipChangeTrigger {
    enabled: bool,
    common_event_id: u32,
    slot_type: u32,
    variable_id: u32,
    actors: ActorFilter,
}

impl EquipChangeTrigger {
    pub fn from_config(config: &EquipTriggerConfig) -> Self {
        Self {
            enabled: config.enabled,
            common_event_id: config.common_event_id,
            slot_type: config.slot_type,
            variable_id: config.variable_id,
            actors: ActorFilter::from_ids(&config.actors),
        }
    }

    /// Call before the host applies the change. `equip_slots` maps each of
    /// the actor's slot indices to its equipment type. Returns true when the
    /// common event was reserved.
    pub fn on_change_equip(
        &self,
        actor_id: u32,
        slot_index: usize,
        equip_slots: &[u32],
        host: &mut dyn ScriptHost,
    ) -> bool {
        if !self.enabled || !self.actors.matches(actor_id) {
            return false;
        }
        if equip_slots.get(slot_index) != Some(&self.slot_type) {
            return false;
        }
        debug!(
            "Actor {} changed slot {} (type {}); reserving common event {}",
            actor_id, slot_index, self.slot_type, self.common_event_id
        );
        host.set_variable(self.variable_id, i64::from(actor_id));
        host.reserve_common_event(self.common_event_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        variables: Vec<(u32, i64)>,
        events: Vec<u32>,
    }

    impl ScriptHost for Recorder {
        fn set_variable(&mut self, variable_id: u32, value: i64) {
            self.variables.push((variable_id, value));
        }

        fn reserve_common_event(&mut self, event_id: u32) {
            self.events.push(event_id);
        }
    }

    // weapon, shield, head, body, accessory
    const SLOTS: [u32; 5] = [1, 2, 3, 4, 5];

    #[test]
    fn fires_for_watched_slot_type() {
        let trigger = EquipChangeTrigger::from_config(&EquipTriggerConfig {
            common_event_id: 12,
            variable_id: 8,
            ..EquipTriggerConfig::default()
        });
        let mut host = Recorder::default();
        assert!(trigger.on_change_equip(3, 3, &SLOTS, &mut host));
        assert_eq!(host.variables, vec![(8, 3)]);
        assert_eq!(host.events, vec![12]);

        assert!(!trigger.on_change_equip(3, 0, &SLOTS, &mut host));
        assert!(!trigger.on_change_equip(3, 9, &SLOTS, &mut host));
        assert_eq!(host.events.len(), 1);
    }

    #[test]
    fn respects_actor_filter() {
        let trigger = EquipChangeTrigger::from_config(&EquipTriggerConfig {
            actors: vec![1, 3, 5],
            ..EquipTriggerConfig::default()
        });
        let mut host = Recorder::default();
        assert!(trigger.on_change_equip(5, 3, &SLOTS, &mut host));
        assert!(!trigger.on_change_equip(2, 3, &SLOTS, &mut host));
        assert_eq!(host.variables, vec![(1, 5)]);
    }

    #[test]
    fn disabled_trigger_never_fires() {
        let trigger = EquipChangeTrigger::from_config(&EquipTriggerConfig {
            enabled: false,
            ..EquipTriggerConfig::default()
        });
        let mut host = Recorder::default();
        assert!(!trigger.on_change_equip(1, 3, &SLOTS, &mut host));
        assert!(host.events.is_empty());
    }

    #[test]
    fn zero_first_means_all_actors() {
        assert_eq!(ActorFilter::from_ids(&[0, 4]), ActorFilter::All);
        assert_eq!(ActorFilter::from_ids(&[]), ActorFilter::All);
        assert!(ActorFilter::from_ids(&[2]).matches(2));
        assert!(!ActorFilter::from_ids(&[2]).matches(0));
    }
}
