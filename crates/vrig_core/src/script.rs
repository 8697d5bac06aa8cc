//! Script lifecycle and dispatch
//!
//! A script is attached to one entity and receives four callbacks from
//! the host: created, input, updated and destroyed. Input is only
//! delivered for topics the script subscribed to while being created.

use std::fmt;

use slotmap::{new_key_type, SlotMap};
use vrig_input::{InputEvent, LocomotionController, LocomotionError, Subscriptions};

use crate::component::ComponentType;
use crate::world::{EntityKey, World};

/// Per-entity behaviour driven by the host
pub trait Script {
    /// Called once when the script is attached to `owner`
    ///
    /// Subscribe to input topics through `input`. Returning an error
    /// keeps the script from being attached.
    fn on_created(
        &mut self,
        owner: EntityKey,
        world: &World,
        input: &mut Subscriptions,
    ) -> Result<(), ScriptError>;

    /// Called for every subscribed input event
    fn on_input(&mut self, event: &InputEvent, world: &mut World) -> Result<(), ScriptError>;

    /// Called once per frame with the frame timestep in seconds
    fn on_updated(&mut self, timestep: f32, world: &mut World) -> Result<(), ScriptError>;

    /// Called once when the script is detached
    fn on_destroyed(&mut self, world: &mut World);
}

/// Error raised by a script callback
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// The owner entity does not exist in the world
    MissingOwner(EntityKey),
    /// Locomotion failure
    Locomotion(LocomotionError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::MissingOwner(key) => write!(f, "Owner entity {:?} does not exist", key),
            ScriptError::Locomotion(e) => write!(f, "Locomotion error: {}", e),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::MissingOwner(_) => None,
            ScriptError::Locomotion(e) => Some(e),
        }
    }
}

impl From<LocomotionError> for ScriptError {
    fn from(e: LocomotionError) -> Self {
        ScriptError::Locomotion(e)
    }
}

impl Script for LocomotionController<EntityKey> {
    fn on_created(
        &mut self,
        owner: EntityKey,
        world: &World,
        input: &mut Subscriptions,
    ) -> Result<(), ScriptError> {
        Ok(LocomotionController::on_created(self, owner, world, input)?)
    }

    fn on_input(&mut self, event: &InputEvent, world: &mut World) -> Result<(), ScriptError> {
        Ok(LocomotionController::on_input(self, event, world)?)
    }

    fn on_updated(&mut self, timestep: f32, world: &mut World) -> Result<(), ScriptError> {
        let translation = LocomotionController::on_updated(self, timestep, world)?;
        log::trace!("Holder at {}", translation);
        Ok(())
    }

    fn on_destroyed(&mut self, _world: &mut World) {
        LocomotionController::on_destroyed(self);
    }
}

new_key_type! {
    /// Key to an attached script
    pub struct ScriptKey;
}

struct ScriptSlot {
    owner: EntityKey,
    script: Box<dyn Script>,
    subscriptions: Subscriptions,
}

/// Owns attached scripts and drives their callbacks
#[derive(Default)]
pub struct ScriptHost {
    scripts: SlotMap<ScriptKey, ScriptSlot>,
}

impl ScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a script to an entity and run its creation callback
    ///
    /// On success the owner gains the [`ComponentType::Script`] component.
    pub fn attach<S>(&mut self, owner: EntityKey, script: S, world: &mut World) -> Result<ScriptKey, ScriptError>
    where
        S: Script + 'static,
    {
        self.attach_boxed(owner, Box::new(script), world)
    }

    /// Attach an already boxed script
    pub fn attach_boxed(
        &mut self,
        owner: EntityKey,
        mut script: Box<dyn Script>,
        world: &mut World,
    ) -> Result<ScriptKey, ScriptError> {
        if world.get_entity(owner).is_none() {
            return Err(ScriptError::MissingOwner(owner));
        }

        let mut subscriptions = Subscriptions::new();
        script.on_created(owner, world, &mut subscriptions)?;

        if let Some(entity) = world.get_entity_mut(owner) {
            entity.add_component(ComponentType::Script);
        }
        log::debug!("Attached script to {:?} with {} subscriptions", owner, subscriptions.len());

        Ok(self.scripts.insert(ScriptSlot {
            owner,
            script,
            subscriptions,
        }))
    }

    /// Detach a script, running its destruction callback
    ///
    /// Returns false if the key is stale.
    pub fn detach(&mut self, key: ScriptKey, world: &mut World) -> bool {
        let Some(mut slot) = self.scripts.remove(key) else {
            return false;
        };
        slot.script.on_destroyed(world);

        let owner = slot.owner;
        if !self.scripts.values().any(|s| s.owner == owner) {
            if let Some(entity) = world.get_entity_mut(owner) {
                entity.remove_component(ComponentType::Script);
            }
        }
        true
    }

    /// Detach every script owned by an entity, returning how many were removed
    pub fn detach_entity(&mut self, owner: EntityKey, world: &mut World) -> usize {
        let keys: Vec<ScriptKey> = self
            .scripts
            .iter()
            .filter(|(_, s)| s.owner == owner)
            .map(|(k, _)| k)
            .collect();
        keys.into_iter().filter(|&k| self.detach(k, world)).count()
    }

    /// Deliver an input event to every script subscribed to its topic
    ///
    /// Returns the number of scripts the event was delivered to. Failures
    /// are logged and do not stop delivery to the remaining scripts.
    pub fn dispatch(&mut self, event: &InputEvent, world: &mut World) -> usize {
        let mut delivered = 0;
        for (key, slot) in self.scripts.iter_mut() {
            if !slot.subscriptions.wants(event) {
                continue;
            }
            delivered += 1;
            if let Err(e) = slot.script.on_input(event, world) {
                log::warn!("Script {:?} failed to handle {:?}: {}", key, event.topic(), e);
            }
        }
        delivered
    }

    /// Run the per-frame callback of every script
    ///
    /// Returns the number of scripts that updated without error. Errors
    /// are logged and the remaining scripts still run.
    pub fn update(&mut self, timestep: f32, world: &mut World) -> usize {
        let mut ok = 0;
        for (key, slot) in self.scripts.iter_mut() {
            match slot.script.on_updated(timestep, world) {
                Ok(()) => ok += 1,
                Err(e) => log::error!("Script {:?} on {:?} failed to update: {}", key, slot.owner, e),
            }
        }
        ok
    }

    /// Detach every script
    pub fn clear(&mut self, world: &mut World) {
        let keys: Vec<ScriptKey> = self.scripts.keys().collect();
        for key in keys {
            self.detach(key, world);
        }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Owner entity of a script
    pub fn owner(&self, key: ScriptKey) -> Option<EntityKey> {
        self.scripts.get(key).map(|s| s.owner)
    }

    /// Topics a script subscribed to while being created
    pub fn subscriptions(&self, key: ScriptKey) -> Option<&Subscriptions> {
        self.scripts.get(key).map(|s| &s.subscriptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entity;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vrig_input::{InputKeyCode, InputSubscriber, InputTopic, PoseStream, SceneAccess};
    use vrig_math::{ops, Vec3};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn rig_world() -> (World, EntityKey) {
        let mut world = World::new();
        let player = world.add_entity(Entity::new().with_name("player"));
        for name in ["leftAim", "leftGrip", "rightAim", "rightGrip", "hmd"] {
            world.add_entity(Entity::new().with_name(name));
        }
        world.add_entity(
            Entity::new()
                .with_name("vrHolder")
                .with_transform(ops::translation(Vec3::new(0.0, 1.5, 0.0))),
        );
        (world, player)
    }

    fn stick(code: InputKeyCode, value: f32) -> InputEvent {
        InputEvent::Control { code, value }
    }

    /// Records every callback it receives
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        topic: InputTopic,
        fail_update: bool,
    }

    impl Script for Recorder {
        fn on_created(&mut self, _: EntityKey, _: &World, input: &mut Subscriptions) -> Result<(), ScriptError> {
            input.subscribe(self.topic);
            self.log.borrow_mut().push("created".into());
            Ok(())
        }

        fn on_input(&mut self, _: &InputEvent, _: &mut World) -> Result<(), ScriptError> {
            self.log.borrow_mut().push("input".into());
            Ok(())
        }

        fn on_updated(&mut self, _: f32, _: &mut World) -> Result<(), ScriptError> {
            self.log.borrow_mut().push("updated".into());
            if self.fail_update {
                Err(ScriptError::Locomotion(LocomotionError::NotCreated))
            } else {
                Ok(())
            }
        }

        fn on_destroyed(&mut self, _: &mut World) {
            self.log.borrow_mut().push("destroyed".into());
        }
    }

    fn recorder(topic: InputTopic) -> (Recorder, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Recorder {
                log: Rc::clone(&log),
                topic,
                fail_update: false,
            },
            log,
        )
    }

    #[test]
    fn test_attach_adds_script_component() {
        let (mut world, player) = rig_world();
        let mut host = ScriptHost::new();
        let key = host
            .attach(player, LocomotionController::default(), &mut world)
            .expect("rig is complete");

        assert_eq!(host.len(), 1);
        assert_eq!(host.owner(key), Some(player));
        assert_eq!(host.subscriptions(key).map(|s| s.len()), Some(6));
        assert!(world.get_entity(player).unwrap().has_component(ComponentType::Script));
    }

    #[test]
    fn test_attach_fails_on_incomplete_rig() {
        let mut world = World::new();
        let player = world.add_entity(Entity::new().with_name("player"));
        let mut host = ScriptHost::new();

        let err = host
            .attach(player, LocomotionController::default(), &mut world)
            .unwrap_err();
        assert!(matches!(err, ScriptError::Locomotion(LocomotionError::EntityNotFound(_))));
        assert!(host.is_empty());
        assert!(!world.get_entity(player).unwrap().has_component(ComponentType::Script));
    }

    #[test]
    fn test_attach_fails_on_missing_owner() {
        let (mut world, player) = rig_world();
        world.remove_entity(player);
        let mut host = ScriptHost::new();

        let err = host
            .attach(player, LocomotionController::default(), &mut world)
            .unwrap_err();
        assert_eq!(err, ScriptError::MissingOwner(player));
    }

    #[test]
    fn test_dispatch_only_subscribed() {
        let (mut world, player) = rig_world();
        let mut host = ScriptHost::new();
        let (script, log) = recorder(InputTopic::Control(InputKeyCode::RightAClick));
        host.attach(player, script, &mut world).unwrap();

        assert_eq!(host.dispatch(&stick(InputKeyCode::RightAClick, 1.0), &mut world), 1);
        assert_eq!(host.dispatch(&stick(InputKeyCode::RightBClick, 1.0), &mut world), 0);
        assert_eq!(*log.borrow(), vec!["created", "input"]);
    }

    #[test]
    fn test_locomotion_moves_holder_through_host() {
        let (mut world, player) = rig_world();
        let mut host = ScriptHost::new();
        host.attach(player, LocomotionController::default(), &mut world).unwrap();

        host.dispatch(&stick(InputKeyCode::LeftThumbstickX, 1.0), &mut world);
        assert_eq!(host.update(0.5, &mut world), 1);

        let holder = world.find_entity("vrHolder").unwrap();
        let t = world.local_translation(holder).unwrap();
        assert!(approx_eq(t.x, 0.5), "strafe right should move +X, got {}", t);
        assert!(approx_eq(t.y, 1.5));
        assert!(approx_eq(t.z, 0.0));
    }

    #[test]
    fn test_pose_dispatch_writes_rig_entity() {
        let (mut world, player) = rig_world();
        let mut host = ScriptHost::new();
        host.attach(player, LocomotionController::default(), &mut world).unwrap();

        let pose = ops::translation(Vec3::new(0.2, 1.6, -0.3));
        let event = InputEvent::Pose { stream: PoseStream::RightGrip, transform: pose };
        assert_eq!(host.dispatch(&event, &mut world), 1);

        let grip = world.find_entity("rightGrip").unwrap();
        assert_eq!(world.local_transform(grip), Some(pose));
    }

    #[test]
    fn test_update_error_does_not_stop_others() {
        let (mut world, player) = rig_world();
        let mut host = ScriptHost::new();
        let (mut failing, failing_log) = recorder(InputTopic::Pose(PoseStream::LeftAim));
        failing.fail_update = true;
        let (healthy, healthy_log) = recorder(InputTopic::Pose(PoseStream::LeftAim));
        host.attach(player, failing, &mut world).unwrap();
        host.attach(player, healthy, &mut world).unwrap();

        assert_eq!(host.update(0.016, &mut world), 1);
        assert_eq!(failing_log.borrow().last().map(String::as_str), Some("updated"));
        assert_eq!(healthy_log.borrow().last().map(String::as_str), Some("updated"));
    }

    #[test]
    fn test_update_with_removed_holder_reports_error() {
        let (mut world, player) = rig_world();
        let mut host = ScriptHost::new();
        host.attach(player, LocomotionController::default(), &mut world).unwrap();

        let holder = world.find_entity("vrHolder").unwrap();
        world.remove_entity(holder);
        assert_eq!(host.update(0.016, &mut world), 0);
    }

    #[test]
    fn test_detach_runs_destroyed() {
        let (mut world, player) = rig_world();
        let mut host = ScriptHost::new();
        let (script, log) = recorder(InputTopic::Control(InputKeyCode::LeftXClick));
        let key = host.attach(player, script, &mut world).unwrap();

        assert!(host.detach(key, &mut world));
        assert!(!host.detach(key, &mut world));
        assert_eq!(log.borrow().last().map(String::as_str), Some("destroyed"));
        assert!(!world.get_entity(player).unwrap().has_component(ComponentType::Script));
    }

    #[test]
    fn test_detach_entity_keeps_other_owners() {
        let (mut world, player) = rig_world();
        let other = world.add_entity(Entity::new().with_name("other"));
        let mut host = ScriptHost::new();
        let (a, _) = recorder(InputTopic::Control(InputKeyCode::LeftXClick));
        let (b, _) = recorder(InputTopic::Control(InputKeyCode::LeftXClick));
        let (c, _) = recorder(InputTopic::Control(InputKeyCode::LeftXClick));
        host.attach(player, a, &mut world).unwrap();
        host.attach(player, b, &mut world).unwrap();
        host.attach(other, c, &mut world).unwrap();

        assert_eq!(host.detach_entity(player, &mut world), 2);
        assert_eq!(host.len(), 1);
        assert!(world.get_entity(other).unwrap().has_component(ComponentType::Script));

        host.clear(&mut world);
        assert!(host.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = ScriptError::from(LocomotionError::EntityNotFound("hmd".into()));
        assert!(err.to_string().contains("hmd"));
    }
}
