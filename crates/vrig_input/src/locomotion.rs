//! Head-relative thumbstick locomotion
//!
//! Moves the rig holder in the ground plane while the left thumbstick is
//! tilted. "Forward" follows where the head currently faces: the ground
//! basis is rebuilt from the HMD transform every frame.
//!
//! Controls:
//! - Left thumbstick X: strafe along the flattened head right axis
//! - Left thumbstick Y: move along the flattened head forward axis
//!   (pushing up moves toward -forward, the direction the user looks)
//! - Aim/grip poses: copied onto the matching rig entities

use std::fmt;

use vrig_math::{ops, Mat4, Vec2, Vec3, Vec4};

use crate::codes::{InputKeyCode, PoseStream};
use crate::event::{InputEvent, InputSubscriber, InputTopic};

const WORLD_UP: Vec3 = Vec3::Y;

/// Below this length a cross product against world up is treated as zero
const DEGENERATE_LENGTH: f32 = 1e-6;

/// Scene access needed by the controller
///
/// Implemented by the host's scene graph. Handles are resolved once at
/// creation and reused; a handle that no longer resolves reads as `None`.
pub trait SceneAccess {
    type Handle: Copy + fmt::Debug;

    /// Find an entity by name
    fn find_entity(&self, name: &str) -> Option<Self::Handle>;

    /// Local transform of an entity
    fn local_transform(&self, entity: Self::Handle) -> Option<Mat4>;

    /// Local translation of an entity
    fn local_translation(&self, entity: Self::Handle) -> Option<Vec3> {
        self.local_transform(entity).map(|m| m.translation())
    }

    /// Write a local transform, applied immediately
    ///
    /// Returns false if the entity no longer exists.
    fn set_local_transform(&mut self, entity: Self::Handle, transform: Mat4) -> bool;
}

/// Names of the scene entities that make up the rig
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RigNames {
    pub left_aim: String,
    pub left_grip: String,
    pub right_aim: String,
    pub right_grip: String,
    pub hmd: String,
    pub holder: String,
}

impl Default for RigNames {
    fn default() -> Self {
        Self {
            left_aim: "leftAim".to_string(),
            left_grip: "leftGrip".to_string(),
            right_aim: "rightAim".to_string(),
            right_grip: "rightGrip".to_string(),
            hmd: "hmd".to_string(),
            holder: "vrHolder".to_string(),
        }
    }
}

impl RigNames {
    fn pose_target(&self, stream: PoseStream) -> &str {
        match stream {
            PoseStream::LeftAim => &self.left_aim,
            PoseStream::LeftGrip => &self.left_grip,
            PoseStream::RightAim => &self.right_aim,
            PoseStream::RightGrip => &self.right_grip,
        }
    }
}

/// Tuning for the locomotion controller
#[derive(Clone, Debug, PartialEq)]
pub struct LocomotionSettings {
    /// Displacement per second at full stick deflection
    pub speed: f32,
    /// Rig entity names
    pub names: RigNames,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            names: RigNames::default(),
        }
    }
}

/// Error raised when the controller cannot act on the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocomotionError {
    /// A lifecycle callback ran before `on_created` succeeded
    NotCreated,
    /// A required rig entity is missing from the scene
    EntityNotFound(String),
    /// A rig entity resolved at creation has since been removed
    StaleEntity(String),
}

impl fmt::Display for LocomotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocomotionError::NotCreated => write!(f, "Locomotion controller used before creation"),
            LocomotionError::EntityNotFound(name) => write!(f, "Rig entity not found: {}", name),
            LocomotionError::StaleEntity(name) => write!(f, "Rig entity no longer exists: {}", name),
        }
    }
}

impl std::error::Error for LocomotionError {}

/// Orthonormal movement axes lying in the ground plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl GroundBasis {
    pub const ZERO: Self = Self { forward: Vec3::ZERO, right: Vec3::ZERO };
}

/// Build the ground-plane basis for a head transform
///
/// The head +X axis is crossed with world up to get a flattened forward
/// axis, and up is crossed with that to get the flattened right axis. Both
/// have y = 0 and unit length, and they are perpendicular, whatever the
/// head pitch or roll.
///
/// When the head +X axis points straight up or down, the head +Z axis is
/// flattened the same way instead. If neither has a horizontal component
/// the basis is zero and no movement results.
pub fn ground_basis(head: &Mat4) -> GroundBasis {
    let head_x = Vec3::truncate(ops::transform(head, Vec4::X));
    let head_z = Vec3::truncate(ops::transform(head, Vec4::Z));

    let mut forward = ops::cross(head_x, WORLD_UP);
    if ops::length(forward) < DEGENERATE_LENGTH {
        forward = ops::cross(ops::cross(WORLD_UP, head_z), WORLD_UP);
        if ops::length(forward) < DEGENERATE_LENGTH {
            return GroundBasis::ZERO;
        }
    }
    let forward = ops::normalize(forward);
    let right = ops::normalize(ops::cross(WORLD_UP, forward));

    GroundBasis { forward, right }
}

/// Rig entities resolved once at creation
#[derive(Clone, Copy, Debug)]
struct RigHandles<H> {
    left_aim: H,
    left_grip: H,
    right_aim: H,
    right_grip: H,
    hmd: H,
    holder: H,
}

impl<H: Copy> RigHandles<H> {
    fn pose_target(&self, stream: PoseStream) -> H {
        match stream {
            PoseStream::LeftAim => self.left_aim,
            PoseStream::LeftGrip => self.left_grip,
            PoseStream::RightAim => self.right_aim,
            PoseStream::RightGrip => self.right_grip,
        }
    }
}

/// Per-entity locomotion state
///
/// Driven by the host through three lifecycle callbacks plus input
/// delivery: [`on_created`](Self::on_created), [`on_input`](Self::on_input),
/// [`on_updated`](Self::on_updated) and [`on_destroyed`](Self::on_destroyed).
pub struct LocomotionController<H> {
    settings: LocomotionSettings,
    // Raw stick deflection, scaled by the frame that consumes it
    stick: Vec2,
    // Displacement applied by the most recent update
    dxy: Vec2,
    dt: f32,
    initial_translation: Option<Vec3>,
    rig: Option<RigHandles<H>>,
}

impl<H: Copy + fmt::Debug> Default for LocomotionController<H> {
    fn default() -> Self {
        Self::new(LocomotionSettings::default())
    }
}

impl<H: Copy + fmt::Debug> LocomotionController<H> {
    pub fn new(settings: LocomotionSettings) -> Self {
        Self {
            settings,
            stick: Vec2::ZERO,
            dxy: Vec2::ZERO,
            dt: 0.0,
            initial_translation: None,
            rig: None,
        }
    }

    /// Builder: set movement speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.settings.speed = speed;
        self
    }

    /// Builder: set rig entity names
    pub fn with_names(mut self, names: RigNames) -> Self {
        self.settings.names = names;
        self
    }

    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    /// Resolve the rig entities and subscribe to stick and pose input
    ///
    /// `owner` is the entity this controller is attached to; its starting
    /// translation is kept for diagnostics. Fails without subscribing
    /// anything if a rig entity is missing.
    pub fn on_created<S, I>(&mut self, owner: H, scene: &S, input: &mut I) -> Result<(), LocomotionError>
    where
        S: SceneAccess<Handle = H>,
        I: InputSubscriber,
    {
        self.initial_translation = scene.local_translation(owner);
        match self.initial_translation {
            Some(t) => log::info!("Locomotion attached at {}", t),
            None => log::warn!("Locomotion owner {:?} has no transform", owner),
        }

        let names = &self.settings.names;
        let resolve = |name: &str| {
            scene
                .find_entity(name)
                .ok_or_else(|| LocomotionError::EntityNotFound(name.to_string()))
        };
        let rig = RigHandles {
            left_aim: resolve(&names.left_aim)?,
            left_grip: resolve(&names.left_grip)?,
            right_aim: resolve(&names.right_aim)?,
            right_grip: resolve(&names.right_grip)?,
            hmd: resolve(&names.hmd)?,
            holder: resolve(&names.holder)?,
        };

        input.subscribe(InputTopic::Control(InputKeyCode::LeftThumbstickX));
        input.subscribe(InputTopic::Control(InputKeyCode::LeftThumbstickY));
        for stream in PoseStream::ALL {
            input.subscribe(InputTopic::Pose(stream));
        }

        self.rig = Some(rig);
        self.stick = Vec2::ZERO;
        self.dxy = Vec2::ZERO;
        Ok(())
    }

    /// Handle one subscribed input event
    ///
    /// Stick values are stored as-is. Poses are written straight to the
    /// matching rig entity.
    pub fn on_input<S>(&mut self, event: &InputEvent, scene: &mut S) -> Result<(), LocomotionError>
    where
        S: SceneAccess<Handle = H>,
    {
        match *event {
            InputEvent::Control { code: InputKeyCode::LeftThumbstickX, value } => {
                self.stick.x = value;
                Ok(())
            }
            InputEvent::Control { code: InputKeyCode::LeftThumbstickY, value } => {
                self.stick.y = value;
                Ok(())
            }
            InputEvent::Control { .. } => Ok(()),
            InputEvent::Pose { stream, transform } => {
                let rig = self.rig.as_ref().ok_or(LocomotionError::NotCreated)?;
                if scene.set_local_transform(rig.pose_target(stream), transform) {
                    Ok(())
                } else {
                    Err(LocomotionError::StaleEntity(
                        self.settings.names.pose_target(stream).to_string(),
                    ))
                }
            }
        }
    }

    /// Advance the holder for one frame
    ///
    /// Returns the holder's new translation. On error the holder is left
    /// unchanged.
    pub fn on_updated<S>(&mut self, timestep: f32, scene: &mut S) -> Result<Vec3, LocomotionError>
    where
        S: SceneAccess<Handle = H>,
    {
        self.dt = timestep;
        let rig = self.rig.as_ref().ok_or(LocomotionError::NotCreated)?;
        let names = &self.settings.names;

        let head = scene
            .local_transform(rig.hmd)
            .ok_or_else(|| LocomotionError::StaleEntity(names.hmd.clone()))?;
        let basis = ground_basis(&head);
        let forward = Vec4::from(basis.forward);
        let right = Vec4::from(basis.right);

        let mut holder = scene
            .local_transform(rig.holder)
            .ok_or_else(|| LocomotionError::StaleEntity(names.holder.clone()))?;

        let scale = timestep * self.settings.speed;
        self.dxy = Vec2::new(self.stick.x * scale, self.stick.y * scale);

        // Ground plane only: c3.y is never touched
        holder.c3.z -= forward.z * self.dxy.y;
        holder.c3.x -= forward.x * self.dxy.y;

        holder.c3.x += right.x * self.dxy.x;
        holder.c3.z += right.z * self.dxy.x;

        if !scene.set_local_transform(rig.holder, holder) {
            return Err(LocomotionError::StaleEntity(names.holder.clone()));
        }
        Ok(holder.translation())
    }

    /// Drop the cached rig and input state
    pub fn on_destroyed(&mut self) {
        if self.rig.take().is_some() {
            log::debug!("Locomotion detached");
        }
        self.stick = Vec2::ZERO;
        self.dxy = Vec2::ZERO;
    }

    /// Whether `on_created` has succeeded and `on_destroyed` not yet run
    pub fn is_created(&self) -> bool {
        self.rig.is_some()
    }

    /// Raw stick deflection last received
    pub fn stick(&self) -> Vec2 {
        self.stick
    }

    /// Displacement applied by the most recent update
    pub fn displacement(&self) -> Vec2 {
        self.dxy
    }

    /// Timestep of the most recent update
    pub fn last_timestep(&self) -> f32 {
        self.dt
    }

    /// Owner translation recorded at creation
    pub fn initial_translation(&self) -> Option<Vec3> {
        self.initial_translation
    }
}
