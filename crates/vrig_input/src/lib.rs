//! VR Input Handling
//!
//! This crate provides the controller input vocabulary shared with the
//! host engine and the locomotion controller that turns thumbstick input
//! into movement of the rig holder.

mod codes;
mod event;
mod locomotion;

pub use codes::{Hand, InputKeyCode, PoseStream};
pub use event::{InputEvent, InputSubscriber, InputTopic, Subscriptions};
pub use locomotion::{
    ground_basis, GroundBasis, LocomotionController, LocomotionError, LocomotionSettings,
    RigNames, SceneAccess,
};
