//! Input events and subscriptions
//!
//! Scripts declare the topics they care about while being created; the
//! host only delivers events whose topic was subscribed.

use std::collections::HashSet;
use vrig_math::Mat4;

use crate::codes::{InputKeyCode, PoseStream};

/// Something a script can subscribe to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputTopic {
    /// Value changes of a single control
    Control(InputKeyCode),
    /// Pose updates of a tracked device
    Pose(PoseStream),
}

/// A change delivered by the host input system
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A control changed to a new scalar value
    Control { code: InputKeyCode, value: f32 },
    /// A tracked device reported a new pose
    Pose { stream: PoseStream, transform: Mat4 },
}

impl InputEvent {
    pub fn topic(&self) -> InputTopic {
        match self {
            InputEvent::Control { code, .. } => InputTopic::Control(*code),
            InputEvent::Pose { stream, .. } => InputTopic::Pose(*stream),
        }
    }
}

/// Registration seam offered by the host during script creation
pub trait InputSubscriber {
    fn subscribe(&mut self, topic: InputTopic);
}

/// The set of topics one script subscribed to
#[derive(Clone, Debug, Default)]
pub struct Subscriptions {
    topics: HashSet<InputTopic>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, topic: InputTopic) -> bool {
        self.topics.contains(&topic)
    }

    /// Whether an event should be delivered to the owner of this set
    pub fn wants(&self, event: &InputEvent) -> bool {
        self.contains(event.topic())
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputTopic> {
        self.topics.iter()
    }

    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

impl InputSubscriber for Subscriptions {
    fn subscribe(&mut self, topic: InputTopic) {
        if !self.topics.insert(topic) {
            log::debug!("Duplicate subscription to {:?} ignored", topic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_topics() {
        let stick = InputEvent::Control { code: InputKeyCode::LeftThumbstickX, value: 0.5 };
        assert_eq!(stick.topic(), InputTopic::Control(InputKeyCode::LeftThumbstickX));

        let pose = InputEvent::Pose { stream: PoseStream::LeftAim, transform: Mat4::IDENTITY };
        assert_eq!(pose.topic(), InputTopic::Pose(PoseStream::LeftAim));
    }

    #[test]
    fn test_subscriptions_filter_events() {
        let mut subs = Subscriptions::new();
        subs.subscribe(InputTopic::Control(InputKeyCode::LeftThumbstickY));
        subs.subscribe(InputTopic::Control(InputKeyCode::LeftThumbstickY));
        assert_eq!(subs.len(), 1);

        let wanted = InputEvent::Control { code: InputKeyCode::LeftThumbstickY, value: 1.0 };
        let other = InputEvent::Control { code: InputKeyCode::RightThumbstickY, value: 1.0 };
        assert!(subs.wants(&wanted));
        assert!(!subs.wants(&other));

        subs.clear();
        assert!(subs.is_empty());
    }
}
