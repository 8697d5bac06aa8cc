//! Component type codes
//!
//! Values match the host's component table.

use bitflags::bitflags;
use serde::{Serialize, Deserialize};

/// Kind of component an entity can carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ComponentType {
    Camera = 0,
    VrDisplay = 1,
    Light = 2,
    Mesh = 3,
    UI = 4,
    Wireframe = 5,
    Script = 6,
    DynamicBody = 7,
    StaticBody = 8,
}

impl ComponentType {
    pub const ALL: [ComponentType; 9] = [
        Self::Camera,
        Self::VrDisplay,
        Self::Light,
        Self::Mesh,
        Self::UI,
        Self::Wireframe,
        Self::Script,
        Self::DynamicBody,
        Self::StaticBody,
    ];

    /// Look up a component type by its host value
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    #[inline]
    pub fn raw(self) -> u8 {
        self as u8
    }
}

bitflags! {
    /// Set of component types attached to an entity
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ComponentSet: u16 {
        const CAMERA = 1 << 0;
        const VR_DISPLAY = 1 << 1;
        const LIGHT = 1 << 2;
        const MESH = 1 << 3;
        const UI = 1 << 4;
        const WIREFRAME = 1 << 5;
        const SCRIPT = 1 << 6;
        const DYNAMIC_BODY = 1 << 7;
        const STATIC_BODY = 1 << 8;
    }
}

impl From<ComponentType> for ComponentSet {
    fn from(c: ComponentType) -> Self {
        ComponentSet::from_bits_truncate(1 << c.raw())
    }
}

impl ComponentSet {
    pub fn has(&self, component: ComponentType) -> bool {
        self.contains(component.into())
    }

    /// Component types in host order
    pub fn types(&self) -> impl Iterator<Item = ComponentType> + '_ {
        ComponentType::ALL.into_iter().filter(move |c| self.has(*c))
    }
}
