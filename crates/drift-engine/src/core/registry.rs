use serde::{Deserialize, Serialize};

/// The four scenes, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SceneKind {
    #[default]
    Rain = 0,
    River = 1,
    Ocean = 2,
    Waves = 3,
}

impl SceneKind {
    /// Total number of scenes.
    pub const COUNT: usize = 4;

    pub const ALL: [SceneKind; Self::COUNT] = [Self::Rain, Self::River, Self::Ocean, Self::Waves];

    /// Convert from an index. Returns None if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Following scene, wrapping Waves → Rain.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Preceding scene, wrapping Rain → Waves.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::COUNT - 1) % Self::COUNT]
    }

    /// Static description of this scene.
    pub fn descriptor(self) -> &'static SceneDescriptor {
        &DESCRIPTORS[self.index()]
    }
}

/// Immutable scene metadata. Behavior lives in the matching `Scene` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneDescriptor {
    pub kind: SceneKind,
    /// Name shown in the navigation bar.
    pub name: &'static str,
    /// Built-in two-line poem; empty when the scene supplies its own.
    pub poem: &'static str,
    /// Background track played once the user has interacted.
    pub audio: &'static str,
}

pub const DESCRIPTORS: [SceneDescriptor; SceneKind::COUNT] = [
    SceneDescriptor {
        kind: SceneKind::Rain,
        name: "Rain",
        poem: "Each drop holds a memory,\nfinding its way home.",
        audio: "audio/rain.mp3",
    },
    SceneDescriptor {
        kind: SceneKind::River,
        name: "River",
        poem: "Flowing gently with time,\ncarrying echoes of the earth.",
        audio: "audio/river.mp3",
    },
    SceneDescriptor {
        kind: SceneKind::Ocean,
        name: "Ocean",
        poem: "",
        audio: "audio/ocean.mp3",
    },
    SceneDescriptor {
        kind: SceneKind::Waves,
        name: "Waves",
        poem: "Rise, fall, return again —\nthe rhythm of being.",
        audio: "audio/waves.mp3",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_four_times_is_identity() {
        for kind in SceneKind::ALL {
            let mut k = kind;
            for _ in 0..4 {
                k = k.next();
            }
            assert_eq!(k, kind);
        }
    }

    #[test]
    fn prev_undoes_next() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.next().prev(), kind);
        }
        assert_eq!(SceneKind::Rain.prev(), SceneKind::Waves);
    }

    #[test]
    fn descriptors_are_indexed_by_kind() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.descriptor().kind, kind);
        }
        assert_eq!(SceneKind::from_index(2), Some(SceneKind::Ocean));
        assert!(SceneKind::from_index(4).is_none());
    }

    #[test]
    fn only_ocean_has_empty_default_poem() {
        for d in DESCRIPTORS.iter() {
            assert_eq!(d.poem.is_empty(), d.kind == SceneKind::Ocean, "{}", d.name);
        }
    }
}
