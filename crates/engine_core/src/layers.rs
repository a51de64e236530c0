//! Collision layer masks used by overlap probes.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// A set of collision layers, one bit per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing only the given layer index (0..32).
    pub const fn layer(index: u32) -> Self {
        LayerMask(1 << index)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any layer is shared.
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_intersection() {
        let ground = LayerMask::layer(0);
        let props = LayerMask::layer(3);
        let both = ground | props;
        assert_eq!(both.bits(), 0b1001);
        assert!(both.intersects(ground));
        assert!(!ground.intersects(props));
        assert!(LayerMask::NONE.is_empty());
    }
}
