//! Bounding-box geometry shared by spans, lines, and blocks.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page coordinates.
///
/// Serialized as a `[x1, y1, x2, y2]` array, the shape text dumps use.
/// The y axis grows downward, so `y1` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = BBox::new(10.0, 10.0, 50.0, 20.0);
        let b = BBox::new(40.0, 8.0, 90.0, 22.0);
        assert_eq!(a.union(&b), BBox::new(10.0, 8.0, 90.0, 22.0));
    }

    #[test]
    fn test_array_serde() {
        let bbox: BBox = serde_json::from_str("[1.0, 2.0, 3.5, 4.0]").unwrap();
        assert_eq!(bbox.width(), 2.5);
        assert_eq!(serde_json::to_string(&bbox).unwrap(), "[1.0,2.0,3.5,4.0]");
    }
}
