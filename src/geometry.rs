//! Screen rectangles

use serde::{Deserialize, Serialize};

/// A rectangle in global screen coordinates (top-left origin)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Convert into the bottom-left origin space anchored on the main
    /// display, as used by AppKit.
    pub fn flipped_within(&self, main: &Rect) -> Rect {
        Rect {
            x: self.x,
            y: main.height - self.bottom(),
            width: self.width,
            height: self.height,
        }
    }
}
