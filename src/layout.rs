//! Layout constraint types.

/// Min/max box constraints handed down during layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl Constraints {
    pub fn new(min_width: f32, min_height: f32, max_width: f32, max_height: f32) -> Self {
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    /// Constraints that admit exactly one size.
    pub fn tight(width: f32, height: f32) -> Self {
        Self::new(width, height, width, height)
    }

    /// Fixed width, any height up to `max_height`.
    pub fn fixed_width(width: f32, max_height: f32) -> Self {
        Self::new(width, 0.0, width, max_height)
    }

    /// Clamp a size into these constraints.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.max(self.min_width).min(self.max_width),
            size.height.max(self.min_height).min(self.max_height),
        )
    }
}

/// A width/height pair in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
