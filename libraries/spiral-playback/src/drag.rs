//! Drag-bar geometry
//!
//! Both the seek bar and the volume bar are a fixed-width track with a
//! draggable button. Pointer positions arrive already translated into the
//! bar's coordinate space by the host.

use crate::error::{PlaybackError, Result};

/// Which bar a pointer interacts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarKind {
    /// Track position bar
    Seek,
    /// Gain level bar
    Volume,
}

/// Pointer position relative to a bar's origin, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel widths of a bar and its button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    bar_width: f64,
    button_width: f64,
}

impl BarGeometry {
    /// Validate and create a geometry; the bar must be wider than its button
    pub fn new(bar_width: f64, button_width: f64) -> Result<Self> {
        let valid = bar_width.is_finite()
            && button_width.is_finite()
            && button_width >= 0.0
            && bar_width > button_width;
        if !valid {
            return Err(PlaybackError::InvalidGeometry {
                bar_width,
                button_width,
            });
        }
        Ok(Self {
            bar_width,
            button_width,
        })
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    pub fn button_width(&self) -> f64 {
        self.button_width
    }

    /// Distance the button can travel
    pub fn travel(&self) -> f64 {
        self.bar_width - self.button_width
    }
}

/// Fractional span of a bar (0.0-1.0 of its width)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarRange {
    pub start: f64,
    pub end: f64,
}

impl BarRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Pixel placement on a bar `width` pixels wide
    pub fn to_pixels(&self, width: f64) -> PixelSpan {
        let left = (width * self.start).round();
        PixelSpan {
            left,
            width: (width * self.end).round() - left,
        }
    }
}

/// Pixel placement of a range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelSpan {
    pub left: f64,
    pub width: f64,
}

/// Button position on one bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBar {
    geometry: BarGeometry,
    button_offset: f64,
}

impl DragBar {
    /// Bar with its button at the far left
    pub fn new(geometry: BarGeometry) -> Self {
        Self {
            geometry,
            button_offset: -1.0,
        }
    }

    pub fn geometry(&self) -> BarGeometry {
        self.geometry
    }

    /// Button's left offset in pixels
    pub fn button_offset(&self) -> f64 {
        self.button_offset
    }

    /// Place the button, clamped to `[-1, barWidth - buttonWidth - 1]`
    pub fn place_button(&mut self, offset: f64) {
        let max = self.geometry.travel() - 1.0;
        self.button_offset = if offset.is_nan() {
            -1.0
        } else {
            offset.clamp(-1.0, max)
        };
    }

    /// Centre the button under the pointer
    pub fn place_at_pointer(&mut self, x: f64) {
        let offset = (x - self.geometry.button_width / 2.0 - 2.0).round();
        self.place_button(offset);
    }

    /// Place the button at a fraction of its travel
    pub fn place_at_ratio(&mut self, ratio: f64) {
        self.place_button(ratio * self.geometry.travel() - 1.0);
    }

    /// Button position as a fraction of travel, clamped to 0.0-1.0
    pub fn ratio(&self) -> f64 {
        ((self.button_offset + 1.0) / self.geometry.travel()).clamp(0.0, 1.0)
    }

    /// Filled span from the bar start to the button centre
    pub fn fill(&self) -> BarRange {
        BarRange::new(
            0.0,
            (self.button_offset + self.geometry.button_width / 2.0) / self.geometry.bar_width,
        )
    }
}

/// What an active drag controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Seeking; `resume` records whether the media was playing at drag start
    Seek { resume: bool },
    /// Volume level
    Volume,
}

impl DragTarget {
    pub fn bar(self) -> BarKind {
        match self {
            DragTarget::Seek { .. } => BarKind::Seek,
            DragTarget::Volume => BarKind::Volume,
        }
    }
}

/// State of the drag in progress (at most one at a time)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> DragBar {
        DragBar::new(BarGeometry::new(200.0, 10.0).unwrap())
    }

    #[test]
    fn geometry_requires_wider_bar() {
        assert!(BarGeometry::new(10.0, 10.0).is_err());
        assert!(BarGeometry::new(5.0, 10.0).is_err());
        assert!(BarGeometry::new(f64::NAN, 10.0).is_err());
        assert_eq!(BarGeometry::new(200.0, 10.0).unwrap().travel(), 190.0);
    }

    #[test]
    fn pointer_offset_is_centred_and_clamped() {
        let mut bar = bar();

        bar.place_at_pointer(100.0);
        assert_eq!(bar.button_offset(), 93.0);

        bar.place_at_pointer(-50.0);
        assert_eq!(bar.button_offset(), -1.0);
        assert_eq!(bar.ratio(), 0.0);

        bar.place_at_pointer(500.0);
        assert_eq!(bar.button_offset(), 189.0);
        assert_eq!(bar.ratio(), 1.0);
    }

    #[test]
    fn ratio_placement() {
        let mut bar = bar();
        bar.place_at_ratio(0.5);
        assert_eq!(bar.button_offset(), 94.0);
        assert!((bar.ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn fill_reaches_button_centre() {
        let mut bar = bar();
        bar.place_button(95.0);
        assert_eq!(bar.fill(), BarRange::new(0.0, 0.5));
    }

    #[test]
    fn range_to_pixels() {
        let span = BarRange::new(0.25, 0.5).to_pixels(201.0);
        assert_eq!(span.left, 50.0);
        assert_eq!(span.width, 51.0);
    }
}
