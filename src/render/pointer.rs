//! Cursor overlay smoothing.
//!
//! The sequencer moves the simulated pointer in jumps; the overlay glides toward each new
//! target over successive renders. This is the only state the render side keeps, and it is
//! derived purely from the values it has been shown.

use crate::walkthrough::snapshot::CursorPosition;

const DEFAULT_FACTOR: f32 = 0.45;
const SNAP_DISTANCE: f32 = 0.5;

/// Where to draw the pointer for one frame, in percent of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

#[derive(Debug, Clone)]
pub struct PointerEasing {
    current: Option<(f32, f32)>,
    factor: f32,
}

impl PointerEasing {
    pub fn new() -> Self {
        Self::with_factor(DEFAULT_FACTOR)
    }

    /// `factor` is the share of the remaining distance covered per frame, in `(0, 1]`.
    pub fn with_factor(factor: f32) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(0.01, 1.0)
        } else {
            DEFAULT_FACTOR
        };
        Self {
            current: None,
            factor,
        }
    }

    /// Forget the displayed position; the next frame snaps to its target.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn step(&mut self, target: CursorPosition, pressed: bool) -> PointerFrame {
        let (tx, ty) = (f32::from(target.x), f32::from(target.y));
        let (x, y) = match self.current {
            None => (tx, ty),
            Some((cx, cy)) => {
                let (nx, ny) = (cx + (tx - cx) * self.factor, cy + (ty - cy) * self.factor);
                if (tx - nx).abs() < SNAP_DISTANCE && (ty - ny).abs() < SNAP_DISTANCE {
                    (tx, ty)
                } else {
                    (nx, ny)
                }
            }
        };
        let (x, y) = (x.clamp(0.0, 100.0), y.clamp(0.0, 100.0));
        self.current = Some((x, y));
        PointerFrame { x, y, pressed }
    }
}

impl Default for PointerEasing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::PointerEasing;
    use crate::walkthrough::snapshot::CursorPosition;

    #[test]
    fn first_frame_snaps_to_target() {
        let mut easing = PointerEasing::new();
        let frame = easing.step(CursorPosition::new(20, 15), false);
        assert_eq!((frame.x, frame.y), (20.0, 15.0));
    }

    #[test]
    fn moves_monotonically_then_settles() {
        let mut easing = PointerEasing::new();
        easing.step(CursorPosition::new(20, 15), false);
        let target = CursorPosition::new(75, 15);

        let mut last = 20.0;
        let mut frames = 0;
        loop {
            let frame = easing.step(target, false);
            assert!(frame.x > last);
            assert!(frame.x <= 75.0);
            last = frame.x;
            frames += 1;
            assert!(frames < 50, "easing never settled");
            if (frame.x, frame.y) == (75.0, 15.0) {
                break;
            }
        }
        assert!(frames > 1);
    }

    #[test]
    fn reset_snaps_again() {
        let mut easing = PointerEasing::new();
        easing.step(CursorPosition::new(0, 0), false);
        easing.reset();
        let frame = easing.step(CursorPosition::new(80, 80), true);
        assert_eq!((frame.x, frame.y, frame.pressed), (80.0, 80.0, true));
    }
}
