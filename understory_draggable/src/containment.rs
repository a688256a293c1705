// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid quantization and containment clamping for drag deltas.
//!
//! A proposed delta is first snapped to the grid with [`RoundMode::Nearest`], then
//! clamped per axis into bounds derived from a [`ContainmentFrame`]. The lower bound is
//! snapped with [`RoundMode::Ceil`] and the upper bound with [`RoundMode::Floor`], so a
//! snapped delta never carries the element outside the container.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use understory_draggable::containment::{constrain, ContainmentFrame};
//!
//! let frame = ContainmentFrame::new(
//!     Size::new(300.0, 200.0),
//!     Size::new(50.0, 50.0),
//!     Vec2::new(10.0, 10.0),
//! );
//! let delta = constrain(Vec2::new(1000.0, 1000.0), Vec2::ZERO, Some(&frame));
//! assert_eq!(delta, Vec2::new(240.0, 140.0));
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Rect, Size, Vec2};

/// Rounding used when snapping a value to a grid step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoundMode {
    /// Nearest multiple; halves round away from zero.
    Nearest,
    /// Smallest multiple not below the value.
    Ceil,
    /// Largest multiple not above the value.
    Floor,
}

/// Snaps `value` to a multiple of `step`.
///
/// A `step` of zero means "no grid" and returns `value` unchanged.
#[must_use]
pub fn quantize(value: f64, step: f64, mode: RoundMode) -> f64 {
    if step == 0.0 {
        return value;
    }
    let units = value / step;
    let units = match mode {
        RoundMode::Nearest => units.round(),
        RoundMode::Ceil => units.ceil(),
        RoundMode::Floor => units.floor(),
    };
    units * step
}

/// Snaps both components of `delta` with per-axis steps.
#[must_use]
pub fn quantize_vec(delta: Vec2, step: Vec2, mode: RoundMode) -> Vec2 {
    Vec2::new(
        quantize(delta.x, step.x, mode),
        quantize(delta.y, step.y, mode),
    )
}

/// Clamps one axis of a delta so the element stays inside the container.
///
/// `relative_start` is the element's offset from the container's origin when the
/// gesture began. When the element is larger than the container the upper bound wins.
#[must_use]
pub fn contain_axis(
    delta: f64,
    relative_start: f64,
    container_extent: f64,
    element_extent: f64,
    step: f64,
) -> f64 {
    let min = quantize(-relative_start, step, RoundMode::Ceil);
    let max = quantize(
        container_extent - relative_start - element_extent,
        step,
        RoundMode::Floor,
    );
    // Not `f64::clamp`: `min > max` is legal here and must not panic.
    delta.max(min).min(max)
}

/// Geometry snapshot taken when a gesture begins.
///
/// Valid for one drag session only; layout may have moved by the next one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContainmentFrame {
    /// Size of the containing element.
    pub container_size: Size,
    /// Size of the dragged element.
    pub element_size: Size,
    /// Element origin minus container origin at gesture start.
    pub relative_start: Vec2,
}

impl ContainmentFrame {
    /// Creates a frame from measured sizes and the element's start offset.
    #[must_use]
    pub const fn new(container_size: Size, element_size: Size, relative_start: Vec2) -> Self {
        Self {
            container_size,
            element_size,
            relative_start,
        }
    }

    /// Builds a frame from the bounding rectangles of the element and container
    /// and their measured sizes.
    #[must_use]
    pub fn from_rects(
        element_rect: Rect,
        container_rect: Rect,
        element_size: Size,
        container_size: Size,
    ) -> Self {
        Self::new(
            container_size,
            element_size,
            element_rect.origin() - container_rect.origin(),
        )
    }

    /// Snapped delta bounds as a rectangle (`x0..x1` and `y0..y1` are the per-axis
    /// minimum and maximum).
    #[must_use]
    pub fn delta_bounds(&self, step: Vec2) -> Rect {
        let min_x = quantize(-self.relative_start.x, step.x, RoundMode::Ceil);
        let min_y = quantize(-self.relative_start.y, step.y, RoundMode::Ceil);
        let max_x = quantize(
            self.container_size.width - self.relative_start.x - self.element_size.width,
            step.x,
            RoundMode::Floor,
        );
        let max_y = quantize(
            self.container_size.height - self.relative_start.y - self.element_size.height,
            step.y,
            RoundMode::Floor,
        );
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Clamps `delta` on both axes.
    #[must_use]
    pub fn clamp(&self, delta: Vec2, step: Vec2) -> Vec2 {
        Vec2::new(
            contain_axis(
                delta.x,
                self.relative_start.x,
                self.container_size.width,
                self.element_size.width,
                step.x,
            ),
            contain_axis(
                delta.y,
                self.relative_start.y,
                self.container_size.height,
                self.element_size.height,
                step.y,
            ),
        )
    }
}

/// Snaps a raw delta to the grid and, when a frame is present, clamps it.
///
/// Without a frame the snapped delta passes through unconstrained.
#[must_use]
pub fn constrain(raw: Vec2, step: Vec2, frame: Option<&ContainmentFrame>) -> Vec2 {
    let snapped = quantize_vec(raw, step, RoundMode::Nearest);
    match frame {
        Some(frame) => frame.clamp(snapped, step),
        None => snapped,
    }
}
