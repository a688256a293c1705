// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host environment seen by a draggable.
//!
//! A [`Host`] owns the element tree, input dispatch, layout, styling, and frame
//! scheduling. The engine never touches those directly: it asks the host to bind
//! event types on targets, reads geometry and computed style, writes positional
//! style, and requests frames. In return the host feeds raw events and fired frames
//! into [`Draggable`](crate::Draggable).

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Affine, Point, Rect, Vec2};

use crate::binding::BindTarget;
use crate::input::{EventType, TouchActionProperty};
use crate::scheduler::FrameScheduler;
use crate::size::ComputedBox;

/// CSS-style positioning scheme of an element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionScheme {
    /// `static`
    #[default]
    Static,
    /// `relative`
    Relative,
    /// `absolute`
    Absolute,
    /// `fixed`
    Fixed,
    /// `sticky`
    Sticky,
}

impl PositionScheme {
    /// Whether `left`/`top` offsets move the element without further changes.
    #[must_use]
    pub fn is_offsettable(self) -> bool {
        matches!(self, Self::Relative | Self::Absolute)
    }
}

/// Computed positioning style of an element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StyleSnapshot {
    /// Positioning scheme.
    pub position: PositionScheme,
    /// Computed `left`, if numeric.
    pub left: Option<f64>,
    /// Computed `top`, if numeric.
    pub top: Option<f64>,
    /// Computed transform, if any.
    pub transform: Option<Affine>,
}

/// A translation written through the transform style property.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Translate {
    /// Offset in pixels.
    pub offset: Vec2,
    /// Use the 3D form.
    pub three_d: bool,
}

impl Translate {
    /// The CSS value for this translation.
    ///
    /// ```
    /// use kurbo::Vec2;
    /// use understory_draggable::host::Translate;
    ///
    /// let t = Translate { offset: Vec2::new(3.0, -4.5), three_d: true };
    /// assert_eq!(t.to_css(), "translate3d( 3px, -4.5px, 0)");
    /// ```
    #[must_use]
    pub fn to_css(&self) -> String {
        let Vec2 { x, y } = self.offset;
        if self.three_d {
            format!("translate3d( {x}px, {y}px, 0)")
        } else {
            format!("translate( {x}px, {y}px)")
        }
    }
}

/// Host environment capabilities consumed by the drag engine.
pub trait Host {
    /// Element handle.
    type Node: Copy + Eq + Hash + Debug;

    /// Starts delivering `event` on `target` to the engine.
    fn bind(&mut self, target: BindTarget<Self::Node>, event: EventType);

    /// Stops delivering `event` on `target`.
    fn unbind(&mut self, target: BindTarget<Self::Node>, event: EventType);

    /// Blocks (`true`) or restores (`false`) browser panning on a handle.
    fn set_touch_action(
        &mut self,
        node: Self::Node,
        property: TouchActionProperty,
        blocked: bool,
    ) {
        let _ = (node, property, blocked);
    }

    /// First element matching `selector` in the document.
    fn query_selector(&self, selector: &str) -> Option<Self::Node> {
        let _ = selector;
        None
    }

    /// Elements matching `selector` inside `scope`, in document order.
    fn query_selector_all(&self, scope: Self::Node, selector: &str) -> Vec<Self::Node> {
        let _ = (scope, selector);
        Vec::new()
    }

    /// Parent element.
    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        let _ = node;
        None
    }

    /// Box-model facts used for measurement.
    fn computed_box(&self, node: Self::Node) -> ComputedBox;

    /// Border-box rectangle in viewport coordinates.
    fn bounding_rect(&self, node: Self::Node) -> Rect;

    /// Computed positioning style.
    fn style(&self, node: Self::Node) -> StyleSnapshot;

    /// Writes the positioning scheme; `None` clears the engine's value.
    fn set_position_scheme(&mut self, node: Self::Node, scheme: Option<PositionScheme>);

    /// Writes `left`/`top`; `None` clears them.
    fn set_left_top(&mut self, node: Self::Node, left_top: Option<Point>);

    /// Writes the transform through the resolved `property`; `None` clears it.
    fn set_transform(&mut self, node: Self::Node, property: &str, value: Option<Translate>);

    /// Adds or removes the element's dragging marker (an `is-dragging` class).
    fn set_dragging_marker(&mut self, node: Self::Node, dragging: bool) {
        let _ = (node, dragging);
    }

    /// Frame scheduler used by the paint loop.
    fn scheduler(&mut self) -> &mut dyn FrameScheduler;
}
