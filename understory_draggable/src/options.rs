// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration of a draggable.

use alloc::string::String;

use kurbo::Vec2;

use crate::error::DragSetupError;
use crate::host::Host;

/// The element a draggable moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementRef<N> {
    /// A known element.
    Node(N),
    /// The first element matching a selector.
    Selector(String),
}

impl<N> From<N> for ElementRef<N> {
    fn from(node: N) -> Self {
        Self::Node(node)
    }
}

/// What the dragged element is kept inside.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Containment<N> {
    /// Unconstrained.
    #[default]
    None,
    /// A specific element.
    Element(N),
    /// The first element matching a selector.
    Selector(String),
    /// The dragged element's parent.
    Parent,
}

impl<N: Copy> Containment<N> {
    /// Whether any containment is configured.
    #[must_use]
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Resolves the container for `element`.
    ///
    /// `None` when unconfigured or when the target does not resolve; both mean the
    /// drag runs unconstrained.
    pub fn resolve<H>(&self, host: &H, element: N) -> Option<N>
    where
        H: Host<Node = N> + ?Sized,
    {
        match self {
            Self::None => None,
            Self::Element(node) => Some(*node),
            Self::Selector(selector) => host.query_selector(selector),
            Self::Parent => host.parent(element),
        }
    }
}

/// Options recognized by [`Draggable::new`](crate::Draggable::new).
#[derive(Clone, Debug, PartialEq)]
pub struct DragOptions<N> {
    /// Containment target.
    pub containment: Containment<N>,
    /// Grid step per axis; `0` on an axis means no snapping on that axis.
    pub grid: Vec2,
    /// Selector for drag handles inside the element; the element itself when `None`.
    pub handle: Option<String>,
}

impl<N> Default for DragOptions<N> {
    fn default() -> Self {
        Self {
            containment: Containment::None,
            grid: Vec2::ZERO,
            handle: None,
        }
    }
}

impl<N> DragOptions<N> {
    /// Default options: unconstrained, no grid, the element is its own handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the containment target.
    #[must_use]
    pub fn with_containment(mut self, containment: Containment<N>) -> Self {
        self.containment = containment;
        self
    }

    /// Sets grid steps.
    #[must_use]
    pub fn with_grid(mut self, step_x: f64, step_y: f64) -> Self {
        self.grid = Vec2::new(step_x, step_y);
        self
    }

    /// Restricts drag starts to descendants matching `selector`.
    #[must_use]
    pub fn with_handle(mut self, selector: impl Into<String>) -> Self {
        self.handle = Some(selector.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DragSetupError> {
        let Vec2 { x, y } = self.grid;
        let valid = |s: f64| s.is_finite() && s >= 0.0;
        if valid(x) && valid(y) {
            Ok(())
        } else {
            Err(DragSetupError::InvalidGrid { x, y })
        }
    }
}
