// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup errors.

use alloc::string::String;

/// Why a draggable could not be created.
///
/// Only construction can fail. At runtime the engine degrades silently: an
/// unresolvable containment target means "unconstrained", and events from other
/// pointers are dropped.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DragSetupError {
    /// The element was given by selector and nothing matched.
    #[error("no element matches selector `{selector}`")]
    ElementNotFound {
        /// The selector that was looked up.
        selector: String,
    },
    /// A grid step was negative or not finite.
    #[error("grid step ({x}, {y}) must be finite and non-negative")]
    InvalidGrid {
        /// Horizontal step.
        x: f64,
        /// Vertical step.
        y: f64,
    },
}
