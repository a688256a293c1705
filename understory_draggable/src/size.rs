// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box-model measurement of an element from its computed style.
//!
//! Hosts report what they know about an element's box in a [`ComputedBox`];
//! [`measure`] resolves it to an [`ElementSize`]. The containment frame uses
//! [`ElementSize::size`], the border-box size.

use kurbo::{Insets, Size};

/// How declared width/height relate to padding and border.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxSizing {
    /// Declared size excludes padding and border.
    #[default]
    ContentBox,
    /// Declared size includes padding and border.
    BorderBox,
}

/// A declared style length.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum StyleLength {
    /// An absolute length in pixels.
    Px(f64),
    /// A percentage; not usable for measurement.
    Percent(f64),
    /// `auto` or anything non-numeric.
    #[default]
    Auto,
}

impl StyleLength {
    fn px(self) -> Option<f64> {
        match self {
            Self::Px(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }
}

/// Computed box-model facts for one element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComputedBox {
    /// `display: none`.
    pub hidden: bool,
    /// Layout size including padding and border (offset width/height).
    pub offset_size: Size,
    /// Declared width.
    pub width: StyleLength,
    /// Declared height.
    pub height: StyleLength,
    /// Padding per edge.
    pub padding: Insets,
    /// Border width per edge.
    pub border: Insets,
    /// Margin per edge.
    pub margin: Insets,
    /// Box sizing mode.
    pub box_sizing: BoxSizing,
}

impl ComputedBox {
    /// A visible box whose size is known only from layout.
    #[must_use]
    pub const fn from_offset_size(offset_size: Size) -> Self {
        Self {
            hidden: false,
            offset_size,
            width: StyleLength::Auto,
            height: StyleLength::Auto,
            padding: Insets::ZERO,
            border: Insets::ZERO,
            margin: Insets::ZERO,
            box_sizing: BoxSizing::ContentBox,
        }
    }
}

/// Resolved element measurements.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ElementSize {
    /// Border-box width.
    pub width: f64,
    /// Border-box height.
    pub height: f64,
    /// Width minus padding and border.
    pub inner_width: f64,
    /// Height minus padding and border.
    pub inner_height: f64,
    /// Width plus margin.
    pub outer_width: f64,
    /// Height plus margin.
    pub outer_height: f64,
    /// Whether the element uses border-box sizing.
    pub is_border_box: bool,
}

impl ElementSize {
    /// Border-box size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Measures an element.
///
/// `border_box_is_outer` is the platform fact "a border-box element with a declared
/// width reports that width including padding and border"; when it holds for a
/// border-box element, padding and border are not added to declared sizes again.
///
/// Hidden elements measure as zero everywhere.
#[must_use]
pub fn measure(computed: &ComputedBox, border_box_is_outer: bool) -> ElementSize {
    if computed.hidden {
        return ElementSize::default();
    }

    let padding_w = computed.padding.x_value();
    let padding_h = computed.padding.y_value();
    let border_w = computed.border.x_value();
    let border_h = computed.border.y_value();

    let is_border_box = computed.box_sizing == BoxSizing::BorderBox;
    let declared_is_outer = is_border_box && border_box_is_outer;

    let mut width = computed.offset_size.width;
    let mut height = computed.offset_size.height;
    if let Some(w) = computed.width.px() {
        width = w + if declared_is_outer { 0.0 } else { padding_w + border_w };
    }
    if let Some(h) = computed.height.px() {
        height = h + if declared_is_outer { 0.0 } else { padding_h + border_h };
    }

    ElementSize {
        width,
        height,
        inner_width: width - (padding_w + border_w),
        inner_height: height - (padding_h + border_h),
        outer_width: width + computed.margin.x_value(),
        outer_height: height + computed.margin.y_value(),
        is_border_box,
    }
}
