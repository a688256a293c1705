// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform capability probing, resolved once.
//!
//! Capabilities may exist under a vendor-prefixed name. [`resolve_platform_capability`]
//! tries the standard name first and then each prefix, returning the name that exists.
//! [`PlatformCapabilities::probe`] gathers everything a draggable needs in one pass;
//! [`shared`] caches that result for the whole process.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use once_cell::race::OnceBox;

use crate::input::InputFamily;

/// The namespace a capability name lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// A style property, such as `transform` (prefixes are capitalized: `WebkitTransform`).
    StyleProperty,
    /// A global API, such as `requestAnimationFrame` (prefixes are lowercase:
    /// `webkitRequestAnimationFrame`).
    Api,
}

impl CapabilityKind {
    /// Vendor prefixes tried, in order, after the standard name.
    #[must_use]
    pub const fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::StyleProperty => &["Webkit", "Moz", "ms", "Ms", "O"],
            Self::Api => &["webkit", "moz", "ms", "o"],
        }
    }
}

/// Answers "does this exact name exist" for the host platform.
pub trait PlatformProbe {
    /// Returns `true` if `name` exists in the `kind` namespace.
    fn supports(&self, kind: CapabilityKind, name: &str) -> bool;

    /// Returns `true` if a border-box element with a declared width reports that
    /// width including padding and border.
    fn border_box_is_outer(&self) -> bool {
        true
    }
}

/// Finds the name under which a capability exists, trying vendor prefixes.
///
/// ```
/// use understory_draggable::capability::{resolve_platform_capability, CapabilityKind, PlatformProbe};
///
/// struct OldWebkit;
/// impl PlatformProbe for OldWebkit {
///     fn supports(&self, _kind: CapabilityKind, name: &str) -> bool {
///         name == "WebkitTransform"
///     }
/// }
///
/// assert_eq!(
///     resolve_platform_capability(&OldWebkit, CapabilityKind::StyleProperty, "transform").as_deref(),
///     Some("WebkitTransform"),
/// );
/// assert_eq!(resolve_platform_capability(&OldWebkit, CapabilityKind::StyleProperty, "perspective"), None);
/// ```
#[must_use]
pub fn resolve_platform_capability(
    probe: &(impl PlatformProbe + ?Sized),
    kind: CapabilityKind,
    name: &str,
) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    if probe.supports(kind, name) {
        return Some(String::from(name));
    }
    let mut chars = name.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    kind.prefixes()
        .iter()
        .map(|prefix| format!("{prefix}{}{rest}", first.to_ascii_uppercase()))
        .find(|candidate| probe.supports(kind, candidate))
}

/// Everything a draggable reads from the platform, resolved once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// Input family bound on drag handles.
    pub input_family: InputFamily,
    /// Resolved name of the transform style property, if transforms are available.
    pub transform_property: Option<String>,
    /// Whether 3D transforms are available.
    pub supports_3d: bool,
    /// Whether a refresh-aligned frame primitive (request and cancel) exists.
    pub animation_frames: bool,
    /// See [`PlatformProbe::border_box_is_outer`].
    pub border_box_is_outer: bool,
}

impl PlatformCapabilities {
    /// Probes the platform.
    #[must_use]
    pub fn probe(probe: &(impl PlatformProbe + ?Sized)) -> Self {
        let input_family = InputFamily::select(
            probe.supports(CapabilityKind::Api, "pointerEnabled"),
            probe.supports(CapabilityKind::Api, "msPointerEnabled"),
        );
        let transform_property =
            resolve_platform_capability(probe, CapabilityKind::StyleProperty, "transform");
        let supports_3d =
            resolve_platform_capability(probe, CapabilityKind::StyleProperty, "perspective")
                .is_some();
        let request =
            resolve_platform_capability(probe, CapabilityKind::Api, "requestAnimationFrame");
        let cancel = resolve_platform_capability(probe, CapabilityKind::Api, "cancelAnimationFrame")
            .or_else(|| {
                resolve_platform_capability(probe, CapabilityKind::Api, "cancelRequestAnimationFrame")
            });
        let caps = Self {
            input_family,
            transform_property,
            supports_3d,
            animation_frames: request.is_some() && cancel.is_some(),
            border_box_is_outer: probe.border_box_is_outer(),
        };
        tracing::debug!(?caps, "probed platform capabilities");
        caps
    }

    /// A modern platform: unified pointer events, unprefixed 2D transforms, and
    /// refresh-aligned frames.
    #[must_use]
    pub fn modern() -> Self {
        Self {
            input_family: InputFamily::Pointer,
            transform_property: Some(String::from("transform")),
            supports_3d: false,
            animation_frames: true,
            border_box_is_outer: true,
        }
    }
}

static SHARED: OnceBox<PlatformCapabilities> = OnceBox::new();

/// Process-wide capabilities, probed on first call.
///
/// Later calls return the first result and ignore their `probe` argument.
pub fn shared(probe: &(impl PlatformProbe + ?Sized)) -> &'static PlatformCapabilities {
    SHARED.get_or_init(|| Box::new(PlatformCapabilities::probe(probe)))
}
