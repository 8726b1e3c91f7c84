// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::EventId;

/// Default gap between the pointer and the tooltip.
pub const TOOLTIP_MARGIN: f64 = 16.0;

/// A screen-space position.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width and height.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Geometry supplied by the rendering layer for tooltip placement.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TooltipGeometry {
    /// Bounding box of the calendar container, in viewport coordinates.
    pub container: Rect,

    /// Size of the rendered tooltip.
    pub tooltip: Size,

    /// Size of the viewport.
    pub viewport: Size,
}

/// The tooltip shown while the pointer hovers an event block.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tooltip {
    /// The hovered event.
    pub event: EventId,

    /// Offset relative to the container's top-left corner.
    pub position: Point,
}

/// Places a tooltip next to `pointer`, relative to `container`.
///
/// The tooltip sits `margin` below and to the right of the pointer. On each
/// axis where it would cross the viewport edge it flips to the other side of
/// the pointer once; no further clamping is done, so a tooltip near a corner
/// with little room may still overflow.
pub fn position_tooltip(
    pointer: Point,
    container: Rect,
    tooltip: Size,
    viewport: Size,
    margin: f64,
) -> Point {
    let x = if pointer.x + tooltip.width + margin > viewport.width {
        pointer.x - tooltip.width - margin
    } else {
        pointer.x + margin
    };

    let y = if pointer.y + tooltip.height + margin > viewport.height {
        pointer.y - tooltip.height - margin
    } else {
        pointer.y + margin
    };

    Point::new(x - container.x, y - container.y)
}
