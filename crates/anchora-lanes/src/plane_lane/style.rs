// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anchora_core::math::LinearRgba;

/// Density of the decorative dot grid, in dots per meter along U.
pub const DOTS_PER_METER: f32 = 10.0;

/// Rotation of the grid pattern added per style index, in radians.
pub const GRID_ROTATION_PER_INDEX: f32 = 0.144;

/// V is squeezed so the dots form an equilateral triangular lattice.
const EQUILATERAL_TRIANGLE_SCALE: f32 = 0.577_350_26; // 1 / sqrt(3)

/// Dot threshold, line threshold, line fade shrink, occlusion shrink.
pub const DEFAULT_GRID_CONTROL: LinearRgba = LinearRgba::new(0.2, 0.4, 2.0, 1.5);

/// Black, chartreuse, coral, cyan, blue, firebrick, maroon, brown, goldenrod, purple.
const PALETTE: [u32; 10] = [
    0x000000, 0x7fff00, 0xff7f50, 0x00ffff, 0x0000ff, 0xb22222, 0xb03060, 0x8b4513, 0xdaa520,
    0xa020f0,
];

/// The uniform values the plane shader needs to draw one plane.
///
/// Derived deterministically from the plane's style index, so neighbouring
/// planes get different colors and grid orientations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneStyle {
    /// The style index this style was derived from.
    pub style_index: u32,
    /// Color of the grid dots.
    pub dot_color: LinearRgba,
    /// Color of the grid lines.
    pub line_color: LinearRgba,
    /// Grid thresholds packed into a `vec4` uniform.
    pub grid_control: LinearRgba,
    /// Column-major 2x2 matrix mapping world XZ to grid texture UV.
    pub uv_matrix: [f32; 4],
}

impl PlaneStyle {
    /// Derives the style for `style_index` with the default grid parameters.
    pub fn for_index(style_index: u32) -> Self {
        Self::with_params(style_index, DOTS_PER_METER, DEFAULT_GRID_CONTROL)
    }

    /// Derives the style for `style_index` with a custom dot density and grid control.
    pub fn with_params(style_index: u32, dots_per_meter: f32, grid_control: LinearRgba) -> Self {
        let slot = style_index as usize;
        let angle = style_index as f32 * GRID_ROTATION_PER_INDEX;
        let (sin, cos) = angle.sin_cos();
        let u_scale = dots_per_meter;
        let v_scale = dots_per_meter * EQUILATERAL_TRIANGLE_SCALE;

        Self {
            style_index,
            dot_color: palette_color(slot),
            line_color: palette_color(slot % PALETTE.len() + 1),
            grid_control,
            uv_matrix: [cos * u_scale, -sin * u_scale, sin * v_scale, cos * v_scale],
        }
    }
}

/// Returns the palette color for `slot`, wrapping around the palette.
pub fn palette_color(slot: usize) -> LinearRgba {
    LinearRgba::from_rgb_u32(PALETTE[slot % PALETTE.len()])
}
