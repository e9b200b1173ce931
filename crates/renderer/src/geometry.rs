//! Quad geometry for the overlay image.
//!
//! Positions are in normalized device coordinates (x right, y up, both in
//! [-1, 1]). Texture coordinates follow the upload order of the texture rows:
//! when rows were flipped bottom-up, `v = 0` is the bottom edge of the image;
//! otherwise it is the top edge. Either way the image ends up upright.

use bytemuck::{Pod, Zeroable};

use crate::types::Placement;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Four corners in counter-clockwise order starting bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub vertices: [Vertex; 4],
}

impl Quad {
    pub const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    pub fn empty() -> Self {
        Self {
            vertices: [Vertex::zeroed(); 4],
        }
    }

    /// True when nothing of the image lands inside the window.
    pub fn is_empty(&self) -> bool {
        let [bottom_left, _, top_right, _] = self.vertices;
        top_right.position[0] <= bottom_left.position[0]
            || top_right.position[1] <= bottom_left.position[1]
    }

    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Computes the quad that shows an `image`-sized picture inside a window of
/// `surface` pixels.
///
/// The image keeps its pixel size: one image pixel covers one window pixel,
/// not half or twice that, whatever the window size. Edges that fall outside the window are
/// clipped to the NDC range and their texture coordinates cropped by the same
/// fraction, so the visible part is never stretched.
pub fn build_quad(
    placement: Placement,
    image: (u32, u32),
    surface: (u32, u32),
    flipped: bool,
) -> Quad {
    if image.0 == 0 || image.1 == 0 {
        return Quad::empty();
    }

    let surface_width = surface.0.max(1) as f32;
    let surface_height = surface.1.max(1) as f32;
    let (center_x, center_y) = match placement {
        Placement::Centered => (surface_width / 2.0, surface_height / 2.0),
        Placement::Pixels { center_x, center_y } => (center_x as f32, center_y as f32),
    };

    let ndc_x = center_x / surface_width * 2.0 - 1.0;
    let ndc_y = 1.0 - center_y / surface_height * 2.0;
    let half_width = image.0 as f32 / surface_width;
    let half_height = image.1 as f32 / surface_height;

    let (v_bottom, v_top) = if flipped { (0.0, 1.0) } else { (1.0, 0.0) };

    let Some((left, right, u_left, u_right)) =
        clip_span(ndc_x - half_width, ndc_x + half_width, 0.0, 1.0)
    else {
        return Quad::empty();
    };
    let Some((bottom, top, v_bottom, v_top)) =
        clip_span(ndc_y - half_height, ndc_y + half_height, v_bottom, v_top)
    else {
        return Quad::empty();
    };

    Quad {
        vertices: [
            Vertex {
                position: [left, bottom],
                tex_coords: [u_left, v_bottom],
            },
            Vertex {
                position: [right, bottom],
                tex_coords: [u_right, v_bottom],
            },
            Vertex {
                position: [right, top],
                tex_coords: [u_right, v_top],
            },
            Vertex {
                position: [left, top],
                tex_coords: [u_left, v_top],
            },
        ],
    }
}

/// Clips `[low, high]` to `[-1, 1]`, interpolating the texture coordinate
/// that goes with each end. Returns `None` when nothing remains.
fn clip_span(low: f32, high: f32, tex_low: f32, tex_high: f32) -> Option<(f32, f32, f32, f32)> {
    let clipped_low = low.max(-1.0);
    let clipped_high = high.min(1.0);
    if clipped_low >= clipped_high {
        return None;
    }

    let span = high - low;
    let tex_at = |value: f32| tex_low + (value - low) / span * (tex_high - tex_low);
    Some((
        clipped_low,
        clipped_high,
        tex_at(clipped_low),
        tex_at(clipped_high),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_in_ndc(quad: &Quad) {
        for vertex in &quad.vertices {
            for component in vertex.position {
                assert!((-1.0..=1.0).contains(&component), "{component} outside NDC");
            }
            for component in vertex.tex_coords {
                assert!((0.0..=1.0).contains(&component), "{component} outside UV range");
            }
        }
    }

    #[test]
    fn centered_image_scales_with_window() {
        let quad = build_quad(Placement::Centered, (500, 500), (800, 600), true);
        assert_in_ndc(&quad);

        let [bottom_left, bottom_right, top_right, top_left] = quad.vertices;
        assert_close(bottom_left.position[0], -0.625);
        assert_close(bottom_left.position[1], -500.0 / 600.0);
        assert_close(top_right.position[0], 0.625);
        assert_close(top_right.position[1], 500.0 / 600.0);
        assert_eq!(bottom_left.tex_coords, [0.0, 0.0]);
        assert_eq!(bottom_right.tex_coords, [1.0, 0.0]);
        assert_eq!(top_right.tex_coords, [1.0, 1.0]);
        assert_eq!(top_left.tex_coords, [0.0, 1.0]);
    }

    #[test]
    fn quad_covers_exactly_the_image_pixels() {
        for surface in [(800, 600), (1920, 1080), (640, 480)] {
            let quad = build_quad(Placement::Centered, (320, 200), surface, true);
            let [bottom_left, _, top_right, _] = quad.vertices;
            let width_px = (top_right.position[0] - bottom_left.position[0]) / 2.0 * surface.0 as f32;
            let height_px = (top_right.position[1] - bottom_left.position[1]) / 2.0 * surface.1 as f32;
            assert!((width_px - 320.0).abs() < 1e-3, "{width_px} in {surface:?}");
            assert!((height_px - 200.0).abs() < 1e-3, "{height_px} in {surface:?}");
        }
    }

    #[test]
    fn fixed_window_sizes_stay_in_ndc() {
        for surface in [(800, 600), (1920, 1080), (500, 500), (320, 240), (64, 2000)] {
            let quad = build_quad(Placement::Centered, (500, 500), surface, true);
            assert_in_ndc(&quad);
            assert!(!quad.is_empty());
        }
    }

    #[test]
    fn oversized_image_is_clipped_and_cropped() {
        let quad = build_quad(Placement::Centered, (500, 500), (400, 400), true);
        assert_in_ndc(&quad);

        let [bottom_left, _, top_right, _] = quad.vertices;
        assert_eq!(bottom_left.position, [-1.0, -1.0]);
        assert_eq!(top_right.position, [1.0, 1.0]);
        assert_close(bottom_left.tex_coords[0], 0.1);
        assert_close(top_right.tex_coords[0], 0.9);
        assert_close(bottom_left.tex_coords[1], 0.1);
        assert_close(top_right.tex_coords[1], 0.9);
    }

    #[test]
    fn pixel_placement_at_screen_center_matches_centered() {
        let centered = build_quad(Placement::Centered, (500, 500), (1920, 1080), true);
        let pixels = build_quad(
            Placement::Pixels {
                center_x: 960,
                center_y: 540,
            },
            (500, 500),
            (1920, 1080),
            true,
        );
        assert_eq!(centered, pixels);
    }

    #[test]
    fn pixel_placement_in_corner_keeps_visible_quarter() {
        let quad = build_quad(
            Placement::Pixels {
                center_x: 0,
                center_y: 0,
            },
            (500, 500),
            (1920, 1080),
            true,
        );
        assert_in_ndc(&quad);

        let [bottom_left, _, top_right, _] = quad.vertices;
        assert_close(bottom_left.position[0], -1.0);
        assert_close(top_right.position[1], 1.0);
        // Only the right half and bottom half of the image are on screen.
        assert_close(bottom_left.tex_coords[0], 0.5);
        assert_close(bottom_left.tex_coords[1], 0.0);
        assert_close(top_right.tex_coords[1], 0.5);
    }

    #[test]
    fn unflipped_texture_maps_top_row_to_top_edge() {
        let quad = build_quad(Placement::Centered, (100, 100), (800, 600), false);
        let [bottom_left, _, top_right, _] = quad.vertices;
        assert_eq!(bottom_left.tex_coords[1], 1.0);
        assert_eq!(top_right.tex_coords[1], 0.0);
    }

    #[test]
    fn offscreen_or_empty_images_produce_empty_quads() {
        let offscreen = build_quad(
            Placement::Pixels {
                center_x: 5000,
                center_y: 300,
            },
            (100, 100),
            (800, 600),
            true,
        );
        assert!(offscreen.is_empty());
        assert!(build_quad(Placement::Centered, (0, 10), (800, 600), true).is_empty());
    }
}
