//! Screen-space rectangles to triangles

use super::vertex::Vertex;
use crate::sim::Rect;

/// Map a pixel position (origin top-left, y down) to NDC (y up)
pub fn pixel_to_ndc(x: f32, y: f32, screen_w: f32, screen_h: f32) -> [f32; 2] {
    [x / screen_w * 2.0 - 1.0, 1.0 - y / screen_h * 2.0]
}

/// Two triangles covering `rect`
pub fn rect_quad(rect: Rect, color: [f32; 4], screen_w: f32, screen_h: f32) -> [Vertex; 6] {
    let [l, t] = pixel_to_ndc(rect.left() as f32, rect.top() as f32, screen_w, screen_h);
    let [r, b] = pixel_to_ndc(rect.right() as f32, rect.bottom() as f32, screen_w, screen_h);

    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        assert_eq!(pixel_to_ndc(0.0, 0.0, 1100.0, 600.0), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc(1100.0, 600.0, 1100.0, 600.0), [1.0, -1.0]);
        assert_eq!(pixel_to_ndc(550.0, 300.0, 1100.0, 600.0), [0.0, 0.0]);
    }

    #[test]
    fn test_full_screen_quad() {
        let quad = rect_quad(Rect::new(0, 0, 100, 100), [1.0; 4], 100.0, 100.0);
        let xs: Vec<f32> = quad.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|x| *x == -1.0 || *x == 1.0));
        assert!(ys.iter().all(|y| *y == -1.0 || *y == 1.0));
    }
}
