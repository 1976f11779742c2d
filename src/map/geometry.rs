use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm, clipped to the canvas first so
/// long off-screen segments at high zoom cost nothing.
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let w = canvas.width() as i32 * 2;
    let h = canvas.height() as i32 * 4;
    let Some((x0, y0, x1, y1)) = clip_segment(x0, y0, x1, y1, w, h) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle (marker body)
pub fn draw_disc(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

/// Draw a one-dot circle outline (midpoint algorithm)
pub fn draw_ring(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            canvas.set_pixel_signed(cx + px, cy + py);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: f64, y: f64, w: f64, h: f64) -> u8 {
    let mut code = INSIDE;
    if x < 0.0 {
        code |= LEFT;
    } else if x > w {
        code |= RIGHT;
    }
    if y < 0.0 {
        code |= TOP;
    } else if y > h {
        code |= BOTTOM;
    }
    code
}

/// Cohen-Sutherland clip of a segment to [0, w] x [0, h]
fn clip_segment(x0: i32, y0: i32, x1: i32, y1: i32, w: i32, h: i32) -> Option<(i32, i32, i32, i32)> {
    let (w, h) = ((w - 1).max(0) as f64, (h - 1).max(0) as f64);
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);
    let mut c0 = outcode(x0, y0, w, h);
    let mut c1 = outcode(x1, y1, w, h);

    loop {
        if c0 | c1 == INSIDE {
            return Some((x0.round() as i32, y0.round() as i32, x1.round() as i32, y1.round() as i32));
        }
        if c0 & c1 != INSIDE {
            return None;
        }

        let out = if c0 != INSIDE { c0 } else { c1 };
        let (x, y) = if out & TOP != 0 {
            (x0 + (x1 - x0) * (0.0 - y0) / (y1 - y0), 0.0)
        } else if out & BOTTOM != 0 {
            (x0 + (x1 - x0) * (h - y0) / (y1 - y0), h)
        } else if out & RIGHT != 0 {
            (w, y0 + (y1 - y0) * (w - x0) / (x1 - x0))
        } else {
            (0.0, y0 + (y1 - y0) * (0.0 - x0) / (x1 - x0))
        };

        if out == c0 {
            (x0, y0) = (x, y);
            c0 = outcode(x0, y0, w, h);
        } else {
            (x1, y1) = (x, y);
            c1 = outcode(x1, y1, w, h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_offscreen_line_is_clipped() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, -100_000, 0, 100_000, 0);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");

        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, -50, -50, -10, -10);
        assert_eq!(canvas.to_string(), "⠀⠀⠀⠀⠀");
    }

    #[test]
    fn test_disc_fills_cell() {
        let mut canvas = BrailleCanvas::new(3, 2);
        draw_disc(&mut canvas, 3, 4, 1);
        assert!(canvas.cell(1, 1).is_some());
    }

    #[test]
    fn test_ring_leaves_center_empty() {
        let mut canvas = BrailleCanvas::new(10, 5);
        draw_ring(&mut canvas, 10, 10, 8);
        // Center cell holds no dots
        assert_eq!(canvas.cell(5, 2), None);
        // Rightmost point of the ring
        assert!(canvas.cell(9, 2).is_some());
    }
}
