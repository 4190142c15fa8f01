use crate::braille::BrailleCanvas;
use crate::quiz::region::PixelRing;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
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

/// Draw a closed ring outline. The closing edge is drawn even when the
/// input does not repeat its first vertex.
pub fn draw_ring(canvas: &mut BrailleCanvas, ring: &PixelRing) {
    if ring.len() < 2 {
        return;
    }
    for pair in ring.windows(2) {
        draw_line(canvas, pair[0].0, pair[0].1, pair[1].0, pair[1].1);
    }
    let (first, last) = (ring[0], ring[ring.len() - 1]);
    if first != last {
        draw_line(canvas, last.0, last.1, first.0, first.1);
    }
}

/// Fill a ring's interior with an even-odd scanline sweep.
pub fn fill_ring(canvas: &mut BrailleCanvas, ring: &PixelRing) {
    if ring.len() < 3 {
        return;
    }

    let min_y = ring.iter().map(|p| p.1).min().unwrap_or(0);
    let max_y = ring.iter().map(|p| p.1).max().unwrap_or(0);

    let mut crossings: Vec<i32> = Vec::new();
    for y in min_y..=max_y {
        crossings.clear();
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > y) != (yj > y) {
                let x = xi as f64 + (y - yi) as f64 * (xj - xi) as f64 / (yj - yi) as f64;
                crossings.push(x.round() as i32);
            }
            j = i;
        }
        crossings.sort_unstable();
        for span in crossings.chunks_exact(2) {
            for x in span[0]..=span[1] {
                canvas.set_pixel_signed(x, y);
            }
        }
    }
}

/// Point-in-ring containment via even-odd ray casting, in exact integer
/// arithmetic. Points on an edge or vertex count as inside.
pub fn point_in_ring(ring: &PixelRing, x: i32, y: i32) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];

        // det is the cross product of (edge vector, point - edge start);
        // zero means the point lies on the edge's carrier line.
        let det = (xj - xi) as i64 * (y - yi) as i64 - (yj - yi) as i64 * (x - xi) as i64;
        if det == 0
            && x >= xi.min(xj)
            && x <= xi.max(xj)
            && y >= yi.min(yj)
            && y <= yi.max(yj)
        {
            return true; // on the boundary
        }

        // Horizontal ray to the right of (x, y): the edge crosses the scan
        // level iff its endpoints straddle y, and it crosses right of x iff
        // det and (yj - yi) share a sign.
        if (yi > y) != (yj > y) && (det > 0) == (yj > yi) {
            inside = !inside;
        }

        j = i;
    }
    inside
}

/// Area-weighted centroid of a closed ring (shoelace formula). Falls back to
/// the vertex mean for rings with no signed area.
pub fn ring_centroid(ring: &[(f64, f64)]) -> (f64, f64) {
    let n = ring.len();
    if n == 0 {
        return (0.0, 0.0);
    }

    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        let cross = xj * yi - xi * yj;
        area2 += cross;
        cx += (xi + xj) * cross;
        cy += (yi + yj) * cross;
        j = i;
    }

    if area2.abs() < f64::EPSILON {
        let inv = 1.0 / n as f64;
        return (
            ring.iter().map(|p| p.0).sum::<f64>() * inv,
            ring.iter().map(|p| p.1).sum::<f64>() * inv,
        );
    }

    (cx / (3.0 * area2), cy / (3.0 * area2))
}

/// Centroid of a pixel ring, for anchoring labels.
pub fn ring_centroid_px(ring: &PixelRing) -> (i32, i32) {
    let pts: Vec<(f64, f64)> = ring.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
    let (cx, cy) = ring_centroid(&pts);
    (cx.round() as i32, cy.round() as i32)
}
