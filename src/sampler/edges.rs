//! Canny-style binary edge detection.

/// Gradient magnitude below which a pixel can never be an edge.
pub const CANNY_LOW_THRESHOLD: i32 = 50;

/// Gradient magnitude at or above which a pixel is a strong edge seed.
pub const CANNY_HIGH_THRESHOLD: i32 = 150;

/// Value written for edge pixels in the output map.
pub const EDGE: u8 = 255;

/// Quantized gradient orientation used for non-maximum suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    /// Gradient points along x: compare left/right neighbours.
    Horizontal,
    /// Gradient points along y: compare up/down neighbours.
    Vertical,
    /// Gradient along the main diagonal (x and y share sign).
    DiagonalDown,
    /// Gradient along the anti-diagonal.
    DiagonalUp,
}

impl Orientation {
    /// tan(22.5°) and tan(67.5°) scaled by 2^15, as in integer Canny code.
    fn from_gradient(gx: i32, gy: i32) -> Self {
        const TAN_22_5: i64 = 13573;
        const TAN_67_5: i64 = 79109;

        let ax = (gx as i64).abs();
        let ay = ((gy as i64).abs()) << 15;

        if ay < ax * TAN_22_5 {
            Orientation::Horizontal
        } else if ay > ax * TAN_67_5 {
            Orientation::Vertical
        } else if (gx > 0) == (gy > 0) {
            Orientation::DiagonalDown
        } else {
            Orientation::DiagonalUp
        }
    }

    /// Offsets (dx, dy) of the two neighbours along the gradient.
    fn neighbours(self) -> [(isize, isize); 2] {
        match self {
            Orientation::Horizontal => [(-1, 0), (1, 0)],
            Orientation::Vertical => [(0, -1), (0, 1)],
            Orientation::DiagonalDown => [(-1, -1), (1, 1)],
            Orientation::DiagonalUp => [(1, -1), (-1, 1)],
        }
    }
}

/// Sobel gradients with replicated borders.
///
/// ```text
/// Gx:          Gy:
/// [-1  0  1]   [-1 -2 -1]
/// [-2  0  2]   [ 0  0  0]
/// [-1  0  1]   [ 1  2  1]
/// ```
fn sobel(gray: &[u8], width: usize, height: usize) -> (Vec<i32>, Vec<i32>) {
    let sobel_x: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
    let sobel_y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

    let mut gx = vec![0i32; gray.len()];
    let mut gy = vec![0i32; gray.len()];

    for y in 0..height {
        for x in 0..width {
            let mut sx = 0;
            let mut sy = 0;

            for (ky, (row_x, row_y)) in sobel_x.iter().zip(sobel_y.iter()).enumerate() {
                let py = (y as isize + ky as isize - 1).clamp(0, height as isize - 1) as usize;
                for kx in 0..3 {
                    let px = (x as isize + kx as isize - 1).clamp(0, width as isize - 1) as usize;
                    let val = gray[py * width + px] as i32;
                    sx += val * row_x[kx];
                    sy += val * row_y[kx];
                }
            }

            gx[y * width + x] = sx;
            gy[y * width + x] = sy;
        }
    }

    (gx, gy)
}

/// Detect edges in a grayscale image.
///
/// Pipeline: 3x3 Sobel gradients, L1 magnitude `|gx| + |gy|`, non-maximum
/// suppression along the quantized gradient direction, then hysteresis:
/// pixels above [`CANNY_HIGH_THRESHOLD`] seed edges, and pixels above
/// [`CANNY_LOW_THRESHOLD`] join an edge when 8-connected to a seed.
///
/// # Returns
/// A binary map the same size as `gray`: [`EDGE`] for edge pixels, 0 elsewhere.
///
/// # Panics
/// Panics if `gray.len()` is not `width * height`.
pub fn detect_edges(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let len = width * height;
    assert_eq!(gray.len(), len, "gray buffer does not match {width}x{height}");
    let mut edges = vec![0u8; len];
    if len == 0 {
        return edges;
    }

    let (gx, gy) = sobel(gray, width, height);
    let magnitude: Vec<i32> = gx.iter().zip(&gy).map(|(x, y)| x.abs() + y.abs()).collect();

    let at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    // Non-maximum suppression. Ties resolve toward the later neighbour so a
    // flat ridge stays one pixel wide.
    let mut candidate = vec![false; len];
    let mut stack = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = magnitude[idx];
            if m <= CANNY_LOW_THRESHOLD {
                continue;
            }

            let [(ax, ay), (bx, by)] = Orientation::from_gradient(gx[idx], gy[idx]).neighbours();
            let (xi, yi) = (x as isize, y as isize);
            if m > at(xi + ax, yi + ay) && m >= at(xi + bx, yi + by) {
                candidate[idx] = true;
                if m > CANNY_HIGH_THRESHOLD {
                    edges[idx] = EDGE;
                    stack.push(idx);
                }
            }
        }
    }

    // Hysteresis: grow strong edges through connected weak candidates.
    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % width) as isize, (idx / width) as isize);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if candidate[n] && edges[n] == 0 {
                    edges[n] = EDGE;
                    stack.push(n);
                }
            }
        }
    }

    edges
}
