//! Euclidean distance field over an edge map.

const INF: f64 = 1e20;

/// One-dimensional squared distance transform (lower envelope of parabolas).
///
/// `f` holds squared distances along one line; the result is written to `out`.
fn transform_line(f: &[f64], out: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    // Abscissa where the parabolas rooted at q and p intersect.
    let intersect = |q: usize, p: usize| -> f64 {
        ((f[q] + (q * q) as f64) - (f[p] + (p * p) as f64)) / (2.0 * (q as f64 - p as f64))
    };

    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    for q in 1..n {
        let mut s = intersect(q, v[k]);
        while s <= z[k] {
            k -= 1;
            s = intersect(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, slot) in out.iter_mut().enumerate() {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let p = v[k];
        let d = q as f64 - p as f64;
        *slot = d * d + f[p];
    }
}

/// Distance from every pixel to the nearest edge pixel.
///
/// `edges` is a binary map (non-zero marks an edge). This is the distance
/// transform of the inverted edge map: edge pixels get 0, every other pixel
/// gets the exact Euclidean distance to the closest edge pixel.
///
/// An edge map without any edge pixel has no meaningful distance, so the
/// whole field is 0 in that case.
///
/// # Panics
/// Panics if `edges.len()` is not `width * height`.
pub fn distance_to_edges(edges: &[u8], width: usize, height: usize) -> Vec<f32> {
    let len = width * height;
    assert_eq!(edges.len(), len, "edge map does not match {width}x{height}");
    if len == 0 || !edges.iter().any(|&e| e != 0) {
        return vec![0.0; len];
    }

    let mut grid: Vec<f64> = edges.iter().map(|&e| if e != 0 { 0.0 } else { INF }).collect();

    let longest = width.max(height);
    let mut line = vec![0.0; longest];
    let mut out = vec![0.0; longest];
    let mut v = vec![0usize; longest];
    let mut z = vec![0.0; longest + 1];

    // Columns first, then rows.
    for x in 0..width {
        for y in 0..height {
            line[y] = grid[y * width + x];
        }
        transform_line(&line[..height], &mut out[..height], &mut v, &mut z);
        for y in 0..height {
            grid[y * width + x] = out[y];
        }
    }

    for y in 0..height {
        let row = &mut grid[y * width..(y + 1) * width];
        line[..width].copy_from_slice(row);
        transform_line(&line[..width], &mut out[..width], &mut v, &mut z);
        row.copy_from_slice(&out[..width]);
    }

    grid.into_iter().map(|d| d.sqrt() as f32).collect()
}
