//! Analytic gradient of the triangle area.

/// Gradient of half the parallelogram area of a triangle with respect to its
/// nine corner coordinates.
///
/// For corners `t0`, `t1`, `t2`, the differentiated quantity is
/// `A = ½‖(t1 − t0) × (t2 − t0)‖`. The output is laid out coordinate-first:
/// `grad[0..3]` holds the x partials for the three corners, `grad[3..6]` the
/// y partials, and `grad[6..9]` the z partials.
///
/// The gradient is undefined for a degenerate (zero-area) triangle; callers
/// must guard against that case.
#[allow(clippy::too_many_arguments)]
pub fn triangle_area_gradient(
    t0_x: f64,
    t0_y: f64,
    t0_z: f64,
    t1_x: f64,
    t1_y: f64,
    t1_z: f64,
    t2_x: f64,
    t2_y: f64,
    t2_z: f64,
    grad: &mut [f64; 9],
) {
    let w0 = -t2_y;
    let w1 = w0 + t1_y;
    let w2 = t0_x - t1_x;
    let w3 = w0 + t0_y;
    let w4 = -t2_x;
    let w5 = t0_x + w4;
    let w6 = t0_y - t1_y;
    let w7 = w2 * w3 - w5 * w6;
    let w8 = -t2_z;
    let w9 = t1_z + w8;
    let w10 = t0_z + w8;
    let w11 = t0_z - t1_z;
    let w12 = w10 * w2 - w11 * w5;
    let w13 = w10 * w6 - w11 * w3;
    let w14 = 0.5 / (w12 * w12 + w13 * w13 + w7 * w7).sqrt();
    let w15 = t1_x + w4;

    grad[0] = w14 * (w1 * w7 + w12 * w9);
    grad[1] = -w14 * (w10 * w12 + w3 * w7);
    grad[2] = w14 * (w11 * w12 + w6 * w7);
    grad[3] = -w14 * (w15 * w7 - w13 * w9);
    grad[4] = w14 * (w5 * w7 - w10 * w13);
    grad[5] = -w14 * (w2 * w7 - w11 * w13);
    grad[6] = -w14 * (w1 * w13 + w12 * w15);
    grad[7] = w14 * (w12 * w5 + w13 * w3);
    grad[8] = -w14 * (w12 * w2 + w13 * w6);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_area(p: &[[f64; 3]; 3]) -> f64 {
        let e1 = [
            p[1][0] - p[0][0],
            p[1][1] - p[0][1],
            p[1][2] - p[0][2],
        ];
        let e2 = [
            p[2][0] - p[0][0],
            p[2][1] - p[0][1],
            p[2][2] - p[0][2],
        ];
        let cross = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        0.5 * (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt()
    }

    fn gradient_of(p: &[[f64; 3]; 3]) -> [f64; 9] {
        let mut grad = [0.0; 9];
        triangle_area_gradient(
            p[0][0], p[0][1], p[0][2], p[1][0], p[1][1], p[1][2], p[2][0], p[2][1], p[2][2],
            &mut grad,
        );
        grad
    }

    #[test]
    fn test_right_triangle() {
        let p = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let grad = gradient_of(&p);
        let expected = [-0.5, 0.5, 0.0, -0.5, 0.0, 0.5, 0.0, 0.0, 0.0];
        for (g, e) in grad.iter().zip(expected.iter()) {
            assert!((g - e).abs() < 1e-12, "got {:?}, expected {:?}", grad, expected);
        }
    }

    #[test]
    fn test_matches_central_differences() {
        let p = [[0.2, -0.1, 0.4], [1.3, 0.8, -0.2], [-0.5, 1.1, 0.9]];
        let grad = gradient_of(&p);

        let h = 1e-6;
        for k in 0..9 {
            // grad is coordinate-first: corner k % 3, coordinate k / 3.
            let (corner, coord) = (k % 3, k / 3);
            let mut plus = p;
            plus[corner][coord] += h;
            let mut minus = p;
            minus[corner][coord] -= h;
            let numeric = (triangle_area(&plus) - triangle_area(&minus)) / (2.0 * h);
            assert!(
                (grad[k] - numeric).abs() < 1e-6,
                "partial {}: analytic {} vs numeric {}",
                k,
                grad[k],
                numeric
            );
        }
    }

    #[test]
    fn test_translation_invariance() {
        // Moving all three corners together leaves the area unchanged, so the
        // three partials of each coordinate must cancel.
        let p = [[0.7, 0.3, -0.6], [2.1, -0.4, 0.5], [-1.2, 1.8, 1.1]];
        let grad = gradient_of(&p);
        for coord in 0..3 {
            let sum: f64 = (0..3).map(|corner| grad[3 * coord + corner]).sum();
            assert!(sum.abs() < 1e-12, "coordinate {} partials sum to {}", coord, sum);
        }
    }
}
