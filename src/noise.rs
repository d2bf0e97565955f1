//! Serial host reference of the turbulence image.
//!
//! Every device result is checked against the output of [`noise_serial`].

use crate::{DeviceError, NoiseParams, Result, params::NOISE_Z, params::OCTAVES};

/// Number of distinct lattice gradients per axis.
pub const PERM_SIZE: usize = 256;

/// Ken Perlin's reference permutation of `0..256`.
pub const PERMUTATION: [u8; PERM_SIZE] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// The permutation repeated twice, so `P[P[x] + y]` never needs wrapping.
pub const NOISE_PERM: [u16; 2 * PERM_SIZE] = doubled_permutation();

const fn doubled_permutation() -> [u16; 2 * PERM_SIZE] {
    let mut perm = [0; 2 * PERM_SIZE];
    let mut idx = 0;
    while idx < perm.len() {
        perm[idx] = PERMUTATION[idx % PERM_SIZE] as u16;
        idx += 1;
    }
    perm
}

#[inline]
fn perm(idx: usize) -> usize {
    NOISE_PERM[idx] as usize
}

/// Dot product of the offset with one of the 12 edge gradients selected by hashing the lattice point.
/// Lattice coordinates must lie in `0..=256`.
#[inline]
pub fn grad(x: usize, y: usize, z: usize, dx: f32, dy: f32, dz: f32) -> f32 {
    let h = perm(perm(perm(x) + y) + z) & 15;
    let u = if h < 8 || h == 12 || h == 13 { dx } else { dy };
    let v = if h < 4 || h == 12 || h == 13 { dy } else { dz };
    (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn noise_weight(t: f32) -> f32 {
    let t3 = t * t * t;
    let t4 = t3 * t;
    6. * t4 * t - 15. * t4 + 10. * t3
}

#[inline]
pub fn lerp(t: f32, low: f32, high: f32) -> f32 {
    (1. - t) * low + t * high
}

/// Improved Perlin noise at `(x, y, z)`.
pub fn noise(x: f32, y: f32, z: f32) -> f32 {
    let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
    let (dx, dy, dz) = (x - fx, y - fy, z - fz);

    let mask = PERM_SIZE as i32 - 1;
    let ix = (fx as i32 & mask) as usize;
    let iy = (fy as i32 & mask) as usize;
    let iz = (fz as i32 & mask) as usize;

    let w000 = grad(ix, iy, iz, dx, dy, dz);
    let w100 = grad(ix + 1, iy, iz, dx - 1., dy, dz);
    let w010 = grad(ix, iy + 1, iz, dx, dy - 1., dz);
    let w110 = grad(ix + 1, iy + 1, iz, dx - 1., dy - 1., dz);
    let w001 = grad(ix, iy, iz + 1, dx, dy, dz - 1.);
    let w101 = grad(ix + 1, iy, iz + 1, dx - 1., dy, dz - 1.);
    let w011 = grad(ix, iy + 1, iz + 1, dx, dy - 1., dz - 1.);
    let w111 = grad(ix + 1, iy + 1, iz + 1, dx - 1., dy - 1., dz - 1.);

    let (wx, wy, wz) = (noise_weight(dx), noise_weight(dy), noise_weight(dz));

    let x00 = lerp(wx, w000, w100);
    let x10 = lerp(wx, w010, w110);
    let x01 = lerp(wx, w001, w101);
    let x11 = lerp(wx, w011, w111);
    let y0 = lerp(wy, x00, x10);
    let y1 = lerp(wy, x01, x11);
    lerp(wz, y0, y1)
}

/// Sum of `octaves` absolute noise layers, each at 1.99 times the frequency and 0.6 times the amplitude of the previous one.
pub fn turbulence(x: f32, y: f32, z: f32, octaves: u32) -> f32 {
    let omega = 0.6f32;

    let mut sum = 0f32;
    let mut lambda = 1f32;
    let mut o = 1f32;
    for _ in 0..octaves {
        sum += (o * noise(lambda * x, lambda * y, lambda * z)).abs();
        lambda *= 1.99;
        o *= omega;
    }
    sum * 0.5
}

/// The value of pixel `(i, j)`.
#[inline]
pub fn noise_pixel(params: &NoiseParams, i: usize, j: usize) -> f32 {
    let x = params.x0 + i as f32 * params.dx();
    let y = params.y0 + j as f32 * params.dy();
    turbulence(x, y, NOISE_Z, OCTAVES)
}

/// Fills `output` (row major, `width * height`) with the turbulence image.
///
/// # Example
/// ```
/// use noise_bench::{NoiseParams, noise::noise_serial};
///
/// fn main() -> noise_bench::Result<()> {
///     let params = NoiseParams::with_size(16, 8);
///     let mut out = vec![0.; params.len()];
///     noise_serial(&params, &mut out)?;
///
///     assert!(out.iter().all(|v| *v >= 0.));
///     Ok(())
/// }
/// ```
pub fn noise_serial(params: &NoiseParams, output: &mut [f32]) -> Result<()> {
    params.validate()?;
    if output.len() != params.len() {
        return Err(DeviceError::LengthMismatch.into());
    }

    let width = params.width as usize;
    for (j, row) in output.chunks_exact_mut(width).enumerate() {
        for (i, value) in row.iter_mut().enumerate() {
            *value = noise_pixel(params, i, j);
        }
    }
    Ok(())
}

/// Allocating variant of [`noise_serial`].
pub fn reference(params: &NoiseParams) -> Result<Vec<f32>> {
    let mut gold = vec![0.; params.len()];
    noise_serial(params, &mut gold)?;
    Ok(gold)
}
