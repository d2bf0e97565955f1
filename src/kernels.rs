//! C sources of the `noise` compute kernel.
//!
//! Both dialects share one body. Each work item starts at its global id and strides by the global size,
//! so a single work-group of any shape covers the whole image.

use crate::noise::NOISE_PERM;

/// Entry point name in every generated source.
pub const KERNEL_NAME: &str = "noise";

struct Dialect {
    constant: &'static str,
    func: &'static str,
    entry: &'static str,
    global: &'static str,
    id_x: &'static str,
    id_y: &'static str,
    size_x: &'static str,
    size_y: &'static str,
    floor: &'static str,
    fabs: &'static str,
}

const OPENCL: Dialect = Dialect {
    constant: "__constant",
    func: "",
    entry: "__kernel void",
    global: "__global",
    id_x: "get_global_id(0)",
    id_y: "get_global_id(1)",
    size_x: "get_global_size(0)",
    size_y: "get_global_size(1)",
    floor: "floor",
    fabs: "fabs",
};

const CUDA: Dialect = Dialect {
    constant: "__constant__",
    func: "__device__ ",
    entry: "extern \"C\" __global__ void",
    global: "",
    id_x: "(blockIdx.x * blockDim.x + threadIdx.x)",
    id_y: "(blockIdx.y * blockDim.y + threadIdx.y)",
    size_x: "(gridDim.x * blockDim.x)",
    size_y: "(gridDim.y * blockDim.y)",
    floor: "floorf",
    fabs: "fabsf",
};

/// The permutation table as a C initializer list.
pub fn perm_initializer() -> String {
    NOISE_PERM
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn source(d: &Dialect) -> String {
    format!(
        r#"
{constant} int NoisePerm[{perm_len}] = {{ {perm} }};

{func}float Grad(int x, int y, int z, float dx, float dy, float dz) {{
    int h = NoisePerm[NoisePerm[NoisePerm[x] + y] + z];
    h &= 15;
    float u = h < 8 || h == 12 || h == 13 ? dx : dy;
    float v = h < 4 || h == 12 || h == 13 ? dy : dz;
    return ((h & 1) ? -u : u) + ((h & 2) ? -v : v);
}}

{func}float NoiseWeight(float t) {{
    float t3 = t * t * t;
    float t4 = t3 * t;
    return 6.0f * t4 * t - 15.0f * t4 + 10.0f * t3;
}}

{func}float Lerp(float t, float low, float high) {{
    return (1.0f - t) * low + t * high;
}}

{func}float Noise(float x, float y, float z) {{
    float fx = {floor}(x);
    float fy = {floor}(y);
    float fz = {floor}(z);
    float dx = x - fx, dy = y - fy, dz = z - fz;

    int ix = ((int)fx) & {mask};
    int iy = ((int)fy) & {mask};
    int iz = ((int)fz) & {mask};

    float w000 = Grad(ix, iy, iz, dx, dy, dz);
    float w100 = Grad(ix + 1, iy, iz, dx - 1.0f, dy, dz);
    float w010 = Grad(ix, iy + 1, iz, dx, dy - 1.0f, dz);
    float w110 = Grad(ix + 1, iy + 1, iz, dx - 1.0f, dy - 1.0f, dz);
    float w001 = Grad(ix, iy, iz + 1, dx, dy, dz - 1.0f);
    float w101 = Grad(ix + 1, iy, iz + 1, dx - 1.0f, dy, dz - 1.0f);
    float w011 = Grad(ix, iy + 1, iz + 1, dx, dy - 1.0f, dz - 1.0f);
    float w111 = Grad(ix + 1, iy + 1, iz + 1, dx - 1.0f, dy - 1.0f, dz - 1.0f);

    float wx = NoiseWeight(dx), wy = NoiseWeight(dy), wz = NoiseWeight(dz);
    float x00 = Lerp(wx, w000, w100);
    float x10 = Lerp(wx, w010, w110);
    float x01 = Lerp(wx, w001, w101);
    float x11 = Lerp(wx, w011, w111);
    float y0 = Lerp(wy, x00, x10);
    float y1 = Lerp(wy, x01, x11);
    return Lerp(wz, y0, y1);
}}

{func}float Turbulence(float x, float y, float z, int octaves) {{
    float omega = 0.6f;
    float sum = 0.0f, lambda = 1.0f, o = 1.0f;
    for (int i = 0; i < octaves; ++i) {{
        sum += {fabs}(o * Noise(lambda * x, lambda * y, lambda * z));
        lambda *= 1.99f;
        o *= omega;
    }}
    return sum * 0.5f;
}}

{entry} {name}(const float x0, const float y0, const float x1, const float y1,
                const int width, const int height, {global} float* output)
{{
    const float dx = (x1 - x0) / width;
    const float dy = (y1 - y0) / height;
    const int stride_x = (int) {size_x};
    const int stride_y = (int) {size_y};

    for (int j = (int) {id_y}; j < height; j += stride_y) {{
        for (int i = (int) {id_x}; i < width; i += stride_x) {{
            float x = x0 + i * dx;
            float y = y0 + j * dy;
            output[j * width + i] = Turbulence(x, y, {z:.1}f, {octaves});
        }}
    }}
}}
"#,
        constant = d.constant,
        func = d.func,
        entry = d.entry,
        global = d.global,
        id_x = d.id_x,
        id_y = d.id_y,
        size_x = d.size_x,
        size_y = d.size_y,
        floor = d.floor,
        fabs = d.fabs,
        perm_len = NOISE_PERM.len(),
        perm = perm_initializer(),
        mask = crate::noise::PERM_SIZE - 1,
        name = KERNEL_NAME,
        z = crate::params::NOISE_Z,
        octaves = crate::params::OCTAVES,
    )
}

/// OpenCL C source of the noise kernel.
pub fn opencl_source() -> String {
    source(&OPENCL)
}

/// CUDA C source of the noise kernel, compiled at runtime with NVRTC.
pub fn cuda_source() -> String {
    source(&CUDA)
}
