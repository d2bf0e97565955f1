//! A benchmark for the improved Perlin noise "turbulence" kernel on host and GPU devices.
//!
//! The image of a rectangle is computed with a single work-group of `gx * gy` work items,
//! timed over a number of iterations and compared against a serial reference implementation.
//!
//! Devices implement [`NoiseDevice`]. The host [`CPU`] is enabled by default, `OpenCL` and `CUDA`
//! are behind the `opencl` and `cuda` features.
//!
#![cfg_attr(feature = "cpu", doc = "```")]
#![cfg_attr(not(feature = "cpu"), doc = "```ignore")]
//! use noise_bench::prelude::*;
//!
//! fn main() -> noise_bench::Result<()> {
//!     let config = BenchConfig {
//!         params: NoiseParams::with_size(128, 128),
//!         group: GroupSize::new(8, 8),
//!         iterations: 1,
//!         verify: true,
//!     };
//!
//!     let outcome = run(&CPU::new(), &config)?;
//!     outcome.timings.print(config.iterations);
//!
//!     assert!(outcome.passed());
//!     Ok(())
//! }
//! ```

pub use devices::*;
pub use error::*;
pub use params::*;

#[cfg(feature = "cpu")]
pub use devices::cpu::CPU;

#[cfg(feature = "cuda")]
pub use devices::cuda::CUDA;

#[cfg(feature = "opencl")]
pub use devices::opencl::OpenCL;

pub mod check;
pub mod cli;
pub mod devices;
mod error;
pub mod harness;
pub mod kernels;
pub mod noise;
mod params;
pub mod report;
pub mod timings;

pub mod prelude {
    pub use crate::{
        DeviceKind, GroupSize, NoiseDevice, NoiseParams,
        check::{CORRECTNESS_THRESHOLD, Verdict, compare},
        harness::{BenchConfig, Outcome, run},
        report::Report,
        timings::Timings,
    };

    #[cfg(feature = "cpu")]
    pub use crate::CPU;

    #[cfg(feature = "cuda")]
    pub use crate::CUDA;

    #[cfg(feature = "opencl")]
    pub use crate::OpenCL;
}
