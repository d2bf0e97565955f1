//! CLI argument parsing for noise-bench

use clap::{Parser, error::ErrorKind as ClapErrorKind};

use crate::{DeviceKind, GroupSize, NoiseParams, harness::BenchConfig, params::DEFAULT_SIZE};

#[derive(Parser, Debug)]
#[command(name = "noise-bench")]
#[command(version)]
#[command(about = "Times the Perlin noise turbulence kernel on a single work-group", long_about = None)]
pub struct Cli {
    /// Number of kernel dispatches to time
    #[arg(value_name = "NITER", default_value_t = 1)]
    pub niter: u32,

    /// Work-group size in x
    #[arg(value_name = "GX", requires = "gy")]
    pub gx: Option<u32>,

    /// Work-group size in y
    #[arg(value_name = "GY", requires = "gx")]
    pub gy: Option<u32>,

    /// Device to run on (cpu, opencl or cuda)
    #[arg(short, long, default_value = "cpu")]
    pub device: DeviceKind,

    /// Image width in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub height: u32,

    /// Compare against the serial reference even when running more than one iteration
    #[arg(long)]
    pub verify: bool,

    /// Print a JSON report instead of the text summary
    #[cfg(feature = "json")]
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn group(&self) -> GroupSize {
        GroupSize::new(self.gx.unwrap_or(1), self.gy.unwrap_or(1))
    }

    pub fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            params: NoiseParams::with_size(self.width, self.height),
            group: self.group(),
            iterations: self.niter,
            verify: self.verify,
        }
    }

    #[inline]
    pub fn json(&self) -> bool {
        #[cfg(feature = "json")]
        {
            self.json
        }
        #[cfg(not(feature = "json"))]
        {
            false
        }
    }
}

/// Exit status after a failed parse: `0` for `--help` and `--version`, `1` for usage errors.
pub fn parse_error_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
