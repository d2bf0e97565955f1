use std::process::ExitCode;

use clap::Parser;
use noise_bench::{
    DeviceError, DeviceKind, NoiseDevice, Result,
    cli::{Cli, parse_error_status},
    harness::{BenchConfig, run},
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn execute<D: NoiseDevice>(device: &D, cli: &Cli, config: &BenchConfig) -> Result<bool> {
    tracing::debug!(device = %device.name(), "running noise kernel");
    let outcome = run(device, config)?;

    if cli.json() {
        #[cfg(feature = "json")]
        {
            let report = noise_bench::report::Report::new(
                device.name(),
                config.params,
                config.group,
                config.iterations,
                &outcome,
            );
            println!("{}", report.to_json()?);
        }
    } else {
        outcome.timings.print(config.iterations);
        if let Some(verdict) = outcome.verdict {
            println!("{verdict}");
        }
    }
    Ok(outcome.passed())
}

fn dispatch(cli: &Cli, config: &BenchConfig) -> Result<bool> {
    match cli.device {
        #[cfg(feature = "cpu")]
        DeviceKind::Cpu => execute(&noise_bench::CPU::new(), cli, config),
        #[cfg(feature = "opencl")]
        DeviceKind::OpenCL => execute(&noise_bench::OpenCL::from_env()?, cli, config),
        #[cfg(feature = "cuda")]
        DeviceKind::Cuda => execute(&noise_bench::CUDA::from_env()?, cli, config),
        #[allow(unreachable_patterns)]
        kind => {
            tracing::error!(%kind, "backend not compiled in");
            Err(DeviceError::BackendNotEnabled.into())
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_error_status(&e));
        }
    };
    let config = cli.bench_config();

    if !cli.json() {
        println!(
            "Running test with {} iterations on {} threads.",
            config.iterations, config.group
        );
    }

    match dispatch(&cli, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
