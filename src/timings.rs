//! Wall clock timings of a run.

use std::time::Duration;

/// `kernel` spans the dispatches up to device synchronization.
/// `total` additionally spans copying the image back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timings {
    pub kernel: Duration,
    pub total: Duration,
}

impl Timings {
    #[inline]
    pub fn new(kernel: Duration, total: Duration) -> Self {
        Timings { kernel, total }
    }

    /// Milliseconds per iteration as `(kernel, total)`.
    pub fn per_iteration_ms(&self, niter: u32) -> (f64, f64) {
        let niter = niter.max(1) as f64;
        (
            self.kernel.as_nanos() as f64 / 1e6 / niter,
            self.total.as_nanos() as f64 / 1e6 / niter,
        )
    }

    /// The lines [`Timings::print`] writes.
    pub fn report(&self, niter: u32) -> String {
        let (kernel, total) = self.per_iteration_ms(niter);
        format!(
            "Kernel time: {kernel:.3} ms per iteration\nTotal time:  {total:.3} ms per iteration ({niter} iterations)"
        )
    }

    pub fn print(&self, niter: u32) {
        println!("{}", self.report(niter));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Timings;

    #[test]
    fn test_per_iteration() {
        let timings = Timings::new(Duration::from_millis(40), Duration::from_millis(50));
        assert_eq!(timings.per_iteration_ms(10), (4., 5.));
    }

    #[test]
    fn test_zero_iterations_does_not_divide_by_zero() {
        let timings = Timings::new(Duration::from_millis(3), Duration::from_millis(3));
        assert_eq!(timings.per_iteration_ms(0), (3., 3.));
    }

    #[test]
    fn test_report() {
        let timings = Timings::new(Duration::from_micros(1500), Duration::from_millis(2));
        assert_eq!(
            timings.report(1),
            "Kernel time: 1.500 ms per iteration\nTotal time:  2.000 ms per iteration (1 iterations)"
        );
    }
}
