//! A serializable summary of a run.

use std::time::Duration;

use crate::{GroupSize, NoiseParams, check::Verdict, harness::Outcome};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub device: String,
    pub params: NoiseParams,
    pub group: GroupSize,
    pub iterations: u32,
    pub kernel_ns: u64,
    pub total_ns: u64,
    pub verdict: Option<Verdict>,
}

impl Report {
    pub fn new(
        device: impl Into<String>,
        params: NoiseParams,
        group: GroupSize,
        iterations: u32,
        outcome: &Outcome,
    ) -> Self {
        Report {
            device: device.into(),
            params,
            group,
            iterations,
            kernel_ns: nanos(outcome.timings.kernel),
            total_ns: nanos(outcome.timings.total),
            verdict: outcome.verdict,
        }
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.verdict.is_none_or(|verdict| verdict.passed())
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[inline]
fn nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Report;
    use crate::{GroupSize, NoiseParams, check::Verdict, harness::Outcome, timings::Timings};

    fn outcome(verdict: Option<Verdict>) -> Outcome {
        Outcome {
            timings: Timings::new(Duration::from_micros(1200), Duration::from_micros(1500)),
            verdict,
            result: Vec::new(),
        }
    }

    #[test]
    fn test_report_from_outcome() {
        let report = Report::new(
            "cpu",
            NoiseParams::default(),
            GroupSize::new(8, 8),
            1,
            &outcome(Some(Verdict::Passed { max_err: 0. })),
        );
        assert_eq!(report.kernel_ns, 1_200_000);
        assert_eq!(report.total_ns, 1_500_000);
        assert!(report.passed());
    }

    #[test]
    fn test_failed_report() {
        let verdict = Verdict::Failed {
            index: 3,
            got: -1.,
            expected: 0.25,
            max_err: 1.25,
        };
        let report = Report::new(
            "cpu",
            NoiseParams::default(),
            GroupSize::default(),
            1,
            &outcome(Some(verdict)),
        );
        assert!(!report.passed());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_ser_de_group_size() {
        use serde_test::{Token, assert_tokens};

        assert_tokens(
            &GroupSize::new(16, 4),
            &[
                Token::Struct {
                    name: "GroupSize",
                    len: 2,
                },
                Token::Str("x"),
                Token::U32(16),
                Token::Str("y"),
                Token::U32(4),
                Token::StructEnd,
            ],
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_ser_de_passed_verdict() {
        use serde_test::{Token, assert_tokens};

        assert_tokens(
            &Verdict::Passed { max_err: 0.5 },
            &[
                Token::StructVariant {
                    name: "Verdict",
                    variant: "Passed",
                    len: 1,
                },
                Token::Str("max_err"),
                Token::F64(0.5),
                Token::StructVariantEnd,
            ],
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_report() -> crate::Result<()> {
        let report = Report::new(
            "cpu",
            NoiseParams::with_size(32, 16),
            GroupSize::new(2, 2),
            5,
            &outcome(None),
        );
        let json = report.to_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;

        assert_eq!(value["device"], "cpu");
        assert_eq!(value["params"]["width"], 32);
        assert_eq!(value["group"]["y"], 2);
        assert_eq!(value["iterations"], 5);
        assert!(value["verdict"].is_null());

        let back: Report = serde_json::from_str(&json)?;
        assert_eq!(back, report);
        Ok(())
    }
}
