use assert_cmd::Command;
use predicates::prelude::*;

fn noise_bench() -> Command {
    Command::cargo_bin("noise-bench").unwrap()
}

#[test]
fn help_exits_zero() {
    noise_bench().arg("--help").assert().success();
}

#[test]
fn passing_run_exits_zero() {
    noise_bench()
        .args(["1", "4", "4", "--width", "64", "--height", "32"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "Running test with 1 iterations on 4 * 4 threads.",
        ))
        .stdout(predicate::str::contains("Passed! Max error:0"));
}

#[test]
fn unknown_device_exits_one() {
    noise_bench().args(["--device", "vulkan"]).assert().code(1);
}

#[test]
fn group_without_gy_exits_one() {
    noise_bench().args(["10", "16"]).assert().code(1);
}

#[test]
fn oversized_group_exits_one() {
    noise_bench()
        .args(["1", "64", "64", "--width", "16", "--height", "16"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn zero_iterations_exits_one() {
    noise_bench().args(["0", "1", "1"]).assert().code(1);
}
