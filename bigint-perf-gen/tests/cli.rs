use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bigint-perf-gen"))
        .args(args)
        .env_remove("BIGINT_PERF_LOG")
        .output()
        .expect("failed to spawn bigint-perf-gen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn no_arguments_prints_the_default_preset() {
    let output = run(&[]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("//! ⚠️  AUTO-GENERATED by bigint-perf-gen ⚠️\n"));
    assert!(text.contains("//! Catalog: full v3\n"));
    assert!(text.ends_with("fn main() {\n    divan::main();\n}\n"));
}

#[test]
fn named_preset() {
    let output = run(&["--preset", "quick"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("//! Catalog: quick v1\n"));
}

#[test]
fn unknown_preset_fails_without_output() {
    let output = run(&["--preset", "nightly"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let err = stderr(&output);
    assert!(err.contains("unknown preset 'nightly'"), "{err}");
    assert!(err.contains("full, quick"), "{err}");
}

#[test]
fn catalog_errors_fail_without_output() {
    let output = run(&["--kind", "ternary"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("ternary"));
}

#[test]
fn unknown_flags_fail_without_output() {
    let output = run(&["--bogus"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!stderr(&output).is_empty());
}

#[test]
fn kind_filter_keeps_only_that_kind() {
    let output = run(&["--preset", "quick", "--kind", "shift"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("fn shift_left_int("));
    assert!(text.contains("fn shift_right_big_inout("));
    assert!(!text.contains("fn binary_add_int("));
    assert!(!text.contains("fn string_radix_parse_10("));
    assert!(text.contains("fn pi_100("));
}

#[test]
fn list_presets_goes_to_stdout() {
    let output = run(&["--list-presets"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    let names: Vec<&str> = text
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, ["full", "quick"]);
    assert!(!text.contains("AUTO-GENERATED"));
}

#[test]
fn dump_catalog_goes_to_stderr() {
    let output = run(&["--preset", "quick", "--dump-catalog"]);
    assert!(output.status.success(), "{}", stderr(&output));

    assert!(stderr(&output).contains("mul_div_int_big"));
    let text = stdout(&output);
    assert!(text.starts_with("//! ⚠️  AUTO-GENERATED by bigint-perf-gen ⚠️\n"));
    assert!(text.contains("//! Catalog: quick v1\n"));
}
