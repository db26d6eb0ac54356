use assert_cmd::Command;

#[test]
fn evaluates_expression_from_stdin() {
    let mut cmd = Command::cargo_bin("cert_cli").expect("binary built");
    let assert = cmd.write_stdin("2 + 3 * 4\n:quit\n").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.contains("1.4"), "stdout was: {stdout}");
}

#[test]
fn reports_domain_errors() {
    let mut cmd = Command::cargo_bin("cert_cli").expect("binary built");
    let assert = cmd.write_stdin("ln(-1)\n:quit\n").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.contains("Error"), "stdout was: {stdout}");
}

#[test]
fn explain_mode_prints_trace() {
    let mut cmd = Command::cargo_bin("cert_cli").expect("binary built");
    let assert = cmd
        .write_stdin(":mode explain\n:digits 20\n2 + 3 * 4\n:quit\n")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.contains("[SUMMARY]"), "stdout was: {stdout}");
}
