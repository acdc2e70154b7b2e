use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn dispatches_in_priority_order() {
    let assert = Command::cargo_bin("herald").unwrap().assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let raw = stdout
        .find("event:")
        .expect("high-priority listener output missing");
    let signup = stdout
        .find("recording signup")
        .expect("record_signup output missing");
    let email = stdout
        .find("send welcome email")
        .expect("welcome email output missing");

    assert!(
        raw < signup && raw < email,
        "high-priority listener must fire before the subscriber's listeners"
    );
    assert!(
        signup < email,
        "subscriber listeners must fire in their declared order"
    );
}

#[test]
fn welcome_email_uses_cli_arguments() {
    Command::cargo_bin("herald")
        .unwrap()
        .args(["--email", "ada@example.com"])
        .assert()
        .success()
        .stdout(contains("send welcome email to ada@example.com"));
}
