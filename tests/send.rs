mod common;

#[test]
fn test_send_without_relay_is_dry_run() {
    let output = common::run(&[
        "send",
        "--name",
        "John",
        "--email",
        "john@x.com",
        "--subject",
        "job-opportunity",
        "--message",
        "Hello there",
    ]);
    assert!(output.status.success(), "{}", common::stderr(&output));
    assert!(common::stdout(&output).contains("Message sent."));
    assert!(common::stderr(&output).contains("No relay configured"));
}

#[test]
fn test_send_empty_message_fails_validation() {
    let output = common::run(&[
        "send", "--name", "John", "--email", "john@x.com", "--message", "   ",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = common::stderr(&output);
    assert!(stderr.contains("Message is required"), "{stderr}");
    assert!(common::stdout(&output).is_empty());
}

#[test]
fn test_send_malformed_email_fails_validation() {
    let output = common::run(&["send", "--name", "John", "--email", "john@x", "--message", "Hi"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(common::stderr(&output).contains("Enter a valid email address"));
}
