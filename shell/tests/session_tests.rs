use sadl_license::mock::MockLicensing;
use sadl_license::{ActivationOutcome, FingerprintProvider, LicensingClient};
use sadl_shell::{Command, Flow, Session};
use sadl_workflow::WorkflowCoordinator;
use std::sync::Arc;
use std::time::Duration;

struct TestDevice;

impl FingerprintProvider for TestDevice {
    fn fingerprint(&self) -> String {
        "test-device".to_string()
    }
}

fn session(mock: MockLicensing) -> Session {
    let client: Arc<dyn LicensingClient> = Arc::new(mock);
    Session::new(WorkflowCoordinator::new(client, &TestDevice))
}

async fn run(session: &mut Session, line: &str) -> String {
    let command = Command::parse(line).unwrap().unwrap();
    session.execute(command).await.output().to_string()
}

#[tokio::test]
async fn form_is_prefilled() {
    let mut s = session(MockLicensing::new());
    let form = run(&mut s, "form").await;
    assert!(form.contains("url:     http://www.omnicheck.co.za"));
    assert!(form.contains("product: SADL-PRO"));
    assert!(form.contains("years:   1"));
    assert!(form.contains("key:     (none)"));

    let form = run(&mut s, "set key secret").await;
    assert!(form.contains("key:     ********"));
    assert_eq!(s.form().api_key, "secret");
}

#[tokio::test(start_paused = true)]
async fn activation_runs_in_background() {
    let mut s = session(MockLicensing::new().with_activation_delay(Duration::from_secs(3)));

    assert_eq!(run(&mut s, "activate").await, "activation dispatched (busy)");
    assert!(s.has_pending());
    assert!(s.coordinator().is_busy());

    // A second press is refused while the first is running.
    let busy = run(&mut s, "activate").await;
    assert!(busy.contains("! Activation in progress"));

    let done = run(&mut s, "wait").await;
    assert!(done.contains("» Activation success"));
    assert!(done.contains("Activation: VALID"));
    assert!(!s.has_pending());
    assert!(!s.coordinator().is_busy());
}

#[tokio::test]
async fn rejected_activation_is_rendered() {
    let mut s = session(MockLicensing::new().with_activation_outcome(
        ActivationOutcome::TokenRejected {
            status: "EXPIRED".into(),
        },
    ));
    run(&mut s, "activate").await;
    let done = run(&mut s, "wait").await;
    assert!(done.contains("! Rejected: EXPIRED"));

    let log = run(&mut s, "log 2").await;
    let lines: Vec<_> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("STATUS = UNLICENSED"));
    assert!(lines[1].ends_with("ACTIVATE → Rejected: EXPIRED"));
}

#[tokio::test]
async fn decode_renders_document() {
    let mut s = session(MockLicensing::new());
    let out = run(&mut s, "decode AAEC").await;
    assert!(out.contains("Name: THANDI M NKOSI"));
    assert!(out.contains("Photo: 8 bytes"));

    let out = run(&mut s, "decode").await;
    assert!(out.contains("! Paste PDF417 base64"));
}

#[tokio::test]
async fn decode_needs_init_first() {
    let mut s = session(MockLicensing::new().requiring_init());
    let out = run(&mut s, "decode AAEC").await;
    assert!(out.contains("! Decode failed: sdk not initialized"));

    let out = run(&mut s, "init").await;
    assert!(out.contains("» SDK initialized"));
    let out = run(&mut s, "decode AAEC").await;
    assert!(out.contains("Name: THANDI M NKOSI"));
}

#[tokio::test]
async fn json_output() {
    let client: Arc<dyn LicensingClient> = Arc::new(MockLicensing::new());
    let mut s = Session::new(WorkflowCoordinator::new(client, &TestDevice)).with_json(true);
    let out = run(&mut s, "payload AAEC").await;
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["payload_len"], 3);
    assert_eq!(value["fingerprint"], "test-device");
}

#[tokio::test]
async fn quit_ends_session() {
    let mut s = session(MockLicensing::new());
    let flow = s.execute(Command::Quit).await;
    assert_eq!(flow, Flow::Quit("bye".into()));
}
