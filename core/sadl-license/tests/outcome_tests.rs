use pretty_assertions::assert_eq;
use sadl_license::{ActivationOutcome, ActivationStatus, DecodedDocument};

// ── ActivationOutcome ────────────────────────────────────────────

#[test]
fn outcome_display_matches_log_wording() {
    assert_eq!(ActivationOutcome::Success.to_string(), "Success");
    assert_eq!(
        ActivationOutcome::TokenRejected { status: "EXPIRED".into() }.to_string(),
        "Rejected: EXPIRED"
    );
    assert_eq!(
        ActivationOutcome::HttpError { code: 503, body: Some("maintenance".into()) }.to_string(),
        "HTTP 503: maintenance"
    );
    assert_eq!(
        ActivationOutcome::HttpError { code: 404, body: None }.to_string(),
        "HTTP 404: (no body)"
    );
    assert_eq!(
        ActivationOutcome::NetworkError { message: "dns".into() }.to_string(),
        "Network error: dns"
    );
    assert_eq!(
        ActivationOutcome::InvalidResponse { message: "not json".into() }.to_string(),
        "Invalid response: not json"
    );
}

#[test]
fn outcome_labels_are_short() {
    assert_eq!(
        ActivationOutcome::HttpError { code: 500, body: Some("long body".into()) }.label(),
        "HTTP 500"
    );
    assert_eq!(
        ActivationOutcome::NetworkError { message: "reset".into() }.label(),
        "Network error"
    );
}

#[test]
fn only_success_is_success() {
    assert!(ActivationOutcome::Success.is_success());
    assert!(!ActivationOutcome::TokenRejected { status: "X".into() }.is_success());
    assert!(!ActivationOutcome::NetworkError { message: "x".into() }.is_success());
}

#[test]
fn outcome_serde_is_tagged() {
    let json = serde_json::to_string(&ActivationOutcome::TokenRejected {
        status: "REVOKED".into(),
    })
    .unwrap();
    assert!(json.contains(r#""kind":"token_rejected""#));
    let parsed: ActivationOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, ActivationOutcome::TokenRejected { status: "REVOKED".into() });
}

// ── ActivationStatus ─────────────────────────────────────────────

#[test]
fn status_defaults_to_unknown() {
    assert_eq!(ActivationStatus::default(), ActivationStatus::Unknown);
}

#[test]
fn status_predicates() {
    assert!(ActivationStatus::Valid.is_licensed());
    assert!(!ActivationStatus::Expired.is_licensed());
    assert!(ActivationStatus::Unlicensed.is_unlicensed());
    assert!(!ActivationStatus::Unknown.is_unlicensed());
}

#[test]
fn status_display() {
    assert_eq!(ActivationStatus::Valid.to_string(), "VALID");
    assert_eq!(
        ActivationStatus::Invalid("bad signature".into()).to_string(),
        "INVALID (bad signature)"
    );
    assert_eq!(
        ActivationStatus::Error("store locked".into()).to_string(),
        "ERROR (store locked)"
    );
}

// ── DecodedDocument ──────────────────────────────────────────────

#[test]
fn empty_photo_counts_as_absent() {
    let mut doc = DecodedDocument {
        photo_jpeg: Some(Vec::new()),
        ..Default::default()
    };
    assert!(doc.photo().is_none());

    doc.photo_jpeg = Some(vec![1, 2, 3]);
    assert_eq!(doc.photo(), Some(&[1u8, 2, 3][..]));
}

#[test]
fn full_name_joins_names() {
    let doc = DecodedDocument {
        first_names: "JOHN PETER".into(),
        surname: "SMITH".into(),
        ..Default::default()
    };
    assert_eq!(doc.full_name(), "JOHN PETER SMITH");
}
