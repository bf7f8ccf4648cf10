use sadl_license::LicenseError;

#[test]
fn error_display_not_initialized() {
    let err = LicenseError::NotInitialized;
    assert!(format!("{err}").contains("not initialized"));
}

#[test]
fn init_error_is_verbatim() {
    let err = LicenseError::Init("missing assets".into());
    assert_eq!(format!("{err}"), "missing assets");
}

#[test]
fn decode_errors_are_verbatim() {
    let err = LicenseError::Decode("bad PDF417 header".into());
    assert_eq!(format!("{err}"), "bad PDF417 header");

    let err = LicenseError::Payload("checksum mismatch".into());
    assert_eq!(format!("{err}"), "checksum mismatch");
}

#[test]
fn error_display_status() {
    let err = LicenseError::Status("keystore locked".into());
    assert!(format!("{err}").contains("status unavailable"));
}

