use sadl_license::{DeviceFingerprint, FingerprintProvider};

#[test]
fn fingerprint_stability() {
    let fp1 = DeviceFingerprint::generate();
    let fp2 = DeviceFingerprint::generate();
    assert_eq!(fp1.id(), fp2.id());
    assert!(!fp1.id().is_empty());
}

#[test]
fn fingerprint_from_components_is_deterministic() {
    let parts = vec!["android".to_string(), "aarch64".to_string(), "pixel".to_string()];
    let a = DeviceFingerprint::from_components(&parts);
    let b = DeviceFingerprint::from_components(&parts);
    assert_eq!(a.id(), b.id());
    // 16 bytes of SHA-256, padded base64
    assert_eq!(a.id().len(), 24);

    let other = DeviceFingerprint::from_components(&["android".to_string()]);
    assert_ne!(a.id(), other.id());
}

#[test]
fn fingerprint_provider_returns_id() {
    let fp = DeviceFingerprint::generate();
    assert_eq!(fp.fingerprint(), fp.id());
}

#[test]
fn fingerprint_serialization_roundtrip() {
    let fp = DeviceFingerprint::generate();
    let json = serde_json::to_string(&fp).unwrap();
    let parsed: DeviceFingerprint = serde_json::from_str(&json).unwrap();
    assert_eq!(fp, parsed);
}
