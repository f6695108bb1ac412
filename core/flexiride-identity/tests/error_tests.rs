use flexiride_identity::IdentityError;

#[test]
fn error_display_malformed() {
    let err = IdentityError::Malformed("missing field `email`".into());
    assert!(format!("{err}").contains("malformed persisted record"));
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: IdentityError = io.into();
    assert!(format!("{err}").contains("IO error"));
}

#[test]
fn error_from_record_codec() {
    let codec_err = flexiride_types::Session::from_json("not json").unwrap_err();
    let err: IdentityError = codec_err.into();
    assert!(format!("{err}").contains("record encoding"));
}

#[test]
fn error_is_debug() {
    let _ = format!("{:?}", IdentityError::LockPoisoned);
}
