use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FiltraError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FiltraError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
