use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BadgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BadgeError::render("x").to_string().contains("render error:"));
    assert!(
        BadgeError::config("x")
            .to_string()
            .contains("configuration error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BadgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_context_converts_with_question_mark() {
    fn load() -> BadgeResult<()> {
        use anyhow::Context as _;
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
        res.context("read config")?;
        Ok(())
    }

    let err = load().unwrap_err();
    assert!(matches!(err, BadgeError::Other(_)));
    assert_eq!(err.to_string(), "read config");
}
