use tweetpress::platform::{PlatformError, PlatformErrorKind};
use tweetpress::{AppError, LayoutError};

#[test]
fn display_prefixes_failure_domain() {
    assert_eq!(AppError::Config("bad".into()).to_string(), "config: bad");
    assert_eq!(AppError::Db("lost".into()).to_string(), "db: lost");
    assert_eq!(
        AppError::Platform("timeout".into()).to_string(),
        "platform: timeout"
    );
    assert_eq!(AppError::Render("oops".into()).to_string(), "render: oops");
    assert_eq!(AppError::Io("denied".into()).to_string(), "io: denied");
}

#[test]
fn layout_error_message_names_the_constraints() {
    let err = LayoutError::for_word("x".repeat(120));
    let message = err.to_string();
    assert!(message.contains("100 characters"));
    assert!(message.contains("English"));
}

#[test]
fn layout_display_passes_through_app_error() {
    // The user-facing message must survive the AppError wrapper verbatim.
    let err = LayoutError::for_word("supercalifragilistic");
    let wrapped: AppError = err.clone().into();
    assert_eq!(wrapped.to_string(), err.to_string());
}

#[test]
fn platform_error_converts_with_reason_code() {
    let err = PlatformError::new(PlatformErrorKind::SlotMissing, "set was never created");
    let app: AppError = err.into();
    match app {
        AppError::Platform(msg) => assert!(msg.contains("slot missing")),
        other => panic!("expected platform error, got {other:?}"),
    }
}

#[test]
fn not_found_code_is_distinguishable() {
    let gone = PlatformError::new(PlatformErrorKind::NotFound, "already deleted");
    assert_eq!(gone.kind, PlatformErrorKind::NotFound);
    assert!(gone.to_string().contains("not found"));

    let other = PlatformError::other("network unreachable");
    assert_eq!(other.kind, PlatformErrorKind::Other);
}
