use super::*;

#[test]
fn catalog_errors_map_to_categories() {
    let err = UiError::from_catalog_error(
        UiErrorContext::FetchCatalog,
        &CatalogError::Status { status: 502 },
    );
    assert_eq!(err.category(), UiErrorCategory::Transport);
    assert_eq!(err.context(), UiErrorContext::FetchCatalog);
    assert_eq!(err.message(), "catalog endpoint returned status 502");

    let decode = serde_json::from_str::<Vec<u8>>("{").expect_err("bad json");
    let err = UiError::from_catalog_error(UiErrorContext::FetchCatalog, &decode.into());
    assert_eq!(err.category(), UiErrorCategory::Validation);
}

#[test]
fn classifies_backend_disconnect_as_transport_error() {
    let err = UiError::from_message(
        UiErrorContext::BackendStartup,
        "Backend command processor disconnected",
    );
    assert_eq!(err.category(), UiErrorCategory::Transport);
}

#[test]
fn classifies_image_decode_failure_as_validation() {
    let err = UiError::from_message(UiErrorContext::FetchImage, "failed to decode image bytes");
    assert_eq!(err.category(), UiErrorCategory::Validation);

    let err = UiError::from_message(UiErrorContext::FetchImage, "something odd");
    assert_eq!(err.category(), UiErrorCategory::Unknown);
}
