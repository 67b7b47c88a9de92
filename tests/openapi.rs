use anyhow::Result;

#[test]
fn openapi_documents_company_routes() -> Result<()> {
    let doc = tessera::api::openapi();
    let json = serde_json::to_value(&doc)?;

    for path in ["/register", "/login", "/logout", "/current-user", "/health"] {
        assert!(
            doc.paths.paths.contains_key(path),
            "missing OpenAPI path {path}"
        );
    }

    assert!(json["paths"]["/register"]["post"].is_object());
    assert!(json["paths"]["/login"]["post"].is_object());
    assert!(json["paths"]["/logout"]["post"].is_object());
    assert!(json["paths"]["/current-user"]["get"].is_object());
    assert!(json["paths"]["/health"]["get"].is_object());
    assert!(!json["paths"]["/current-user"]["get"]["security"].is_null());
    Ok(())
}

#[test]
fn health_documents_a_single_object() -> Result<()> {
    let json = serde_json::to_value(tessera::api::openapi())?;
    for status in ["200", "503"] {
        let schema =
            &json["paths"]["/health"]["get"]["responses"][status]["content"]["application/json"]["schema"];
        assert_eq!(schema["$ref"], "#/components/schemas/Health", "status {status}");
        assert!(schema["type"].is_null(), "status {status} documents an array");
    }
    assert!(json["components"]["securitySchemes"]["access_token"].is_object());
    assert!(
        json["tags"]
            .as_array()
            .is_some_and(|tags| tags.iter().any(|tag| tag["name"] == "tessera"))
    );
    Ok(())
}
