use super::*;

fn jwt(payload: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.sig", header, body)
}

#[test]
fn decodes_payload_fields() {
    let token = jwt(serde_json::json!({
        "sub": "u_1",
        "email": "ops@example.com",
        "role": "platform_admin",
        "exp": 4_000_000_000i64
    }));
    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.sub.as_deref(), Some("u_1"));
    assert_eq!(claims.label(), "ops@example.com");
    assert!(claims.is_platform_admin());
    assert!(!claims.is_expired(OffsetDateTime::now_utc()));
}

#[test]
fn opaque_tokens_have_no_claims() {
    assert_eq!(decode_claims("dev"), None);
    assert_eq!(decode_claims("a.b"), None);
    assert_eq!(decode_claims("a.b.c.d"), None);
    assert_eq!(decode_claims("x.!!!.y"), None);
    assert!(check_token("dev", OffsetDateTime::now_utc()).unwrap().is_none());
}

#[test]
fn expired_tokens_are_refused() {
    let token = jwt(serde_json::json!({"sub": "u_1", "exp": 1_000}));
    let claims = decode_claims(&token).unwrap();
    assert!(claims.is_expired(OffsetDateTime::now_utc()));
    let err = check_token(&token, OffsetDateTime::now_utc()).unwrap_err();
    assert!(err.to_string().contains("expired"));
}

#[test]
fn tenant_roles_are_not_platform_admins() {
    let token = jwt(serde_json::json!({"sub": "u_2", "role": "OWNER", "businessId": "biz_1"}));
    let claims = decode_claims(&token).unwrap();
    assert!(!claims.is_platform_admin());
    assert_eq!(claims.business_id.as_deref(), Some("biz_1"));
    assert!(claims.expires_at().is_none());
}
