use super::*;

fn business_form() -> RegisterForm {
    RegisterForm {
        name: "Jean Bosco".into(),
        email: "jean@kigalimail.rw".into(),
        phone: "+250788123456".into(),
        password: "secret99".into(),
        confirm_password: "secret99".into(),
        accept_terms: true,
        role: Role::Business,
        business_name: "Bosco Builders".into(),
        category: "construction".into(),
        description: "Masonry and roofing".into(),
        location: "Kicukiro".into(),
        address: "KK 302 St".into(),
    }
}

// =============================================================================
// LOGIN
// =============================================================================

#[tokio::test]
async fn fixture_login_returns_exact_role_and_permissions() {
    let api = DemoAuth::new();
    let payload = api.login("admin@servicerw.rw", "admin123").await.unwrap();

    assert_eq!(payload.user.role, Role::Admin);
    let expected: Vec<&str> = vec!["manage_businesses", "manage_users", "view_reports"];
    let actual: Vec<&str> = payload.user.permissions.iter().map(String::as_str).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn every_fixture_account_logs_in() {
    let api = DemoAuth::new();
    let fixtures = [
        ("admin@servicerw.rw", "admin123", Role::Admin),
        ("business@servicerw.rw", "business123", Role::Business),
        ("provider@servicerw.rw", "provider123", Role::Provider),
        ("customer@servicerw.rw", "customer123", Role::Customer),
    ];
    for (email, password, role) in fixtures {
        let payload = api.login(email, password).await.unwrap();
        assert_eq!(payload.user.role, role, "role mismatch for {email}");
        assert!(payload.user.verified);
        assert!(!payload.user.permissions.is_empty());
    }
}

#[tokio::test]
async fn login_email_is_case_insensitive_password_is_not() {
    let api = DemoAuth::new();
    assert!(api.login("ADMIN@servicerw.rw", "admin123").await.is_ok());
    assert!(api.login(" admin@servicerw.rw ", "admin123").await.is_ok());

    let err = api.login("admin@servicerw.rw", "ADMIN123").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials(_)));
}

#[tokio::test]
async fn unknown_account_is_rejected_with_generic_message() {
    let api = DemoAuth::new();
    let err = api.login("nobody@servicerw.rw", "whatever").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials(m) if m == BAD_CREDENTIALS));
}

#[tokio::test]
async fn business_fixture_carries_a_business_profile() {
    let api = DemoAuth::new();
    let payload = api.login("business@servicerw.rw", "business123").await.unwrap();
    let profile = payload.user.business.unwrap();
    assert_eq!(profile.business_name, "Kigali Construction Ltd.");

    let customer = api.login("customer@servicerw.rw", "customer123").await.unwrap();
    assert!(customer.user.business.is_none());
}

// =============================================================================
// REGISTER
// =============================================================================

#[tokio::test]
async fn register_then_login_with_new_credentials() {
    let api = DemoAuth::new();
    let registered = api.register(&business_form()).await.unwrap();
    assert_eq!(registered.user.role, Role::Business);
    assert!(!registered.user.verified);
    assert_eq!(
        registered.user.business.as_ref().map(|b| b.business_name.as_str()),
        Some("Bosco Builders")
    );

    let payload = api.login("jean@kigalimail.rw", "secret99").await.unwrap();
    assert_eq!(payload.user.id, registered.user.id);
}

#[tokio::test]
async fn register_assigns_role_default_permissions() {
    let api = DemoAuth::new();
    let payload = api.register(&business_form()).await.unwrap();
    assert!(payload.user.has_permission("manage_listings"));
    assert!(payload.user.has_permission("respond_reviews"));
    assert!(!payload.user.has_permission("manage_users"));
}

#[tokio::test]
async fn register_rejects_existing_email() {
    let api = DemoAuth::new();
    let mut form = business_form();
    form.email = "Customer@SERVICERW.rw".into();
    let err = api.register(&form).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials(m) if m.contains("already registered")));
}

#[tokio::test]
async fn register_customer_has_no_business_profile() {
    let api = DemoAuth::new();
    let mut form = business_form();
    form.email = "aline2@kigalimail.rw".into();
    form.role = Role::Customer;
    let payload = api.register(&form).await.unwrap();
    assert!(payload.user.business.is_none());
}

// =============================================================================
// LOGOUT
// =============================================================================

#[tokio::test]
async fn logout_always_succeeds() {
    let api = DemoAuth::new();
    assert!(api.logout().await.is_ok());
}
