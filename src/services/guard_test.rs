use super::*;
use std::sync::{Arc, Mutex};

use crate::api::demo::DemoAuth;
use crate::storage::MemoryStore;

#[derive(Default)]
struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn recorded(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

fn demo_manager() -> SessionManager {
    SessionManager::new(Arc::new(DemoAuth::new()), Arc::new(MemoryStore::new()))
}

// =============================================================================
// REDIRECT PATH
// =============================================================================

#[test]
fn redirect_path_percent_encodes_the_origin() {
    assert_eq!(login_redirect_path("/profile"), "/auth/login?redirect=%2Fprofile");
    assert_eq!(
        login_redirect_path("/business/dashboard?tab=2"),
        "/auth/login?redirect=%2Fbusiness%2Fdashboard%3Ftab%3D2"
    );
    assert_eq!(login_redirect_path("/"), "/auth/login?redirect=%2F");
}

#[test]
fn redirect_path_keeps_unreserved_characters_literal() {
    assert_eq!(
        login_redirect_path("/providers/amahoro-plumbing"),
        "/auth/login?redirect=%2Fproviders%2Famahoro-plumbing"
    );
}

// =============================================================================
// REQUIRE AUTH
// =============================================================================

#[tokio::test]
async fn anonymous_actor_is_redirected_with_return_path() {
    let manager = demo_manager();
    let navigator = RecordingNavigator::default();

    assert!(!require_auth(&manager, &navigator, "/profile"));
    assert_eq!(navigator.recorded(), vec!["/auth/login?redirect=%2Fprofile".to_string()]);
}

#[tokio::test]
async fn authenticated_actor_passes_without_side_effects() {
    let manager = demo_manager();
    manager.login("customer@servicerw.rw", "customer123", false).await.unwrap();
    let navigator = RecordingNavigator::default();

    assert!(require_auth(&manager, &navigator, "/profile"));
    assert!(navigator.recorded().is_empty());
}

// =============================================================================
// REQUIRE ROLE
// =============================================================================

#[tokio::test]
async fn role_gate_redirects_anonymous_to_login() {
    let manager = demo_manager();
    let navigator = RecordingNavigator::default();

    assert!(!require_role(&manager, Role::Admin, &navigator, "/admin/dashboard", "/"));
    assert_eq!(
        navigator.recorded(),
        vec!["/auth/login?redirect=%2Fadmin%2Fdashboard".to_string()]
    );
}

#[tokio::test]
async fn role_gate_sends_wrong_role_to_fallback() {
    let manager = demo_manager();
    manager.login("customer@servicerw.rw", "customer123", false).await.unwrap();
    let navigator = RecordingNavigator::default();

    assert!(!require_role(&manager, Role::Admin, &navigator, "/admin/dashboard", "/profile"));
    assert_eq!(navigator.recorded(), vec!["/profile".to_string()]);
}

#[tokio::test]
async fn role_gate_passes_matching_role_silently() {
    let manager = demo_manager();
    manager.login("admin@servicerw.rw", "admin123", false).await.unwrap();
    let navigator = RecordingNavigator::default();

    assert!(require_role(&manager, Role::Admin, &navigator, "/admin/dashboard", "/"));
    assert!(navigator.recorded().is_empty());
}

// =============================================================================
// DEFAULT LANDING
// =============================================================================

#[test]
fn landing_table_is_fixed() {
    assert_eq!(default_landing(Some(Role::Admin)), "/admin/dashboard");
    assert_eq!(default_landing(Some(Role::Business)), "/business/dashboard");
    assert_eq!(default_landing(Some(Role::Provider)), "/business/dashboard");
    assert_eq!(default_landing(Some(Role::Customer)), "/profile");
    assert_eq!(default_landing(None), "/");
}
