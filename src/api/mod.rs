//! Auth backend clients.
//!
//! ARCHITECTURE
//! ============
//! The session manager depends only on the [`AuthApi`] trait. `client` is the
//! real HTTP backend, `demo` the in-process fixture backend; both are picked
//! at startup and injected, so nothing above this layer knows which one it is
//! talking to.

pub mod client;
pub mod demo;
pub mod types;

pub use client::HttpAuthApi;
pub use demo::DemoAuth;
pub use types::{ApiError, AuthApi, AuthPayload, BusinessProfile, RegisterForm, Role, User};
