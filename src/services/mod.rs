//! Domain services consumed by the CLI commands.
//!
//! ARCHITECTURE
//! ============
//! Service modules own session state, validation, guard logic, and the
//! provider catalog so commands stay focused on argument handling and
//! presentation.

pub mod directory;
pub mod guard;
pub mod session;
pub mod validate;

pub use guard::Navigator;
pub use session::{AuthError, Session, SessionManager, UserUpdate};
