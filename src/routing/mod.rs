//! Canonical routing: slug normalization and the curated URL registry.
//!
//! ARCHITECTURE
//! ============
//! Pure, synchronous, and side-effect free. Pages and CLI commands resolve
//! business names through here so the same business always yields the same
//! link regardless of where it is rendered from.

pub mod registry;
pub mod slug;

pub use registry::{BusinessSlugEntry, Category, RegistryError, SlugRegistry, UnknownCategory};
pub use slug::slugify;
