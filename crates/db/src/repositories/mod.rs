//! Repository layer.
//!
//! [`TemplateRepo`] is a zero-sized struct providing async queries that
//! accept `&PgPool` as the first argument. [`PgTemplateRepo`] adapts it to
//! the domain's `TemplateRepository` trait.

pub mod template_repo;

pub use template_repo::{PgTemplateRepo, TemplateRepo};
