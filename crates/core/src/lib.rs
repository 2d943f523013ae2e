//! Domain core for prompt templates: validated identifiers, the `Template`
//! aggregate, standalone validation, the repository contract and the
//! application service.

pub mod error;
pub mod memory;
pub mod repository;
pub mod service;
pub mod template;
pub mod types;
pub mod validation;
