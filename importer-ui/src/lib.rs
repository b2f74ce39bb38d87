//! importer-ui - View components for the import status widget
//!
//! Pure, props-based components. They render whatever [`StatusView`] they
//! are handed and never fetch or poll themselves.
//!
//! [`StatusView`]: importer_common::StatusView

pub mod components;

pub use components::*;
