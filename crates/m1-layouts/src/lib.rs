//! Layout catalog and registry for M1 Pro list exports.
//!
//! The legacy product's export formats are not self-describing, so this
//! crate encodes the institutional knowledge about them: one [`Layout`]
//! per observed list type, served through a read-only [`LayoutRegistry`].

pub mod catalog;
pub mod error;
pub mod registry;

pub use catalog::{BILLING_ERRORS, SEARCH_RESULTS, TEXT_GROUPS, builtin_layouts};
pub use error::LayoutError;
pub use registry::LayoutRegistry;

pub use m1_model::Layout;
