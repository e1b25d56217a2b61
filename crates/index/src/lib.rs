//! Ordered multi-index iteration for Mira
//!
//! Records of one type are stored across several column spaces of a
//! [`ColumnStore`](mira_storage::ColumnStore): the primary column space maps
//! the primary key to the serialized record, and every secondary column
//! space maps its own key to the primary key. This crate provides ordered,
//! bidirectional cursors over any of those indices that dereference to a
//! single shared instance per record identity.
//!
//! - [`MultiIndex`]: binds a store, a layout, a codec and an identity cache
//! - [`IndexView`]: positioning (`begin`, `find`, bounds, `range`) on one index
//! - [`Cursor`]: a position; steps, compares, copies and dereferences
//! - [`Resolution`]: direct or indirect record lookup per column space
//! - [`IndexConfig`]: layout and settings, loadable from `mira.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod container;
pub mod cursor;
pub mod iter;
pub mod layout;
pub mod resolver;
pub mod testing;
pub mod view;

#[cfg(test)]
mod fixtures;

pub use config::{IndexConfig, CONFIG_FILE_NAME};
pub use container::MultiIndex;
pub use cursor::Cursor;
pub use iter::Iter;
pub use layout::Layout;
pub use resolver::Resolution;
pub use testing::Fixture;
pub use view::IndexView;
