#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod interaction;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod person;
pub mod saved_layout;
pub mod theme;

pub use config::{Config, LayoutConfig, load_config};
pub use error::{Error, Result};
pub use ir::{Gender, Person, Relationship, RelationshipKind, TreeDocument, attach_relationships};
pub use layout::{
    DrawableEdge, LayoutVariant, PersonNode, Position, TreeLayout, derive, derive_layout,
    derive_layout_with, derive_read_only_layout, derive_read_only_layout_with,
};
pub use saved_layout::SavedLayout;
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;
