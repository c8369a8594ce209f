//! Design-token themes and additive merging.
//!
//! A configuration can change the engine's default theme in two ways:
//!
//! ```yaml
//! theme:
//!   # Override: replaces the whole `screens` dimension
//!   screens:
//!     tablet: 640px
//!     desktop: 1280px
//!   # Extension: adds keys, keeps every other default token
//!   extend:
//!     maxWidth:
//!       8xl: 90rem
//! ```
//!
//! ## How Merging Works
//!
//! [`StyleConfig::merge_theme`](crate::StyleConfig::merge_theme) starts from the
//! defaults, applies overrides (whole dimension), then applies extensions one
//! key at a time. A colliding extension key replaces only that token. The
//! result does not depend on how many times the same extensions are applied.

mod defaults;
#[allow(clippy::module_inception)]
mod theme;

pub use defaults::default_theme;
pub use theme::{Theme, ThemeMap, TokenMap};
