//! `tc-render` — SVG map of the catalogue.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`svg`]       | `Document`, `Circle`, `Polyline`, `Text`, `Color`, `Point` |
//! | [`projector`] | `SphereProjector`: lat/lon → canvas coordinates           |
//! | [`renderer`]  | `MapRenderer`, `RenderSettings`                           |
//! | [`error`]     | `RenderError`, `RenderResult<T>`                          |
//!
//! Rendering is deterministic: identical catalogue and settings produce
//! byte-identical output.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on settings and colours.   |

pub mod error;
pub mod projector;
pub mod renderer;
pub mod svg;

#[cfg(test)]
mod tests;

pub use error::{RenderError, RenderResult};
pub use projector::SphereProjector;
pub use renderer::{MapRenderer, RenderSettings};
pub use svg::{Color, Document, Num, Point, Rgb, Rgba};
