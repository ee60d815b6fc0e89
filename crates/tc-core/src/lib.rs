//! `tc-core` — foundational types for the transport catalogue.
//!
//! This crate is a dependency of every other `tc-*` crate.  It has no `tc-*`
//! dependencies and no required external ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module  | Contents                                   |
//! |---------|--------------------------------------------|
//! | [`ids`] | `StopId`, `BusId`, `EdgeId`                |
//! | [`geo`] | `GeoPoint`, great-circle distance          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `tc-serialize`.                                |

pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{BusId, EdgeId, StopId};
