//! `tc-catalogue` — the catalogue store.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`domain`]    | `Stop`, `Bus`                                             |
//! | [`catalogue`] | `TransportCatalogue`, `DuplicatePolicy`                   |
//! | [`error`]     | `CatalogueError`, `CatalogueResult<T>`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod catalogue;
pub mod domain;
pub mod error;


pub use catalogue::{DuplicatePolicy, TransportCatalogue};
pub use domain::{Bus, Stop};
pub use error::{CatalogueError, CatalogueResult};
