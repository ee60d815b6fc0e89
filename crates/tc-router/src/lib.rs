//! `tc-router` — transit routing over a catalogue snapshot.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`graph`]     | `TransitGraph` (CSR), `TransitGraphBuilder`, edge metadata |
//! | [`trips`]     | `build_graph`: one edge per boarding/alighting pair        |
//! | [`search`]    | `ShortestPath` trait, `Path`, `Dijkstra`                   |
//! | [`router`]    | `TransportRouter`, `RoutingSettings`, `RouteInfo`          |
//! | [`error`]     | `RouterError`, `RouterResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on graph and settings.     |

pub mod error;
pub mod graph;
pub mod router;
pub mod search;
pub mod trips;


pub use error::{RouterError, RouterResult};
pub use graph::{EdgeInfo, Span, TransitGraph, TransitGraphBuilder, Wait};
pub use router::{RouteInfo, RouteItem, RoutingSettings, TransportRouter};
pub use search::{Dijkstra, Path, ShortestPath};
pub use trips::build_graph;
