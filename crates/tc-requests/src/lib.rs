//! `tc-requests` — query answering on top of the catalogue.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`handler`] | `RequestHandler` facade, `BusStat`                             |
//! | [`json`]    | Input document, base/stat requests, responses                  |
//! | [`modes`]   | `make_base`, `process_requests`                                |
//! | [`error`]   | `RequestError`, `RequestResult<T>`                             |
//!
//! Query-time misses (unknown names, no route) are `None` in the handler and
//! `"not found"` in JSON; only load-time problems are errors.

pub mod error;
pub mod handler;
pub mod json;
pub mod modes;

#[cfg(test)]
mod tests;

pub use error::{RequestError, RequestResult};
pub use handler::{BusStat, RequestHandler};
pub use json::{
    answer, answer_all, load_catalogue, write_responses, BaseRequest, InputDocument, JsonColor,
    JsonRenderSettings, JsonRouteItem, Response, SerializationSettings, StatRequest,
};
pub use modes::{make_base, process_requests};
