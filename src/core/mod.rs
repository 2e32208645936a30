//! # Core Fetch & State Layer
//!
//! Everything between the transport and whoever renders the results.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!      ┌──────────────────┐
//!      │ FeedController   │  owns QueryParameters, triggers fetches
//!      └────────┬─────────┘
//!               │ spawn (one task per trigger)
//!               ▼
//!      ┌──────────────────┐        ┌──────────────────┐
//!      │ fetch_* functions│ ─────► │ dyn Transport    │  (api module)
//!      └────────┬─────────┘        └──────────────────┘
//!               │ Envelope<T>
//!               ▼
//!      ┌──────────────────┐
//!      │ StatePublisher   │  current value + ordered notifications
//!      └────────┬─────────┘
//!               ▼
//!          observers (CLI, UI adapters, tests)
//! ```
//!
//! ## Modules
//!
//! - [`envelope`]: `Loading` / `Success` / `Error`
//! - [`fetch`]: one async fetch per resource
//! - [`publisher`]: observable state with replay-latest
//! - [`controller`]: parameters, triggers, stale-result suppression
//! - [`query`]: news filters and their wire form
//! - [`config`]: settings resolution

pub mod config;
pub mod controller;
pub mod envelope;
pub mod fetch;
pub mod publisher;
pub mod query;

pub use controller::{CANCELLED_MESSAGE, FeedController};
pub use envelope::{Envelope, FALLBACK_ERROR_MESSAGE};
pub use publisher::{StatePublisher, Subscription};
pub use query::QueryParameters;
