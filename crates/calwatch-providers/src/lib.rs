//! Event sources for the watch face.
//!
//! - [`EventSource`] - the query interface every calendar backend implements
//! - [`EventRow`] - one provider row, converted with [`EventRow::into_event`]
//! - [`fetch_events`] - query, convert, normalize and sort for one frame
//! - [`ProviderError`] - error type for source failures
//!
//! ```text
//! ┌──────────────┐ ┌────────────────┐ ┌────────────┐
//! │ StaticSource │ │ JsonFileSource │ │ DemoSource │
//! └──────┬───────┘ └───────┬────────┘ └─────┬──────┘
//!        │   EventSource   │                │
//!        └────────┬────────┴────────────────┘
//!                 ▼ query_instances([now, now + 12h))
//!           ┌───────────┐
//!           │ EventRow  │
//!           └─────┬─────┘
//!                 ▼ into_event() + normalize_events()
//!        ┌─────────────────────┐
//!        │ Vec<CalendarEvent>  │ painting order
//!        └─────────────────────┘
//! ```

pub mod demo;
pub mod error;
pub mod fetch;
pub mod row;
pub mod source;

pub use demo::{DEMO_BATTERY_LEVEL, DEMO_TIMEZONE, DemoSource, demo_now};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use fetch::fetch_events;
pub use row::EventRow;
pub use source::{ErrorSource, EventSource, JsonFileSource, StaticSource};
