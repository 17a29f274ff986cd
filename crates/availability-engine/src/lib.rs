//! # availability-engine
//!
//! Deterministic room availability timelines for a shared facility.
//!
//! Given booked intervals tagged by room, a daily operating window, and a date
//! range, the engine produces for every room and every day a gap-free sequence
//! of available and booked intervals covering the operating window. It performs
//! no I/O and never reads the clock: "today" and "now" are always parameters.
//!
//! ## Modules
//!
//! - [`interval`] — `BookedInterval` input and `LabeledInterval` output
//! - [`window`] — Operating window and whole-day date ranges
//! - [`config`] — `EngineConfig` (window, fallback rooms, range defaults)
//! - [`rooms`] — Room enumeration and ordering
//! - [`timeline`] — Per-room, per-day gap-filling merge
//! - [`availability`] — Date-range driver, report, and room filter
//! - [`summary`] — Per-room status and first-fit lookups over a report
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod error;
pub mod interval;
pub mod rooms;
pub mod summary;
pub mod timeline;
pub mod window;

pub use availability::{compute_availability, compute_for_request, AvailabilityReport, RoomFilter};
pub use config::EngineConfig;
pub use error::EngineError;
pub use interval::{BookedInterval, LabeledInterval};
pub use rooms::enumerate_rooms;
pub use summary::{first_available, summarize_room, RoomSummary};
pub use timeline::fill_day;
pub use window::{DateRange, OperatingWindow};
