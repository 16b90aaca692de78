//! The vacancy engine: section resolution, occupancy evaluation, the
//! filter/sort query pipeline and preset management.
//!
//! Everything in here is pure and synchronous; fetching and persistence
//! live in the `upstream` and `db` modules.

mod error;
mod types;

pub mod evaluator;
pub mod preset;
pub mod query;
pub mod section;

pub use error::PresetError;
pub use types::{
    Building, Classroom, ClockTime, CourseBooking, SectionWindow, SemesterInfo, UserConfig,
    UserPreset, NO_SECTION,
};
