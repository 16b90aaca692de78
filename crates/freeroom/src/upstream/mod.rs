//! Upstream collaborators: the data-provider seam and its HTTP
//! implementation.

mod client;
mod dto;
mod error;

pub use client::{HttpClassroomProvider, UpstreamConfig};
pub use error::UpstreamError;

use crate::vacancy::{Building, Classroom, SectionWindow, SemesterInfo};
use async_trait::async_trait;

/// Source of the raw schedule/room data.
///
/// Implementations hand back already-parsed domain objects; the engine
/// never sees wire formats. The derived fields of returned classrooms are
/// uninitialized until the evaluator runs over them.
#[async_trait]
pub trait ClassroomDataProvider: Send + Sync {
    async fn fetch_semester_info(&self) -> Result<SemesterInfo, UpstreamError>;
    async fn fetch_bell_schedule(&self) -> Result<Vec<SectionWindow>, UpstreamError>;
    async fn fetch_buildings(&self) -> Result<Vec<Building>, UpstreamError>;
    async fn fetch_rooms_for_building(
        &self,
        building_id: &str,
    ) -> Result<Vec<Classroom>, UpstreamError>;
}
