//! Remote student records API.
//!
//! The `StudentApi` trait is the seam between the controllers and the
//! network; `ApiClient` is the reqwest-backed implementation and tests
//! substitute mocks.

pub mod client;
pub mod models;

pub use client::ApiClient;

use async_trait::async_trait;
use thiserror::Error;

use models::{
    AgeOption, FilterSelection, GenderOption, LevelOption, ResultRecord, StateOption, Student,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),
}

/// Operations exposed by the remote student records service.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// `GET /api/viewAllData` - the full roster.
    async fn fetch_all_students(&self) -> Result<Vec<Student>, ApiError>;

    /// `GET /api/viewAllAges`
    async fn fetch_ages(&self) -> Result<Vec<AgeOption>, ApiError>;

    /// `GET /api/viewAllStates`
    async fn fetch_states(&self) -> Result<Vec<StateOption>, ApiError>;

    /// `GET /api/viewAllLevels`
    async fn fetch_levels(&self) -> Result<Vec<LevelOption>, ApiError>;

    /// `GET /api/viewAllGender`
    async fn fetch_genders(&self) -> Result<Vec<GenderOption>, ApiError>;

    /// `POST /api/filterData` - server-side intersection filter.
    async fn filter_students(&self, selection: &FilterSelection)
        -> Result<Vec<Student>, ApiError>;

    /// `POST /api/viewResult/{studentId}` - one student's result payload.
    async fn fetch_result(&self, student_id: i64) -> Result<ResultRecord, ApiError>;

    /// Plain GET of an arbitrary resource (used for the embedded images).
    /// Returns the body bytes and the Content-Type header, if any.
    async fn fetch_bytes(&self, url: &str) -> Result<(Vec<u8>, Option<String>), ApiError>;
}
