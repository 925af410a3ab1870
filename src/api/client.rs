//! Reqwest-backed implementation of `StudentApi`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::models::{
    AgeOption, FilterSelection, GenderOption, LevelOption, ResultRecord, StateOption, Student,
};
use crate::api::{ApiError, StudentApi};
use crate::config::Config;

/// Service responses wrap their payload in a `data` field.
#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// The roster endpoints nest the list one level deeper: `{"data": {"students": [...]}}`.
#[derive(Deserialize)]
struct StudentsPayload {
    students: Vec<Student>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent("fremont-results/0.1")
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.endpoint(path)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn fetch_options<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let envelope: DataEnvelope<Vec<T>> = self.get_json(path).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl StudentApi for ApiClient {
    async fn fetch_all_students(&self) -> Result<Vec<Student>, ApiError> {
        let envelope: DataEnvelope<StudentsPayload> = self.get_json("/api/viewAllData").await?;
        Ok(envelope.data.students)
    }

    async fn fetch_ages(&self) -> Result<Vec<AgeOption>, ApiError> {
        self.fetch_options("/api/viewAllAges").await
    }

    async fn fetch_states(&self) -> Result<Vec<StateOption>, ApiError> {
        self.fetch_options("/api/viewAllStates").await
    }

    async fn fetch_levels(&self) -> Result<Vec<LevelOption>, ApiError> {
        self.fetch_options("/api/viewAllLevels").await
    }

    async fn fetch_genders(&self) -> Result<Vec<GenderOption>, ApiError> {
        self.fetch_options("/api/viewAllGender").await
    }

    async fn filter_students(
        &self,
        selection: &FilterSelection,
    ) -> Result<Vec<Student>, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/filterData"))
            .json(&selection.as_request())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let envelope: DataEnvelope<StudentsPayload> = response.json().await?;
        Ok(envelope.data.students)
    }

    async fn fetch_result(&self, student_id: i64) -> Result<ResultRecord, ApiError> {
        let response = self
            .http
            .post(self.endpoint(&format!("/api/viewResult/{student_id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<(Vec<u8>, Option<String>), ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response.bytes().await?.to_vec();
        Ok((bytes, content_type))
    }
}
