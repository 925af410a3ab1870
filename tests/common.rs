//! Shared test fixtures: an in-memory `StudentApi` with call recording.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;

use fremont_results::api::models::{
    AgeOption, CourseResult, CumulativeSummary, FilterSelection, GenderOption, LevelOption,
    ResultData, ResultRecord, StateOption, Student,
};
use fremont_results::api::{ApiError, StudentApi};

pub fn server_error() -> ApiError {
    ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn student(id: i64, surname: &str, firstname: &str) -> Student {
    Student {
        id,
        surname: surname.to_string(),
        firstname: firstname.to_string(),
        age: 20,
        gender: "F".to_string(),
        level: "100".to_string(),
        state: "Lagos".to_string(),
    }
}

pub fn sample_result_record() -> ResultRecord {
    ResultRecord {
        logo: Some("https://img.example.com/logo.png".to_string()),
        profile_picture: Some("https://img.example.com/profile.jpg".to_string()),
        data: ResultData {
            surname: "Doe".to_string(),
            firstname: "Jane".to_string(),
            level: "100".to_string(),
            reg_no: "FCE/2020/001".to_string(),
            session: "2019/2020".to_string(),
            result: vec![CourseResult {
                coursecode: "EDU101".to_string(),
                title: "Intro".to_string(),
                credit_unit: 3,
                grade: "A".to_string(),
                total_point: 12.0,
            }],
            cummulative: CumulativeSummary {
                unts: 18.0,
                untd: 18.0,
                gpts: 55.0,
                gptd: 55.0,
                gpats: 3.05,
                gpatd: 3.05,
                remarks: "Pass".to_string(),
            },
        },
    }
}

/// Mock implementation of `StudentApi` for testing. Records every call so
/// tests can assert which network operations were (not) issued.
#[derive(Default)]
pub struct MockStudentApi {
    pub calls: Mutex<Vec<String>>,
    pub roster: Vec<Student>,
    pub filtered: Vec<Student>,
    pub result: Option<ResultRecord>,
    pub ages: Vec<AgeOption>,
    pub states: Vec<StateOption>,
    pub levels: Vec<LevelOption>,
    pub genders: Vec<GenderOption>,
    pub fail_roster: bool,
    pub fail_filter: bool,
    pub fail_result: bool,
    pub fail_ages: bool,
    /// URLs containing any of these substrings fail to fetch.
    pub fail_images: Vec<String>,
}

impl MockStudentApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }
}

#[async_trait]
impl StudentApi for MockStudentApi {
    async fn fetch_all_students(&self) -> Result<Vec<Student>, ApiError> {
        self.record("viewAllData");
        if self.fail_roster {
            return Err(server_error());
        }
        Ok(self.roster.clone())
    }

    async fn fetch_ages(&self) -> Result<Vec<AgeOption>, ApiError> {
        self.record("viewAllAges");
        if self.fail_ages {
            return Err(server_error());
        }
        Ok(self.ages.clone())
    }

    async fn fetch_states(&self) -> Result<Vec<StateOption>, ApiError> {
        self.record("viewAllStates");
        Ok(self.states.clone())
    }

    async fn fetch_levels(&self) -> Result<Vec<LevelOption>, ApiError> {
        self.record("viewAllLevels");
        Ok(self.levels.clone())
    }

    async fn fetch_genders(&self) -> Result<Vec<GenderOption>, ApiError> {
        self.record("viewAllGender");
        Ok(self.genders.clone())
    }

    async fn filter_students(
        &self,
        _selection: &FilterSelection,
    ) -> Result<Vec<Student>, ApiError> {
        self.record("filterData");
        if self.fail_filter {
            return Err(server_error());
        }
        Ok(self.filtered.clone())
    }

    async fn fetch_result(&self, student_id: i64) -> Result<ResultRecord, ApiError> {
        self.record(format!("viewResult/{student_id}"));
        if self.fail_result {
            return Err(server_error());
        }
        self.result
            .clone()
            .ok_or(ApiError::Status(reqwest::StatusCode::NOT_FOUND))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<(Vec<u8>, Option<String>), ApiError> {
        self.record(format!("GET {url}"));
        if self.fail_images.iter().any(|part| url.contains(part)) {
            return Err(server_error());
        }
        let mime = if url.ends_with(".jpg") {
            "image/jpeg"
        } else {
            "image/png"
        };
        Ok((b"imagebytes".to_vec(), Some(mime.to_string())))
    }
}
