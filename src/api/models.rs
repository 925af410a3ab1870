//! Wire models for the student records service.

use serde::{Deserialize, Serialize};

/// One row of the student roster.
///
/// Students are immutable once fetched; the roster is replaced wholesale on
/// every refetch.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub surname: String,
    pub firstname: String,
    pub age: i64,
    pub gender: String,
    pub level: String,
    pub state: String,
}

/// The four independent filter fields. `None` means unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub age: Option<String>,
    pub state: Option<String>,
    pub level: Option<String>,
    pub gender: Option<String>,
}

impl FilterSelection {
    /// True when every field is unset. In that state no filter fetch is issued.
    pub fn is_unset(&self) -> bool {
        self.age.is_none() && self.state.is_none() && self.level.is_none() && self.gender.is_none()
    }

    /// Wire body for the filter endpoint. All four fields are always
    /// submitted; unset fields go out as empty strings.
    pub fn as_request(&self) -> FilterRequest {
        FilterRequest {
            age: self.age.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            level: self.level.clone().unwrap_or_default(),
            gender: self.gender.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FilterRequest {
    pub age: String,
    pub state: String,
    pub level: String,
    pub gender: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AgeOption {
    pub id: i64,
    pub age: i64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StateOption {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LevelOption {
    pub id: i64,
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GenderOption {
    pub id: i64,
    pub gender: String,
}

/// Reference lists for the filter choices, fetched once at startup and
/// read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct FilterVocabulary {
    pub ages: Vec<AgeOption>,
    pub states: Vec<StateOption>,
    pub levels: Vec<LevelOption>,
    pub genders: Vec<GenderOption>,
}

/// Full result payload for one student, as served by the API.
///
/// `logo` and `profile_picture` are external URLs that the assembler resolves
/// into self-contained encodings before rendering.
#[derive(Debug, Deserialize, Clone)]
pub struct ResultRecord {
    // the service may omit either URL or send an explicit null
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub data: ResultData,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResultData {
    pub surname: String,
    pub firstname: String,
    pub level: String,
    pub reg_no: String,
    pub session: String,
    pub result: Vec<CourseResult>,
    // "cummulative" is the field name the service actually emits
    pub cummulative: CumulativeSummary,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CourseResult {
    pub coursecode: String,
    pub title: String,
    pub credit_unit: u32,
    pub grade: String,
    pub total_point: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CumulativeSummary {
    pub unts: f64,
    pub untd: f64,
    pub gpts: f64,
    pub gptd: f64,
    pub gpats: f64,
    pub gpatd: f64,
    pub remarks: String,
}
