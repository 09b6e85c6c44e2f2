//! Structured resume sections: experience, education, certifications, projects, languages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest degree categories accepted for an education entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Degree {
    #[serde(rename = "High School")]
    HighSchool,
    Bachelor,
    Master,
    PhD,
    Diploma,
    Certificate,
    Other,
}

impl Degree {
    pub fn as_str(&self) -> &'static str {
        match self {
            Degree::HighSchool => "High School",
            Degree::Bachelor => "Bachelor",
            Degree::Master => "Master",
            Degree::PhD => "PhD",
            Degree::Diploma => "Diploma",
            Degree::Certificate => "Certificate",
            Degree::Other => "Other",
        }
    }
}

/// Spoken-language proficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Fluent,
    Native,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Fluent => "Fluent",
            Proficiency::Native => "Native",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company_name: String,
    pub job_title: String,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(default, with = "calendar_date::optional")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub currently_working: bool,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub school_name: String,
    pub degree: Degree,
    pub field_of_study: String,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub activities: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub certification_name: String,
    pub issuing_organization: String,
    #[serde(with = "calendar_date")]
    pub issue_date: NaiveDate,
    #[serde(default, with = "calendar_date::optional")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub project_name: String,
    pub description: String,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(default, with = "calendar_date::optional")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    pub language: String,
    #[serde(default)]
    pub proficiency: Proficiency,
}

/// Calendar dates as sent by the builder form.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM` (first of the month) and RFC 3339
/// timestamps (date part kept). Always serializes as `YYYY-MM-DD`.
pub mod calendar_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT)
            .ok()
            .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), FORMAT).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date '{raw}'")))
    }

    /// Optional variant: `null`, absent and `""` all mean "no date".
    pub mod optional {
        use chrono::NaiveDate;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid date '{raw}'"))),
            }
        }
    }
}
