//! Resume document model and the request bodies of the resume API.

use serde::{Deserialize, Deserializer, Serialize};

use super::{CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProjectEntry};

/// Contact block at the top of every resume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linked_in: Option<String>,
    pub portfolio: Option<String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The user-editable part of a resume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    pub resume_title: String,
    pub personal_info: PersonalInfo,
    pub professional_summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub languages: Vec<LanguageEntry>,
    pub job_description: Option<String>,
}

/// A stored resume document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub content: ResumeContent,
    pub ats_score: Option<f64>,
    pub formatting_score: Option<f64>,
    pub keyword_score: Option<f64>,
    pub structure_score: Option<f64>,
    pub ats_suggestions: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub last_analyzed: Option<String>,
    pub is_active: bool,
    pub is_default: bool,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// List-view projection of a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: String,
    pub resume_title: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub ats_score: Option<f64>,
    pub version: i64,
    pub is_default: bool,
    pub last_analyzed: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Resume {
    pub fn summary(&self) -> ResumeSummary {
        let info = &self.content.personal_info;
        ResumeSummary {
            id: self.id.clone(),
            resume_title: self.content.resume_title.clone(),
            full_name: info.full_name(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            location: info.location.clone(),
            ats_score: self.ats_score,
            version: self.version,
            is_default: self.is_default,
            last_analyzed: self.last_analyzed.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }

    /// Flatten the resume into the plain-text layout ATS parsers read best.
    pub fn plain_text(&self) -> String {
        let c = &self.content;
        let info = &c.personal_info;
        let mut text = format!(
            "{}\n{} | {} | {}\n\n",
            info.full_name(),
            info.email,
            info.phone,
            info.location
        );

        if !c.professional_summary.is_empty() {
            text.push_str(&format!(
                "PROFESSIONAL SUMMARY\n{}\n\n",
                c.professional_summary
            ));
        }

        if !c.experience.is_empty() {
            text.push_str("EXPERIENCE\n");
            for exp in &c.experience {
                text.push_str(&format!(
                    "{} at {}\n{}\n",
                    exp.job_title, exp.company_name, exp.description
                ));
            }
            text.push('\n');
        }

        if !c.education.is_empty() {
            text.push_str("EDUCATION\n");
            for edu in &c.education {
                text.push_str(&format!(
                    "{} in {} from {}\n",
                    edu.degree.as_str(),
                    edu.field_of_study,
                    edu.school_name
                ));
            }
            text.push('\n');
        }

        if !c.skills.is_empty() {
            text.push_str(&format!("SKILLS\n{}\n\n", c.skills.join(", ")));
        }

        if !c.certifications.is_empty() {
            text.push_str("CERTIFICATIONS\n");
            for cert in &c.certifications {
                text.push_str(&format!(
                    "{} from {}\n",
                    cert.certification_name, cert.issuing_organization
                ));
            }
            text.push('\n');
        }

        if !c.projects.is_empty() {
            text.push_str("PROJECTS\n");
            for proj in &c.projects {
                text.push_str(&format!("{}: {}\n", proj.project_name, proj.description));
            }
            text.push('\n');
        }

        if !c.languages.is_empty() {
            text.push_str("LANGUAGES\n");
            for lang in &c.languages {
                text.push_str(&format!(
                    "{} ({})\n",
                    lang.language,
                    lang.proficiency.as_str()
                ));
            }
        }

        text
    }
}

/// Personal info as submitted; presence of required fields is checked during validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linked_in: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
}

/// Request body for creating a new resume.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub resume_title: Option<String>,
    #[serde(default)]
    pub personal_info: Option<PersonalInfoInput>,
    #[serde(default)]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub experience: Option<Vec<ExperienceEntry>>,
    #[serde(default)]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub certifications: Option<Vec<CertificationEntry>>,
    #[serde(default)]
    pub projects: Option<Vec<ProjectEntry>>,
    #[serde(default)]
    pub languages: Option<Vec<LanguageEntry>>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Partial personal-info update.
///
/// Outer `None` leaves a field untouched; `Some(None)` is an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoPatch {
    #[serde(default, deserialize_with = "explicit")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub linked_in: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub portfolio: Option<Option<String>>,
}

/// Request body for updating an existing resume.
///
/// Same tri-state convention as [`PersonalInfoPatch`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    #[serde(default, deserialize_with = "explicit")]
    pub resume_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub personal_info: Option<Option<PersonalInfoPatch>>,
    #[serde(default, deserialize_with = "explicit")]
    pub professional_summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub experience: Option<Option<Vec<ExperienceEntry>>>,
    #[serde(default, deserialize_with = "explicit")]
    pub education: Option<Option<Vec<EducationEntry>>>,
    #[serde(default, deserialize_with = "explicit")]
    pub skills: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "explicit")]
    pub certifications: Option<Option<Vec<CertificationEntry>>>,
    #[serde(default, deserialize_with = "explicit")]
    pub projects: Option<Option<Vec<ProjectEntry>>>,
    #[serde(default, deserialize_with = "explicit")]
    pub languages: Option<Option<Vec<LanguageEntry>>>,
    #[serde(default, deserialize_with = "explicit")]
    pub job_description: Option<Option<String>>,
}

/// Request body for `POST /resume/:id/analyze`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Present fields become `Some(..)`, so `null` is kept apart from absence.
fn explicit<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
