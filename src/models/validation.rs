//! Input validation and normalization for resume documents.

use std::sync::LazyLock;

use regex::Regex;

use super::resume::{
    CreateResumeRequest, PersonalInfo, PersonalInfoInput, ResumeContent, UpdateResumeRequest,
};
use crate::errors::AppError;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_SUMMARY_LEN: usize = 500;
pub const MAX_JOB_DESCRIPTION_LEN: usize = 2000;
pub const MAX_ENTRY_DESCRIPTION_LEN: usize = 1000;
pub const MAX_ACTIVITIES_LEN: usize = 500;
pub const MAX_SKILLS: usize = 50;
pub const MAX_EXPERIENCE: usize = 20;
pub const MAX_EDUCATION: usize = 10;
pub const MAX_GPA: f64 = 4.0;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("static regex should not panic")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^(\+\d{1,3}[- ]?)?\d{10}$").expect("static regex should not panic")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Ten digits with an optional `+CC` country prefix.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Build validated resume content from a create request.
pub fn content_from_create(request: CreateResumeRequest) -> Result<ResumeContent, AppError> {
    let title = request.resume_title.filter(|t| !t.trim().is_empty());
    let (Some(resume_title), Some(info)) = (title, request.personal_info) else {
        return Err(AppError::Validation(
            "Missing required fields: resumeTitle and personalInfo".to_string(),
        ));
    };

    let mut content = ResumeContent {
        resume_title,
        personal_info: personal_info_from_input(info)?,
        professional_summary: request.professional_summary.unwrap_or_default(),
        experience: request.experience.unwrap_or_default(),
        education: request.education.unwrap_or_default(),
        skills: request.skills.unwrap_or_default(),
        certifications: request.certifications.unwrap_or_default(),
        projects: request.projects.unwrap_or_default(),
        languages: request.languages.unwrap_or_default(),
        job_description: request.job_description,
    };
    normalize_and_validate(&mut content)?;
    Ok(content)
}

fn personal_info_from_input(info: PersonalInfoInput) -> Result<PersonalInfo, AppError> {
    let required = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    match (
        required(info.first_name),
        required(info.last_name),
        required(info.email),
        required(info.phone),
        required(info.location),
    ) {
        (Some(first_name), Some(last_name), Some(email), Some(phone), Some(location)) => {
            Ok(PersonalInfo {
                first_name,
                last_name,
                email,
                phone,
                location,
                linked_in: info.linked_in,
                portfolio: info.portfolio,
            })
        }
        _ => Err(AppError::Validation("Missing required personal info fields".to_string())),
    }
}

/// Apply a partial update, then re-validate the result.
///
/// Absent fields are left as they are. `null` clears optional fields and
/// empties lists; `null` on a required field is rejected.
pub fn apply_update(
    content: &mut ResumeContent,
    request: UpdateResumeRequest,
) -> Result<(), AppError> {
    if let Some(title) = request.resume_title {
        content.resume_title = require("resumeTitle", title)?;
    }

    if let Some(patch) = request.personal_info {
        let patch = patch
            .ok_or_else(|| AppError::Validation("personalInfo cannot be null".to_string()))?;
        let info = &mut content.personal_info;
        if let Some(v) = patch.first_name {
            info.first_name = require("personalInfo.firstName", v)?;
        }
        if let Some(v) = patch.last_name {
            info.last_name = require("personalInfo.lastName", v)?;
        }
        if let Some(v) = patch.email {
            info.email = require("personalInfo.email", v)?;
        }
        if let Some(v) = patch.phone {
            info.phone = require("personalInfo.phone", v)?;
        }
        if let Some(v) = patch.location {
            info.location = require("personalInfo.location", v)?;
        }
        if let Some(v) = patch.linked_in {
            info.linked_in = v;
        }
        if let Some(v) = patch.portfolio {
            info.portfolio = v;
        }
    }

    if let Some(v) = request.professional_summary {
        content.professional_summary = v.unwrap_or_default();
    }
    if let Some(v) = request.experience {
        content.experience = v.unwrap_or_default();
    }
    if let Some(v) = request.education {
        content.education = v.unwrap_or_default();
    }
    if let Some(v) = request.skills {
        content.skills = v.unwrap_or_default();
    }
    if let Some(v) = request.certifications {
        content.certifications = v.unwrap_or_default();
    }
    if let Some(v) = request.projects {
        content.projects = v.unwrap_or_default();
    }
    if let Some(v) = request.languages {
        content.languages = v.unwrap_or_default();
    }
    if let Some(v) = request.job_description {
        content.job_description = v;
    }

    normalize_and_validate(content)
}

fn require(field: &str, value: Option<String>) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// Trim strings, lower-case the email, and enforce every field rule.
pub fn normalize_and_validate(content: &mut ResumeContent) -> Result<(), AppError> {
    content.resume_title = content.resume_title.trim().to_string();
    check_len("resumeTitle", &content.resume_title, MAX_TITLE_LEN)?;

    let info = &mut content.personal_info;
    trim_in_place(&mut info.first_name);
    trim_in_place(&mut info.last_name);
    info.email = info.email.trim().to_lowercase();
    trim_in_place(&mut info.phone);
    trim_in_place(&mut info.location);
    info.linked_in = trim_optional(info.linked_in.take());
    info.portfolio = trim_optional(info.portfolio.take());

    if !is_valid_email(&info.email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if !is_valid_phone(&info.phone) {
        return Err(AppError::Validation("Invalid phone number format".to_string()));
    }

    check_len(
        "professionalSummary",
        &content.professional_summary,
        MAX_SUMMARY_LEN,
    )?;

    content.job_description = trim_optional(content.job_description.take());
    if let Some(jd) = &content.job_description {
        check_len("jobDescription", jd, MAX_JOB_DESCRIPTION_LEN)?;
    }

    let mut skills: Vec<String> = Vec::with_capacity(content.skills.len());
    for skill in content.skills.drain(..) {
        let skill = skill.trim().to_string();
        if !skill.is_empty() && !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    if skills.len() > MAX_SKILLS {
        return Err(AppError::Validation(format!(
            "Maximum {MAX_SKILLS} skills allowed"
        )));
    }
    content.skills = skills;

    if content.experience.len() > MAX_EXPERIENCE {
        return Err(AppError::Validation(format!(
            "Maximum {MAX_EXPERIENCE} experience entries allowed"
        )));
    }
    for exp in &mut content.experience {
        trim_in_place(&mut exp.company_name);
        trim_in_place(&mut exp.job_title);
        non_empty("experience.companyName", &exp.company_name)?;
        non_empty("experience.jobTitle", &exp.job_title)?;
        non_empty("experience.description", &exp.description)?;
        check_len(
            "experience.description",
            &exp.description,
            MAX_ENTRY_DESCRIPTION_LEN,
        )?;
        if let Some(end) = exp.end_date {
            check_order("experience", exp.start_date, end)?;
        }
    }

    if content.education.len() > MAX_EDUCATION {
        return Err(AppError::Validation(format!(
            "Maximum {MAX_EDUCATION} education entries allowed"
        )));
    }
    for edu in &mut content.education {
        trim_in_place(&mut edu.school_name);
        trim_in_place(&mut edu.field_of_study);
        non_empty("education.schoolName", &edu.school_name)?;
        non_empty("education.fieldOfStudy", &edu.field_of_study)?;
        if let Some(gpa) = edu.gpa {
            if !(0.0..=MAX_GPA).contains(&gpa) {
                return Err(AppError::Validation(format!(
                    "education.gpa must be between 0 and {MAX_GPA}"
                )));
            }
        }
        if let Some(activities) = &edu.activities {
            check_len("education.activities", activities, MAX_ACTIVITIES_LEN)?;
        }
        check_order("education", edu.start_date, edu.end_date)?;
    }

    for cert in &mut content.certifications {
        trim_in_place(&mut cert.certification_name);
        trim_in_place(&mut cert.issuing_organization);
        non_empty("certifications.certificationName", &cert.certification_name)?;
        non_empty(
            "certifications.issuingOrganization",
            &cert.issuing_organization,
        )?;
        cert.credential_id = trim_optional(cert.credential_id.take());
        cert.credential_url = trim_optional(cert.credential_url.take());
    }

    for proj in &mut content.projects {
        trim_in_place(&mut proj.project_name);
        non_empty("projects.projectName", &proj.project_name)?;
        non_empty("projects.description", &proj.description)?;
        check_len(
            "projects.description",
            &proj.description,
            MAX_ENTRY_DESCRIPTION_LEN,
        )?;
        proj.project_url = trim_optional(proj.project_url.take());
        proj.role = trim_optional(proj.role.take());
    }

    for lang in &mut content.languages {
        trim_in_place(&mut lang.language);
        non_empty("languages.language", &lang.language)?;
    }

    Ok(())
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn check_order(
    section: &str,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::Validation(format!(
            "{section} endDate must not be before startDate"
        )));
    }
    Ok(())
}
