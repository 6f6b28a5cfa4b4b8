//! Content feed
//!
//! Flat display records for the page sections, loaded from TOML. Every
//! string is treated as untrusted display text: [`sanitize_text`] swaps
//! angle brackets for look-alike guillemets before rendering, and
//! [`ContentFeed::validate`] reports the fields that would need it.

use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

/// Replace `<` and `>` with `‹` and `›`
pub fn sanitize_text(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '<' => '‹',
            '>' => '›',
            other => other,
        })
        .collect()
}

fn has_angle_brackets(value: &str) -> bool {
    value.contains(['<', '>'])
}

/// In-page navigation anchor
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NavEntry {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub date: String,
    pub blurb: String,
    /// May be empty
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Experience {
    pub role: String,
    pub org: String,
    pub date: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub date: String,
    #[serde(default)]
    pub honors: Vec<String>,
    #[serde(default)]
    pub coursework: Vec<String>,
}

/// Everything the page displays besides the chrome
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ContentFeed {
    #[serde(default)]
    pub nav: Vec<NavEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// What is wrong with a display string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueKind {
    AngleBrackets,
    Empty,
}

/// A display string that would render badly
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentIssue {
    /// Location such as `projects[2].title`
    pub field: String,
    pub kind: IssueKind,
}

impl Display for ContentIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            IssueKind::AngleBrackets => write!(f, "{} contains < or >", self.field),
            IssueKind::Empty => write!(f, "{} is empty", self.field),
        }
    }
}

#[derive(Default)]
struct Checker {
    issues: Vec<ContentIssue>,
}

impl Checker {
    /// Required text: must be non-empty and bracket-free
    fn required(&mut self, field: impl FnOnce() -> String, value: &str) {
        if value.trim().is_empty() {
            self.push(field(), IssueKind::Empty);
        } else if has_angle_brackets(value) {
            self.push(field(), IssueKind::AngleBrackets);
        }
    }

    /// Optional text: only checked for brackets
    fn optional(&mut self, field: impl FnOnce() -> String, value: &str) {
        if has_angle_brackets(value) {
            self.push(field(), IssueKind::AngleBrackets);
        }
    }

    fn list(&mut self, prefix: &str, values: &[String]) {
        for (i, value) in values.iter().enumerate() {
            self.required(|| format!("{prefix}[{i}]"), value);
        }
    }

    fn push(&mut self, field: String, kind: IssueKind) {
        self.issues.push(ContentIssue { field, kind });
    }
}

impl ContentFeed {
    /// Parse a feed from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a feed file
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let feed = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            projects = feed.projects.len(),
            experience = feed.experience.len(),
            "loaded content feed"
        );
        Ok(feed)
    }

    /// Report every display string that is empty or contains angle brackets
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut check = Checker::default();

        for (i, nav) in self.nav.iter().enumerate() {
            check.required(|| format!("nav[{i}].id"), &nav.id);
            check.required(|| format!("nav[{i}].label"), &nav.label);
        }
        for (i, project) in self.projects.iter().enumerate() {
            check.required(|| format!("projects[{i}].title"), &project.title);
            check.required(|| format!("projects[{i}].date"), &project.date);
            check.required(|| format!("projects[{i}].blurb"), &project.blurb);
            check.optional(|| format!("projects[{i}].impact"), &project.impact);
            check.list(&format!("projects[{i}].stack"), &project.stack);
        }
        for (i, job) in self.experience.iter().enumerate() {
            check.required(|| format!("experience[{i}].role"), &job.role);
            check.required(|| format!("experience[{i}].org"), &job.org);
            check.required(|| format!("experience[{i}].date"), &job.date);
            check.list(&format!("experience[{i}].bullets"), &job.bullets);
        }
        for (i, ed) in self.education.iter().enumerate() {
            check.required(|| format!("education[{i}].school"), &ed.school);
            check.required(|| format!("education[{i}].degree"), &ed.degree);
            check.required(|| format!("education[{i}].date"), &ed.date);
            check.list(&format!("education[{i}].honors"), &ed.honors);
            check.list(&format!("education[{i}].coursework"), &ed.coursework);
        }
        check.list("skills", &self.skills);

        if !check.issues.is_empty() {
            tracing::warn!(issues = check.issues.len(), "content feed has display issues");
        }
        check.issues
    }

    /// Projects flagged as featured
    pub fn featured(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }

    /// Copy with every display string passed through [`sanitize_text`]
    pub fn sanitized(&self) -> Self {
        let all = |values: &[String]| -> Vec<String> {
            values.iter().map(|v| sanitize_text(v)).collect()
        };
        Self {
            nav: self
                .nav
                .iter()
                .map(|n| NavEntry {
                    id: n.id.clone(),
                    label: sanitize_text(&n.label),
                })
                .collect(),
            projects: self
                .projects
                .iter()
                .map(|p| Project {
                    title: sanitize_text(&p.title),
                    date: sanitize_text(&p.date),
                    blurb: sanitize_text(&p.blurb),
                    impact: sanitize_text(&p.impact),
                    stack: all(&p.stack),
                    ..p.clone()
                })
                .collect(),
            experience: self
                .experience
                .iter()
                .map(|e| Experience {
                    role: sanitize_text(&e.role),
                    org: sanitize_text(&e.org),
                    date: sanitize_text(&e.date),
                    bullets: all(&e.bullets),
                    url: e.url.clone(),
                })
                .collect(),
            education: self
                .education
                .iter()
                .map(|e| Education {
                    school: sanitize_text(&e.school),
                    degree: sanitize_text(&e.degree),
                    date: sanitize_text(&e.date),
                    honors: all(&e.honors),
                    coursework: all(&e.coursework),
                })
                .collect(),
            skills: all(&self.skills),
        }
    }
}
