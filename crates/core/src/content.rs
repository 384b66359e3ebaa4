//! Portfolio content consumed by the command handlers.
//!
//! A built-in portfolio is compiled in. A replacement can be supplied as a TOML
//! file with the same shape; markup fields (`about`, `experience`, `education`)
//! are trusted templates and go through the sanitizer only at render time.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ContentError;

/// Identity block shown by `fastfetch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub title: String,
    /// ASCII art printed beside the profile summary
    #[serde(default)]
    pub art: String,
}

/// Contact details, returned as the `contact` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactCard {
    pub email: String,
    /// GitHub user name
    pub github: String,
    /// LinkedIn handle (the part after `/in/`)
    pub linkedin: String,
}

impl ContactCard {
    pub fn email_url(&self) -> String {
        format!("mailto:{}", self.email)
    }

    pub fn github_url(&self) -> String {
        format!("https://github.com/{}", self.github)
    }

    pub fn linkedin_url(&self) -> String {
        format!("https://linkedin.com/in/{}", self.linkedin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    /// Only development projects carry a date
    #[serde(default)]
    pub date: Option<String>,
    pub description: String,
    pub stack: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub category: String,
    pub items: String,
}

/// Everything the handlers print
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    pub profile: Profile,
    pub contact: ContactCard,
    pub about: String,
    pub experience: String,
    pub education: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub ml_projects: Vec<Project>,
    #[serde(default)]
    pub personal_projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
}

const ART: &str = r"   ____  ____
  |  _ \/ ___|
  | | | \___ \
  | |_| |___) |
  |____/|____/ ";

impl Portfolio {
    /// The compiled-in portfolio
    pub fn builtin() -> Self {
        Self {
            profile: Profile {
                name: "Daroh Sou".to_string(),
                title: "Software Developer & Creative Technologist".to_string(),
                art: ART.to_string(),
            },
            contact: ContactCard {
                email: "hello@daroh.me".to_string(),
                github: "darohsou".to_string(),
                linkedin: "darohsou".to_string(),
            },
            about: concat!(
                r#"<span class="text-green-400">About Me</span><br><br>"#,
                "Hi, I'm Daroh, a software developer who enjoys building tools that feel good to use.<br>",
                "I work across the stack, from backend services to interactive front ends, ",
                "and I spend my spare time on generative art and small machine learning experiments.<br><br>",
                r#"Type <span class="text-yellow-400">projects</span> to see what I've been building."#,
            )
            .to_string(),
            experience: concat!(
                r#"<span class="text-green-400">Work Experience</span><br><br>"#,
                r#"&nbsp;&nbsp;<span class="text-cyan-400">Software Engineer</span> <span class="text-gray-400">(2023 - Present)</span><br>"#,
                "&nbsp;&nbsp;&nbsp;&nbsp;Building internal platforms and developer tooling.<br><br>",
                r#"&nbsp;&nbsp;<span class="text-cyan-400">Software Engineering Intern</span> <span class="text-gray-400">(2022)</span><br>"#,
                "&nbsp;&nbsp;&nbsp;&nbsp;Shipped data visualisation features for an analytics dashboard.",
            )
            .to_string(),
            education: concat!(
                r#"<span class="text-green-400">Education</span><br><br>"#,
                r#"&nbsp;&nbsp;<span class="text-cyan-400">B.Sc. Computer Science</span> <span class="text-gray-400">(2019 - 2023)</span><br>"#,
                "&nbsp;&nbsp;&nbsp;&nbsp;Focus on distributed systems and machine learning.",
            )
            .to_string(),
            projects: vec![
                Project {
                    title: "Terminal Portfolio".to_string(),
                    date: Some("2025".to_string()),
                    description: "This site: a portfolio you explore by typing commands.".to_string(),
                    stack: "Rust, ratatui, tokio".to_string(),
                },
                Project {
                    title: "Event Ticketing Platform".to_string(),
                    date: Some("2024".to_string()),
                    description: "Seat reservation service with real-time availability updates.".to_string(),
                    stack: "TypeScript, PostgreSQL, Redis".to_string(),
                },
            ],
            ml_projects: vec![Project {
                title: "Handwriting Recognition".to_string(),
                date: None,
                description: "Convolutional network trained to read handwritten Khmer characters.".to_string(),
                stack: "Python, PyTorch".to_string(),
            }],
            personal_projects: vec![Project {
                title: "Generative Sketches".to_string(),
                date: None,
                description: "A collection of flow-field and particle drawings.".to_string(),
                stack: "p5.js, GLSL".to_string(),
            }],
            skills: vec![
                SkillGroup { category: "Languages".to_string(), items: "Rust, TypeScript, Python, Go".to_string() },
                SkillGroup { category: "Frontend".to_string(), items: "React, Next.js, Tailwind CSS".to_string() },
                SkillGroup { category: "Backend".to_string(), items: "Node.js, PostgreSQL, Redis".to_string() },
                SkillGroup { category: "Tools".to_string(), items: "Git, Docker, Linux".to_string() },
            ],
        }
    }

    /// Parse a portfolio from TOML
    pub fn from_toml_str(toml_str: &str, origin: &Path) -> Result<Self, ContentError> {
        let portfolio: Portfolio = toml::from_str(toml_str)
            .map_err(|e| ContentError::Invalid { path: origin.to_path_buf(), reason: e.to_string() })?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Load a portfolio file
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ContentError::NotFound(path.to_path_buf()),
            _ => ContentError::Io { path: path.to_path_buf(), source },
        })?;
        let portfolio = Self::from_toml_str(&content, path)?;
        tracing::info!(path = %crate::logging::sanitize_path(path), projects = portfolio.project_count(), "loaded portfolio");
        Ok(portfolio)
    }

    /// Total projects across the three sections
    pub fn project_count(&self) -> usize {
        self.projects.len() + self.ml_projects.len() + self.personal_projects.len()
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.profile.name.trim().is_empty() {
            return Err(ContentError::EmptyField("profile.name"));
        }
        if self.contact.email.trim().is_empty() {
            return Err(ContentError::EmptyField("contact.email"));
        }
        Ok(())
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::builtin()
    }
}
