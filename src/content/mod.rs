mod choices;

pub use self::choices::{Category, DegreeLevel, Timeframe};
use crate::contact::is_valid_email;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileContent {
    pub name: String,
    pub title: String,
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub hero_image: Option<String>,
    pub cv_file: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillContent {
    pub name: String,
    pub percentage: u8,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationContent {
    pub degree: String,
    pub institution: String,
    pub description: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    #[serde(default)]
    pub is_current: bool,
    pub degree_level: DegreeLevel,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificationContent {
    pub title: String,
    pub issuer: String,
    pub description: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterestContent {
    pub title: String,
    pub description: String,
    /// CSS icon class, for example `bi-graph-up-arrow`
    pub icon: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectContent {
    pub title: String,
    pub slug: String,
    pub category: Category,
    pub short_description: String,
    pub description: String,
    pub detailed_content: String,
    pub tech_stack: String,
    pub project_date: String,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Gallery images shown on the project page
    #[serde(default)]
    pub images: Vec<ProjectImageContent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectImageContent {
    pub image: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CareerGoalContent {
    pub timeframe: Timeframe,
    pub title: String,
    /// One goal per line
    pub goals: String,
    #[serde(default)]
    pub order: i32,
}

/// Everything displayed on the site, as described by a content file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Content {
    pub profile: Option<ProfileContent>,
    #[serde(default)]
    pub skills: Vec<SkillContent>,
    #[serde(default)]
    pub education: Vec<EducationContent>,
    #[serde(default)]
    pub certifications: Vec<CertificationContent>,
    #[serde(default)]
    pub interests: Vec<InterestContent>,
    #[serde(default)]
    pub projects: Vec<ProjectContent>,
    #[serde(default)]
    pub career_goals: Vec<CareerGoalContent>,
}

impl Content {
    /// Load a content file by its path
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)
            .with_context(|| format!("Failed to read content file {}", path.display()))?;
        Self::parse(&toml_str)
            .with_context(|| format!("Invalid content file {}", path.display()))
    }

    fn parse(toml_str: &str) -> Result<Self> {
        let content: Self = toml::from_str(toml_str).context("Failed to deserialize TOML")?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<()> {
        if let Some(profile) = &self.profile {
            validate_length("profile name", &profile.name, 100)?;
            validate_length("profile title", &profile.title, 200)?;
            validate_length("profile phone", &profile.phone, 20)?;
            if !is_valid_email(&profile.email) {
                bail!("Invalid profile email {}", profile.email);
            }
        }

        for skill in &self.skills {
            validate_length("skill name", &skill.name, 100)?;
            if skill.percentage > 100 {
                bail!(
                    "Skill {} has percentage {}, expected at most 100",
                    skill.name,
                    skill.percentage
                );
            }
        }

        let mut slugs = HashSet::new();
        for project in &self.projects {
            validate_slug(&project.slug)?;
            if !slugs.insert(project.slug.as_str()) {
                bail!("Duplicate project slug {}", project.slug);
            }
            validate_length("project title", &project.title, 200)?;
            validate_length("project short description", &project.short_description, 200)?;
            for tag in &project.tags {
                validate_length("project tag", tag, 50)?;
            }
            if project.images.iter().any(|image| image.image.is_empty()) {
                bail!("Project {} has a gallery image without a path", project.slug);
            }
        }

        for goal in &self.career_goals {
            validate_length("career goal title", &goal.title, 100)?;
        }

        Ok(())
    }
}

fn validate_length(field: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max {
        bail!("The {field} \"{value}\" has {length} characters, expected at most {max}");
    }
    Ok(())
}

/// Validate a project slug
fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty()
        || slug
            .chars()
            .any(|char| !char.is_ascii_alphanumeric() && char != '-' && char != '_')
    {
        bail!("Invalid project slug {slug}")
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_empty() -> Result<()> {
        let content = Content::parse("")?;
        assert!(content.profile.is_none());
        assert!(content.projects.is_empty());
        Ok(())
    }

    #[test]
    fn test_simple() -> Result<()> {
        let content = Content::parse(
            "[profile]
name = 'Jane Doe'
title = 'Engineer'
bio = 'Hello'
email = 'jane@example.com'

[[skills]]
name = 'Rust'
percentage = 90
order = 1

[[education]]
degree = 'BSc'
institution = 'University'
description = 'Studies'
start_year = 2020
degree_level = 'High School'

[[projects]]
title = 'Site'
slug = 'site'
category = 'AI'
short_description = 'Short'
description = 'Long'
detailed_content = 'Details'
tech_stack = 'Rust, SQLite'
project_date = '2024'
featured = true
tags = ['rust', 'web']

[[career_goals]]
timeframe = 'medium'
title = 'Grow'
goals = '''Learn\nShip'''",
        )?;

        assert_matches!(content.profile, Some(ProfileContent { ref name, ref location, github_url: None, .. }) => {
            assert_eq!(name, "Jane Doe");
            assert_eq!(location, "");
        });
        assert_eq!(content.skills.len(), 1);
        assert_eq!(content.education[0].degree_level, DegreeLevel::HighSchool);
        assert_eq!(content.education[0].end_year, None);
        assert_matches!(content.projects.as_slice(), [ProjectContent { category: Category::Ai, featured: true, order: 0, tags, .. }] => {
            assert_eq!(tags, &vec!["rust".to_owned(), "web".to_owned()]);
        });
        assert_eq!(content.career_goals[0].timeframe, Timeframe::Medium);
        Ok(())
    }

    #[test]
    fn test_extra_fields() {
        assert!(Content::parse("foo = 'bar'").is_err());
        assert!(Content::parse(
            "[[skills]]
name = 'Rust'
percentage = 90
level = 'expert'"
        )
        .is_err());
    }

    #[test]
    fn test_invalid_choices() {
        assert!(Content::parse(
            "[[career_goals]]
timeframe = 'someday'
title = 'Grow'
goals = 'Learn'"
        )
        .is_err());
        assert!(Content::parse(
            "[[education]]
degree = 'PhD'
institution = 'University'
description = 'Research'
start_year = 2020
degree_level = 'Doctorate'"
        )
        .is_err());
    }

    #[test]
    fn test_invalid_percentage() {
        let error = Content::parse(
            "[[skills]]
name = 'Rust'
percentage = 150",
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Skill Rust has percentage 150, expected at most 100"
        );
    }

    fn project(slug: &str) -> String {
        format!(
            "[[projects]]
title = 'Site'
slug = '{slug}'
category = 'Web'
short_description = 'Short'
description = 'Long'
detailed_content = 'Details'
tech_stack = 'Rust'
project_date = '2024'
"
        )
    }

    #[test]
    fn test_duplicate_slug() {
        let error = Content::parse(&format!("{}{}", project("site"), project("site"))).unwrap_err();
        assert_eq!(error.to_string(), "Duplicate project slug site");
    }

    #[test]
    fn test_project_images() -> Result<()> {
        let content = Content::parse(&format!(
            "{}
[[projects.images]]
image = '/media/projects/gallery/second.jpg'
order = 2

[[projects.images]]
image = '/media/projects/gallery/first.jpg'
",
            project("site")
        ))?;
        assert_matches!(content.projects[0].images.as_slice(), [second, first] => {
            assert_eq!(second.order, 2);
            assert_eq!(first.image, "/media/projects/gallery/first.jpg");
            assert_eq!(first.order, 0);
        });

        let error = Content::parse(&format!("{}\n[[projects.images]]\nimage = ''\n", project("site")))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Project site has a gallery image without a path"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_profile_email() {
        assert!(Content::parse(
            "[profile]
name = 'Jane Doe'
title = 'Engineer'
bio = 'Hello'
email = 'not an email'"
        )
        .is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("site").is_ok());
        assert!(validate_slug("my-site_2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("my site").is_err());
        assert!(validate_slug("site/../admin").is_err());
    }
}
