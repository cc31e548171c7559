use super::filters;
use crate::contact::{ContactForm, ValidationErrors};
use crate::database::{
    CareerGoal, Certification, Database, Education, Interest, Profile, ProjectImage, Skill,
    TaggedProject,
};
use anyhow::Result;
use askama::Template;

// Maximum number of related projects shown on a project page
const RELATED_PROJECTS: i64 = 3;

/// The state of the contact form section of the home page
#[derive(Default)]
pub struct ContactState {
    pub form: ContactForm,
    pub errors: ValidationErrors,
    pub notice: Option<&'static str>,
    pub alert: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    profile: Option<Profile>,
    skills: Vec<Skill>,
    education: Vec<Education>,
    certifications: Vec<Certification>,
    interests: Vec<Interest>,
    projects: Vec<TaggedProject>,
    career_goals: Vec<CareerGoal>,
    contact: ContactState,
}

impl HomePage {
    pub fn load(db: &mut Database, contact: ContactState) -> Result<Self> {
        Ok(Self {
            profile: db.get_profile()?,
            skills: db.get_skills()?,
            education: db.get_education()?,
            certifications: db.get_certifications()?,
            interests: db.get_interests()?,
            projects: db.get_featured_projects()?,
            career_goals: db.get_career_goals()?,
            contact,
        })
    }
}

#[derive(Template)]
#[template(path = "project.html")]
pub struct ProjectPage {
    profile: Option<Profile>,
    tagged: TaggedProject,
    images: Vec<ProjectImage>,
    related: Vec<TaggedProject>,
}

impl ProjectPage {
    /// Load the page for a project, or `None` if no project has the slug
    pub fn load(db: &mut Database, slug: &str) -> Result<Option<Self>> {
        let Some(tagged) = db.get_project(slug)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            profile: db.get_profile()?,
            images: db.get_project_images(tagged.project.id)?,
            related: db.get_related_projects(&tagged.project, RELATED_PROJECTS)?,
            tagged,
        }))
    }
}
