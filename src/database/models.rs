use crate::content::{Category, Timeframe};
use crate::schema::{
    career_goal, certification, contact_message, education, interest, profile, project,
    project_image, project_tag, skill,
};
use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};

#[derive(Debug, Queryable)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub hero_image: Option<String>,
    pub cv_file: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = profile)]
pub struct NewProfile<'a> {
    pub name: &'a str,
    pub title: &'a str,
    pub bio: &'a str,
    pub location: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub profile_image: Option<&'a str>,
    pub hero_image: Option<&'a str>,
    pub cv_file: Option<&'a str>,
    pub github_url: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
    pub instagram_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Queryable)]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub percentage: i32,
    pub sort_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = skill)]
pub struct NewSkill<'a> {
    pub name: &'a str,
    pub percentage: i32,
    pub sort_order: i32,
}

#[derive(Debug, Queryable)]
pub struct Education {
    pub id: i32,
    pub degree: String,
    pub institution: String,
    pub description: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub is_current: bool,
    pub degree_level: String,
    pub sort_order: i32,
}

impl Education {
    /// The years attended, for example "2019 - 2023" or "2022 - Present"
    pub fn period(&self) -> String {
        match (self.is_current, self.end_year) {
            (true, _) => format!("{} - Present", self.start_year),
            (false, Some(end_year)) => format!("{} - {end_year}", self.start_year),
            (false, None) => self.start_year.to_string(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = education)]
pub struct NewEducation<'a> {
    pub degree: &'a str,
    pub institution: &'a str,
    pub description: &'a str,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub is_current: bool,
    pub degree_level: &'a str,
    pub sort_order: i32,
}

#[derive(Debug, Queryable)]
pub struct Certification {
    pub id: i32,
    pub title: String,
    pub issuer: String,
    pub description: String,
    pub is_current: bool,
    pub sort_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = certification)]
pub struct NewCertification<'a> {
    pub title: &'a str,
    pub issuer: &'a str,
    pub description: &'a str,
    pub is_current: bool,
    pub sort_order: i32,
}

#[derive(Debug, Queryable)]
pub struct Interest {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub sort_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = interest)]
pub struct NewInterest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub icon: &'a str,
    pub sort_order: i32,
}

#[derive(Debug, Queryable)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub short_description: String,
    pub description: String,
    pub detailed_content: String,
    pub tech_stack: String,
    pub project_date: String,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub thumbnail: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
}

impl Project {
    pub fn category_label(&self) -> &str {
        self.category
            .parse::<Category>()
            .map_or(self.category.as_str(), |category| category.label())
    }

    /// The individual technologies of the comma-separated tech stack
    pub fn tech_stack_items(&self) -> Vec<&str> {
        self.tech_stack
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Insertable)]
#[diesel(table_name = project)]
pub struct NewProject<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub category: &'a str,
    pub short_description: &'a str,
    pub description: &'a str,
    pub detailed_content: &'a str,
    pub tech_stack: &'a str,
    pub project_date: &'a str,
    pub live_url: Option<&'a str>,
    pub github_url: Option<&'a str>,
    pub thumbnail: Option<&'a str>,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Queryable)]
pub struct ProjectTag {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = project_tag)]
pub struct NewProjectTag<'a> {
    pub project_id: i32,
    pub name: &'a str,
}

#[derive(Debug, Queryable)]
pub struct ProjectImage {
    pub id: i32,
    pub project_id: i32,
    pub image: String,
    pub sort_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = project_image)]
pub struct NewProjectImage<'a> {
    pub project_id: i32,
    pub image: &'a str,
    pub sort_order: i32,
}

/// A project along with the names of its tags
#[derive(Debug)]
pub struct TaggedProject {
    pub project: Project,
    pub tags: Vec<String>,
}

#[derive(Debug, Queryable)]
pub struct CareerGoal {
    pub id: i32,
    pub timeframe: String,
    pub title: String,
    pub goals: String,
    pub sort_order: i32,
}

impl CareerGoal {
    pub fn timeframe_label(&self) -> &str {
        self.timeframe
            .parse::<Timeframe>()
            .map_or(self.timeframe.as_str(), |timeframe| timeframe.label())
    }

    pub fn goals_list(&self) -> Vec<&str> {
        self.goals
            .lines()
            .map(str::trim)
            .filter(|goal| !goal.is_empty())
            .collect()
    }
}

#[derive(Insertable)]
#[diesel(table_name = career_goal)]
pub struct NewCareerGoal<'a> {
    pub timeframe: &'a str,
    pub title: &'a str,
    pub goals: &'a str,
    pub sort_order: i32,
}

#[derive(Clone, Debug, Eq, PartialEq, Queryable)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: NaiveDateTime,
    pub read: bool,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = contact_message)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn career_goal(timeframe: &str, goals: &str) -> CareerGoal {
        CareerGoal {
            id: 1,
            timeframe: timeframe.to_owned(),
            title: "Goal".to_owned(),
            goals: goals.to_owned(),
            sort_order: 0,
        }
    }

    #[test]
    fn test_goals_list() {
        assert_eq!(
            career_goal("short", "  Pass exams \n\n\r\nShip a product\r\n").goals_list(),
            vec!["Pass exams", "Ship a product"]
        );
    }

    #[test]
    fn test_timeframe_label() {
        assert_eq!(career_goal("long", "").timeframe_label(), "5+ Years");
        assert_eq!(career_goal("unknown", "").timeframe_label(), "unknown");
    }

    #[test]
    fn test_education_period() {
        let mut education = Education {
            id: 1,
            degree: "BSc".to_owned(),
            institution: "University".to_owned(),
            description: String::new(),
            start_year: 2019,
            end_year: Some(2023),
            is_current: false,
            degree_level: "Undergraduate".to_owned(),
            sort_order: 0,
        };
        assert_eq!(education.period(), "2019 - 2023");
        education.is_current = true;
        assert_eq!(education.period(), "2019 - Present");
        education.is_current = false;
        education.end_year = None;
        assert_eq!(education.period(), "2019");
    }
}
