use super::models::*;
use crate::content::Content;
use crate::schema::{
    career_goal, certification, contact_message, education, interest, profile, project,
    project_image, project_tag, skill,
};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::collections::HashMap;
use std::path::Path;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub struct Database {
    connection: SqliteConnection,
}

impl Database {
    /// Open the database at the given path, creating it if it doesn't exist
    pub fn open(db_path: &Path) -> Result<Self> {
        let connection = SqliteConnection::establish(&db_path.to_string_lossy())
            .with_context(|| format!("Error opening SQLite database {db_path:?}"))?;
        Self::from_connection(connection)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let connection = SqliteConnection::establish(":memory:")
            .context("Error opening in-memory SQLite database")?;
        Self::from_connection(connection)
    }

    fn from_connection(mut connection: SqliteConnection) -> Result<Self> {
        connection
            .batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 1000;")
            .context("Error configuring SQLite connection")?;
        connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| anyhow!("Error running SQLite migrations: {err}"))?;
        Ok(Self { connection })
    }

    // Read the profile that the site is about
    pub fn get_profile(&mut self) -> Result<Option<Profile>> {
        profile::table
            .order(profile::id.asc())
            .first::<Profile>(&mut self.connection)
            .optional()
            .context("Error loading profile from the database")
    }

    pub fn get_skills(&mut self) -> Result<Vec<Skill>> {
        skill::table
            .order((skill::sort_order.asc(), skill::id.asc()))
            .load::<Skill>(&mut self.connection)
            .context("Error loading skills from the database")
    }

    pub fn get_education(&mut self) -> Result<Vec<Education>> {
        education::table
            .order((education::start_year.desc(), education::id.asc()))
            .load::<Education>(&mut self.connection)
            .context("Error loading education from the database")
    }

    pub fn get_certifications(&mut self) -> Result<Vec<Certification>> {
        certification::table
            .order((certification::sort_order.asc(), certification::id.asc()))
            .load::<Certification>(&mut self.connection)
            .context("Error loading certifications from the database")
    }

    pub fn get_interests(&mut self) -> Result<Vec<Interest>> {
        interest::table
            .order((interest::sort_order.asc(), interest::id.asc()))
            .load::<Interest>(&mut self.connection)
            .context("Error loading interests from the database")
    }

    pub fn get_career_goals(&mut self) -> Result<Vec<CareerGoal>> {
        career_goal::table
            .order((career_goal::sort_order.asc(), career_goal::id.asc()))
            .load::<CareerGoal>(&mut self.connection)
            .context("Error loading career goals from the database")
    }

    // Read the projects that are displayed on the home page
    pub fn get_featured_projects(&mut self) -> Result<Vec<TaggedProject>> {
        let projects = project::table
            .filter(project::featured.eq(true))
            .order((
                project::sort_order.asc(),
                project::created_at.desc(),
                project::id.asc(),
            ))
            .load::<Project>(&mut self.connection)
            .context("Error loading featured projects from the database")?;
        self.attach_tags(projects)
    }

    // Read a single project by its slug
    pub fn get_project(&mut self, slug: &str) -> Result<Option<TaggedProject>> {
        let found = project::table
            .filter(project::slug.eq(slug))
            .first::<Project>(&mut self.connection)
            .optional()
            .with_context(|| format!("Error loading project {slug} from the database"))?;
        Ok(match found {
            Some(found) => self.attach_tags(vec![found])?.pop(),
            None => None,
        })
    }

    // Read up to `count` other projects in the same category as a project
    pub fn get_related_projects(
        &mut self,
        related_to: &Project,
        count: i64,
    ) -> Result<Vec<TaggedProject>> {
        let projects = project::table
            .filter(project::category.eq(related_to.category.as_str()))
            .filter(project::slug.ne(related_to.slug.as_str()))
            .order((
                project::sort_order.asc(),
                project::created_at.desc(),
                project::id.asc(),
            ))
            .limit(count)
            .load::<Project>(&mut self.connection)
            .context("Error loading related projects from the database")?;
        self.attach_tags(projects)
    }

    // Load the tags of each of the projects
    fn attach_tags(&mut self, projects: Vec<Project>) -> Result<Vec<TaggedProject>> {
        let ids = projects.iter().map(|item| item.id).collect::<Vec<_>>();
        let mut tags_by_project = HashMap::<i32, Vec<String>>::new();
        for tag in project_tag::table
            .filter(project_tag::project_id.eq_any(ids))
            .order(project_tag::id.asc())
            .load::<ProjectTag>(&mut self.connection)
            .context("Error loading project tags from the database")?
        {
            tags_by_project
                .entry(tag.project_id)
                .or_default()
                .push(tag.name);
        }

        Ok(projects
            .into_iter()
            .map(|item| TaggedProject {
                tags: tags_by_project.remove(&item.id).unwrap_or_default(),
                project: item,
            })
            .collect())
    }

    /// Read the gallery images of a project in display order
    pub fn get_project_images(&mut self, project_id: i32) -> Result<Vec<ProjectImage>> {
        project_image::table
            .filter(project_image::project_id.eq(project_id))
            .order((project_image::sort_order.asc(), project_image::id.asc()))
            .load::<ProjectImage>(&mut self.connection)
            .with_context(|| format!("Error loading images of project {project_id} from the database"))
    }

    /// Replace all of the site content in a single transaction
    /// Contact messages are left untouched.
    pub fn replace_content(&mut self, content: &Content) -> Result<()> {
        self.connection
            .transaction::<_, anyhow::Error, _>(|conn| {
                diesel::delete(project_tag::table).execute(conn)?;
                diesel::delete(project_image::table).execute(conn)?;
                diesel::delete(project::table).execute(conn)?;
                diesel::delete(profile::table).execute(conn)?;
                diesel::delete(skill::table).execute(conn)?;
                diesel::delete(education::table).execute(conn)?;
                diesel::delete(certification::table).execute(conn)?;
                diesel::delete(interest::table).execute(conn)?;
                diesel::delete(career_goal::table).execute(conn)?;

                let now = Utc::now().naive_utc();

                if let Some(raw) = &content.profile {
                    diesel::insert_into(profile::table)
                        .values(NewProfile {
                            name: &raw.name,
                            title: &raw.title,
                            bio: &raw.bio,
                            location: &raw.location,
                            phone: &raw.phone,
                            email: &raw.email,
                            profile_image: raw.profile_image.as_deref(),
                            hero_image: raw.hero_image.as_deref(),
                            cv_file: raw.cv_file.as_deref(),
                            github_url: raw.github_url.as_deref(),
                            linkedin_url: raw.linkedin_url.as_deref(),
                            instagram_url: raw.instagram_url.as_deref(),
                            created_at: now,
                            updated_at: now,
                        })
                        .execute(conn)?;
                }

                for raw in &content.skills {
                    diesel::insert_into(skill::table)
                        .values(NewSkill {
                            name: &raw.name,
                            percentage: i32::from(raw.percentage),
                            sort_order: raw.order,
                        })
                        .execute(conn)?;
                }

                for raw in &content.education {
                    diesel::insert_into(education::table)
                        .values(NewEducation {
                            degree: &raw.degree,
                            institution: &raw.institution,
                            description: &raw.description,
                            start_year: raw.start_year,
                            end_year: raw.end_year,
                            is_current: raw.is_current,
                            degree_level: raw.degree_level.label(),
                            sort_order: raw.order,
                        })
                        .execute(conn)?;
                }

                for raw in &content.certifications {
                    diesel::insert_into(certification::table)
                        .values(NewCertification {
                            title: &raw.title,
                            issuer: &raw.issuer,
                            description: &raw.description,
                            is_current: raw.is_current,
                            sort_order: raw.order,
                        })
                        .execute(conn)?;
                }

                for raw in &content.interests {
                    diesel::insert_into(interest::table)
                        .values(NewInterest {
                            title: &raw.title,
                            description: &raw.description,
                            icon: &raw.icon,
                            sort_order: raw.order,
                        })
                        .execute(conn)?;
                }

                for raw in &content.projects {
                    let project_id = diesel::insert_into(project::table)
                        .values(NewProject {
                            title: &raw.title,
                            slug: &raw.slug,
                            category: raw.category.code(),
                            short_description: &raw.short_description,
                            description: &raw.description,
                            detailed_content: &raw.detailed_content,
                            tech_stack: &raw.tech_stack,
                            project_date: &raw.project_date,
                            live_url: raw.live_url.as_deref(),
                            github_url: raw.github_url.as_deref(),
                            thumbnail: raw.thumbnail.as_deref(),
                            featured: raw.featured,
                            sort_order: raw.order,
                            created_at: now,
                        })
                        .returning(project::id)
                        .get_result::<i32>(conn)?;
                    for tag in &raw.tags {
                        diesel::insert_into(project_tag::table)
                            .values(NewProjectTag {
                                project_id,
                                name: tag,
                            })
                            .execute(conn)?;
                    }
                    for image in &raw.images {
                        diesel::insert_into(project_image::table)
                            .values(NewProjectImage {
                                project_id,
                                image: &image.image,
                                sort_order: image.order,
                            })
                            .execute(conn)?;
                    }
                }

                for raw in &content.career_goals {
                    diesel::insert_into(career_goal::table)
                        .values(NewCareerGoal {
                            timeframe: raw.timeframe.code(),
                            title: &raw.title,
                            goals: &raw.goals,
                            sort_order: raw.order,
                        })
                        .execute(conn)?;
                }

                Ok(())
            })
            .context("Error saving content to the database")
    }

    // Record a new contact message and return it with its id
    pub fn insert_contact_message(
        &mut self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage> {
        diesel::insert_into(contact_message::table)
            .values(message)
            .get_result::<ContactMessage>(&mut self.connection)
            .context("Error saving contact message to the database")
    }

    // Read the contact messages, newest first
    pub fn get_contact_messages(&mut self, unread_only: bool) -> Result<Vec<ContactMessage>> {
        let mut query = contact_message::table
            .order((
                contact_message::created_at.desc(),
                contact_message::id.desc(),
            ))
            .into_boxed();
        if unread_only {
            query = query.filter(contact_message::read.eq(false));
        }
        query
            .load::<ContactMessage>(&mut self.connection)
            .context("Error loading contact messages from the database")
    }

    // Set the read flag of a contact message, returning whether the message exists
    pub fn set_contact_message_read(&mut self, id: i32, read: bool) -> Result<bool> {
        let updated = diesel::update(contact_message::table.find(id))
            .set(contact_message::read.eq(read))
            .execute(&mut self.connection)
            .context("Error updating contact message in the database")?;
        Ok(updated > 0)
    }

    // Delete a contact message, returning whether the message existed
    pub fn delete_contact_message(&mut self, id: i32) -> Result<bool> {
        let deleted = diesel::delete(contact_message::table.find(id))
            .execute(&mut self.connection)
            .context("Error deleting contact message from the database")?;
        Ok(deleted > 0)
    }
}
