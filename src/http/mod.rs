mod filters;
mod http_error;
mod pages;

use self::http_error::HttpError;
use self::pages::{ContactState, HomePage, ProjectPage};
use crate::config::MailConfig;
use crate::contact::{ContactForm, ContactIntake, SubmitError};
use crate::database::{self, ContactMessage, Database};
use crate::mailer::Mailer;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::middleware::{Compress, Logger, NormalizePath, TrailingSlash};
use actix_web::web::{self, Data, Form, Path, Query, ServiceConfig};
use actix_web::{get, post, App, HttpRequest, HttpResponse, HttpServer, Result};
use askama::Template;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use std::sync::Mutex;

/// State shared by every request handler
pub struct AppState {
    pub db: Mutex<Database>,
    pub mailer: Box<dyn Mailer>,
    pub mail: MailConfig,
}

impl AppState {
    fn submit_contact(&self, form: ContactForm) -> Result<ContactMessage, SubmitError> {
        ContactIntake::new(&self.db, self.mailer.as_ref(), log::logger(), &self.mail).submit(form)
    }
}

#[derive(Deserialize)]
struct HomeQuery {
    sent: Option<String>,
}

// Shown to clients in place of internal errors, which are only logged
const SUBMIT_FAILED_MESSAGE: &str = "Message could not be sent.";

// Background submissions from the page's script identify themselves with this header
fn is_ajax(req: &HttpRequest) -> bool {
    req.headers()
        .get("X-Requested-With")
        .map_or(false, |value| value == "XMLHttpRequest")
}

fn render(page: &impl Template) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page.render()?))
}

// Render the home page on the blocking thread pool
async fn home_page(state: Data<AppState>, contact: ContactState) -> Result<HttpResponse> {
    let page = web::block(move || HomePage::load(&mut database::lock(&state.db), contact))
        .await?
        .map_err(HttpError::from)?;
    Ok(render(&page)?)
}

#[get("/")]
async fn home(state: Data<AppState>, query: Query<HomeQuery>) -> Result<HttpResponse> {
    let contact = ContactState {
        notice: query
            .sent
            .is_some()
            .then_some("Your message has been sent successfully!"),
        ..Default::default()
    };
    home_page(state, contact).await
}

#[post("/")]
async fn submit_contact_form(
    req: HttpRequest,
    state: Data<AppState>,
    form: Form<ContactForm>,
) -> Result<HttpResponse> {
    let ajax = is_ajax(&req);
    let form = form.into_inner();
    let submitted = form.clone();
    let intake_state = state.clone();
    let result = web::block(move || intake_state.submit_contact(submitted)).await?;

    match result {
        Ok(message) => {
            info!("Received contact message {} from {}", message.id, message.email);
            if ajax {
                Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Message sent!" })))
            } else {
                Ok(HttpResponse::Found()
                    .insert_header((header::LOCATION, "/?sent=1#contact"))
                    .finish())
            }
        }
        Err(SubmitError::Invalid(errors)) => {
            if ajax {
                Ok(HttpResponse::Ok().json(json!({ "success": false, "errors": errors })))
            } else {
                let contact = ContactState {
                    form,
                    errors,
                    alert: Some("Please correct the errors below."),
                    ..Default::default()
                };
                home_page(state, contact).await
            }
        }
        Err(err) => {
            error!("{err}");
            if ajax {
                Ok(HttpResponse::InternalServerError()
                    .json(json!({ "success": false, "message": SUBMIT_FAILED_MESSAGE })))
            } else {
                Err(HttpError::from_status_code(StatusCode::INTERNAL_SERVER_ERROR).into())
            }
        }
    }
}

#[get("/project/{slug}/")]
async fn project_details(state: Data<AppState>, slug: Path<String>) -> Result<HttpResponse> {
    let slug = slug.into_inner();
    let page = web::block(move || ProjectPage::load(&mut database::lock(&state.db), &slug))
        .await?
        .map_err(HttpError::from)?
        .ok_or_else(|| HttpError::from_status_code(StatusCode::NOT_FOUND))?;
    Ok(render(&page)?)
}

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(home)
        .service(submit_contact_form)
        .service(project_details);
}

pub async fn start_server(state: Data<AppState>, host: &str, port: u16) -> std::io::Result<()> {
    info!("Starting HTTP server on {host}:{port}");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(NormalizePath::new(TrailingSlash::Always))
            .wrap(Compress::default())
            .wrap(Logger::default())
            .configure(routes)
    })
    .bind((host, port))?
    .run()
    .await
}
