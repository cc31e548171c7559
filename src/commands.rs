use crate::cli::{DeleteMessageArgs, ImportArgs, MarkReadArgs, MessagesArgs, ServeArgs};
use crate::config::Config;
use crate::content::Content;
use crate::database::{self, Database};
use crate::http::{self, AppState};
use crate::mailer;
use actix_web::web::Data;
use anyhow::{bail, Result};
use chrono::{Local, TimeZone};
use log::{debug, info};
use std::sync::Mutex;

// Open the configured database, creating and migrating it if necessary
fn open_database(config: &Config) -> Result<Database> {
    let db_path = database::resolve_path(config.database_path.as_deref())?;
    debug!("Using database {}", db_path.display());
    Database::open(&db_path)
}

/// Implementation for the `serve` CLI command
pub async fn serve(config: Config, args: ServeArgs) -> Result<()> {
    let ServeArgs { host, port } = args;
    let db = open_database(&config)?;
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);

    let state = Data::new(AppState {
        db: Mutex::new(db),
        mailer: mailer::from_config(&config.mail),
        mail: config.mail,
    });
    http::start_server(state, &host, port).await?;

    Ok(())
}

/// Implementation for the `import` CLI command
pub fn import(config: &Config, args: ImportArgs) -> Result<()> {
    let content = Content::load(&args.content)?;
    open_database(config)?.replace_content(&content)?;
    info!(
        "Imported {} projects from {}",
        content.projects.len(),
        args.content.display()
    );
    Ok(())
}

/// Implementation for the `messages` CLI command
pub fn messages(config: &Config, args: MessagesArgs) -> Result<()> {
    let messages = open_database(config)?.get_contact_messages(args.unread)?;
    if messages.is_empty() {
        println!("No messages");
        return Ok(());
    }

    for message in messages {
        let received = Local.from_utc_datetime(&message.created_at);
        println!(
            "#{}{} {} <{}> at {}",
            message.id,
            if message.read { "" } else { " (unread)" },
            message.name,
            message.email,
            received.format("%Y-%m-%d %H:%M")
        );
        println!("subject: {}", message.subject);
        println!("{}\n", message.message);
    }

    Ok(())
}

/// Implementation for the `mark-read` CLI command
pub fn mark_read(config: &Config, args: MarkReadArgs) -> Result<()> {
    let MarkReadArgs { id, unread } = args;
    if !open_database(config)?.set_contact_message_read(id, !unread)? {
        bail!("Message {id} does not exist");
    }
    info!(
        "Marked message {id} as {}",
        if unread { "unread" } else { "read" }
    );
    Ok(())
}

/// Implementation for the `delete-message` CLI command
pub fn delete_message(config: &Config, args: DeleteMessageArgs) -> Result<()> {
    let DeleteMessageArgs { id } = args;
    if !open_database(config)?.delete_contact_message(id)? {
        bail!("Message {id} does not exist");
    }
    info!("Deleted message {id}");
    Ok(())
}
