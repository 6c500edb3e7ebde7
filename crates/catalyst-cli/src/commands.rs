use anyhow::Context;
use catalyst_sdk::{
    Catalyst, CatalystConfig, ChatMessage, Connection, Mentor, MentorQuery, Page, PublicUser,
};
use colored::Colorize;
use serde::Serialize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let catalyst = open(&cli)?;
    let format = cli.format;
    match cli.command {
        Command::Seed => cmd_seed(&catalyst, &format),
        Command::List(args) => cmd_list(&catalyst, &format, args),
        Command::Mentors(args) => cmd_mentors(&catalyst, &format, args),
        Command::Show(args) => cmd_show(&catalyst, &format, args),
        Command::Delete(args) => cmd_delete(&catalyst, &format, args),
        Command::Connect(args) => cmd_connect(&catalyst, &format, args),
        Command::Respond(args) => cmd_respond(&catalyst, &format, args),
        Command::Send(args) => cmd_send(&catalyst, &format, args),
        Command::Messages(args) => cmd_messages(&catalyst, &format, args),
    }
}

fn open(cli: &Cli) -> anyhow::Result<Catalyst> {
    let mut config = match &cli.config {
        Some(path) => CatalystConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => CatalystConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    let location = config.data_dir.display().to_string();
    Catalyst::open(config).with_context(|| format!("opening store at {location}"))
}

/// Print `value` as JSON, or hand it to `text` for the human format.
fn emit<T: Serialize>(format: &OutputFormat, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(value),
    }
    Ok(())
}

fn print_next(next: &Option<String>) {
    if let Some(cursor) = next {
        println!("{} --cursor {}", "more:".dimmed(), cursor.yellow());
    }
}

fn print_mentor(m: &Mentor) {
    println!("{}  {}  {} @ {}", m.id.yellow(), m.name.bold(), m.title, m.company.cyan());
    if !m.specialties.is_empty() {
        println!("  {}", m.specialties.join(", ").dimmed());
    }
}

fn print_user(u: &PublicUser) {
    let role = if u.is_mentor { "mentor".green() } else { "mentee".normal() };
    println!("{}  {} <{}> [{}]", u.id.yellow(), u.name.bold(), u.email, role);
}

fn print_connection(c: &Connection) {
    let status = match c.status {
        catalyst_sdk::ConnectionStatus::Accepted => c.status.as_str().green(),
        catalyst_sdk::ConnectionStatus::Declined => c.status.as_str().red(),
        catalyst_sdk::ConnectionStatus::Pending => c.status.as_str().yellow(),
    };
    print!("{}  mentor {} / mentee {}  {}", c.id.yellow(), c.mentor_id, c.mentee_id, status);
    match &c.chat_id {
        Some(chat) => println!("  chat {}", chat.cyan()),
        None => println!(),
    }
}

fn print_message(m: &ChatMessage) {
    println!("[{}] {}: {}", m.ts.to_string().dimmed(), m.user_id.bold(), m.text);
}

fn cmd_seed(catalyst: &Catalyst, format: &OutputFormat) -> anyhow::Result<()> {
    let seeded = catalyst.seed_all()?;
    emit(format, &seeded, |kinds| {
        if kinds.is_empty() {
            println!("Already seeded.");
        } else {
            println!("{} Seeded {}", "✓".green().bold(), kinds.join(", ").bold());
        }
    })
}

fn cmd_list(catalyst: &Catalyst, format: &OutputFormat, args: ListArgs) -> anyhow::Result<()> {
    let cursor = args.page.cursor.as_deref();
    let limit = args.page.limit;
    match args.kind {
        Kind::User => emit(format, &catalyst.list_users(cursor, limit)?, |page| {
            page.items.iter().for_each(print_user);
            print_next(&page.next);
        }),
        Kind::Mentor => {
            let page = catalyst.browse_mentors(&MentorQuery::default(), cursor, limit)?;
            emit(format, &page, print_mentor_page)
        }
        Kind::Connection => emit(format, &catalyst.list_connections(cursor, limit)?, |page| {
            page.items.iter().for_each(print_connection);
            print_next(&page.next);
        }),
        Kind::Chat => emit(format, &catalyst.list_chats(cursor, limit)?, |page| {
            for chat in &page.items {
                println!("{}  {}", chat.id.yellow(), chat.title);
            }
            print_next(&page.next);
        }),
    }
}

fn print_mentor_page(page: &Page<Mentor>) {
    if page.items.is_empty() {
        println!("No mentors found.");
    }
    page.items.iter().for_each(print_mentor);
    print_next(&page.next);
}

fn cmd_mentors(catalyst: &Catalyst, format: &OutputFormat, args: MentorsArgs) -> anyhow::Result<()> {
    let mut query = MentorQuery {
        search_term: args.search,
        specialties: Vec::new(),
    };
    if let Some(csv) = &args.specialties {
        query = query.with_specialties_csv(csv);
    }
    let page = catalyst.browse_mentors(&query, args.page.cursor.as_deref(), args.page.limit)?;
    emit(format, &page, print_mentor_page)
}

fn cmd_show(catalyst: &Catalyst, format: &OutputFormat, args: ShowArgs) -> anyhow::Result<()> {
    match args.kind {
        Kind::User => {
            let user = Catalyst::sanitize(catalyst.user(&args.id)?);
            emit(format, &user, |u| {
                print_user(u);
                if !u.bio.is_empty() {
                    println!("  {}", u.bio);
                }
            })
        }
        Kind::Mentor => emit(format, &catalyst.mentor(&args.id)?, |m| {
            print_mentor(m);
            if !m.bio.is_empty() {
                println!("  {}", m.bio);
            }
        }),
        Kind::Connection => emit(format, &catalyst.connection(&args.id)?, |c| {
            print_connection(c);
            if let Some(message) = &c.initial_message {
                println!("  \"{}\"", message.italic());
            }
        }),
        Kind::Chat => emit(format, &catalyst.chat(&args.id)?, |chat| {
            println!("{}  {}", chat.id.yellow(), chat.title.bold());
            chat.messages.iter().for_each(print_message);
        }),
    }
}

fn cmd_delete(catalyst: &Catalyst, format: &OutputFormat, args: DeleteArgs) -> anyhow::Result<()> {
    let deleted = match args.kind {
        Kind::User => catalyst.delete_users(&args.ids)?,
        Kind::Mentor => catalyst.delete_mentors(&args.ids)?,
        Kind::Chat => catalyst.delete_chats(&args.ids)?,
        Kind::Connection => catalyst.connections().delete_many(&args.ids)?,
    };
    emit(format, &serde_json::json!({ "deletedCount": deleted }), |_| {
        println!("{} Deleted {} of {} record(s).", "✓".green(), deleted.to_string().bold(), args.ids.len());
    })
}

fn cmd_connect(catalyst: &Catalyst, format: &OutputFormat, args: ConnectArgs) -> anyhow::Result<()> {
    let conn = catalyst.request_connection(&args.mentor_id, &args.mentee_id, args.message.as_deref())?;
    emit(format, &conn, |c| {
        println!("{} Connection requested", "✓".green().bold());
        print_connection(c);
    })
}

fn cmd_respond(catalyst: &Catalyst, format: &OutputFormat, args: RespondArgs) -> anyhow::Result<()> {
    let conn = catalyst.respond_to_connection(&args.connection_id, &args.status)?;
    emit(format, &conn, print_connection)
}

fn cmd_send(catalyst: &Catalyst, format: &OutputFormat, args: SendArgs) -> anyhow::Result<()> {
    let message = catalyst.post_message(&args.chat_id, &args.user_id, &args.text)?;
    emit(format, &message, print_message)
}

fn cmd_messages(catalyst: &Catalyst, format: &OutputFormat, args: MessagesArgs) -> anyhow::Result<()> {
    let messages = catalyst.messages(&args.chat_id)?;
    emit(format, &messages, |list| {
        if list.is_empty() {
            println!("No messages.");
        }
        list.iter().for_each(print_message);
    })
}
