//! Folium Client - Library Management Console
//!
//! A line-oriented console front end over the client library: it drives the
//! page controllers and prints their rendered trees as plain text.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folium_client::{
    config::AppConfig,
    render::to_text,
    store::AvailabilityFilter,
    views::{books::BooksView, loans::LoansView, members::MembersView, LogNotifier},
    AppContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("folium_client={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folium Client v{}", env!("CARGO_PKG_VERSION"));

    let context = AppContext::new(config, Arc::new(LogNotifier));
    tracing::info!("Using API at {}", context.api.base_url());

    let mut books = context.books_view();
    let mut members = context.members_view();
    let mut loans = context.loans_view();

    println!("Folium library console. Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();

        match command {
            "help" => print_help(),
            "books" => run_books(&mut books, rest).await,
            "book" => run_book(&mut books, rest, &mut lines).await,
            "members" => run_members(&mut members, rest).await,
            "member" => run_member(&mut members, rest).await,
            "loans" => {
                loans.load_page().await;
                print_loans(&loans);
            }
            "borrow" => run_borrow(&mut loans, rest).await,
            "return" => run_return(&mut loans, rest).await,
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  books                      Load and show the books table");
    println!("  books search <text>        Filter books (debounced search)");
    println!("  books filter <true|false>  Filter books by availability");
    println!("  books clear                Clear book filters");
    println!("  book add <t> | <a> [| i]   Add a book (title | author | isbn)");
    println!("  book edit <id> <t> | <a> [| i]");
    println!("  book rm <id>               Delete a book (asks to confirm)");
    println!("  members                    Load and show the members table");
    println!("  members search <text>      Filter members");
    println!("  member add <n> | <e> [| p] Add a member (name | email | phone)");
    println!("  member edit <id> <n> | <e> [| p]");
    println!("  loans                      Show the loans page");
    println!("  borrow <book> <member>     Create a loan");
    println!("  return <loan>              Return a book by loan id");
    println!("  quit");
}

/// Split "a | b | c" form input into trimmed fields
fn fields(input: &str) -> Vec<String> {
    input.split('|').map(|field| field.trim().to_string()).collect()
}

async fn run_books(books: &mut BooksView, rest: &str) {
    let mut parts = rest.splitn(2, char::is_whitespace);
    match parts.next().unwrap_or_default() {
        "" => books.load().await,
        "search" => {
            books.input_search(parts.next().unwrap_or_default());
            books.settle_search().await;
        }
        "filter" => match parts.next().unwrap_or_default().parse::<AvailabilityFilter>() {
            Ok(filter) => books.set_availability(filter),
            Err(err) => {
                println!("{}", err);
                return;
            }
        },
        "clear" => books.clear_filters(),
        other => {
            println!("Unknown books subcommand '{}'.", other);
            return;
        }
    }
    println!("{}", to_text(&books.render()));
}

async fn run_book(books: &mut BooksView, rest: &str, lines: &mut Lines<BufReader<Stdin>>) {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let action = parts.next().unwrap_or_default();
    let args = parts.next().unwrap_or_default();

    match action {
        "add" => {
            let fields = fields(args);
            books.open_add();
            books.add_form.title.set(fields.first().cloned().unwrap_or_default());
            books.add_form.author.set(fields.get(1).cloned().unwrap_or_default());
            books.add_form.isbn.set(fields.get(2).cloned().unwrap_or_default());
            books.submit_add().await;
        }
        "edit" => {
            let mut parts = args.splitn(2, char::is_whitespace);
            let Some(id) = parts.next().and_then(|id| id.parse::<i32>().ok()) else {
                println!("Usage: book edit <id> <title> | <author> [| isbn]");
                return;
            };
            books.open_edit(id).await;
            if !books.edit_open() {
                return;
            }
            let fields = fields(parts.next().unwrap_or_default());
            if let Some(title) = fields.first().filter(|f| !f.is_empty()) {
                books.edit_form.title.set(title.clone());
            }
            if let Some(author) = fields.get(1).filter(|f| !f.is_empty()) {
                books.edit_form.author.set(author.clone());
            }
            if let Some(isbn) = fields.get(2) {
                books.edit_form.isbn.set(isbn.clone());
            }
            books.submit_edit().await;
        }
        "rm" => {
            let Some(id) = args.split_whitespace().next().and_then(|id| id.parse::<i32>().ok())
            else {
                println!("Usage: book rm <id>");
                return;
            };
            let Some(prompt) = books.delete_prompt(id) else {
                return;
            };
            println!("{} [y/N]", prompt);
            match lines.next_line().await {
                Ok(Some(answer)) if answer.trim().eq_ignore_ascii_case("y") => {
                    books.delete_confirmed(id).await;
                }
                _ => println!("Cancelled."),
            }
        }
        other => {
            println!("Unknown book subcommand '{}'.", other);
            return;
        }
    }
    println!("{}", to_text(&books.render()));
}

async fn run_members(members: &mut MembersView, rest: &str) {
    let mut parts = rest.splitn(2, char::is_whitespace);
    match parts.next().unwrap_or_default() {
        "" => members.load().await,
        "search" => {
            members.input_search(parts.next().unwrap_or_default());
            members.settle_search().await;
        }
        "clear" => members.clear_filters(),
        other => {
            println!("Unknown members subcommand '{}'.", other);
            return;
        }
    }
    println!("{}", to_text(&members.render()));
}

async fn run_member(members: &mut MembersView, rest: &str) {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let action = parts.next().unwrap_or_default();
    let args = parts.next().unwrap_or_default();

    match action {
        "add" => {
            let fields = fields(args);
            members.open_add();
            members.add_form.name.set(fields.first().cloned().unwrap_or_default());
            members.add_form.email.set(fields.get(1).cloned().unwrap_or_default());
            members.add_form.phone.set(fields.get(2).cloned().unwrap_or_default());
            members.submit_add().await;
        }
        "edit" => {
            let mut parts = args.splitn(2, char::is_whitespace);
            let Some(id) = parts.next().and_then(|id| id.parse::<i32>().ok()) else {
                println!("Usage: member edit <id> <name> | <email> [| phone]");
                return;
            };
            members.open_edit(id).await;
            if !members.edit_open() {
                return;
            }
            let fields = fields(parts.next().unwrap_or_default());
            if let Some(name) = fields.first().filter(|f| !f.is_empty()) {
                members.edit_form.name.set(name.clone());
            }
            if let Some(email) = fields.get(1).filter(|f| !f.is_empty()) {
                members.edit_form.email.set(email.clone());
            }
            if let Some(phone) = fields.get(2) {
                members.edit_form.phone.set(phone.clone());
            }
            members.submit_edit().await;
        }
        other => {
            println!("Unknown member subcommand '{}'.", other);
            return;
        }
    }
    println!("{}", to_text(&members.render()));
}

async fn run_borrow(loans: &mut LoansView, rest: &str) {
    let mut parts = rest.split_whitespace();
    let (Some(book_id), Some(member_id)) = (
        parts.next().and_then(|id| id.parse::<i32>().ok()),
        parts.next().and_then(|id| id.parse::<i32>().ok()),
    ) else {
        println!("Usage: borrow <book_id> <member_id>");
        return;
    };

    loans.select_book(book_id);
    loans.loan_form.book.set(book_id.to_string());
    loans.loan_form.member.set(member_id.to_string());
    loans.submit_borrow().await;
    print_loans(loans);
}

async fn run_return(loans: &mut LoansView, rest: &str) {
    let Some(loan_id) = rest.split_whitespace().next() else {
        println!("Usage: return <loan_id>");
        return;
    };

    loans.return_form.loan_id.set(loan_id);
    loans.submit_return().await;
    print_loans(loans);
}

fn print_loans(loans: &LoansView) {
    println!("Available books:");
    println!("{}", to_text(&loans.render_available()));
    println!("Current loans:");
    println!("{}", to_text(&loans.render_panel()));
}
