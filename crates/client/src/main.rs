use clap::{Parser, Subcommand};
use client::{
    Api, ServerError,
    config::Config,
    context::AppContext,
    router,
    services::{allocations, conflicts, requests, shifts},
    session::{FileStorage, SessionStore},
};
use log::error;
use models::Id;
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(name = "horarios")]
#[command(about = "Class timetable and shift-change client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Session file (overrides SESSION_FILE)
    #[arg(long)]
    session_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a director or a student
    Login { email: String, password: String },
    /// Forget the signed-in user
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Menu entries for the signed-in user
    Nav,
    /// Open a page, e.g. `/pedidos` or `/unidades-curriculares/3`
    Open { path: String },
    /// Shift change requests
    Request {
        #[command(subcommand)]
        cmd: RequestCommands,
    },
    /// Move a student to another shift
    Allocate {
        #[arg(long)]
        student: Id,
        #[arg(long)]
        from: Id,
        #[arg(long)]
        to: Id,
    },
    /// Timetable conflicts
    Conflict {
        #[command(subcommand)]
        cmd: ConflictCommands,
    },
    /// Shift management
    Shift {
        #[command(subcommand)]
        cmd: ShiftCommands,
    },
}

#[derive(Subcommand)]
enum RequestCommands {
    /// Ask to move from one shift of a course to another
    New {
        #[arg(long)]
        course: Id,
        #[arg(long)]
        from: Id,
        #[arg(long)]
        to: Id,
        #[arg(long, default_value = "")]
        message: String,
    },
    Accept {
        id: Id,
        #[arg(long, default_value = "Aceite")]
        message: String,
    },
    Reject {
        id: Id,
        #[arg(long, default_value = "Recusado")]
        message: String,
    },
}

#[derive(Subcommand)]
enum ConflictCommands {
    /// Mark a conflict as resolved
    Resolve { id: Id },
}

#[derive(Subcommand)]
enum ShiftCommands {
    /// Move a shift to another classroom
    Classroom { shift: Id, classroom: Id },
}

fn print<T: Serialize>(value: &T) -> Result<(), ServerError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let mut config = Config::load();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }

    let session = SessionStore::load(FileStorage::new(&config.session_file));
    let mut ctx = AppContext::new(Api::from_config(&config), session);

    match cli.command {
        Commands::Login { email, password } => {
            let user = ctx.login(&email, &password).await?;
            let landing = ctx.navigate(router::LOGIN_PATH)?;
            print(&serde_json::json!({ "user": user, "location": landing.path() }))?;
        }
        Commands::Logout => ctx.logout()?,
        Commands::Whoami => match ctx.session.user() {
            Some(user) => print(user)?,
            None => return Err(ServerError::NotAuthenticated),
        },
        Commands::Nav => {
            let user = ctx.session.user().ok_or(ServerError::NotAuthenticated)?;
            print(&router::nav_items(user))?;
        }
        Commands::Open { path } => print(&ctx.open(&path).await?)?,
        Commands::Request { cmd } => match cmd {
            RequestCommands::New {
                course,
                from,
                to,
                message,
            } => {
                let user = ctx.authorize("/pedidos/novo")?.clone();
                let request = requests::NewShiftRequest {
                    course_id: course,
                    old_shift_id: from,
                    shift_id: to,
                    message,
                };
                print(&requests::create_shift_request(&ctx.api, &user, &request).await?)?;
            }
            RequestCommands::Accept { id, message } => {
                ctx.authorize(&format!("/pedidos/{id}"))?;
                ctx.require_director()?;
                let conflict = requests::accept_request(&ctx.api, id, &message).await?;
                print(&serde_json::json!({ "accepted": id, "conflict": conflict }))?;
            }
            RequestCommands::Reject { id, message } => {
                ctx.authorize(&format!("/pedidos/{id}"))?;
                ctx.require_director()?;
                print(&requests::reject_request(&ctx.api, id, &message).await?)?;
            }
        },
        Commands::Allocate { student, from, to } => {
            ctx.authorize(&format!("/alocacao-manual/{student}"))?;
            let conflict = allocations::manual_allocation(&ctx.api, student, from, to).await?;
            print(&serde_json::json!({ "student": student, "shift": to, "conflict": conflict }))?;
        }
        Commands::Conflict {
            cmd: ConflictCommands::Resolve { id },
        } => {
            ctx.authorize("/conflitos")?;
            print(&conflicts::remove_conflict(&ctx.api, id).await?)?;
        }
        Commands::Shift {
            cmd: ShiftCommands::Classroom { shift, classroom },
        } => {
            ctx.require_director()?;
            print(&shifts::update_shift_classroom(&ctx.api, shift, classroom).await?)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
