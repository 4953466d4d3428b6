use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use career_services_dashboard::aggregate::{count_skills, top_skills};
use career_services_dashboard::filter::{filter_students, StudentQuery};
use career_services_dashboard::loader;
use career_services_dashboard::matching::{
    certification_catalog, find_entry, job_catalog, rank_candidates,
};
use career_services_dashboard::report;
use career_services_dashboard::session::{AccessPolicy, Role};
use career_services_dashboard::{Skill, StudentRecord};

#[derive(Parser)]
#[command(name = "career-dashboard")]
#[command(about = "Career services insights over a student roster CSV", long_about = None)]
struct Cli {
    /// Roster CSV with one row per student
    #[arg(long, env = "CAREER_DATA_CSV", global = true, default_value = "students.csv")]
    csv: PathBuf,

    #[arg(long, env = "CAREER_LOG", global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Matches names, email, held skills and preferred locations
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    major: Option<String>,
    #[arg(long)]
    job_level: Option<String>,
}

impl From<QueryArgs> for StudentQuery {
    fn from(args: QueryArgs) -> Self {
        StudentQuery {
            text: args.search,
            major: args.major.into(),
            job_level: args.job_level.into(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Career services overview of the whole roster
    Dashboard {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Job and certification matches for one student
    Student {
        #[arg(long)]
        id: String,
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },
    /// Sign in and show the view that account is allowed to see
    Profile {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CAREER_PASSWORD")]
        password: String,
    },
    /// List students matching a search
    Search {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Most common skills across the roster
    Skills {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Best-fitting students for a job role or certification
    Candidates {
        #[arg(long)]
        role: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let students = loader::load_students(&cli.csv);
    if students.is_empty() {
        info!(path = %cli.csv.display(), "no students loaded; output will be empty");
    }

    match cli.command {
        Commands::Dashboard { query, format, out } => {
            let query = StudentQuery::from(query);
            let summary =
                report::summarize_dashboard(&students, &query, Utc::now().date_naive());
            let rendered = match format {
                Format::Markdown => report::render_dashboard(&summary),
                Format::Json => serde_json::to_string_pretty(&summary)?,
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Dashboard written to {}.", path.display());
                }
                None => print!("{rendered}"),
            }
        }
        Commands::Student { id, format } => {
            let student = find_student(&students, &id)?;
            print_profile(student, format)?;
        }
        Commands::Profile { username, password } => {
            let Some(session) = AccessPolicy::default().login(&username, &password, &students)
            else {
                bail!("invalid username or password");
            };
            info!(user = %session.user_id, "signed in");

            match session.role {
                Role::Staff => {
                    let summary = report::summarize_dashboard(
                        &students,
                        &StudentQuery::default(),
                        Utc::now().date_naive(),
                    );
                    print!("{}", report::render_dashboard(&summary));
                }
                Role::Student => {
                    let student = session
                        .student(&students)
                        .context("signed-in student is missing from the roster")?;
                    print_profile(student, Format::Markdown)?;
                }
            }
        }
        Commands::Search { query, limit } => {
            let query = StudentQuery::from(query);
            let found = filter_students(&students, &query);
            println!("{} students found", found.len());
            for student in found.iter().take(limit) {
                let skills: Vec<String> = student.skills_map.possessed().map(Skill::label).collect();
                println!(
                    "- [{}] {} <{}> {}",
                    student.id,
                    student.full_name(),
                    student.email,
                    skills.join(", ")
                );
            }
        }
        Commands::Skills { limit } => {
            let counts = count_skills(&students);
            for share in top_skills(&counts, students.len(), limit) {
                println!(
                    "- {}: {} ({}%)",
                    share.skill.label(),
                    share.count,
                    share.percentage
                );
            }
        }
        Commands::Candidates { role, limit } => {
            let jobs = job_catalog();
            let certifications = certification_catalog();
            let entry = find_entry(&jobs, &role)
                .or_else(|| find_entry(&certifications, &role))
                .with_context(|| format!("no job or certification named '{role}'"))?;

            println!("Top candidates for {}:", entry.title);
            for candidate in rank_candidates(&students, entry).iter().take(limit) {
                println!(
                    "- {} ({}) {}% match",
                    candidate.student.full_name(),
                    candidate.student.email,
                    candidate.result.percent()
                );
            }
        }
    }

    Ok(())
}

fn find_student<'a>(students: &'a [StudentRecord], id: &str) -> anyhow::Result<&'a StudentRecord> {
    students
        .iter()
        .find(|student| student.id == id)
        .with_context(|| format!("no student with id '{id}'"))
}

fn print_profile(student: &StudentRecord, format: Format) -> anyhow::Result<()> {
    let jobs = job_catalog();
    let certifications = certification_catalog();
    let profile = report::summarize_student(student, &jobs, &certifications);

    match format {
        Format::Markdown => print!("{}", report::render_student(&profile)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
    }
    Ok(())
}
