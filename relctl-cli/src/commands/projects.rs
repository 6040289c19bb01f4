//! Project commands - projects, tasks and employee assignments

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relctl_store::projects::{self, Project, ProjectRepo, ProjectWithTasks};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::output::{emit, print_list, OutputFormat};

#[derive(Parser, Debug)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommands {
    /// Drop, recreate and reseed the project tables
    Reset,
    /// List projects with their tasks and assigned employees
    List,
    /// Projects with a task assigned to the named employee
    WithEmployee(WithEmployeeArgs),
    /// Delete a project along with its tasks
    Delete(DeleteArgs),
    /// Delete the first project
    DeleteFirst,
    /// Run the full projects walkthrough on a fresh schema
    Demo,
}

#[derive(Parser, Debug)]
pub struct WithEmployeeArgs {
    /// Employee full name (exact, case-sensitive)
    pub full_name: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Project ID
    pub project_id: i64,
}

pub async fn run_projects(
    args: ProjectsArgs,
    pool: &SqlitePool,
    format: OutputFormat,
) -> Result<()> {
    if matches!(args.command, ProjectsCommands::Reset | ProjectsCommands::Demo) {
        projects::reset(pool).await.context("Failed to reset projects schema")?;
    } else {
        projects::prepare(pool).await.context("Failed to prepare projects schema")?;
    }
    let repo = ProjectRepo::new(pool);

    match args.command {
        ProjectsCommands::Reset => {
            emit(format, &serde_json::json!({ "reset": "projects" }), |_| {
                println!("✓ Projects schema recreated and seeded")
            })?;
        }
        ProjectsCommands::List => {
            let loaded = repo.list_with_tasks().await?;
            emit(format, &loaded, |p| print_tree(p))?;
        }
        ProjectsCommands::WithEmployee(a) => {
            let found = repo.projects_with_employee(&a.full_name).await?;
            emit(format, &found, |p| {
                print_projects(&format!("Projects with tasks for {}", a.full_name), p)
            })?;
        }
        ProjectsCommands::Delete(a) => {
            repo.delete(a.project_id)
                .await
                .with_context(|| format!("Failed to delete project {}", a.project_id))?;
            emit(format, &serde_json::json!({ "deleted": a.project_id }), |_| {
                println!("✓ Deleted project {}", a.project_id)
            })?;
        }
        ProjectsCommands::DeleteFirst => {
            let deleted = repo.delete_first().await?;
            emit(format, &deleted, |p| match p {
                Some(p) => println!("✓ Deleted project #{} {}", p.id, p.title),
                None => println!("No projects to delete"),
            })?;
        }
        ProjectsCommands::Demo => run_demo(&repo, format).await?,
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct ProjectsDemo {
    loaded: Vec<ProjectWithTasks>,
    deleted: Option<Project>,
    with_john_doe: Vec<Project>,
}

/// Eager-load everything, delete the first project, then look for John Doe.
async fn run_demo(repo: &ProjectRepo<'_>, format: OutputFormat) -> Result<()> {
    let loaded = repo.list_with_tasks().await?;
    let deleted = match loaded.first() {
        Some(first) => {
            repo.delete(first.project.id).await?;
            Some(first.project.clone())
        }
        None => None,
    };
    let demo = ProjectsDemo {
        loaded,
        deleted,
        with_john_doe: repo.projects_with_employee("John Doe").await?,
    };

    emit(format, &demo, |d| {
        print_tree(&d.loaded);
        if let Some(p) = &d.deleted {
            println!("✓ Deleted project #{} {}", p.id, p.title);
        }
        print_projects("Projects with tasks for John Doe", &d.with_john_doe);
    })
}

fn print_projects(title: &str, projects: &[Project]) {
    print_list(title, projects, |p| format!("#{} {}: {}", p.id, p.title, p.description));
}

fn print_tree(projects: &[ProjectWithTasks]) {
    println!("┌─ Projects");
    if projects.is_empty() {
        println!("│  (none)");
    }
    for p in projects {
        println!("├─ #{} {}", p.project.id, p.project.title);
        for t in &p.tasks {
            println!(
                "│  ├─ {} [{}] due {}",
                t.task.title,
                t.task.status,
                t.task.deadline.format("%Y-%m-%d")
            );
            for e in &t.employees {
                println!("│  │  └─ {} ({}, {})", e.full_name, e.position, e.age);
            }
        }
    }
}
