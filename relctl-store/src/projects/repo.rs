//! Project repository

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use super::models::{Employee, Position, Project, ProjectWithTasks, Status, Task, TaskWithEmployees};
use crate::{DbError, DbResult};

/// Project repository
pub struct ProjectRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProjectRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, title, description FROM projects ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(projects)
    }

    /// Load every project with its tasks and their employees.
    ///
    /// One LEFT JOIN query, folded in order; projects without tasks and tasks
    /// without employees are kept.
    pub async fn list_with_tasks(&self) -> DbResult<Vec<ProjectWithTasks>> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.id AS project_id,
                p.title AS project_title,
                p.description AS project_description,
                t.id AS task_id,
                t.title AS task_title,
                t.description AS task_description,
                t.deadline,
                t.status,
                e.id AS employee_id,
                e.full_name,
                e.age,
                e.position
            FROM projects p
            LEFT JOIN tasks t ON t.project_id = p.id
            LEFT JOIN employee_tasks et ON et.task_id = t.id
            LEFT JOIN employees e ON e.id = et.employee_id
            ORDER BY p.id, t.id, e.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut projects: Vec<ProjectWithTasks> = Vec::new();
        for row in rows {
            let project_id: i64 = row.try_get("project_id")?;
            if projects.last().map(|p| p.project.id) != Some(project_id) {
                projects.push(ProjectWithTasks {
                    project: Project {
                        id: project_id,
                        title: row.try_get("project_title")?,
                        description: row.try_get("project_description")?,
                    },
                    tasks: Vec::new(),
                });
            }
            let Some(project) = projects.last_mut() else {
                continue;
            };

            let Some(task_id) = row.try_get::<Option<i64>, _>("task_id")? else {
                continue;
            };
            if project.tasks.last().map(|t| t.task.id) != Some(task_id) {
                let deadline: DateTime<Utc> = row.try_get("deadline")?;
                let status: Status = row.try_get("status")?;
                project.tasks.push(TaskWithEmployees {
                    task: Task {
                        id: task_id,
                        title: row.try_get("task_title")?,
                        description: row.try_get("task_description")?,
                        deadline,
                        status,
                        project_id,
                    },
                    employees: Vec::new(),
                });
            }

            if let Some(employee_id) = row.try_get::<Option<i64>, _>("employee_id")? {
                let position: Position = row.try_get("position")?;
                if let Some(task) = project.tasks.last_mut() {
                    task.employees.push(Employee {
                        id: employee_id,
                        full_name: row.try_get("full_name")?,
                        age: row.try_get("age")?,
                        position,
                    });
                }
            }
        }

        Ok(projects)
    }

    /// Projects with at least one task assigned to an employee whose full
    /// name equals `full_name` exactly (case-sensitive).
    pub async fn projects_with_employee(&self, full_name: &str) -> DbResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.id, p.title, p.description
            FROM projects p
            WHERE EXISTS (
                SELECT 1 FROM tasks t
                WHERE t.project_id = p.id
                  AND EXISTS (
                      SELECT 1
                      FROM employee_tasks et
                      JOIN employees e ON e.id = et.employee_id
                      WHERE et.task_id = t.id
                        AND e.full_name = ?
                  )
            )
            ORDER BY p.id
            "#,
        )
        .bind(full_name)
        .fetch_all(self.pool)
        .await?;

        Ok(projects)
    }

    /// Delete a project with its tasks and their employee links.
    pub async fn delete(&self, project_id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(project_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("project", project_id));
        }
        tracing::info!(project_id, "Deleted project");
        Ok(())
    }

    /// Delete the first project in id order, returning it.
    pub async fn delete_first(&self) -> DbResult<Option<Project>> {
        let deleted = sqlx::query_as::<_, Project>(
            r#"
            DELETE FROM projects
            WHERE id = (SELECT MIN(id) FROM projects)
            RETURNING id, title, description
            "#,
        )
        .fetch_optional(self.pool)
        .await?;

        match &deleted {
            Some(project) => tracing::info!(project_id = project.id, "Deleted first project"),
            None => tracing::info!("No projects to delete"),
        }
        Ok(deleted)
    }
}
