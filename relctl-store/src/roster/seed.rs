//! Fixed roster seed rows

use sqlx::SqlitePool;

use super::models::Role;
use crate::DbResult;

/// (id, full name, age, email)
const GUESTS: &[(i64, &str, i64, &str)] = &[
    (1, "John Doe", 30, "john.doe@example.com"),
    (2, "Jane Smith", 28, "jane.smith@example.com"),
    (3, "Michael Brown", 40, "michael.brown@example.com"),
];

/// (id, title, description, start, end)
const EVENTS: &[(i64, &str, &str, &str, &str)] = &[
    (
        1,
        "Tech Conference",
        "Annual tech conference",
        "2024-10-10 09:00:00",
        "2024-10-10 17:00:00",
    ),
    (
        2,
        "Music Festival",
        "Outdoor music festival",
        "2024-11-15 12:00:00",
        "2024-11-15 23:00:00",
    ),
];

/// (id, guest, event, role)
const GUEST_ROLES: &[(i64, i64, i64, Role)] = &[
    (1, 1, 1, Role::Speaker),
    (2, 2, 1, Role::Regular),
    (3, 3, 2, Role::Organizer),
    (4, 1, 2, Role::VIP),
];

/// Insert the seed rows when the guest table is empty.
///
/// Returns whether anything was inserted.
pub async fn seed_if_empty(pool: &SqlitePool) -> DbResult<bool> {
    let mut tx = pool.begin().await?;

    let guests: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests")
        .fetch_one(&mut *tx)
        .await?;
    if guests > 0 {
        return Ok(false);
    }

    for &(id, full_name, age, email) in GUESTS {
        sqlx::query("INSERT INTO guests (id, full_name, age, email) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(full_name)
            .bind(age)
            .bind(email)
            .execute(&mut *tx)
            .await?;
    }

    // Times are stored in the same text form chrono's NaiveDateTime decodes.
    for &(id, title, description, start, end) in EVENTS {
        sqlx::query(
            "INSERT INTO events (id, title, description, start_time, end_time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(start)
        .bind(end)
        .execute(&mut *tx)
        .await?;
    }

    for &(id, guest_id, event_id, role) in GUEST_ROLES {
        sqlx::query("INSERT INTO guest_roles (id, guest_id, event_id, role) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(guest_id)
            .bind(event_id)
            .bind(role)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::info!(
        guests = GUESTS.len(),
        events = EVENTS.len(),
        roles = GUEST_ROLES.len(),
        "Seeded roster"
    );
    Ok(true)
}
