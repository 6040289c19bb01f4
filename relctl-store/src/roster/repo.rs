//! Roster repository
//!
//! A guest or event that does not exist is never an error here: the miss is
//! logged and the caller gets an empty result or a no-op.

use sqlx::{Row, SqlitePool};

use super::models::{Event, Guest, GuestRole, Role, TopGuest};
use crate::DbResult;

/// Roster repository
pub struct RosterRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RosterRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_guests(&self) -> DbResult<Vec<Guest>> {
        let guests = sqlx::query_as::<_, Guest>(
            "SELECT id, full_name, age, email FROM guests ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(guests)
    }

    pub async fn list_events(&self) -> DbResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_time, end_time FROM events ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(events)
    }

    pub async fn list_roles(&self) -> DbResult<Vec<GuestRole>> {
        let roles = sqlx::query_as::<_, GuestRole>(
            "SELECT id, guest_id, event_id, role FROM guest_roles ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(roles)
    }

    /// Attach a guest to an event with a role.
    ///
    /// Returns `None` without writing anything when either side is missing.
    /// Repeating the call for the same pair adds another row.
    pub async fn add_guest_to_event(
        &self,
        guest_id: i64,
        event_id: i64,
        role: Role,
    ) -> DbResult<Option<GuestRole>> {
        let mut tx = self.pool.begin().await?;

        let guest_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE id = ?")
            .bind(guest_id)
            .fetch_one(&mut *tx)
            .await?;
        if guest_exists == 0 {
            tracing::warn!(guest_id, "Guest not found");
            return Ok(None);
        }

        let event_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;
        if event_exists == 0 {
            tracing::warn!(event_id, "Event not found");
            return Ok(None);
        }

        let row = sqlx::query_as::<_, GuestRole>(
            r#"
            INSERT INTO guest_roles (guest_id, event_id, role)
            VALUES (?, ?, ?)
            RETURNING id, guest_id, event_id, role
            "#,
        )
        .bind(guest_id)
        .bind(event_id)
        .bind(role)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(guest_id, event_id, %role, role_id = row.id, "Guest added to event");
        Ok(Some(row))
    }

    /// Distinct guests holding any role at the event, by guest id.
    pub async fn guests_by_event(&self, event_id: i64) -> DbResult<Vec<Guest>> {
        if !self.event_exists(event_id).await? {
            tracing::warn!(event_id, "Event not found");
            return Ok(Vec::new());
        }

        let guests = sqlx::query_as::<_, Guest>(
            r#"
            SELECT DISTINCT g.id, g.full_name, g.age, g.email
            FROM guests g
            JOIN guest_roles gr ON gr.guest_id = g.id
            WHERE gr.event_id = ?
            ORDER BY g.id
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(guests)
    }

    /// Change the role on the first (lowest id) row for the pair.
    pub async fn change_guest_role(
        &self,
        guest_id: i64,
        event_id: i64,
        role: Role,
    ) -> DbResult<Option<GuestRole>> {
        let row = sqlx::query_as::<_, GuestRole>(
            r#"
            UPDATE guest_roles
            SET role = ?
            WHERE id = (
                SELECT id FROM guest_roles
                WHERE guest_id = ? AND event_id = ?
                ORDER BY id
                LIMIT 1
            )
            RETURNING id, guest_id, event_id, role
            "#,
        )
        .bind(role)
        .bind(guest_id)
        .bind(event_id)
        .fetch_optional(self.pool)
        .await?;

        if row.is_none() {
            tracing::warn!(guest_id, event_id, "Guest not found on event");
        }
        Ok(row)
    }

    /// Distinct events the guest holds any role at, by event id.
    pub async fn events_by_guest(&self, guest_id: i64) -> DbResult<Vec<Event>> {
        if !self.guest_exists(guest_id).await? {
            tracing::warn!(guest_id, "Guest not found");
            return Ok(Vec::new());
        }

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT DISTINCT e.id, e.title, e.description, e.start_time, e.end_time
            FROM events e
            JOIN guest_roles gr ON gr.event_id = e.id
            WHERE gr.guest_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(guest_id)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Remove the first (lowest id) row for the pair.
    ///
    /// Returns whether a row was removed.
    pub async fn remove_guest_from_event(&self, guest_id: i64, event_id: i64) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM guest_roles
            WHERE id = (
                SELECT id FROM guest_roles
                WHERE guest_id = ? AND event_id = ?
                ORDER BY id
                LIMIT 1
            )
            "#,
        )
        .bind(guest_id)
        .bind(event_id)
        .execute(self.pool)
        .await?;

        let removed = result.rows_affected() > 0;
        if !removed {
            tracing::warn!(guest_id, event_id, "Guest not found on event");
        }
        Ok(removed)
    }

    /// Distinct events where the guest holds exactly `role`.
    pub async fn events_by_guest_role(&self, guest_id: i64, role: Role) -> DbResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT DISTINCT e.id, e.title, e.description, e.start_time, e.end_time
            FROM events e
            JOIN guest_roles gr ON gr.event_id = e.id
            WHERE gr.guest_id = ? AND gr.role = ?
            ORDER BY e.id
            "#,
        )
        .bind(guest_id)
        .bind(role)
        .fetch_all(self.pool)
        .await?;

        if events.is_empty() {
            tracing::info!(guest_id, %role, "No events found for guest with role");
        }
        Ok(events)
    }

    /// The three guests with the most role rows.
    pub async fn top3_guests(&self) -> DbResult<Vec<TopGuest>> {
        self.top_guests(3).await
    }

    /// Guests ranked by role row count, highest first.
    ///
    /// Equal counts rank the lower guest id first. Ranking and event lists
    /// come back in one query and are folded per guest.
    pub async fn top_guests(&self, limit: u32) -> DbResult<Vec<TopGuest>> {
        let rows = sqlx::query(
            r#"
            WITH ranked AS (
                SELECT guest_id, COUNT(*) AS participation_count
                FROM guest_roles
                GROUP BY guest_id
                ORDER BY participation_count DESC, guest_id ASC
                LIMIT ?
            )
            SELECT DISTINCT
                r.guest_id,
                g.full_name,
                r.participation_count,
                e.id AS event_id,
                e.title,
                e.description,
                e.start_time,
                e.end_time
            FROM ranked r
            JOIN guests g ON g.id = r.guest_id
            JOIN guest_roles gr ON gr.guest_id = r.guest_id
            JOIN events e ON e.id = gr.event_id
            ORDER BY r.participation_count DESC, r.guest_id ASC, e.id ASC
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        let mut ranked: Vec<TopGuest> = Vec::new();
        for row in rows {
            let guest_id: i64 = row.try_get("guest_id")?;
            let event = Event {
                id: row.try_get("event_id")?,
                title: row.try_get("title")?,
                description: row.try_get("description")?,
                start_time: row.try_get("start_time")?,
                end_time: row.try_get("end_time")?,
            };

            match ranked.last_mut() {
                Some(last) if last.guest_id == guest_id => last.events.push(event),
                _ => ranked.push(TopGuest {
                    guest_id,
                    full_name: row.try_get("full_name")?,
                    participation_count: row.try_get("participation_count")?,
                    events: vec![event],
                }),
            }
        }

        Ok(ranked)
    }

    async fn guest_exists(&self, guest_id: i64) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE id = ?")
            .bind(guest_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn event_exists(&self, event_id: i64) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use crate::create_memory_pool;
    use crate::roster;

    async fn seeded() -> SqlitePool {
        let pool = create_memory_pool().await.expect("pool");
        roster::prepare(&pool).await.expect("prepare");
        pool
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
        items.iter().map(id).collect()
    }

    /// Formatted log output collected while installed as the default subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn install(&self) -> tracing::subscriber::DefaultGuard {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(self.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::INFO)
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn add_for_missing_guest_or_event_writes_nothing() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        let before = repo.list_roles().await.unwrap();

        assert!(repo.add_guest_to_event(99, 1, Role::VIP).await.unwrap().is_none());
        assert!(repo.add_guest_to_event(1, 99, Role::VIP).await.unwrap().is_none());

        assert_eq!(repo.list_roles().await.unwrap(), before);
    }

    #[tokio::test]
    async fn add_duplicate_pair_creates_second_row() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        let added = repo
            .add_guest_to_event(1, 2, Role::VIP)
            .await
            .unwrap()
            .expect("row inserted");
        assert_eq!((added.guest_id, added.event_id, added.role), (1, 2, Role::VIP));
        assert_eq!(added.id, 5);

        let pair_rows = repo
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.guest_id == 1 && r.event_id == 2)
            .count();
        assert_eq!(pair_rows, 2);
    }

    #[tokio::test]
    async fn guests_by_event_lists_distinct_guests() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        repo.add_guest_to_event(1, 1, Role::Volunteer).await.unwrap();

        let guests = repo.guests_by_event(1).await.unwrap();
        assert_eq!(ids(&guests, |g| g.id), vec![1, 2]);
    }

    #[tokio::test]
    async fn guests_by_event_is_empty_for_missing_or_unattended_event() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        assert!(repo.guests_by_event(42).await.unwrap().is_empty());

        sqlx::query(
            "INSERT INTO events (id, title, description, start_time, end_time) \
             VALUES (3, 'Quiet Night', 'Nobody came', '2024-12-01 18:00:00', '2024-12-01 20:00:00')",
        )
        .execute(&pool)
        .await
        .unwrap();
        assert!(repo.guests_by_event(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn change_role_updates_stored_role() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        let changed = repo
            .change_guest_role(1, 2, Role::Organizer)
            .await
            .unwrap()
            .expect("row updated");
        assert_eq!(changed.id, 4);
        assert_eq!(changed.role, Role::Organizer);

        let stored = repo.list_roles().await.unwrap();
        let row = stored.iter().find(|r| r.id == 4).unwrap();
        assert_eq!(row.role, Role::Organizer);
    }

    #[tokio::test]
    async fn change_role_touches_only_first_matching_row() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        let duplicate = repo.add_guest_to_event(1, 2, Role::Sponsor).await.unwrap().unwrap();

        repo.change_guest_role(1, 2, Role::Performer).await.unwrap();

        let roles = repo.list_roles().await.unwrap();
        assert_eq!(roles.iter().find(|r| r.id == 4).unwrap().role, Role::Performer);
        assert_eq!(
            roles.iter().find(|r| r.id == duplicate.id).unwrap().role,
            Role::Sponsor
        );
    }

    #[tokio::test]
    async fn change_role_for_missing_pair_is_noop() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        let before = repo.list_roles().await.unwrap();

        assert!(repo.change_guest_role(2, 2, Role::VIP).await.unwrap().is_none());
        assert_eq!(repo.list_roles().await.unwrap(), before);
    }

    #[tokio::test]
    async fn events_by_guest() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        let events = repo.events_by_guest(1).await.unwrap();
        assert_eq!(ids(&events, |e| e.id), vec![1, 2]);
        assert_eq!(events[0].title, "Tech Conference");

        assert!(repo.events_by_guest(77).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_guest_from_event() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        assert!(repo.remove_guest_from_event(2, 1).await.unwrap());
        let guests = repo.guests_by_event(1).await.unwrap();
        assert_eq!(ids(&guests, |g| g.id), vec![1]);

        let before = repo.list_roles().await.unwrap();
        assert!(!repo.remove_guest_from_event(2, 1).await.unwrap());
        assert_eq!(repo.list_roles().await.unwrap(), before);
    }

    #[tokio::test]
    async fn events_by_guest_role_matches_exact_role() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        let events = repo.events_by_guest_role(3, Role::Organizer).await.unwrap();
        assert_eq!(ids(&events, |e| e.id), vec![2]);

        assert!(repo
            .events_by_guest_role(3, Role::Speaker)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn top_guests_ranks_by_participation() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        let top = repo.top3_guests().await.unwrap();
        assert_eq!(ids(&top, |t| t.guest_id), vec![1, 2, 3]);
        assert_eq!(top[0].participation_count, 2);
        assert_eq!(ids(&top[0].events, |e| e.id), vec![1, 2]);
        // 2 and 3 tie on one participation; lower id first
        assert_eq!(top[1].participation_count, 1);
        assert_eq!(top[2].participation_count, 1);
    }

    #[tokio::test]
    async fn duplicate_role_counts_towards_participation() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        repo.add_guest_to_event(1, 2, Role::VIP).await.unwrap();

        let top = repo.top3_guests().await.unwrap();
        assert_eq!(top[0].guest_id, 1);
        assert_eq!(top[0].full_name, "John Doe");
        assert_eq!(top[0].participation_count, 3);
        // events stay distinct even with two rows on event 2
        assert_eq!(ids(&top[0].events, |e| e.id), vec![1, 2]);
    }

    #[tokio::test]
    async fn top_guests_never_skips_a_higher_count() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        sqlx::query(
            "INSERT INTO guests (id, full_name, age, email) \
             VALUES (4, 'Dana White', 33, 'dana.white@example.com')",
        )
        .execute(&pool)
        .await
        .unwrap();
        for event_id in [1, 2, 2] {
            repo.add_guest_to_event(4, event_id, Role::Volunteer)
                .await
                .unwrap();
        }

        let top = repo.top_guests(2).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(ids(&top, |t| t.guest_id), vec![4, 1]);

        let counts: Vec<i64> = top.iter().map(|t| t.participation_count).collect();
        assert_eq!(counts, vec![3, 2]);
    }

    #[tokio::test]
    async fn deleting_guest_cascades_to_roles() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        sqlx::query("DELETE FROM guests WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let remaining = repo.list_roles().await.unwrap();
        assert_eq!(ids(&remaining, |r| r.id), vec![2, 3]);
    }

    #[tokio::test]
    async fn deleting_event_cascades_to_roles() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);

        sqlx::query("DELETE FROM events WHERE id = 2")
            .execute(&pool)
            .await
            .unwrap();

        let remaining = repo.list_roles().await.unwrap();
        assert_eq!(ids(&remaining, |r| r.id), vec![1, 2]);
        assert!(repo.events_by_guest(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_guest_or_event_is_logged() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        repo.add_guest_to_event(99, 1, Role::VIP).await.unwrap();
        assert!(logs.contents().contains("Guest not found"));
        assert!(logs.contents().contains("guest_id=99"));

        repo.add_guest_to_event(1, 98, Role::VIP).await.unwrap();
        assert!(logs.contents().contains("Event not found"));
        assert!(logs.contents().contains("event_id=98"));

        repo.guests_by_event(97).await.unwrap();
        assert!(logs.contents().contains("event_id=97"));

        repo.events_by_guest(96).await.unwrap();
        assert!(logs.contents().contains("guest_id=96"));
    }

    #[tokio::test]
    async fn missing_pair_is_logged() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        repo.change_guest_role(2, 2, Role::VIP).await.unwrap();
        let after_change = logs.contents();
        assert!(after_change.contains("Guest not found on event"));
        assert!(after_change.contains("guest_id=2"));
        assert!(after_change.contains("event_id=2"));

        repo.remove_guest_from_event(3, 1).await.unwrap();
        let after_remove = logs.contents();
        assert!(after_remove.len() > after_change.len());
        assert!(after_remove.contains("guest_id=3"));

        repo.events_by_guest_role(3, Role::Speaker).await.unwrap();
        assert!(logs.contents().contains("No events found for guest with role"));
    }

    #[tokio::test]
    async fn successful_lookups_log_no_warnings() {
        let pool = seeded().await;
        let repo = RosterRepo::new(&pool);
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        repo.guests_by_event(1).await.unwrap();
        repo.events_by_guest(1).await.unwrap();
        repo.change_guest_role(1, 2, Role::Sponsor).await.unwrap();

        assert!(!logs.contents().contains("WARN"));
    }
}
