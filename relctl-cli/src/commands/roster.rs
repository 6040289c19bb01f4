//! Roster commands - guests, events and the roles linking them
//!
//! ```bash
//! relctl roster add 3 1 speaker
//! relctl roster attendees 1 --json | jq '.[].full_name'
//! relctl roster top --limit 3
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relctl_store::roster::{self, Event, Guest, GuestRole, Role, RosterRepo, TopGuest};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::output::{emit, print_list, OutputFormat};

#[derive(Parser, Debug)]
pub struct RosterArgs {
    #[command(subcommand)]
    pub command: RosterCommands,
}

#[derive(Subcommand, Debug)]
pub enum RosterCommands {
    /// Drop, recreate and reseed the roster tables
    Reset,
    /// List all guests
    Guests,
    /// List all events
    Events,
    /// List every guest/event role row
    Roles,
    /// Add a guest to an event with a role
    Add(PairRoleArgs),
    /// Guests attending an event
    Attendees(EventIdArg),
    /// Change the role a guest holds at an event
    ChangeRole(PairRoleArgs),
    /// Events a guest attends
    Schedule(GuestIdArg),
    /// Remove a guest from an event
    Remove(PairArgs),
    /// Events where a guest holds a given role
    ByRole(GuestRoleArgs),
    /// Guests ranked by number of participations
    Top(TopArgs),
    /// Run the full roster walkthrough on a fresh schema
    Demo,
}

#[derive(Parser, Debug)]
pub struct PairArgs {
    /// Guest ID
    pub guest_id: i64,
    /// Event ID
    pub event_id: i64,
}

#[derive(Parser, Debug)]
pub struct PairRoleArgs {
    /// Guest ID
    pub guest_id: i64,
    /// Event ID
    pub event_id: i64,
    /// Role (regular, speaker, organizer, sponsor, vip, performer, volunteer)
    pub role: Role,
}

#[derive(Parser, Debug)]
pub struct GuestIdArg {
    /// Guest ID
    pub guest_id: i64,
}

#[derive(Parser, Debug)]
pub struct EventIdArg {
    /// Event ID
    pub event_id: i64,
}

#[derive(Parser, Debug)]
pub struct GuestRoleArgs {
    /// Guest ID
    pub guest_id: i64,
    /// Role (regular, speaker, organizer, sponsor, vip, performer, volunteer)
    pub role: Role,
}

#[derive(Parser, Debug)]
pub struct TopArgs {
    /// Number of guests to show
    #[arg(long, short, default_value = "3")]
    pub limit: u32,
}

pub async fn run_roster(args: RosterArgs, pool: &SqlitePool, format: OutputFormat) -> Result<()> {
    if matches!(args.command, RosterCommands::Reset | RosterCommands::Demo) {
        roster::reset(pool).await.context("Failed to reset roster schema")?;
    } else {
        roster::prepare(pool).await.context("Failed to prepare roster schema")?;
    }
    let repo = RosterRepo::new(pool);

    match args.command {
        RosterCommands::Reset => {
            emit(format, &serde_json::json!({ "reset": "roster" }), |_| {
                println!("✓ Roster schema recreated and seeded")
            })?;
        }
        RosterCommands::Guests => {
            let guests = repo.list_guests().await?;
            emit(format, &guests, |g| print_guests("Guests", g))?;
        }
        RosterCommands::Events => {
            let events = repo.list_events().await?;
            emit(format, &events, |e| print_events("Events", e))?;
        }
        RosterCommands::Roles => {
            let roles = repo.list_roles().await?;
            emit(format, &roles, |r| print_roles("Guest roles", r))?;
        }
        RosterCommands::Add(a) => {
            let added = repo.add_guest_to_event(a.guest_id, a.event_id, a.role).await?;
            emit(format, &added, |row| match row {
                Some(row) => println!(
                    "✓ Guest {} added to event {} as {} (row {})",
                    row.guest_id, row.event_id, row.role, row.id
                ),
                None => println!("No such guest or event; nothing added"),
            })?;
        }
        RosterCommands::Attendees(a) => {
            let guests = repo.guests_by_event(a.event_id).await?;
            emit(format, &guests, |g| {
                print_guests(&format!("Guests at event {}", a.event_id), g)
            })?;
        }
        RosterCommands::ChangeRole(a) => {
            let changed = repo.change_guest_role(a.guest_id, a.event_id, a.role).await?;
            emit(format, &changed, |row| match row {
                Some(row) => println!(
                    "✓ Guest {} is now {} at event {}",
                    row.guest_id, row.role, row.event_id
                ),
                None => println!("Guest {} is not attending event {}", a.guest_id, a.event_id),
            })?;
        }
        RosterCommands::Schedule(a) => {
            let events = repo.events_by_guest(a.guest_id).await?;
            emit(format, &events, |e| {
                print_events(&format!("Events for guest {}", a.guest_id), e)
            })?;
        }
        RosterCommands::Remove(a) => {
            let removed = repo.remove_guest_from_event(a.guest_id, a.event_id).await?;
            emit(format, &serde_json::json!({ "removed": removed }), |_| {
                if removed {
                    println!("✓ Guest {} removed from event {}", a.guest_id, a.event_id);
                } else {
                    println!("Guest {} is not attending event {}", a.guest_id, a.event_id);
                }
            })?;
        }
        RosterCommands::ByRole(a) => {
            let events = repo.events_by_guest_role(a.guest_id, a.role).await?;
            emit(format, &events, |e| {
                print_events(&format!("Events where guest {} is {}", a.guest_id, a.role), e)
            })?;
        }
        RosterCommands::Top(a) => {
            let top = repo.top_guests(a.limit).await?;
            emit(format, &top, |t| print_top(t))?;
        }
        RosterCommands::Demo => run_demo(&repo, format).await?,
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct RosterDemo {
    added: Option<GuestRole>,
    guests_at_event_1: Vec<Guest>,
    changed: Option<GuestRole>,
    events_for_guest_3: Vec<Event>,
    removed: bool,
    organizer_events_for_guest_3: Vec<Event>,
    top_guests: Vec<TopGuest>,
}

/// Replays the walkthrough: add, list, change, list, remove, filter, rank.
async fn run_demo(repo: &RosterRepo<'_>, format: OutputFormat) -> Result<()> {
    let demo = RosterDemo {
        added: repo.add_guest_to_event(1, 2, Role::VIP).await?,
        guests_at_event_1: repo.guests_by_event(1).await?,
        changed: repo.change_guest_role(1, 2, Role::Organizer).await?,
        events_for_guest_3: repo.events_by_guest(3).await?,
        removed: repo.remove_guest_from_event(2, 1).await?,
        organizer_events_for_guest_3: repo.events_by_guest_role(3, Role::Organizer).await?,
        top_guests: repo.top3_guests().await?,
    };

    emit(format, &demo, |d| {
        print_guests("Guests at event 1", &d.guests_at_event_1);
        print_events("Events for guest 3", &d.events_for_guest_3);
        print_events("Events where guest 3 is Organizer", &d.organizer_events_for_guest_3);
        println!("┌─ Top guests");
        for guest in &d.top_guests {
            println!("│  {} | {}", guest.full_name, guest.participation_count);
        }
    })
}

fn print_guests(title: &str, guests: &[Guest]) {
    print_list(title, guests, |g| {
        format!("#{} {} ({}) <{}>", g.id, g.full_name, g.age, g.email)
    });
}

fn print_events(title: &str, events: &[Event]) {
    print_list(title, events, |e| {
        format!(
            "#{} {} [{} → {}]",
            e.id,
            e.title,
            e.start_time.format("%Y-%m-%d %H:%M"),
            e.end_time.format("%H:%M")
        )
    });
}

fn print_roles(title: &str, roles: &[GuestRole]) {
    print_list(title, roles, |r| {
        format!("row {}: guest {} @ event {} as {}", r.id, r.guest_id, r.event_id, r.role)
    });
}

fn print_top(top: &[TopGuest]) {
    print_list("Top guests", top, |t| {
        let titles: Vec<&str> = t.events.iter().map(|e| e.title.as_str()).collect();
        format!("{} | {} ({})", t.full_name, t.participation_count, titles.join(", "))
    });
}
