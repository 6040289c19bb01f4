pub mod library;
pub mod projects;
pub mod roster;

pub use library::run_library;
pub use projects::run_projects;
pub use roster::run_roster;
