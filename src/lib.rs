//! # Tablesift
//!
//! Fuzzy record search across the tables of several SQLite databases.
//!
//! Every row of every configured table is loaded into one in-memory corpus,
//! tagged with the database and table it came from. Free-text queries are
//! matched against it with keyword containment plus character n-gram
//! similarity, using one of two strategies:
//!
//! - **grouped**: one result per `database/table` that contains any query
//!   keyword, scored by its best-matching record.
//! - **rows**: one result per record that contains every query keyword.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ SQLite files │──▶│  loader      │──▶│ tablesift-core   │
//! │ (read-only)  │   │ SqliteSource │   │ Corpus + search  │
//! └──────────────┘   └──────────────┘   └────────┬─────────┘
//!                                                │
//!                                   ┌────────────┴───────────┐
//!                                   ▼                        ▼
//!                             ┌────────────┐          ┌────────────┐
//!                             │ sift search│          │ sift shell │
//!                             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Read-only database connections |
//! | [`loader`] | SQLite tables to corpus records |
//! | [`search`] | One-shot search command |
//! | [`shell`] | Interactive query session |
//! | [`sources`] | Database health listing |

pub mod config;
pub mod db;
pub mod loader;
pub mod search;
pub mod shell;
pub mod sources;

pub use tablesift_core as core;
