//! Error types.
//!
//! Only malformed input is an error. Empty pools, zero requirements and
//! partially assigned results are ordinary values and never surface here.

/// Invalid [`GaConfig`](crate::ga::GaConfig) parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,

    #[error("max_generations must be at least 1")]
    NoGenerations,

    #[error("tournament_size must be at least 1")]
    EmptyTournament,

    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("target_fitness must be within [0, 100], got {0}")]
    TargetOutOfRange(f64),

    #[error("time_limit_ms must be positive or None")]
    ZeroTimeLimit,
}

/// Inconsistent catalog data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("time slot {slot} starts at {start} but ends at {end}")]
    InvertedTimeSlot {
        slot: u32,
        start: String,
        end: String,
    },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("{owner_kind} {owner} references unknown {kind} {id}")]
    UnknownReference {
        owner_kind: &'static str,
        owner: u32,
        kind: &'static str,
        id: u32,
    },

    #[error("course {course} has unsupported duration {duration} (expected 1 or 2)")]
    UnsupportedDuration { course: u32, duration: u8 },
}

/// Failure of a whole scheduling run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}
