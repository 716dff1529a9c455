//! Genetic-algorithm timetabling for academic institutions.
//!
//! Assigns course sessions to instructors, rooms and time slots so that no
//! instructor, room or student section is double-booked.
//!
//! - **Catalog**: departments, instructors, rooms, time slots, courses and
//!   sections, plus the filtered snapshot a run works on.
//! - **Genetic Algorithm (GA)**: a problem-agnostic generational engine with
//!   tournament selection, elitism, single-point crossover and pluggable
//!   mutation, seeded for reproducible runs.
//! - **Timetable**: the timetabling problem itself, its conflict-based
//!   fitness and the materialization of the best solution into class
//!   records.
//!
//! # Architecture
//!
//! [`ga`] contains no timetabling concepts; [`timetable`] plugs into it by
//! implementing [`ga::GaProblem`]. Persistence, request handling and export
//! belong to the host application.

pub mod catalog;
pub mod error;
pub mod ga;
pub mod timetable;
