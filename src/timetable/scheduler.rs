//! End-to-end scheduling run: catalog in, timetable out.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogFilter, CatalogSnapshot};
use crate::error::ScheduleError;
use crate::ga::{GaConfig, GaRunner, Termination};

use super::chromosome::TimetableChromosome;
use super::fitness::FitnessReport;
use super::problem::TimetableProblem;
use super::schedule::{Placement, Timetable};
use super::slots::LunchWindow;

/// Settings of one scheduling run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimetableConfig {
    pub ga: GaConfig,
    pub lunch: LunchWindow,
    /// Fitness at which the materialized timetable is marked active.
    pub activation_threshold: f64,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            lunch: LunchWindow::default(),
            activation_threshold: 80.0,
        }
    }
}

impl TimetableConfig {
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_lunch(mut self, lunch: LunchWindow) -> Self {
        self.lunch = lunch;
        self
    }

    pub fn with_activation_threshold(mut self, threshold: f64) -> Self {
        self.activation_threshold = threshold;
        self
    }
}

/// What to schedule and how.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRequest {
    /// Name given to the materialized timetable.
    pub name: String,
    pub filter: CatalogFilter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: TimetableConfig,
}

impl RunRequest {
    pub fn new(name: impl Into<String>, filter: CatalogFilter) -> Self {
        Self {
            name: name.into(),
            filter,
            config: TimetableConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TimetableConfig) -> Self {
        self.config = config;
        self
    }
}

/// Result of a scheduling run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimetableOutcome {
    /// One entry per requirement, in requirement order.
    pub placements: Vec<Placement>,
    pub fitness: f64,
    /// `None` when there was nothing to schedule and the GA did not run.
    pub termination: Option<Termination>,
    pub generations: usize,
    pub fitness_history: Vec<f64>,
    pub report: FitnessReport,
    pub timetable: Timetable,
}

impl TimetableOutcome {
    /// Returns `true` if every requirement received instructor, room and time.
    pub fn is_fully_assigned(&self) -> bool {
        self.placements.iter().all(|p| p.assignment.is_complete())
    }
}

/// Runs the timetable optimizer.
///
/// # Usage
///
/// ```
/// use u_timetable::catalog::{Catalog, CatalogFilter, Course, Instructor, Room, Section, TimeSlot};
/// use u_timetable::timetable::{RunRequest, TimetableScheduler};
///
/// let catalog = Catalog::new()
///     .with_department(1, "CSE")
///     .with_instructor(Instructor::new(1, "Ada"))
///     .with_room(Room::new(1, "R-101", 60))
///     .with_time_slots(TimeSlot::default_week())
///     .with_section(Section::new(1, "CSE-1A", 1, 1, 1))
///     .with_course(Course::new(1, "CS101").with_instructors([1]).with_sections([1]));
///
/// let request = RunRequest::new("CSE year 1", CatalogFilter::new([1], [1], 1));
/// let outcome = TimetableScheduler::run(&catalog, &request).unwrap();
/// assert_eq!(outcome.placements.len(), 3);
/// assert!(outcome.fitness >= 90.0);
/// ```
pub struct TimetableScheduler;

impl TimetableScheduler {
    /// Validates the catalog and configuration, then schedules the
    /// sections selected by `request.filter`.
    pub fn run(catalog: &Catalog, request: &RunRequest) -> Result<TimetableOutcome, ScheduleError> {
        Self::run_with_cancel(catalog, request, None)
    }

    pub fn run_with_cancel(
        catalog: &Catalog,
        request: &RunRequest,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TimetableOutcome, ScheduleError> {
        catalog.validate()?;
        let snapshot = catalog.snapshot(&request.filter);
        Self::run_snapshot(&snapshot, &request.name, &request.config, cancel)
    }

    /// Schedules a snapshot supplied by an external store.
    #[tracing::instrument(
        level = "debug",
        name = "Timetable",
        skip(snapshot, config, cancel),
        fields(sections = snapshot.sections.len())
    )]
    pub fn run_snapshot(
        snapshot: &CatalogSnapshot,
        name: &str,
        config: &TimetableConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TimetableOutcome, ScheduleError> {
        config.ga.validate()?;

        let problem = TimetableProblem::new(snapshot, config.lunch);
        let requirements = problem.requirements();

        if requirements.is_empty() {
            if snapshot.is_empty() {
                tracing::info!("Timetable: no section matched the filter");
            } else {
                tracing::info!("Timetable: selected sections offer no courses");
            }
            let chromosome = TimetableChromosome::unassigned(0);
            return Ok(outcome(
                &problem,
                name,
                config,
                chromosome,
                None,
                0,
                Vec::new(),
            ));
        }

        if snapshot.instructors.is_empty() {
            tracing::warn!("Timetable: no available instructors");
        }
        if snapshot.rooms.is_empty() {
            tracing::warn!("Timetable: no available rooms");
        }
        if problem.pools().single_slots().is_empty() {
            tracing::warn!("Timetable: no bookable time slots");
        }
        if requirements.iter().any(|r| r.needs_consecutive())
            && problem.pools().consecutive_slots().is_empty()
        {
            tracing::warn!("Timetable: two-slot sessions requested but no consecutive slots exist");
        }

        tracing::info!(
            requirements = requirements.len(),
            population = config.ga.population_size,
            "Timetable: starting optimization"
        );

        let result = GaRunner::run_with_cancel(&problem, &config.ga, cancel)?;

        let out = outcome(
            &problem,
            name,
            config,
            result.best,
            Some(result.termination),
            result.generations,
            result.fitness_history,
        );
        tracing::info!(
            fitness = out.fitness,
            unassigned = out.report.unassigned,
            conflicts = out.report.conflicts,
            classes = out.timetable.classes.len(),
            skipped = out.timetable.skipped,
            active = out.timetable.is_active,
            "Timetable: finished"
        );
        Ok(out)
    }
}

fn outcome(
    problem: &TimetableProblem,
    name: &str,
    config: &TimetableConfig,
    best: TimetableChromosome,
    termination: Option<Termination>,
    generations: usize,
    fitness_history: Vec<f64>,
) -> TimetableOutcome {
    let report = problem.report(&best);
    let placements: Vec<Placement> = problem
        .requirements()
        .iter()
        .cloned()
        .zip(best.genes)
        .map(|(requirement, assignment)| Placement {
            requirement,
            assignment,
        })
        .collect();
    let timetable = Timetable::materialize(
        name,
        &placements,
        report.fitness,
        config.activation_threshold,
    );

    TimetableOutcome {
        placements,
        fitness: report.fitness,
        termination,
        generations,
        fitness_history,
        report,
        timetable,
    }
}
