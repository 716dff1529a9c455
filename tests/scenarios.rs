//! End-to-end scheduling scenarios.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use u_timetable::catalog::{
    Catalog, CatalogFilter, ClockTime, Course, CourseType, Instructor, Room, RoomType, Section,
    SlotId, TimeSlot, Weekday,
};
use u_timetable::ga::{GaConfig, Termination};
use u_timetable::timetable::{
    RunRequest, TimeAssignment, TimetableConfig, TimetableScheduler,
};

fn one_of_each() -> Catalog {
    Catalog::new()
        .with_department(1, "CSE")
        .with_instructor(Instructor::new(1, "Ada"))
        .with_room(Room::new(1, "R-101", 60))
        .with_time_slot(
            TimeSlot::new(
                SlotId(1),
                Weekday::Monday,
                ClockTime::hm(9, 0),
                ClockTime::hm(10, 0),
            )
            .unwrap(),
        )
        .with_section(Section::new(1, "CSE-1A", 1, 1, 1))
}

fn request(seed: u64) -> RunRequest {
    RunRequest::new("scenario", CatalogFilter::new([1], [1], 1))
        .with_config(TimetableConfig::default().with_ga(GaConfig::default().with_seed(seed)))
}

// ============================================================================
// Single legal combination
// ============================================================================

#[test]
fn single_option_converges_immediately() {
    let catalog = one_of_each().with_course(
        Course::new(1, "CS101")
            .with_sessions_per_week(1)
            .with_instructors([1])
            .with_sections([1]),
    );

    let outcome = TimetableScheduler::run(&catalog, &request(1)).unwrap();

    assert_eq!(outcome.termination, Some(Termination::Converged));
    assert_eq!(outcome.generations, 1);
    assert_eq!(outcome.fitness, 100.0);
    assert!(outcome.is_fully_assigned());
    assert_eq!(outcome.timetable.classes.len(), 1);
    assert_eq!(outcome.timetable.classes[0].id, "CSE-1A_CS101_0");
    assert!(outcome.timetable.is_active);
}

#[test]
fn two_sections_share_the_only_resources() {
    let catalog = one_of_each()
        .with_section(Section::new(2, "CSE-1B", 1, 1, 1))
        .with_course(
            Course::new(1, "CS101")
                .with_sessions_per_week(1)
                .with_instructors([1])
                .with_sections([1, 2]),
        );
    let req = RunRequest::new("scenario", CatalogFilter::new([1], [1], 1)).with_config(
        TimetableConfig::default().with_ga(
            GaConfig::default()
                .with_seed(2)
                .with_max_generations(60)
                .with_stagnation_limit(20),
        ),
    );

    let outcome = TimetableScheduler::run(&catalog, &req).unwrap();

    assert!((outcome.fitness - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(outcome.report.conflicts, 1);
    assert_eq!(outcome.termination, Some(Termination::Stalled));
    // Generation 0 plus twenty without improvement.
    assert_eq!(outcome.generations, 21);
    assert!(outcome
        .fitness_history
        .iter()
        .all(|&f| (f - 200.0 / 3.0).abs() < 1e-9));
    assert!(!outcome.timetable.is_active);
    assert_eq!(outcome.timetable.classes.len(), 2);
}

// ============================================================================
// Reproducibility and termination
// ============================================================================

fn department() -> Catalog {
    department_of(3)
}

/// Every section takes CS101, MA101 and the two-slot CS101L lab.
fn department_of(sections: u32) -> Catalog {
    let mut catalog = Catalog::new()
        .with_department(1, "CSE")
        .with_time_slots(TimeSlot::default_week())
        .with_room(Room::new(1, "R-101", 60))
        .with_room(Room::new(2, "R-102", 60))
        .with_room(Room::new(3, "LAB-1", 30).with_type(RoomType::Lab));
    for i in 1..=4 {
        catalog = catalog.with_instructor(Instructor::new(i, format!("Instructor {i}")));
    }
    for s in 1..=sections {
        catalog = catalog.with_section(Section::new(s, format!("CSE-1{s}"), 1, 1, 1));
    }
    catalog
        .with_course(Course::new(1, "CS101").with_instructors([1]).with_sections(1..=sections))
        .with_course(Course::new(2, "MA101").with_instructors([2, 3]).with_sections(1..=sections))
        .with_course(
            Course::new(3, "CS101L")
                .with_type(CourseType::Lab)
                .with_duration(2)
                .with_sessions_per_week(1)
                .with_instructors([4])
                .with_sections(1..=sections),
        )
}

#[test]
fn same_seed_same_timetable() {
    let a = TimetableScheduler::run(&department(), &request(99)).unwrap();
    let b = TimetableScheduler::run(&department(), &request(99)).unwrap();

    assert_eq!(a.placements, b.placements);
    assert_eq!(a.fitness_history, b.fitness_history);
    assert_eq!(a.termination, b.termination);
    assert_eq!(a.timetable, b.timetable);
}

#[test]
fn department_run_is_well_formed() {
    let outcome = TimetableScheduler::run(&department(), &request(5)).unwrap();

    assert_eq!(outcome.placements.len(), 21);
    assert!(outcome.generations <= 500);
    for window in outcome.fitness_history.windows(2) {
        assert!(window[1] >= window[0]);
    }
    for placement in &outcome.placements {
        match (placement.requirement.duration, placement.assignment.time) {
            (2, Some(TimeAssignment::Consecutive(..))) | (1, Some(TimeAssignment::Single(_))) => {}
            other => panic!("{}: unexpected time {:?}", placement.requirement.id, other),
        }
    }
    if outcome.termination == Some(Termination::Converged) {
        assert!(outcome.fitness >= 90.0);
        assert!(outcome.is_fully_assigned());
    }
}

#[test]
fn unassignable_input_still_terminates() {
    // No instructors, rooms or slots at all.
    let catalog = Catalog::new()
        .with_department(1, "CSE")
        .with_section(Section::new(1, "CSE-1A", 1, 1, 1))
        .with_course(Course::new(1, "CS101").with_sections([1]));
    let req = RunRequest::new("empty", CatalogFilter::new([1], [1], 1)).with_config(
        TimetableConfig::default().with_ga(
            GaConfig::default()
                .with_seed(3)
                .with_population_size(10)
                .with_stagnation_limit(5),
        ),
    );

    let outcome = TimetableScheduler::run(&catalog, &req).unwrap();

    assert_eq!(outcome.fitness, 0.0);
    assert_eq!(outcome.termination, Some(Termination::Stalled));
    // Nothing ever scores above zero, so generation 0 is already a stall.
    assert_eq!(outcome.generations, 5);
    assert_eq!(outcome.report.unassigned, 3);
    assert!(!outcome.is_fully_assigned());
    assert!(outcome.timetable.classes.is_empty());
    assert_eq!(outcome.timetable.skipped, 3);
}

#[test]
fn lab_needs_consecutive_pair() {
    // Two slots with lunch between them: no consecutive pair exists.
    let catalog = one_of_each()
        .with_time_slot(
            TimeSlot::new(
                SlotId(2),
                Weekday::Monday,
                ClockTime::hm(13, 0),
                ClockTime::hm(14, 0),
            )
            .unwrap()
            .as_break(),
        )
        .with_course(
            Course::new(1, "CS101L")
                .with_duration(2)
                .with_sessions_per_week(1)
                .with_sections([1]),
        );
    let req = RunRequest::new("lab", CatalogFilter::new([1], [1], 1)).with_config(
        TimetableConfig::default().with_ga(
            GaConfig::default()
                .with_seed(4)
                .with_population_size(8)
                .with_max_generations(15),
        ),
    );

    let outcome = TimetableScheduler::run(&catalog, &req).unwrap();

    assert_eq!(outcome.placements[0].assignment.time, None);
    assert_eq!(outcome.termination, Some(Termination::Exhausted));
    assert_eq!(outcome.generations, 15);
}

#[test]
fn empty_filter_skips_optimization() {
    let req = RunRequest::new("nobody", CatalogFilter::new([2], [1], 1));
    let outcome = TimetableScheduler::run(&department(), &req).unwrap();

    assert_eq!(outcome.termination, None);
    assert_eq!(outcome.fitness, 0.0);
    assert!(outcome.placements.is_empty());
}

#[test]
fn cancellation_returns_best_so_far() {
    let cancel = Arc::new(AtomicBool::new(true));
    let req = RunRequest::new("cancel", CatalogFilter::new([1], [1], 1)).with_config(
        TimetableConfig::default().with_ga(
            GaConfig::default()
                .with_seed(6)
                .with_target_fitness(100.0)
                .with_stagnation_limit(0),
        ),
    );

    let outcome =
        TimetableScheduler::run_with_cancel(&department(), &req, Some(cancel)).unwrap();

    assert_eq!(outcome.generations, 1);
    assert_eq!(outcome.placements.len(), 21);
    assert!(matches!(
        outcome.termination,
        Some(Termination::Cancelled) | Some(Termination::Converged)
    ));
}

#[test]
fn time_limit_stops_long_run() {
    let req = RunRequest::new("timed", CatalogFilter::new([1], [1], 1)).with_config(
        TimetableConfig::default().with_ga(
            GaConfig::default()
                .with_seed(8)
                .with_max_generations(1_000_000)
                .with_stagnation_limit(0)
                .with_target_fitness(100.0)
                .with_time_limit_ms(50),
        ),
    );

    // Twelve sections keep one instructor busy for 36 of 42 slots: no
    // conflict-free timetable turns up within the limit.
    let outcome = TimetableScheduler::run(&department_of(12), &req).unwrap();

    assert_eq!(outcome.termination, Some(Termination::TimeLimit));
    assert!(outcome.generations < 1_000_000);
    assert_eq!(outcome.fitness_history.len(), outcome.generations);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_evaluation_matches_sequential() {
    let run = |parallel: bool| {
        let req = RunRequest::new("par", CatalogFilter::new([1], [1], 1)).with_config(
            TimetableConfig::default().with_ga(
                GaConfig::default()
                    .with_seed(9)
                    .with_max_generations(80)
                    .with_stagnation_limit(0)
                    .with_target_fitness(100.0)
                    .with_parallel(parallel),
            ),
        );
        TimetableScheduler::run(&department_of(12), &req).unwrap()
    };

    let sequential = run(false);
    let parallel = run(true);

    assert!(sequential.generations > 1);
    assert_eq!(parallel.placements, sequential.placements);
    assert_eq!(parallel.fitness_history, sequential.fitness_history);
    assert_eq!(parallel.generations, sequential.generations);
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn request_and_outcome_round_trip() {
    use u_timetable::timetable::Timetable;

    let req = request(7);
    let json = serde_json::to_string(&req).unwrap();
    let back: RunRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, req);

    // Missing config falls back to defaults.
    let minimal: RunRequest = serde_json::from_str(
        r#"{"name":"t","filter":{"departments":[1],"years":[1],"semester":1}}"#,
    )
    .unwrap();
    assert_eq!(minimal.config, TimetableConfig::default());

    let outcome = TimetableScheduler::run(&department(), &req).unwrap();
    let json = serde_json::to_string(&outcome.timetable).unwrap();
    let back: Timetable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outcome.timetable);
}
