//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};

use class_scheduler::adapters::memory::SeedData;
use class_scheduler::app::Ports;
use class_scheduler::domain::allocation::Allocation;
use class_scheduler::domain::calendar::{CalendarEntry, CalendarEntryType};
use class_scheduler::domain::catalog::{Board, Catalog, SchoolClass, Student, Subject, Teacher};
use class_scheduler::domain::foundation::{
    BoardId, ClassId, CommandMetadata, StudentId, SubjectId, TeacherId, Timestamp, UserId,
};

/// One board, one class with three subjects (English has no allocated
/// teacher), two teachers, two students and a holiday on 2026-01-26.
pub struct School {
    pub ports: Ports,
    pub class_5b: ClassId,
    pub science: SubjectId,
    pub maths: SubjectId,
    pub english: SubjectId,
    pub asha: TeacherId,
    pub ravi: TeacherId,
    pub students: Vec<StudentId>,
}

impl School {
    pub fn new() -> Self {
        let board = BoardId::new();
        let class_5b = ClassId::new();
        let science = SubjectId::new();
        let maths = SubjectId::new();
        let english = SubjectId::new();
        let asha = TeacherId::new();
        let ravi = TeacherId::new();
        let students: Vec<Student> = ["Meera", "Kabir"]
            .into_iter()
            .map(|name| Student {
                id: StudentId::new(),
                class_id: class_5b,
                name: name.to_string(),
            })
            .collect();

        let seed = SeedData {
            catalog: Catalog {
                boards: vec![Board { id: board, name: "CBSE".into() }],
                classes: vec![SchoolClass {
                    id: class_5b,
                    board_id: board,
                    name: "Class 5".into(),
                    section: Some("B".into()),
                }],
                subjects: vec![
                    Subject { id: science, class_id: class_5b, name: "Science".into() },
                    Subject { id: maths, class_id: class_5b, name: "Maths".into() },
                    Subject { id: english, class_id: class_5b, name: "English".into() },
                ],
                chapters: vec![],
                topics: vec![],
                teachers: vec![
                    Teacher { id: asha, name: "Asha Rao".into() },
                    Teacher { id: ravi, name: "Ravi Kumar".into() },
                ],
            },
            allocations: vec![
                Allocation::new(asha, class_5b, science),
                Allocation::new(ravi, class_5b, maths),
            ],
            calendar: vec![CalendarEntry::new(
                NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
                None,
                CalendarEntryType::Holiday,
                "Republic Day",
            )
            .unwrap()],
            students: students.clone(),
        };

        Self {
            ports: Ports::in_memory(seed),
            class_5b,
            science,
            maths,
            english,
            asha,
            ravi,
            students: students.into_iter().map(|s| s.id).collect(),
        }
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap())
}

pub fn admin() -> CommandMetadata {
    CommandMetadata::new(UserId::new("admin-1").unwrap()).with_correlation_id("it-correlation")
}
