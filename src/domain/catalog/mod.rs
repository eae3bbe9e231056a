//! Read-only view of the school catalog.
//!
//! Boards, classes, subjects, chapters, topics and teachers are maintained
//! elsewhere; this module only resolves names to ids and checks the
//! subject → chapter → topic hierarchy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BoardId, ChapterId, ClassId, StudentId, SubjectId, TeacherId, TopicId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
}

/// A class such as "Class 5" with optional section "B".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: ClassId,
    pub board_id: BoardId,
    pub name: String,
    pub section: Option<String>,
}

impl SchoolClass {
    /// Name and section joined without a separator ("Class 5B").
    pub fn display_name(&self) -> String {
        match &self.section {
            Some(section) => format!("{}{}", self.name, section),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub class_id: ClassId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub subject_id: SubjectId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub chapter_id: ChapterId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub class_id: ClassId,
    pub name: String,
}

/// Names that make up a generated session title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleLabels {
    pub board_name: String,
    pub class_name: String,
    pub section: Option<String>,
    pub subject_name: String,
}

/// Point-in-time copy of the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub boards: Vec<Board>,
    pub classes: Vec<SchoolClass>,
    pub subjects: Vec<Subject>,
    pub chapters: Vec<Chapter>,
    pub topics: Vec<Topic>,
    pub teachers: Vec<Teacher>,
}

/// Case-insensitive, whitespace-collapsed comparison key.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Catalog {
    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    pub fn class(&self, id: &ClassId) -> Option<&SchoolClass> {
        self.classes.iter().find(|c| &c.id == id)
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    pub fn teacher(&self, id: &TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| &t.id == id)
    }

    pub fn find_board(&self, name: &str) -> Option<&Board> {
        let key = normalize_name(name);
        self.boards.iter().find(|b| normalize_name(&b.name) == key)
    }

    /// Finds a class of the board by its display name ("Class 5B").
    pub fn find_class(&self, board_id: &BoardId, display_name: &str) -> Option<&SchoolClass> {
        let key = normalize_name(display_name);
        self.classes
            .iter()
            .filter(|c| &c.board_id == board_id)
            .find(|c| normalize_name(&c.display_name()) == key)
    }

    pub fn find_subject(&self, class_id: &ClassId, name: &str) -> Option<&Subject> {
        let key = normalize_name(name);
        self.subjects
            .iter()
            .filter(|s| &s.class_id == class_id)
            .find(|s| normalize_name(&s.name) == key)
    }

    pub fn find_teacher(&self, name: &str) -> Option<&Teacher> {
        let key = normalize_name(name);
        self.teachers.iter().find(|t| normalize_name(&t.name) == key)
    }

    pub fn classes_of(&self, board_id: &BoardId) -> impl Iterator<Item = &SchoolClass> {
        let board_id = *board_id;
        self.classes.iter().filter(move |c| c.board_id == board_id)
    }

    pub fn subjects_of(&self, class_id: &ClassId) -> impl Iterator<Item = &Subject> {
        let class_id = *class_id;
        self.subjects.iter().filter(move |s| s.class_id == class_id)
    }

    pub fn subject_belongs_to_class(&self, subject_id: &SubjectId, class_id: &ClassId) -> bool {
        self.subject(subject_id)
            .is_some_and(|s| &s.class_id == class_id)
    }

    pub fn chapter_belongs_to_subject(&self, chapter_id: &ChapterId, subject_id: &SubjectId) -> bool {
        self.chapters
            .iter()
            .any(|c| &c.id == chapter_id && &c.subject_id == subject_id)
    }

    pub fn topic_belongs_to_chapter(&self, topic_id: &TopicId, chapter_id: &ChapterId) -> bool {
        self.topics
            .iter()
            .any(|t| &t.id == topic_id && &t.chapter_id == chapter_id)
    }

    /// Board, class and subject names for a title, if all three resolve.
    pub fn title_labels(&self, class_id: &ClassId, subject_id: &SubjectId) -> Option<TitleLabels> {
        let class = self.class(class_id)?;
        let board = self.board(&class.board_id)?;
        let subject = self.subject(subject_id)?;
        Some(TitleLabels {
            board_name: board.name.clone(),
            class_name: class.name.clone(),
            section: class.section.clone(),
            subject_name: subject.name.clone(),
        })
    }
}
