//! Notes attachable to any record kind.
//!
//! A note refers to its subject through a [`NoteTarget`] (kind plus id). The
//! kind selects which table the id is looked up in; there is no foreign key,
//! so [`resolve_target`] checks the subject exists before a note is written.

use crate::{
    entities::{Bb, EntityKind, Machine, Note, Rubric, Spare, bb, machine, note, rubric, spare},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::debug;

/// Tagged reference to a record of any supported kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteTarget {
    /// Which table the record lives in
    pub kind: EntityKind,
    /// Primary key within that table
    pub id: i64,
}

impl NoteTarget {
    /// Builds a reference to record `id` of the given kind.
    #[must_use]
    pub const fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

/// The record a [`NoteTarget`] resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSubject {
    Machine(machine::Model),
    Spare(spare::Model),
    Rubric(rubric::Model),
    Bb(bb::Model),
}

impl NoteSubject {
    /// Human-readable name of the subject (its name, or title for bulletins).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Machine(machine) => &machine.name,
            Self::Spare(spare) => &spare.name,
            Self::Rubric(rubric) => &rubric.name,
            Self::Bb(bb) => &bb.title,
        }
    }
}

/// Looks up the record a target refers to.
///
/// # Errors
/// Returns [`Error::NoteTargetNotFound`] if no such record exists.
pub async fn resolve_target<C: ConnectionTrait>(db: &C, target: NoteTarget) -> Result<NoteSubject> {
    let subject = match target.kind {
        EntityKind::Machine => Machine::find_by_id(target.id)
            .one(db)
            .await?
            .map(NoteSubject::Machine),
        EntityKind::Spare => Spare::find_by_id(target.id)
            .one(db)
            .await?
            .map(NoteSubject::Spare),
        EntityKind::Rubric => Rubric::find_by_id(target.id)
            .one(db)
            .await?
            .map(NoteSubject::Rubric),
        EntityKind::Bb => Bb::find_by_id(target.id).one(db).await?.map(NoteSubject::Bb),
    };

    subject.ok_or(Error::NoteTargetNotFound {
        kind: target.kind,
        id: target.id,
    })
}

/// Attaches a note to an existing record.
///
/// # Errors
/// Returns an error if the content is blank, the target does not exist, or the
/// insert fails.
pub async fn add_note(
    db: &DatabaseConnection,
    target: NoteTarget,
    content: &str,
) -> Result<note::Model> {
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::validation("Note content cannot be empty"));
    }

    let subject = resolve_target(db, target).await?;

    let note = note::ActiveModel {
        content: Set(content.to_string()),
        entity_kind: Set(target.kind),
        entity_id: Set(target.id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!("Attached note {} to {} '{}'", note.id, target.kind, subject.label());
    Ok(note)
}

/// Returns the notes attached to a record, oldest first.
pub async fn get_notes_for<C: ConnectionTrait>(db: &C, target: NoteTarget) -> Result<Vec<note::Model>> {
    Note::find()
        .filter(note::Column::EntityKind.eq(target.kind))
        .filter(note::Column::EntityId.eq(target.id))
        .order_by_asc(note::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes every note attached to a record and returns how many were removed.
pub async fn delete_notes_for<C: ConnectionTrait>(db: &C, target: NoteTarget) -> Result<u64> {
    let result = Note::delete_many()
        .filter(note::Column::EntityKind.eq(target.kind))
        .filter(note::Column::EntityId.eq(target.id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
