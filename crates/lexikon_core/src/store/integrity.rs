//! Referential-integrity and reciprocity audit.
//!
//! Mutations keep these invariants by construction; the audit exists for
//! data that did not come through them (snapshot import) and for tests.

use super::Database;
use crate::model::entity::EntityRef;
use crate::model::relationships::NoteTarget;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// One broken invariant found by `Database::integrity_violations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// `owner.relation` names an entity that does not exist.
    DanglingReference {
        owner: EntityRef,
        relation: &'static str,
        target: EntityRef,
    },
    /// `owner.relation` names `target`, but `target` does not link back.
    MissingMirror {
        owner: EntityRef,
        relation: &'static str,
        target: EntityRef,
    },
    /// An ordered list holds the same id more than once.
    DuplicateInList {
        owner: EntityRef,
        relation: &'static str,
    },
    /// A relationship record exists for an id with no record.
    OrphanRelationships(EntityRef),
}

impl Display for IntegrityViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingReference {
                owner,
                relation,
                target,
            } => write!(f, "{owner}.{relation} references missing {target}"),
            Self::MissingMirror {
                owner,
                relation,
                target,
            } => write!(f, "{owner}.{relation} -> {target} has no reciprocal link"),
            Self::DuplicateInList { owner, relation } => {
                write!(f, "{owner}.{relation} contains duplicate ids")
            }
            Self::OrphanRelationships(owner) => {
                write!(f, "relationships stored for missing {owner}")
            }
        }
    }
}

impl Database {
    /// Lists every integrity violation; empty when the store is consistent.
    pub fn integrity_violations(&self) -> Vec<IntegrityViolation> {
        let mut audit = Audit {
            db: self,
            violations: Vec::new(),
        };
        audit.orphans();
        audit.entries();
        audit.languages();
        audit.keywords();
        audit.notes();
        audit.usages();
        audit.entry_collections();
        audit.violations
    }
}

struct Audit<'db> {
    db: &'db Database,
    violations: Vec<IntegrityViolation>,
}

impl Audit<'_> {
    fn orphans(&mut self) {
        let db = self.db;
        let orphaned = db
            .entry_links
            .keys()
            .map(|id| EntityRef::Entry(*id))
            .chain(db.language_links.keys().cloned().map(EntityRef::Language))
            .chain(db.keyword_links.keys().map(|id| EntityRef::Keyword(*id)))
            .chain(db.note_links.keys().map(|id| EntityRef::Note(*id)))
            .chain(db.usage_links.keys().map(|id| EntityRef::Usage(*id)))
            .chain(
                db.entry_collection_links
                    .keys()
                    .map(|id| EntityRef::EntryCollection(*id)),
            )
            .filter(|owner| !db.contains(owner));
        self.violations
            .extend(orphaned.map(IntegrityViolation::OrphanRelationships));
    }

    fn entries(&mut self) {
        let db = self.db;
        for (id, links) in &db.entry_links {
            let owner = EntityRef::Entry(*id);
            self.unique(&owner, "languages", &links.languages);
            self.unique(&owner, "roots", &links.roots);
            self.unique(&owner, "translations", &links.translations);
            self.unique(&owner, "see_also", &links.see_also);
            self.unique(&owner, "usages", &links.usages);
            self.unique(&owner, "notes", &links.notes);

            for language in &links.languages {
                let mirrored = db
                    .language_links
                    .get(language)
                    .is_some_and(|other| other.entries.contains(id));
                self.edge(&owner, "languages", language.clone().into(), mirrored);
            }
            for root in &links.roots {
                let mirrored = db
                    .entry_links
                    .get(root)
                    .is_some_and(|other| other.derived.contains(id));
                self.edge(&owner, "roots", (*root).into(), mirrored);
            }
            for derived in &links.derived {
                let mirrored = db
                    .entry_links
                    .get(derived)
                    .is_some_and(|other| other.roots.contains(id));
                self.edge(&owner, "derived", (*derived).into(), mirrored);
            }
            for translation in &links.translations {
                let mirrored = db
                    .entry_links
                    .get(translation)
                    .is_some_and(|other| other.back_translations.contains(id));
                self.edge(&owner, "translations", (*translation).into(), mirrored);
            }
            for source in &links.back_translations {
                let mirrored = db
                    .entry_links
                    .get(source)
                    .is_some_and(|other| other.translations.contains(id));
                self.edge(&owner, "back_translations", (*source).into(), mirrored);
            }
            // see_also may be one-way by request; only existence is checked.
            for other in &links.see_also {
                self.edge(&owner, "see_also", (*other).into(), true);
            }
            for usage in &links.usages {
                let mirrored = db
                    .usage_links
                    .get(usage)
                    .is_some_and(|other| other.uses.contains(id));
                self.edge(&owner, "usages", (*usage).into(), mirrored);
            }
            for keyword in &links.keywords {
                let mirrored = db
                    .keyword_links
                    .get(keyword)
                    .is_some_and(|other| other.matches.contains(id));
                self.edge(&owner, "keywords", (*keyword).into(), mirrored);
            }
            for note in &links.notes {
                let mirrored = db
                    .note_links
                    .get(note)
                    .is_some_and(|other| other.target == Some(NoteTarget::Entry(*id)));
                self.edge(&owner, "notes", (*note).into(), mirrored);
            }
            for collection in &links.entry_collections {
                let mirrored = db
                    .entry_collection_links
                    .get(collection)
                    .is_some_and(|other| other.entries.contains(id));
                self.edge(&owner, "entry_collections", (*collection).into(), mirrored);
            }
        }
    }

    fn languages(&mut self) {
        let db = self.db;
        for (id, links) in &db.language_links {
            let owner = EntityRef::Language(id.clone());
            for entry in &links.entries {
                let mirrored = db
                    .entry_links
                    .get(entry)
                    .is_some_and(|other| other.languages.contains(id));
                self.edge(&owner, "entries", (*entry).into(), mirrored);
            }
            for usage in &links.usages {
                let mirrored = db
                    .usage_links
                    .get(usage)
                    .is_some_and(|other| other.languages.contains(id));
                self.edge(&owner, "usages", (*usage).into(), mirrored);
            }
        }
    }

    fn keywords(&mut self) {
        let db = self.db;
        for (id, links) in &db.keyword_links {
            let owner = EntityRef::Keyword(*id);
            self.unique(&owner, "matches", &links.matches);
            for entry in &links.matches {
                let mirrored = db
                    .entry_links
                    .get(entry)
                    .is_some_and(|other| other.keywords.contains(id));
                self.edge(&owner, "matches", (*entry).into(), mirrored);
            }
        }
    }

    fn notes(&mut self) {
        let db = self.db;
        for (id, links) in &db.note_links {
            let owner = EntityRef::Note(*id);
            match links.target {
                Some(NoteTarget::Entry(entry)) => {
                    let mirrored = db
                        .entry_links
                        .get(&entry)
                        .is_some_and(|other| other.notes.contains(id));
                    self.edge(&owner, "target", entry.into(), mirrored);
                }
                Some(NoteTarget::Usage(usage)) => {
                    let mirrored = db
                        .usage_links
                        .get(&usage)
                        .is_some_and(|other| other.notes.contains(id));
                    self.edge(&owner, "target", usage.into(), mirrored);
                }
                None => {}
            }
        }
    }

    fn usages(&mut self) {
        let db = self.db;
        for (id, links) in &db.usage_links {
            let owner = EntityRef::Usage(*id);
            self.unique(&owner, "languages", &links.languages);
            self.unique(&owner, "notes", &links.notes);
            for language in &links.languages {
                let mirrored = db
                    .language_links
                    .get(language)
                    .is_some_and(|other| other.usages.contains(id));
                self.edge(&owner, "languages", language.clone().into(), mirrored);
            }
            for note in &links.notes {
                let mirrored = db
                    .note_links
                    .get(note)
                    .is_some_and(|other| other.target == Some(NoteTarget::Usage(*id)));
                self.edge(&owner, "notes", (*note).into(), mirrored);
            }
            for entry in &links.uses {
                let mirrored = db
                    .entry_links
                    .get(entry)
                    .is_some_and(|other| other.usages.contains(id));
                self.edge(&owner, "uses", (*entry).into(), mirrored);
            }
        }
    }

    fn entry_collections(&mut self) {
        let db = self.db;
        for (id, links) in &db.entry_collection_links {
            let owner = EntityRef::EntryCollection(*id);
            self.unique(&owner, "entries", &links.entries);
            for entry in &links.entries {
                let mirrored = db
                    .entry_links
                    .get(entry)
                    .is_some_and(|other| other.entry_collections.contains(id));
                self.edge(&owner, "entries", (*entry).into(), mirrored);
            }
        }
    }

    fn edge(
        &mut self,
        owner: &EntityRef,
        relation: &'static str,
        target: EntityRef,
        mirrored: bool,
    ) {
        if !self.db.contains(&target) {
            self.violations.push(IntegrityViolation::DanglingReference {
                owner: owner.clone(),
                relation,
                target,
            });
        } else if !mirrored {
            self.violations.push(IntegrityViolation::MissingMirror {
                owner: owner.clone(),
                relation,
                target,
            });
        }
    }

    fn unique<T: Eq + Hash>(&mut self, owner: &EntityRef, relation: &'static str, list: &[T]) {
        let mut seen = HashSet::with_capacity(list.len());
        if !list.iter().all(|item| seen.insert(item)) {
            self.violations.push(IntegrityViolation::DuplicateInList {
                owner: owner.clone(),
                relation,
            });
        }
    }
}
