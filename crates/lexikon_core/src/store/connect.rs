//! Connect/disconnect pairs for every relationship kind.
//!
//! # Invariants
//! - `connect_*` requires both endpoints to exist and writes both sides.
//! - Connecting an already-connected pair is a no-op.
//! - `disconnect_*` never fails; it fully removes the pair from both sides
//!   so a later reconnect starts from a clean state.
//! - Self-links (entry to itself) are ignored.

use super::{Database, StoreResult};
use crate::model::entity::EntityRef;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, LanguageId, NoteId, UsageId};
use crate::model::relationships::{push_unique, remove_first, NoteTarget};
use log::debug;

/// Whether an entry-to-entry link is mirrored on the other entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Both entries list each other.
    #[default]
    Bidirectional,
    /// Only the owning entry lists the other one.
    Unidirectional,
}

impl Database {
    /// Assigns `language` to `entry` (appended to the entry's language order).
    pub fn connect_language(&mut self, entry: EntryId, language: &LanguageId) -> StoreResult<()> {
        self.require(EntityRef::Entry(entry))?;
        self.require(EntityRef::Language(language.clone()))?;

        push_unique(&mut self.entry_links_mut(entry).languages, language.clone());
        self.language_links_mut(language).entries.insert(entry);
        log_edge("connect", "entry_language");
        Ok(())
    }

    pub fn disconnect_language(&mut self, entry: EntryId, language: &LanguageId) {
        if let Some(links) = self.entry_links.get_mut(&entry) {
            remove_first(&mut links.languages, language);
        }
        if let Some(links) = self.language_links.get_mut(language) {
            links.entries.remove(&entry);
        }
        log_edge("disconnect", "entry_language");
    }

    /// Records `root` as a root of `to_entry`; `to_entry` becomes derived
    /// from `root`.
    pub fn connect_root(&mut self, root: EntryId, to_entry: EntryId) -> StoreResult<()> {
        self.require(EntityRef::Entry(root))?;
        self.require(EntityRef::Entry(to_entry))?;
        if root == to_entry {
            return Ok(());
        }

        push_unique(&mut self.entry_links_mut(to_entry).roots, root);
        self.entry_links_mut(root).derived.insert(to_entry);
        log_edge("connect", "entry_root");
        Ok(())
    }

    pub fn disconnect_root(&mut self, root: EntryId, from_entry: EntryId) {
        if let Some(links) = self.entry_links.get_mut(&from_entry) {
            remove_first(&mut links.roots, &root);
        }
        if let Some(links) = self.entry_links.get_mut(&root) {
            links.derived.remove(&from_entry);
        }
        log_edge("disconnect", "entry_root");
    }

    /// Adds `translation` to the translations of `to_entry`.
    ///
    /// With `Direction::Bidirectional` the reverse translation is recorded
    /// as well. Every `translations` edge is mirrored in the target's
    /// `back_translations` regardless of direction.
    pub fn connect_translation(
        &mut self,
        translation: EntryId,
        to_entry: EntryId,
        direction: Direction,
    ) -> StoreResult<()> {
        self.require(EntityRef::Entry(translation))?;
        self.require(EntityRef::Entry(to_entry))?;
        if translation == to_entry {
            return Ok(());
        }

        self.link_translation(to_entry, translation);
        if direction == Direction::Bidirectional {
            self.link_translation(translation, to_entry);
        }
        log_edge("connect", "entry_translation");
        Ok(())
    }

    pub fn disconnect_translation(
        &mut self,
        translation: EntryId,
        from_entry: EntryId,
        direction: Direction,
    ) {
        self.unlink_translation(from_entry, translation);
        if direction == Direction::Bidirectional {
            self.unlink_translation(translation, from_entry);
        }
        log_edge("disconnect", "entry_translation");
    }

    /// Cross-references two entries; symmetric unless `Unidirectional`.
    pub fn connect_see_also(
        &mut self,
        entry: EntryId,
        other: EntryId,
        direction: Direction,
    ) -> StoreResult<()> {
        self.require(EntityRef::Entry(entry))?;
        self.require(EntityRef::Entry(other))?;
        if entry == other {
            return Ok(());
        }

        push_unique(&mut self.entry_links_mut(entry).see_also, other);
        if direction == Direction::Bidirectional {
            push_unique(&mut self.entry_links_mut(other).see_also, entry);
        }
        log_edge("connect", "entry_see_also");
        Ok(())
    }

    pub fn disconnect_see_also(&mut self, entry: EntryId, other: EntryId, direction: Direction) {
        if let Some(links) = self.entry_links.get_mut(&entry) {
            remove_first(&mut links.see_also, &other);
        }
        if direction == Direction::Bidirectional {
            if let Some(links) = self.entry_links.get_mut(&other) {
                remove_first(&mut links.see_also, &entry);
            }
        }
        log_edge("disconnect", "entry_see_also");
    }

    /// Attaches a usage example to an entry.
    pub fn connect_usage(&mut self, usage: UsageId, to_entry: EntryId) -> StoreResult<()> {
        self.require(EntityRef::Usage(usage))?;
        self.require(EntityRef::Entry(to_entry))?;

        push_unique(&mut self.entry_links_mut(to_entry).usages, usage);
        self.usage_links_mut(usage).uses.insert(to_entry);
        log_edge("connect", "entry_usage");
        Ok(())
    }

    pub fn disconnect_usage(&mut self, usage: UsageId, from_entry: EntryId) {
        if let Some(links) = self.entry_links.get_mut(&from_entry) {
            remove_first(&mut links.usages, &usage);
        }
        if let Some(links) = self.usage_links.get_mut(&usage) {
            links.uses.remove(&from_entry);
        }
        log_edge("disconnect", "entry_usage");
    }

    /// Tags an entry with a keyword; the entry is appended to the keyword's
    /// match order.
    pub fn connect_keyword(&mut self, keyword: KeywordId, to_entry: EntryId) -> StoreResult<()> {
        self.require(EntityRef::Keyword(keyword))?;
        self.require(EntityRef::Entry(to_entry))?;

        self.entry_links_mut(to_entry).keywords.insert(keyword);
        push_unique(&mut self.keyword_links_mut(keyword).matches, to_entry);
        log_edge("connect", "entry_keyword");
        Ok(())
    }

    pub fn disconnect_keyword(&mut self, keyword: KeywordId, from_entry: EntryId) {
        if let Some(links) = self.entry_links.get_mut(&from_entry) {
            links.keywords.remove(&keyword);
        }
        if let Some(links) = self.keyword_links.get_mut(&keyword) {
            remove_first(&mut links.matches, &from_entry);
        }
        log_edge("disconnect", "entry_keyword");
    }

    /// Attaches a note to an entry or usage.
    ///
    /// A note has at most one owner: if it is attached elsewhere it is
    /// detached from the previous owner first.
    pub fn connect_note(&mut self, note: NoteId, target: NoteTarget) -> StoreResult<()> {
        self.require(EntityRef::Note(note))?;
        self.require(target.into())?;

        match self.target_of_note(note) {
            Some(current) if current == target => return Ok(()),
            Some(previous) => self.disconnect_note(note, previous),
            None => {}
        }

        match target {
            NoteTarget::Entry(entry) => {
                push_unique(&mut self.entry_links_mut(entry).notes, note);
            }
            NoteTarget::Usage(usage) => {
                push_unique(&mut self.usage_links_mut(usage).notes, note);
            }
        }
        self.note_links_mut(note).target = Some(target);
        log_edge("connect", "note_target");
        Ok(())
    }

    pub fn disconnect_note(&mut self, note: NoteId, from: NoteTarget) {
        match from {
            NoteTarget::Entry(entry) => {
                if let Some(links) = self.entry_links.get_mut(&entry) {
                    remove_first(&mut links.notes, &note);
                }
            }
            NoteTarget::Usage(usage) => {
                if let Some(links) = self.usage_links.get_mut(&usage) {
                    remove_first(&mut links.notes, &note);
                }
            }
        }
        if let Some(links) = self.note_links.get_mut(&note) {
            if links.target == Some(from) {
                links.target = None;
            }
        }
        log_edge("disconnect", "note_target");
    }

    /// Tags a usage with a language.
    pub fn connect_usage_language(
        &mut self,
        usage: UsageId,
        language: &LanguageId,
    ) -> StoreResult<()> {
        self.require(EntityRef::Usage(usage))?;
        self.require(EntityRef::Language(language.clone()))?;

        push_unique(&mut self.usage_links_mut(usage).languages, language.clone());
        self.language_links_mut(language).usages.insert(usage);
        log_edge("connect", "usage_language");
        Ok(())
    }

    pub fn disconnect_usage_language(&mut self, usage: UsageId, language: &LanguageId) {
        if let Some(links) = self.usage_links.get_mut(&usage) {
            remove_first(&mut links.languages, language);
        }
        if let Some(links) = self.language_links.get_mut(language) {
            links.usages.remove(&usage);
        }
        log_edge("disconnect", "usage_language");
    }

    /// Appends `entry` to the end of `collection`.
    pub fn connect_entry_collection(
        &mut self,
        entry: EntryId,
        collection: EntryCollectionId,
    ) -> StoreResult<()> {
        self.require(EntityRef::Entry(entry))?;
        self.require(EntityRef::EntryCollection(collection))?;

        self.entry_links_mut(entry).entry_collections.insert(collection);
        push_unique(&mut self.entry_collection_links_mut(collection).entries, entry);
        log_edge("connect", "entry_collection");
        Ok(())
    }

    pub fn disconnect_entry_collection(&mut self, entry: EntryId, collection: EntryCollectionId) {
        if let Some(links) = self.entry_links.get_mut(&entry) {
            links.entry_collections.remove(&collection);
        }
        if let Some(links) = self.entry_collection_links.get_mut(&collection) {
            remove_first(&mut links.entries, &entry);
        }
        log_edge("disconnect", "entry_collection");
    }

    fn link_translation(&mut self, from: EntryId, to: EntryId) {
        push_unique(&mut self.entry_links_mut(from).translations, to);
        self.entry_links_mut(to).back_translations.insert(from);
    }

    fn unlink_translation(&mut self, from: EntryId, to: EntryId) {
        if let Some(links) = self.entry_links.get_mut(&from) {
            remove_first(&mut links.translations, &to);
        }
        if let Some(links) = self.entry_links.get_mut(&to) {
            links.back_translations.remove(&from);
        }
    }
}

fn log_edge(operation: &str, relation: &str) {
    debug!("event=relationship_{operation} module=store status=ok relation={relation}");
}
