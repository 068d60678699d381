use crate::assets::decode::is_image_mime;
use crate::assets::logo_storage::{LogoStorage, MemoryLogoStorage};
use crate::assets::object_url::ObjectUrlRegistry;
use crate::state::active::ActiveDesign;
use crate::state::card::{CardState, ColorSlot, Design, GradientType, LogoPosition, Tab};
use crate::state::logo::{LogoFile, LogoRef};
use crate::state::templates::template;

/// One facet of [`CardState`] that a mutation touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateChange {
    /// `tab`.
    Tab,
    /// `custom_design`.
    Design,
    /// `custom_gradient_type`.
    GradientType,
    /// One color field.
    Color(ColorSlot),
    /// `selected_template_id`.
    Template,
    /// `name`.
    Name,
    /// `logo`.
    Logo,
    /// `logo_position`.
    LogoPosition,
}

/// Facets changed by one store operation, in write order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet(Vec<StateChange>);

impl ChangeSet {
    fn push(&mut self, change: StateChange) {
        if !self.0.contains(&change) {
            self.0.push(change);
        }
    }

    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `change` is part of the set.
    pub fn contains(&self, change: StateChange) -> bool {
        self.0.contains(&change)
    }

    /// Changes in write order.
    pub fn iter(&self) -> impl Iterator<Item = StateChange> + '_ {
        self.0.iter().copied()
    }

    /// Append another set, keeping first-write order.
    pub fn merge(&mut self, other: ChangeSet) {
        for change in other.0 {
            self.push(change);
        }
    }
}

/// Observer invoked after every non-empty change set.
pub type Subscriber = Box<dyn FnMut(&ChangeSet, &CardState)>;

/// Single source of truth for the card configuration.
///
/// Owns the object URLs of uploaded logos: a replacement revokes the previous URL before the
/// new one is assigned, so at most one URL is ever live.
pub struct CardStore {
    state: CardState,
    urls: ObjectUrlRegistry,
    storage: Box<dyn LogoStorage>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for CardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStore")
            .field("state", &self.state)
            .field("urls", &self.urls)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new(Box::new(MemoryLogoStorage::default()))
    }
}

impl CardStore {
    /// Fresh default state backed by `storage` for the persisted logo.
    pub fn new(storage: Box<dyn LogoStorage>) -> Self {
        Self::with_state(CardState::default(), storage)
    }

    /// Start from an explicit state.
    pub fn with_state(state: CardState, storage: Box<dyn LogoStorage>) -> Self {
        Self {
            state,
            urls: ObjectUrlRegistry::default(),
            storage,
            subscribers: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &CardState {
        &self.state
    }

    /// Object URLs handed out for uploads.
    pub fn urls(&self) -> &ObjectUrlRegistry {
        &self.urls
    }

    /// Register an observer for future change sets.
    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Merged look for rendering.
    pub fn active_design(&self) -> ActiveDesign {
        ActiveDesign::resolve(&self.state)
    }

    /// Switch the active tab.
    pub fn set_tab(&mut self, tab: Tab) -> ChangeSet {
        let mut changes = ChangeSet::default();
        if self.state.tab != tab {
            self.state.tab = tab;
            changes.push(StateChange::Tab);
        }
        self.commit(changes)
    }

    /// Pick a design; the logo moves to the design's default position.
    pub fn select_design(&mut self, design: Design) -> ChangeSet {
        let mut changes = ChangeSet::default();
        if self.state.custom_design != design {
            self.state.custom_design = design;
            changes.push(StateChange::Design);
        }
        self.place_logo(design.default_logo_position(), &mut changes);
        self.commit(changes)
    }

    /// Pick the gradient geometry.
    pub fn select_gradient_type(&mut self, kind: GradientType) -> ChangeSet {
        let mut changes = ChangeSet::default();
        if self.state.custom_gradient_type != kind {
            self.state.custom_gradient_type = kind;
            changes.push(StateChange::GradientType);
        }
        self.commit(changes)
    }

    /// Write a color field. Values are stored verbatim and validated at render time.
    pub fn set_color(&mut self, slot: ColorSlot, value: &str) -> ChangeSet {
        let mut changes = ChangeSet::default();
        let field = self.state.color_mut(slot);
        if field.as_str() != value {
            *field = value.to_string();
            changes.push(StateChange::Color(slot));
        }
        self.commit(changes)
    }

    /// Select a template by id; unknown ids are ignored.
    pub fn select_template(&mut self, id: &str) -> ChangeSet {
        let Some(t) = template(id) else {
            tracing::debug!(id, "ignoring unknown template");
            return ChangeSet::default();
        };
        let mut changes = ChangeSet::default();
        if self.state.selected_template_id.as_deref() != Some(t.id) {
            self.state.selected_template_id = Some(t.id.to_string());
            changes.push(StateChange::Template);
        }
        self.place_logo(t.preset.design().default_logo_position(), &mut changes);
        self.commit(changes)
    }

    /// Set the cardholder name.
    pub fn set_name(&mut self, name: &str) -> ChangeSet {
        let mut changes = ChangeSet::default();
        if self.state.name != name {
            self.state.name = name.to_string();
            changes.push(StateChange::Name);
        }
        self.commit(changes)
    }

    /// Replace the logo with an upload. Non-image files clear the logo instead.
    pub fn upload_logo(&mut self, file: LogoFile) -> ChangeSet {
        let mut changes = ChangeSet::default();
        self.release_logo(&mut changes);

        if !is_image_mime(&file.mime) || file.bytes.is_empty() {
            tracing::warn!(name = %file.name, mime = %file.mime, "rejected logo upload");
            self.persist_logo(None);
            return self.commit(changes);
        }

        let url = self.urls.create(file.bytes, &file.mime);
        self.state.logo = Some(LogoRef::Object(url));
        changes.push(StateChange::Logo);

        let persisted = file
            .origin
            .as_ref()
            .map(|p| format!("file://{}", p.display()));
        self.persist_logo(persisted.as_deref());
        self.commit(changes)
    }

    /// Remove the logo.
    pub fn clear_logo(&mut self) -> ChangeSet {
        let mut changes = ChangeSet::default();
        self.release_logo(&mut changes);
        self.persist_logo(None);
        self.commit(changes)
    }

    /// Move the logo to another mesh.
    pub fn set_logo_position(&mut self, position: LogoPosition) -> ChangeSet {
        let mut changes = ChangeSet::default();
        self.place_logo(position, &mut changes);
        self.commit(changes)
    }

    /// Restore the logo remembered by the persisted cache.
    pub fn restore_logo_from_storage(&mut self) -> ChangeSet {
        let stored = match self.storage.load() {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(%err, "failed to read persisted logo");
                None
            }
        };
        let Some(url) = stored else {
            return ChangeSet::default();
        };
        let mut changes = ChangeSet::default();
        self.release_logo(&mut changes);
        tracing::info!(%url, "restored persisted logo");
        self.state.logo = Some(LogoRef::Persisted(url));
        changes.push(StateChange::Logo);
        self.commit(changes)
    }

    fn place_logo(&mut self, position: LogoPosition, changes: &mut ChangeSet) {
        if self.state.logo_position != position {
            self.state.logo_position = position;
            changes.push(StateChange::LogoPosition);
        }
    }

    fn release_logo(&mut self, changes: &mut ChangeSet) {
        match self.state.logo.take() {
            Some(LogoRef::Object(url)) => {
                self.urls.revoke(&url);
                changes.push(StateChange::Logo);
            }
            Some(LogoRef::Persisted(_)) => changes.push(StateChange::Logo),
            None => {}
        }
    }

    fn persist_logo(&mut self, url: Option<&str>) {
        if let Err(err) = self.storage.save(url) {
            tracing::warn!(%err, "failed to persist logo");
        }
    }

    fn commit(&mut self, changes: ChangeSet) -> ChangeSet {
        if changes.is_empty() {
            return changes;
        }
        tracing::debug!(?changes, "card state changed");
        for subscriber in &mut self.subscribers {
            subscriber(&changes, &self.state);
        }
        changes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/store.rs"]
mod tests;
