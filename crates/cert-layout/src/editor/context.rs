//! Editing session for one open template
//!
//! `EditorContext` owns every piece of mutable editor state: the position
//! store, the background state, the undo history and the single gesture
//! slot. Because there is exactly one slot, at most one drag or resize can be
//! in progress; pointer-down while a gesture is active is ignored.

use log::{debug, info, warn};

use super::background::BackgroundState;
use super::drag::{DragConstraints, DragOutcome, DragSession, PointerPos};
use super::history::ChangeHistory;
use super::resize::{ResizeOutcome, ResizeSession};
use super::snap::{SnapGuide, SnapTarget};
use super::store::{FieldGeometry, FieldPositionStore};
use crate::constants::DEFAULT_ZOOM;
use crate::options::EditorOptions;
use crate::ports::{BackgroundMutationSink, FieldMutationSink, PrintTrigger, TemplateLoader};
use crate::render::{PrintJob, Projection, project, project_geometry};
use crate::types::*;
use crate::units::RenderScale;

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

/// Result of releasing the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// No gesture was active
    None,
    /// A drag moved a field and was recorded in the history
    Moved(ChangeRecord),
    /// A resize changed a field's width (not undoable)
    Resized {
        field_id: FieldId,
        old_width: f32,
        new_width: f32,
    },
    /// The gesture ended where it started
    Unchanged { field_id: FieldId },
    /// The gesture was discarded without touching the store or history
    Cancelled { field_id: FieldId },
}

#[derive(Debug, Clone)]
pub struct EditorContext {
    template: Template,
    options: EditorOptions,
    scale: RenderScale,
    store: FieldPositionStore,
    background: BackgroundState,
    history: ChangeHistory,
    gesture: Gesture,
    selected: Option<FieldId>,
    editing_enabled: bool,
}

impl EditorContext {
    pub fn new(template: Template, options: EditorOptions) -> Result<Self> {
        options.validate()?;
        let scale = RenderScale::new(options.base_scale, DEFAULT_ZOOM);
        Ok(Self {
            store: FieldPositionStore::from_fields(&template.fields),
            background: BackgroundState::new(template.background),
            history: ChangeHistory::new(),
            gesture: Gesture::Idle,
            selected: None,
            editing_enabled: true,
            template,
            options,
            scale,
        })
    }

    /// Load a template through the loader and open it.
    pub async fn open<L>(loader: &L, id: TemplateId, options: EditorOptions) -> Result<Self>
    where
        L: TemplateLoader,
    {
        let template = loader.load_template(id).await?;
        info!(
            "Opened template {} ({}) with {} fields",
            id,
            template.name,
            template.fields.len()
        );
        Self::new(template, options)
    }

    /// Replace the open template, discarding all local state.
    pub fn reload(&mut self, template: Template) {
        self.store.reseed(&template.fields);
        self.background = BackgroundState::new(template.background);
        self.history.clear();
        self.gesture = Gesture::Idle;
        self.selected = None;
        self.template = template;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn page(&self) -> Page {
        self.template.page()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn scale(&self) -> RenderScale {
        self.scale
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.scale = self.scale.with_zoom(zoom);
    }

    pub fn store(&self) -> &FieldPositionStore {
        &self.store
    }

    pub fn history(&self) -> &ChangeHistory {
        &self.history
    }

    pub fn background(&self) -> &BackgroundState {
        &self.background
    }

    pub fn background_mut(&mut self) -> &mut BackgroundState {
        &mut self.background
    }

    pub fn selected(&self) -> Option<FieldId> {
        self.selected
    }

    pub fn is_editing_enabled(&self) -> bool {
        self.editing_enabled
    }

    /// Turning editing off finishes any gesture in progress.
    pub fn set_editing_enabled(&mut self, enabled: bool) {
        if !enabled && self.is_gesture_active() {
            self.pointer_up();
        }
        self.editing_enabled = enabled;
    }

    /// Select a field without starting a gesture. Ignored mid-gesture.
    pub fn select(&mut self, id: Option<FieldId>) -> bool {
        if self.is_gesture_active() {
            return false;
        }
        match id {
            Some(id) if !self.store.contains(id) => false,
            _ => {
                self.selected = id;
                true
            }
        }
    }

    pub fn is_gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Guides of the drag in progress
    pub fn active_guides(&self) -> &[SnapGuide] {
        match &self.gesture {
            Gesture::Dragging(session) => session.guides(),
            _ => &[],
        }
    }

    pub fn is_resizable(&self, id: FieldId) -> bool {
        self.template
            .field(id)
            .is_some_and(|field| self.options.is_resizable(&field.key))
    }

    // -------------------------------------------------------------------------
    // Pointer gestures
    // -------------------------------------------------------------------------

    /// Pointer-down on a field body. Starts a drag when the field is visible,
    /// editing is enabled and no other gesture is active.
    pub fn begin_drag(&mut self, id: FieldId, pointer: PointerPos) -> bool {
        let Some(geometry) = self.editable_geometry(id) else {
            return false;
        };
        self.selected = Some(id);
        self.gesture = Gesture::Dragging(DragSession::start(id, pointer, geometry.position()));
        debug!("Drag started on field {} at {:?}", id, geometry.position());
        true
    }

    /// Pointer-down on a field's resize handle.
    pub fn begin_resize(&mut self, id: FieldId, pointer_x: f32) -> bool {
        if !self.is_resizable(id) {
            return false;
        }
        let Some(geometry) = self.editable_geometry(id) else {
            return false;
        };
        self.selected = Some(id);
        self.gesture = Gesture::Resizing(ResizeSession::start(
            id,
            pointer_x,
            geometry.width,
            self.options.default_field_width_mm,
        ));
        debug!("Resize started on field {}", id);
        true
    }

    pub fn pointer_move(&mut self, pointer: PointerPos) {
        let scale = self.scale;
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging(session) => {
                let constraints = DragConstraints {
                    page: self.template.page(),
                    edge_margin_mm: self.options.edge_margin_mm,
                    snap_threshold_mm: self.options.snap_threshold_mm,
                };
                let targets = snap_targets(&self.template, &self.store, session.field_id());
                session.update(pointer, scale, &constraints, &targets);
            }
            Gesture::Resizing(session) => {
                session.update(pointer.x, scale, self.options.min_field_width_mm);
            }
        }
    }

    /// Pointer released: commit or discard the active gesture.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => GestureOutcome::None,
            Gesture::Dragging(session) => match session.finish() {
                DragOutcome::Moved { field_id, from, to } => {
                    self.store.set(field_id, to.0, to.1);
                    let record = ChangeRecord {
                        field_id,
                        field_name: self.field_name(field_id),
                        old: from,
                        new: to,
                    };
                    debug!("Field {} moved from {:?} to {:?}", field_id, from, to);
                    self.history.push(record.clone());
                    GestureOutcome::Moved(record)
                }
                DragOutcome::Unchanged { field_id } => GestureOutcome::Unchanged { field_id },
            },
            Gesture::Resizing(session) => match session.finish() {
                ResizeOutcome::Resized { field_id, from, to } => {
                    self.store.set_width(field_id, to);
                    debug!("Field {} resized from {} to {}", field_id, from, to);
                    GestureOutcome::Resized {
                        field_id,
                        old_width: from,
                        new_width: to,
                    }
                }
                ResizeOutcome::Unchanged { field_id } => GestureOutcome::Unchanged { field_id },
            },
        }
    }

    /// Pointer left the canvas while still pressed. The gesture is discarded.
    pub fn pointer_leave(&mut self) -> GestureOutcome {
        self.cancel_gesture()
    }

    /// Pointer released outside the canvas, or the canvas lost focus.
    /// Finishes the gesture exactly like a pointer-up.
    pub fn focus_lost(&mut self) -> GestureOutcome {
        self.pointer_up()
    }

    /// Abort the active gesture without touching the store or history.
    pub fn cancel_gesture(&mut self) -> GestureOutcome {
        let field_id = match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => return GestureOutcome::None,
            Gesture::Dragging(session) => session.field_id(),
            Gesture::Resizing(session) => session.field_id(),
        };
        debug!("Gesture on field {} cancelled", field_id);
        GestureOutcome::Cancelled { field_id }
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Undo the most recent move. Returns the record that was undone.
    pub fn undo_last(&mut self) -> Option<ChangeRecord> {
        if self.is_gesture_active() {
            return None;
        }
        let record = self.history.undo_last(&mut self.store)?;
        info!(
            "Restored {} to ({}, {})",
            record.field_name, record.old.0, record.old.1
        );
        Some(record)
    }

    /// Discard the history and every local change to field geometry.
    pub fn reset_all(&mut self) {
        self.gesture = Gesture::Idle;
        self.history.reset_all(&mut self.store);
    }

    pub fn has_pending_moves(&self) -> bool {
        self.history.has_pending()
    }

    /// Anything that a save would persist
    pub fn has_unsaved_changes(&self) -> bool {
        self.history.has_pending() || self.store.is_dirty() || self.background.has_changes()
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Persist every field whose geometry differs from its baseline.
    ///
    /// Each field's baseline moves as soon as its commit succeeds. The first
    /// failure stops the save and is returned; fields not yet saved keep
    /// their unsaved state and the history is kept. Returns the number of
    /// fields written.
    pub async fn save_layout<S>(&mut self, sink: &S) -> Result<usize>
    where
        S: FieldMutationSink,
    {
        let template_id = self.template.id;
        let mut saved = 0;

        for (field_id, baseline, current) in self.store.dirty_fields() {
            let result = commit_field(sink, template_id, field_id, baseline, current).await;
            if let Err(err) = result {
                warn!("Saving field {} of template {} failed: {}", field_id, template_id, err);
                return Err(err);
            }
            self.store.mark_saved(field_id);
            if let Some(field) = self.template.field_mut(field_id) {
                field.position_x = current.x;
                field.position_y = current.y;
                field.width = current.width;
            }
            saved += 1;
        }

        self.history.clear();
        info!("Saved {} fields of template {}", saved, template_id);
        Ok(saved)
    }

    /// Persist the background alignment.
    pub async fn save_background<S>(&mut self, sink: &S) -> Result<()>
    where
        S: BackgroundMutationSink,
    {
        self.background.save(self.template.id, sink).await?;
        self.template.background = self.background.saved();
        Ok(())
    }

    /// Save fields and background, whichever have changes.
    pub async fn save_all<F, B>(&mut self, fields: &F, background: &B) -> Result<()>
    where
        F: FieldMutationSink,
        B: BackgroundMutationSink,
    {
        if self.history.has_pending() || self.store.is_dirty() {
            self.save_layout(fields).await?;
        }
        if self.background.has_changes() {
            self.save_background(background).await?;
        }
        Ok(())
    }

    /// Print the committed layout, saving unsaved changes first. Nothing is
    /// printed if the save fails.
    pub async fn print<F, B, P>(&mut self, fields: &F, background: &B, printer: &P) -> Result<()>
    where
        F: FieldMutationSink,
        B: BackgroundMutationSink,
        P: PrintTrigger,
    {
        if self.is_gesture_active() {
            self.pointer_up();
        }
        if self.has_unsaved_changes() {
            info!("Saving pending changes before printing");
            self.save_all(fields, background).await?;
        }

        let job = self.print_job();
        info!(
            "Printing template {} with {} fields",
            job.template,
            job.fields.len()
        );
        printer.print(&job).await
    }

    // -------------------------------------------------------------------------
    // Projection
    // -------------------------------------------------------------------------

    /// Geometry as the canvas shows it right now: live gesture preview
    /// applied, hidden fields left out.
    pub fn live_geometry(&self) -> Vec<(FieldId, FieldGeometry)> {
        self.template
            .fields
            .iter()
            .filter(|field| field.visible)
            .filter_map(|field| {
                let mut geometry = self.store.get(field.id)?;
                match &self.gesture {
                    Gesture::Dragging(session) if session.field_id() == field.id => {
                        (geometry.x, geometry.y) = session.preview();
                    }
                    Gesture::Resizing(session) if session.field_id() == field.id => {
                        geometry.width = Some(session.preview_width());
                    }
                    _ => {}
                }
                Some((field.id, geometry))
            })
            .collect()
    }

    /// Interactive canvas frame at the current zoom
    pub fn canvas_projection(&self) -> Projection {
        project_geometry(
            &self.page(),
            self.live_geometry(),
            &self.background.current(),
            self.scale,
        )
    }

    /// Static full-page preview of the visible fields at the given zoom
    pub fn preview_projection(&self, zoom: f32) -> Projection {
        let visible = self
            .store
            .iter()
            .filter(|(id, _)| self.template.field(*id).is_some_and(|field| field.visible));
        project_geometry(
            &self.page(),
            visible,
            &self.background.current(),
            self.scale.with_zoom(zoom),
        )
    }

    /// Fixed print layout: the store at zoom 1 with the current background
    pub fn print_job(&self) -> PrintJob {
        let projection = project(
            &self.page(),
            &self.store,
            &self.background.current(),
            self.scale.unzoomed(),
        );
        PrintJob::from_projection(
            self.template.id,
            self.template.name.clone(),
            self.page(),
            self.template.background_image.clone(),
            &projection,
            &self.template.fields,
        )
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn editable_geometry(&self, id: FieldId) -> Option<FieldGeometry> {
        if !self.editing_enabled || self.is_gesture_active() {
            return None;
        }
        let field = self.template.field(id)?;
        if !field.visible {
            return None;
        }
        self.store.get(id)
    }

    fn field_name(&self, id: FieldId) -> String {
        self.template
            .field(id)
            .map(|field| field.display_name().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Origins of every other visible field, in id order
fn snap_targets(
    template: &Template,
    store: &FieldPositionStore,
    dragged: FieldId,
) -> Vec<SnapTarget> {
    store
        .iter()
        .filter(|(id, _)| *id != dragged)
        .filter(|(id, _)| template.field(*id).is_some_and(|field| field.visible))
        .map(|(field_id, geometry)| SnapTarget {
            field_id,
            x: geometry.x,
            y: geometry.y,
        })
        .collect()
}

async fn commit_field<S>(
    sink: &S,
    template: TemplateId,
    field: FieldId,
    baseline: FieldGeometry,
    current: FieldGeometry,
) -> Result<()>
where
    S: FieldMutationSink,
{
    if baseline.position() != current.position() {
        sink.commit_position(template, field, current.x, current.y).await?;
    }
    if let Some(width) = current.width {
        if baseline.width != current.width {
            sink.commit_width(template, field, width).await?;
        }
    }
    Ok(())
}
