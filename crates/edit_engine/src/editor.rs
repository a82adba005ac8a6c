//! Editor session

use crate::{
    CanvasStateManager, DropEvent, DropOutcome, DropPreview, EditError, EditorSettings, History,
    Result,
};
use form_model::{Canvas, FieldFactory, NodeId, UuidFieldFactory};

/// Owns the current canvas, its history and the drop manager
pub struct FormEditor {
    /// Current canvas
    canvas: Canvas,
    /// Undo/redo snapshots
    history: History,
    manager: CanvasStateManager,
}

impl FormEditor {
    /// Create an editor with an empty canvas and default settings
    pub fn new() -> Self {
        Self::with_canvas(Canvas::new())
    }

    /// Create an editor for an existing canvas
    pub fn with_canvas(canvas: Canvas) -> Self {
        Self {
            canvas,
            history: History::new(),
            manager: CanvasStateManager::new(),
        }
    }

    /// Create an editor tuned by `settings`
    pub fn with_settings(canvas: Canvas, settings: &EditorSettings) -> Result<Self> {
        Self::with_factory(canvas, settings, Box::new(UuidFieldFactory))
    }

    /// Create an editor with a specific ID source
    pub fn with_factory(
        canvas: Canvas,
        settings: &EditorSettings,
        factory: Box<dyn FieldFactory>,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            canvas,
            history: History::with_limit(settings.history_limit),
            manager: CanvasStateManager::with_factory(settings.drop_zones, factory),
        })
    }

    /// Get the current canvas
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn manager(&self) -> &CanvasStateManager {
        &self.manager
    }

    /// Apply new drop zones; the history limit only takes effect for new sessions
    pub fn apply_settings(&mut self, settings: &EditorSettings) -> Result<()> {
        settings.validate()?;
        self.manager.set_zones(settings.drop_zones);
        Ok(())
    }

    /// Preview a drop at the pointer
    pub fn hover(&self, event: &DropEvent) -> DropPreview {
        self.manager.hover(&self.canvas, event)
    }

    /// Perform a drop, recording an undo step when the canvas changes
    pub fn drop_item(&mut self, event: &DropEvent) -> DropOutcome {
        let outcome = self.manager.handle_drop(&self.canvas, event);
        if outcome.is_applied() {
            self.commit(outcome.canvas.clone());
        }
        outcome
    }

    /// Delete a field or row
    pub fn delete(&mut self, id: &NodeId) -> Result<()> {
        let next = self.manager.delete_node(&self.canvas, id)?;
        self.commit(next);
        Ok(())
    }

    /// Duplicate a field or row next to the original
    pub fn duplicate(&mut self, id: &NodeId) -> Result<()> {
        let next = self.manager.duplicate_node(&self.canvas, id)?;
        self.commit(next);
        Ok(())
    }

    fn commit(&mut self, next: Canvas) {
        let previous = std::mem::replace(&mut self.canvas, next);
        self.history.record(previous);
    }

    /// Undo the last change
    pub fn undo(&mut self) -> Result<()> {
        if !self.history.can_undo() {
            return Err(EditError::UndoStackEmpty);
        }
        let current = std::mem::take(&mut self.canvas);
        self.canvas = self.history.undo(current)?;
        Ok(())
    }

    /// Redo the last undone change
    pub fn redo(&mut self) -> Result<()> {
        if !self.history.can_redo() {
            return Err(EditError::RedoStackEmpty);
        }
        let current = std::mem::take(&mut self.canvas);
        self.canvas = self.history.redo(current)?;
        Ok(())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the canvas with a stored document; history starts over
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        self.canvas = Canvas::from_json(json)?;
        self.history.clear();
        tracing::info!(
            target: "edit_engine::editor",
            nodes = self.canvas.len(),
            fields = self.canvas.field_count(),
            "canvas loaded"
        );
        Ok(())
    }

    /// Serialize the current canvas
    pub fn to_json(&self) -> Result<String> {
        Ok(self.canvas.to_json()?)
    }
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}
