//! Per-row actions supplied by the host screen.

use std::fmt;
use std::rc::Rc;

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    /// Neutral.
    #[default]
    Default,
    /// Highlighted, e.g. "Edit".
    Primary,
    /// Destructive, e.g. "Delete".
    Danger,
    /// Borderless.
    Ghost,
}

/// Handler invoked with the row and its page index.
pub type ActionHandler<T> = Rc<dyn Fn(&T, usize)>;

/// Predicate deciding whether an action is disabled for a row.
pub type ActionPredicate<T> = Rc<dyn Fn(&T) -> bool>;

/// A button rendered at the end of every row.
pub struct RowAction<T> {
    /// Identifier, unique among a table's actions.
    pub id: String,
    /// Label or tooltip.
    pub label: String,
    /// Optional icon name; the host maps it to a glyph.
    pub icon: Option<String>,
    /// Visual weight.
    pub variant: ActionVariant,
    on_click: ActionHandler<T>,
    disabled: Option<ActionPredicate<T>>,
}

impl<T> RowAction<T> {
    /// Create an action.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        on_click: impl Fn(&T, usize) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            variant: ActionVariant::Default,
            on_click: Rc::new(on_click),
            disabled: None,
        }
    }

    /// Set the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the variant.
    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Disable the action for rows matching `predicate`.
    pub fn disabled_when(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.disabled = Some(Rc::new(predicate));
        self
    }

    /// Check if the action is disabled for `row`.
    pub fn is_disabled(&self, row: &T) -> bool {
        self.disabled.as_ref().is_some_and(|p| p(row))
    }

    /// Run the action unless it is disabled for `row`. Returns whether it ran.
    pub fn invoke(&self, row: &T, index: usize) -> bool {
        if self.is_disabled(row) {
            return false;
        }
        (self.on_click)(row, index);
        true
    }
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            variant: self.variant,
            on_click: self.on_click.clone(),
            disabled: self.disabled.clone(),
        }
    }
}

impl<T> fmt::Debug for RowAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("variant", &self.variant)
            .field("disabled", &self.disabled.is_some())
            .finish_non_exhaustive()
    }
}
