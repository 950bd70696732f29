//! List/detail state for the projects, team and blog outputs.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelView<Id> {
    #[default]
    List,
    Detail(Id),
}

/// Two-state drill-down over one collection. At most one entity is selected;
/// selecting another replaces it, `back` always returns to the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrillDown<Id> {
    view: PanelView<Id>,
}

impl<Id> Default for DrillDown<Id> {
    fn default() -> Self {
        Self {
            view: PanelView::List,
        }
    }
}

impl<Id> DrillDown<Id> {
    pub fn list() -> Self {
        Self::default()
    }

    pub fn detail(id: Id) -> Self {
        Self {
            view: PanelView::Detail(id),
        }
    }

    pub fn view(&self) -> &PanelView<Id> {
        &self.view
    }

    pub fn select(&mut self, id: Id) {
        self.view = PanelView::Detail(id);
    }

    pub fn back(&mut self) {
        self.view = PanelView::List;
    }

    pub fn selected(&self) -> Option<&Id> {
        match &self.view {
            PanelView::List => None,
            PanelView::Detail(id) => Some(id),
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self.view, PanelView::Detail(_))
    }
}
