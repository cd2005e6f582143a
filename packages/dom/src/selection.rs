use crate::{Document, DomResult, Range};

/// Page selection: at most one range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    range: Option<Range>,
}

impl Selection {
    pub fn range_count(&self) -> usize {
        usize::from(self.range.is_some())
    }

    pub fn range_at(&self, index: usize) -> Option<Range> {
        if index == 0 {
            self.range
        } else {
            None
        }
    }

    /// True when there is no range or the range is collapsed
    pub fn is_collapsed(&self) -> bool {
        self.range.map(|r| r.collapsed()).unwrap_or(true)
    }

    pub fn set_range(&mut self, range: Range) {
        self.range = Some(range);
    }

    pub fn remove_all_ranges(&mut self) {
        self.range = None;
    }

    /// `Selection.toString`
    pub fn selected_text(&self, doc: &Document) -> DomResult<String> {
        match self.range {
            Some(range) => range.selected_text(doc),
            None => Ok(String::new()),
        }
    }
}
