/// The three demos, one tab each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoTab {
    Sum,
    #[default]
    Life,
    Colors,
}

impl DemoTab {
    pub fn all() -> [DemoTab; 3] {
        [DemoTab::Sum, DemoTab::Life, DemoTab::Colors]
    }

    pub fn title(&self) -> &'static str {
        match self {
            DemoTab::Sum => "Sum Grid",
            DemoTab::Life => "Game of Life",
            DemoTab::Colors => "Color Matrix",
        }
    }

    /// Tab selected by the number keys 1-3
    pub fn from_index(index: usize) -> Option<DemoTab> {
        Self::all().get(index).copied()
    }
}
