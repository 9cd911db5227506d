//! Scroll-spy highlighting and the collapsible mobile menu.

/// Section anchors in page order.
pub const PORTFOLIO_SECTIONS: [&str; 5] = ["home", "about", "achievements", "resume", "contact"];

/// Tracks which section the navigation bar highlights. There is always
/// exactly one active section once any sections exist.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<String>,
    visible: Vec<bool>,
    active: usize,
}

impl ScrollSpy {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections: Vec<String> = sections.into_iter().map(Into::into).collect();
        let visible = vec![false; sections.len()];
        Self {
            sections,
            visible,
            active: 0,
        }
    }

    pub fn portfolio() -> Self {
        Self::new(PORTFOLIO_SECTIONS)
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn active(&self) -> Option<&str> {
        self.sections.get(self.active).map(String::as_str)
    }

    fn index_of(&self, section: &str) -> Option<usize> {
        self.sections.iter().position(|s| s == section)
    }

    /// Make `section` active. Unknown sections are ignored.
    pub fn activate(&mut self, section: &str) -> bool {
        match self.index_of(section) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    /// Intersection event: the topmost visible section wins. When nothing
    /// is visible the previous highlight stays.
    pub fn observe(&mut self, section: &str, visible: bool) -> Option<&str> {
        if let Some(index) = self.index_of(section) {
            self.visible[index] = visible;
            if let Some(first) = self.visible.iter().position(|v| *v) {
                self.active = first;
            }
        }
        self.active()
    }

    /// Scroll event: `positions` are section top offsets in page order.
    /// The last section whose top has scrolled past `offset` is active.
    pub fn on_scroll(&mut self, offset: f64, positions: &[f64]) -> Option<&str> {
        if !self.sections.is_empty() {
            let known = positions.len().min(self.sections.len());
            self.active = positions[..known]
                .iter()
                .rposition(|top| *top <= offset)
                .unwrap_or(0);
        }
        self.active()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Follow a menu link: the menu closes and the target becomes active.
    pub fn navigate(&mut self, spy: &mut ScrollSpy, section: &str) -> bool {
        self.close();
        spy.activate(section)
    }
}
