//! Focus ring and click region handling for the page.

use ratatui::layout::Rect;

use crate::contact::Field;

/// Anchored page sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Work,
    DevOps,
    Contact,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::About,
        Self::Work,
        Self::DevOps,
        Self::Contact,
    ];

    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Work => "work",
            Self::DevOps => "devops",
            Self::Contact => "contact",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Work => "Work",
            Self::DevOps => "DevOps",
            Self::Contact => "Contact",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Something on the page that can be focused and activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Anchor(Section),
    ThemeToggle,
    Project(usize),
    LoadMoreProjects,
    DevOps(usize),
    LoadMoreDevOps,
    Field(Field),
    Send,
    NewMessage,
}

/// A clickable screen area mapped to a target.
#[derive(Debug, Clone)]
pub struct ClickRegion {
    pub area: Rect,
    pub target: Target,
}

/// Focused item plus the click regions of the last frame.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<Target>,
    click_regions: Vec<ClickRegion>,
}

impl FocusState {
    /// Clear click regions (call at start of render).
    pub fn clear_regions(&mut self) {
        self.click_regions.clear();
    }

    pub fn add_region(&mut self, area: Rect, target: Target) {
        self.click_regions.push(ClickRegion { area, target });
    }

    pub const fn focused(&self) -> Option<Target> {
        self.focused
    }

    pub const fn focus(&mut self, target: Target) {
        self.focused = Some(target);
    }

    pub const fn blur(&mut self) {
        self.focused = None;
    }

    /// Move focus forward, wrapping at the end. Unknown focus restarts at
    /// the first item.
    pub fn focus_next(&mut self, items: &[Target]) {
        self.focused = match self.position(items) {
            Some(i) => items.get((i + 1) % items.len()).copied(),
            None => items.first().copied(),
        };
    }

    /// Move focus backward, wrapping at the start.
    pub fn focus_previous(&mut self, items: &[Target]) {
        self.focused = match self.position(items) {
            Some(i) => items.get((i + items.len() - 1) % items.len()).copied(),
            None => items.last().copied(),
        };
    }

    /// Drop focus from an item that is no longer on the page.
    pub fn retain(&mut self, items: &[Target]) {
        if self.position(items).is_none() {
            self.focused = None;
        }
    }

    /// Target under (x, y) in the last rendered frame.
    pub fn target_at(&self, x: u16, y: u16) -> Option<Target> {
        self.click_regions
            .iter()
            .find(|region| contains(region.area, x, y))
            .map(|region| region.target)
    }

    fn position(&self, items: &[Target]) -> Option<usize> {
        let focused = self.focused?;
        items.iter().position(|t| *t == focused)
    }
}

pub const fn contains(area: Rect, x: u16, y: u16) -> bool {
    area.x <= x && x < area.x + area.width && area.y <= y && y < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &[Target] = &[
        Target::Anchor(Section::Home),
        Target::Project(0),
        Target::Send,
    ];

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut focus = FocusState::default();
        focus.focus_next(ITEMS);
        assert_eq!(focus.focused(), Some(Target::Anchor(Section::Home)));
        focus.focus_previous(ITEMS);
        assert_eq!(focus.focused(), Some(Target::Send));
        focus.focus_next(ITEMS);
        assert_eq!(focus.focused(), Some(Target::Anchor(Section::Home)));
    }

    #[test]
    fn test_focus_on_empty_page() {
        let mut focus = FocusState::default();
        focus.focus_next(&[]);
        assert_eq!(focus.focused(), None);
        focus.focus_previous(&[]);
        assert_eq!(focus.focused(), None);
    }

    #[test]
    fn test_retain_drops_vanished_target() {
        let mut focus = FocusState::default();
        focus.focus(Target::LoadMoreProjects);
        focus.retain(ITEMS);
        assert_eq!(focus.focused(), None);
    }

    #[test]
    fn test_click_lookup() {
        let mut focus = FocusState::default();
        focus.add_region(Rect::new(2, 5, 10, 3), Target::Project(0));
        focus.add_region(Rect::new(2, 8, 10, 1), Target::LoadMoreProjects);

        assert_eq!(focus.target_at(2, 5), Some(Target::Project(0)));
        assert_eq!(focus.target_at(11, 7), Some(Target::Project(0)));
        assert_eq!(focus.target_at(12, 7), None);
        assert_eq!(focus.target_at(3, 8), Some(Target::LoadMoreProjects));

        focus.clear_regions();
        assert_eq!(focus.target_at(2, 5), None);
    }
}
