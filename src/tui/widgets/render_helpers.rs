//! Line-oriented page building shared by the page and the detail view.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use super::selection::Target;

/// Lines of a scrollable document, each optionally tied to a target.
#[derive(Default)]
pub struct PageLines {
    lines: Vec<Line<'static>>,
    targets: Vec<Option<Target>>,
}

impl PageLines {
    pub fn push(&mut self, line: impl Into<Line<'static>>, target: Option<Target>) {
        self.lines.push(line.into());
        self.targets.push(target);
    }

    pub fn blank(&mut self) {
        self.push(Line::default(), None);
    }

    /// Push `text` word-wrapped to `width`, every line styled and targeted
    /// alike.
    pub fn wrapped(&mut self, text: &str, width: u16, indent: &str, style: Style, target: Option<Target>) {
        let available = usize::from(width).saturating_sub(indent.chars().count()).max(10);
        for row in wrap_words(text, available) {
            self.push(
                Line::from(vec![Span::raw(indent.to_owned()), Span::styled(row, style)]),
                target,
            );
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// First line tied to `target`.
    pub fn line_of(&self, target: Target) -> Option<usize> {
        self.targets.iter().position(|t| *t == Some(target))
    }

    /// Screen rows of the targeted lines visible in `area` after scrolling
    /// by `offset`.
    pub fn visible_regions(&self, area: Rect, offset: usize) -> Vec<(Rect, Target)> {
        self.targets
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(area.height))
            .filter_map(|(idx, target)| {
                let target = (*target)?;
                let y = area.y + (idx - offset) as u16;
                Some((Rect::new(area.x, y, area.width, 1), target))
            })
            .collect()
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.lines
    }
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            rows.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// A rectangle of `percent_x` × `percent_y` centred in `area`, never smaller
/// than `min_width` × `min_height` (clamped to `area`).
pub fn centered(area: Rect, percent_x: u16, percent_y: u16, min_width: u16, min_height: u16) -> Rect {
    let width = (area.width * percent_x / 100).max(min_width).min(area.width);
    let height = (area.height * percent_y / 100).max(min_height).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap_words("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap_words("", 10), vec![String::new()]);
        assert_eq!(wrap_words("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_words("a  b", 10), vec!["a b"]);
    }

    #[test]
    fn test_visible_regions_follow_scroll() {
        let mut page = PageLines::default();
        page.push("header", None);
        page.push("card", Some(Target::Project(0)));
        page.push("card", Some(Target::Project(0)));
        page.push("more", Some(Target::LoadMoreProjects));

        let area = Rect::new(0, 10, 20, 2);
        let regions = page.visible_regions(area, 1);
        assert_eq!(
            regions,
            vec![
                (Rect::new(0, 10, 20, 1), Target::Project(0)),
                (Rect::new(0, 11, 20, 1), Target::Project(0)),
            ]
        );
        assert_eq!(page.line_of(Target::LoadMoreProjects), Some(3));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 80, 50, 0, 0), Rect::new(10, 10, 80, 20));
        assert_eq!(centered(Rect::new(0, 0, 30, 10), 50, 50, 40, 20), Rect::new(0, 0, 30, 10));
    }
}
