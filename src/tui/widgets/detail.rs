//! Detail overlay for an opened project.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::{
    render_helpers::{centered, PageLines},
    selection::contains,
    theme::Palette,
};
use crate::{
    catalog::{DevOpsProjectRecord, ProjectRecord, TagSet},
    gallery::Gallery,
    modal::Inspected,
};

/// Screen areas of the overlay recorded by the last render.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailRegions {
    /// The whole dialog, border included.
    pub content: Rect,
    pub close: Rect,
    pub gallery: Option<Rect>,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
    /// Row of image indicators and their count.
    pub indicators: Option<(Rect, usize)>,
}

impl DetailRegions {
    /// Image index whose indicator dot is at (x, y).
    pub fn indicator_at(&self, x: u16, y: u16) -> Option<usize> {
        let (row, count) = self.indicators?;
        if !contains(row, x, y) {
            return None;
        }
        let offset = usize::from(x - row.x);
        (offset % 2 == 0 && offset / 2 < count).then_some(offset / 2)
    }
}

pub struct DetailInput<'a> {
    pub palette: Palette,
    pub record: Inspected,
    pub gallery: Option<&'a Gallery>,
}

/// Line indexes of the gallery band inside the overlay body.
struct GalleryBand {
    start: usize,
    caption_width: u16,
    count: usize,
}

const GALLERY_ROWS: usize = 3;
const INDENT: &str = "  ";

/// Render the overlay over `area`. `scroll` is clamped to the content.
pub fn render(frame: &mut Frame, area: Rect, input: &DetailInput, scroll: &mut usize) -> DetailRegions {
    let palette = input.palette;
    frame
        .buffer_mut()
        .set_style(area, Style::new().add_modifier(Modifier::DIM));

    let outer = centered(area, 80, 85, 50, 16);
    frame.render_widget(Clear, outer);

    let block = Block::bordered()
        .title(Span::styled(format!(" {} ", input.record.title()), palette.heading()))
        .title_top(Line::from(Span::styled("[x]", palette.key())).right_aligned())
        .title_bottom(Line::from(Span::styled(
            " h/l image · space pause · j/k scroll · esc close ",
            palette.dimmed(),
        )))
        .border_style(palette.border(true))
        .style(palette.base());
    let inner = block.inner(outer);
    frame.render_widget(block, outer);

    let width = inner.width.saturating_sub(2);
    let mut body = PageLines::default();
    let band = match input.record {
        Inspected::Project(project) => project_body(&mut body, project, input.gallery, &palette, width),
        Inspected::DevOps(project) => {
            devops_body(&mut body, project, &palette, width);
            None
        }
    };

    let max = body.len().saturating_sub(usize::from(inner.height));
    *scroll = (*scroll).min(max);
    let offset = *scroll;

    let mut regions = DetailRegions {
        content: outer,
        close: Rect::new(outer.right().saturating_sub(5), outer.y, 5, 1),
        ..DetailRegions::default()
    };
    if let Some(band) = band {
        band_regions(&mut regions, &band, inner, offset);
    }

    let lines = body.into_lines();
    let top = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), inner);
    regions
}

/// Map the gallery band's lines to screen rows, skipping scrolled-out ones.
fn band_regions(regions: &mut DetailRegions, band: &GalleryBand, inner: Rect, offset: usize) {
    let row = |line: usize| -> Option<u16> {
        let visible = line >= offset && line - offset < usize::from(inner.height);
        visible.then(|| inner.y + (line - offset) as u16)
    };

    let rows: Vec<u16> = (band.start..band.start + GALLERY_ROWS).filter_map(row).collect();
    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        regions.gallery = Some(Rect::new(inner.x, *first, inner.width, last - first + 1));
    }
    if let Some(y) = row(band.start) {
        // " ◀  caption  ▶"
        regions.prev = Some(Rect::new(inner.x, y, 3, 1));
        let next_x = inner.x + 4 + band.caption_width + 1;
        if next_x < inner.right() {
            regions.next = Some(Rect::new(next_x, y, 3.min(inner.right() - next_x), 1));
        }
    }
    if let Some(y) = row(band.start + 2) {
        let x = inner.x + 4;
        let width = u16::try_from(band.count * 2).unwrap_or(u16::MAX).min(inner.right().saturating_sub(x));
        regions.indicators = Some((Rect::new(x, y, width, 1), band.count));
    }
}

fn heading(body: &mut PageLines, text: &str, palette: &Palette) {
    body.blank();
    body.push(Span::styled(format!(" {text}"), palette.heading()), None);
}

fn project_body(
    body: &mut PageLines,
    project: &'static ProjectRecord,
    gallery: Option<&Gallery>,
    palette: &Palette,
    width: u16,
) -> Option<GalleryBand> {
    body.push(
        Line::from(vec![
            Span::raw(INDENT),
            Span::styled(project.category, palette.dimmed()),
            Span::raw(" · "),
            Span::styled(
                project.status.label(),
                Style::new().fg(palette.status(project.status)),
            ),
        ]),
        None,
    );
    body.wrapped(
        project.tagline,
        width,
        INDENT,
        palette.dimmed().add_modifier(Modifier::ITALIC),
        None,
    );

    let band = gallery
        .filter(|g| g.len() > 0)
        .map(|gallery| gallery_band(body, project, gallery, palette));

    heading(body, "Overview", palette);
    body.wrapped(project.description, width, INDENT, Style::new(), None);

    if !project.metrics.is_empty() {
        heading(body, "Impact", palette);
        for metric in project.metrics {
            body.push(
                Line::from(vec![
                    Span::styled(format!("{INDENT}{:>8}  ", metric.value), palette.key()),
                    Span::styled(metric.label, Style::new().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", metric.description), palette.dimmed()),
                ]),
                None,
            );
        }
    }

    if let Some(architecture) = project.architecture {
        heading(body, "Architecture", palette);
        body.wrapped(architecture, width, INDENT, Style::new(), None);
    }

    heading(body, "Tech stack", palette);
    match &project.tags {
        TagSet::Flat(tags) => tag_line(body, "", tags, palette),
        TagSet::Grouped(groups) => {
            let mut groups = groups.to_vec();
            groups.sort_by_key(|(layer, _)| *layer);
            for (layer, tags) in groups {
                tag_line(body, layer.label(), tags, palette);
            }
        }
    }

    if !project.decisions.is_empty() {
        heading(body, "Key decisions", palette);
        for decision in project.decisions {
            body.push(
                Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled("• ", palette.key()),
                    Span::styled(decision.title, Style::new().add_modifier(Modifier::BOLD)),
                ]),
                None,
            );
            body.wrapped(decision.rationale, width, "    ", palette.dimmed(), None);
        }
    }

    let links = [("Live", project.links.live), ("Source", project.links.source)];
    if links.iter().any(|(_, url)| url.is_some()) {
        heading(body, "Links", palette);
        for (label, url) in links {
            if let Some(url) = url {
                body.push(
                    Line::from(vec![
                        Span::raw(format!("{INDENT}{label:<8}")),
                        Span::styled(url, palette.key().add_modifier(Modifier::UNDERLINED)),
                    ]),
                    None,
                );
            }
        }
    }
    band
}

fn gallery_band(
    body: &mut PageLines,
    project: &'static ProjectRecord,
    gallery: &Gallery,
    palette: &Palette,
) -> GalleryBand {
    body.blank();
    let start = body.len();
    let image = &project.images[gallery.current_index()];
    let caption_width = u16::try_from(image.caption.chars().count()).unwrap_or(u16::MAX);

    body.push(
        Line::from(vec![
            Span::styled(" ◀ ", palette.key()),
            Span::raw(" "),
            Span::styled(image.caption, Style::new().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("▶", palette.key()),
        ]),
        None,
    );
    body.push(Span::styled(format!("    {}", image.src), palette.dimmed()), None);

    let dots: Vec<Span> = (0..gallery.len())
        .map(|i| {
            if i == gallery.current_index() {
                Span::styled("● ", palette.key())
            } else {
                Span::styled("○ ", palette.dimmed())
            }
        })
        .collect();
    let state = if gallery.is_paused() {
        "paused"
    } else if gallery.is_auto_advancing() {
        "auto"
    } else {
        ""
    };
    let mut indicator = vec![Span::raw("    ")];
    indicator.extend(dots);
    indicator.push(Span::styled(
        format!(" {}/{}  {state}", gallery.current_index() + 1, gallery.len()),
        palette.dimmed(),
    ));
    body.push(Line::from(indicator), None);

    GalleryBand {
        start,
        caption_width,
        count: gallery.len(),
    }
}

fn tag_line(body: &mut PageLines, label: &str, tags: &[&'static str], palette: &Palette) {
    let mut spans = vec![Span::raw(INDENT)];
    if !label.is_empty() {
        spans.push(Span::styled(format!("{label:<10}"), palette.dimmed()));
    }
    for tag in tags {
        spans.push(Span::styled(format!(" {tag} "), palette.tag()));
        spans.push(Span::raw(" "));
    }
    body.push(Line::from(spans), None);
}

fn devops_body(body: &mut PageLines, project: &'static DevOpsProjectRecord, palette: &Palette, width: u16) {
    body.push(Span::styled(format!("{INDENT}{}", project.slug), palette.dimmed()), None);
    body.wrapped(
        project.summary,
        width,
        INDENT,
        palette.dimmed().add_modifier(Modifier::ITALIC),
        None,
    );

    heading(body, "Overview", palette);
    body.wrapped(project.description, width, INDENT, Style::new(), None);

    heading(body, "Tools", palette);
    tag_line(body, "", project.tools, palette);

    heading(body, "Pipeline", palette);
    for (i, step) in project.steps.iter().enumerate() {
        body.push(
            Line::from(vec![
                Span::styled(format!("{INDENT}{:>2}. ", i + 1), palette.key()),
                Span::raw(*step),
            ]),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_hit_testing() {
        let regions = DetailRegions {
            indicators: Some((Rect::new(10, 4, 6, 1), 3)),
            ..DetailRegions::default()
        };
        assert_eq!(regions.indicator_at(10, 4), Some(0));
        assert_eq!(regions.indicator_at(11, 4), None);
        assert_eq!(regions.indicator_at(14, 4), Some(2));
        assert_eq!(regions.indicator_at(14, 5), None);
        assert_eq!(DetailRegions::default().indicator_at(0, 0), None);
    }

    #[test]
    fn test_band_regions_skip_scrolled_rows() {
        let band = GalleryBand {
            start: 3,
            caption_width: 10,
            count: 3,
        };
        let inner = Rect::new(5, 2, 60, 20);

        let mut regions = DetailRegions::default();
        band_regions(&mut regions, &band, inner, 0);
        assert_eq!(regions.gallery, Some(Rect::new(5, 5, 60, 3)));
        assert_eq!(regions.prev, Some(Rect::new(5, 5, 3, 1)));
        assert_eq!(regions.next, Some(Rect::new(20, 5, 3, 1)));
        assert_eq!(regions.indicators, Some((Rect::new(9, 7, 6, 1), 3)));

        let mut scrolled = DetailRegions::default();
        band_regions(&mut scrolled, &band, inner, 4);
        assert_eq!(scrolled.gallery, Some(Rect::new(5, 2, 60, 2)));
        assert_eq!(scrolled.prev, None);
        assert!(scrolled.indicators.is_some());
    }
}
