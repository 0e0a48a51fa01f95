//! Application state for the TUI.

use std::sync::Arc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Frame;
use tokio::{
    sync::{mpsc, watch},
    time::Instant,
};
use tracing::{debug, info};

use super::widgets::{
    detail::DetailRegions,
    help_menu::{HelpMenu, HelpMenuWidget},
    selection::{contains, FocusState, Section, Target},
    status_bar::StatusBar,
    InteractiveStatefulWidget,
};
use crate::{
    catalog::{Catalog, DevOpsProjectRecord, ProjectRecord},
    config::Config,
    contact::{ContactForm, Field, SubmissionOutcome, SubmitRejected, SubmitStatus},
    gallery::{GalleryTick, TickSource},
    modal::{Inspected, Modal, ModalClick, ScrollLock},
    notify::NotificationSender,
    pagination::Pagination,
    theme::{Theme, ThemeStore},
};

/// Vertical scroll position of the page. Frozen while locked.
#[derive(Debug, Default)]
pub struct PageScroll {
    offset: usize,
    max: usize,
    locked: bool,
}

impl PageScroll {
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Update the scrollable range after a layout pass.
    pub fn set_max(&mut self, max: usize) {
        self.max = max;
        self.offset = self.offset.min(max);
    }

    /// Scroll by `delta` lines. Returns whether the page moved.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let target = self.offset.saturating_add_signed(delta);
        self.scroll_to(target)
    }

    pub fn scroll_to(&mut self, line: usize) -> bool {
        if self.locked {
            return false;
        }
        let line = line.min(self.max);
        let moved = line != self.offset;
        self.offset = line;
        moved
    }
}

impl ScrollLock for PageScroll {
    fn lock(&mut self) {
        self.locked = true;
    }

    fn unlock(&mut self) {
        self.locked = false;
    }
}

/// Scroll and hit-test state of the open detail view.
#[derive(Debug, Default)]
pub struct DetailView {
    pub scroll: usize,
    pub regions: DetailRegions,
    pointer_in_gallery: bool,
}

/// Page layout measured by the last render.
#[derive(Debug, Default)]
pub struct PageLayout {
    /// First line of each section, in [`Section::ALL`] order.
    pub sections: [usize; 5],
    /// Page rows visible at once.
    pub viewport: usize,
}

/// Application state.
pub struct App {
    theme: ThemeStore,
    /// Views read the theme from here on every frame.
    pub theme_rx: watch::Receiver<Theme>,
    pub projects: Catalog<ProjectRecord>,
    pub devops: Catalog<DevOpsProjectRecord>,
    pub project_pages: Pagination,
    pub devops_pages: Pagination,
    pub modal: Modal<PageScroll>,
    pub detail: DetailView,
    pub contact: ContactForm,
    sender: Arc<dyn NotificationSender>,
    outcomes: mpsc::UnboundedSender<SubmissionOutcome>,
    pub focus: FocusState,
    /// Scroll the focused item into view on the next render.
    pub reveal_focus: bool,
    pub layout: PageLayout,
    pub help_menu: HelpMenu,
    pub status_bar: StatusBar,
    /// Whether app should exit.
    pub should_exit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        theme: ThemeStore,
        sender: Arc<dyn NotificationSender>,
        ticks: TickSource,
        outcomes: mpsc::UnboundedSender<SubmissionOutcome>,
    ) -> Self {
        let projects = Catalog::projects();
        let devops = Catalog::devops();
        let listing = &config.listing;
        Self {
            theme_rx: theme.subscribe(),
            theme,
            projects,
            devops,
            project_pages: Pagination::new(listing.initial, listing.increment, projects.len()),
            devops_pages: Pagination::new(
                listing.devops_initial,
                listing.devops_increment,
                devops.len(),
            ),
            modal: Modal::new(PageScroll::default(), ticks, config.gallery.interval()),
            detail: DetailView::default(),
            contact: ContactForm::new(
                config.contact.to_name.clone(),
                config.contact.success_reset(),
            ),
            sender,
            outcomes,
            focus: FocusState::default(),
            reveal_focus: false,
            layout: PageLayout::default(),
            help_menu: HelpMenu::default(),
            status_bar: StatusBar::default(),
            should_exit: false,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme_rx.borrow()
    }

    pub fn page_scroll(&mut self) -> &mut PageScroll {
        self.modal.scroll_lock_mut()
    }

    /// Time-driven state changes, called once per frame.
    pub fn update(&mut self, now: Instant) {
        self.contact.update(now);
        let items = self.focus_targets();
        self.focus.retain(&items);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        super::ui::render(frame, self);
    }

    pub fn on_gallery_tick(&mut self, tick: GalleryTick) {
        self.modal.on_tick(tick);
    }

    pub fn on_submission(&mut self, outcome: SubmissionOutcome) {
        if self.contact.complete(outcome.ticket, outcome.result) {
            info!(status = ?self.contact.status(), "Contact submission finished");
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => {}
        }
    }

    /// Focusable items of the page, in page order.
    pub fn focus_targets(&self) -> Vec<Target> {
        let mut items: Vec<Target> = Section::ALL.into_iter().map(Target::Anchor).collect();
        items.push(Target::ThemeToggle);
        items.extend((0..self.project_pages.visible_count()).map(Target::Project));
        if self.project_pages.has_more() {
            items.push(Target::LoadMoreProjects);
        }
        items.extend((0..self.devops_pages.visible_count()).map(Target::DevOps));
        if self.devops_pages.has_more() {
            items.push(Target::LoadMoreDevOps);
        }
        items.extend(Field::ALL.into_iter().map(Target::Field));
        items.push(Target::Send);
        if matches!(
            self.contact.status(),
            SubmitStatus::Success | SubmitStatus::Error(_)
        ) {
            items.push(Target::NewMessage);
        }
        items
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }
        if HelpMenuWidget::handle_event(&mut self.help_menu, key) {
            return;
        }
        if self.modal.is_open() {
            self.handle_detail_key(key);
            return;
        }
        if let Some(Target::Field(field)) = self.focus.focused() {
            if self.handle_field_key(field, key) {
                return;
            }
        }

        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char('?') => self.help_menu.toggle(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('n') => self.contact.new_message(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.page_scroll().scroll_by(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.page_scroll().scroll_by(-1);
            }
            KeyCode::PageDown | KeyCode::Char(' ') => {
                let page = self.page_step();
                self.page_scroll().scroll_by(page);
            }
            KeyCode::PageUp => {
                let page = self.page_step();
                self.page_scroll().scroll_by(-page);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.page_scroll().scroll_to(0);
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.page_scroll().scroll_to(usize::MAX);
            }
            KeyCode::Char(c @ '1'..='5') => {
                let section = Section::ALL[c as usize - '1' as usize];
                self.jump_to(section);
            }
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Enter => {
                if let Some(target) = self.focus.focused() {
                    self.activate(target);
                }
            }
            _ => {}
        }
    }

    /// Keys while a contact field has focus. Returns false for keys that
    /// fall through to page navigation.
    fn handle_field_key(&mut self, field: Field, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code != KeyCode::Char('u') {
                return false;
            }
            // Discard the draft, including the outcome of a send in flight.
            self.contact.reset_instance();
            return true;
        }
        match key.code {
            KeyCode::Esc => {
                self.focus.blur();
                true
            }
            KeyCode::Enter => {
                self.move_focus(true);
                true
            }
            KeyCode::Backspace => {
                self.contact.pop_char(field);
                true
            }
            KeyCode::Left | KeyCode::Right if field == Field::Subject => {
                self.contact.cycle_subject(key.code == KeyCode::Right);
                true
            }
            KeyCode::Char(' ') if field == Field::Subject => {
                self.contact.cycle_subject(true);
                true
            }
            KeyCode::Char(c) if field != Field::Subject => {
                self.contact.push_char(field, c);
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('x') => self.modal.close(),
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char('?') => self.help_menu.toggle(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('h') | KeyCode::Left => {
                if let Some(gallery) = self.modal.gallery_mut() {
                    gallery.prev();
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if let Some(gallery) = self.modal.gallery_mut() {
                    gallery.next();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(gallery) = self.modal.gallery_mut() {
                    let paused = gallery.is_paused();
                    gallery.set_paused(!paused);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.detail.scroll += 1,
            KeyCode::Char('k') | KeyCode::Up => {
                self.detail.scroll = self.detail.scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        if self.modal.is_open() {
            self.handle_detail_mouse(mouse);
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(target) = self.focus.target_at(x, y) {
                    self.focus.focus(target);
                    self.activate(target);
                }
            }
            MouseEventKind::ScrollDown => {
                self.page_scroll().scroll_by(3);
            }
            MouseEventKind::ScrollUp => {
                self.page_scroll().scroll_by(-3);
            }
            _ => {}
        }
    }

    fn handle_detail_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        let regions = self.detail.regions;
        match mouse.kind {
            MouseEventKind::Moved => {
                let inside = regions.gallery.is_some_and(|area| contains(area, x, y));
                if inside != self.detail.pointer_in_gallery {
                    self.detail.pointer_in_gallery = inside;
                    if let Some(gallery) = self.modal.gallery_mut() {
                        gallery.set_paused(inside);
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = |area: Option<_>| area.is_some_and(|area| contains(area, x, y));
                if contains(regions.close, x, y) {
                    self.modal.click(ModalClick::CloseButton);
                } else if hit(regions.prev) {
                    if let Some(gallery) = self.modal.gallery_mut() {
                        gallery.prev();
                    }
                } else if hit(regions.next) {
                    if let Some(gallery) = self.modal.gallery_mut() {
                        gallery.next();
                    }
                } else if let Some(index) = regions.indicator_at(x, y) {
                    if let Some(gallery) = self.modal.gallery_mut() {
                        gallery.select(index);
                    }
                } else if contains(regions.content, x, y) {
                    self.modal.click(ModalClick::Content);
                } else {
                    self.modal.click(ModalClick::Backdrop);
                }
            }
            MouseEventKind::ScrollDown => self.detail.scroll += 1,
            MouseEventKind::ScrollUp => {
                self.detail.scroll = self.detail.scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn activate(&mut self, target: Target) {
        match target {
            Target::Anchor(section) => self.jump_to(section),
            Target::ThemeToggle => self.toggle_theme(),
            Target::Project(i) => {
                if let Some(project) = self.projects.list().get(i) {
                    self.open_detail(Inspected::Project(project));
                }
            }
            Target::DevOps(i) => {
                if let Some(project) = self.devops.list().get(i) {
                    self.open_detail(Inspected::DevOps(project));
                }
            }
            Target::LoadMoreProjects => {
                let first_new = self.project_pages.visible_count();
                self.project_pages.load_more();
                self.focus.focus(Target::Project(first_new));
                self.reveal_focus = true;
            }
            Target::LoadMoreDevOps => {
                let first_new = self.devops_pages.visible_count();
                self.devops_pages.load_more();
                self.focus.focus(Target::DevOps(first_new));
                self.reveal_focus = true;
            }
            Target::Field(_) => {}
            Target::Send => self.submit(),
            Target::NewMessage => {
                self.contact.new_message();
                self.focus.focus(Target::Field(Field::Name));
                self.reveal_focus = true;
            }
        }
    }

    fn open_detail(&mut self, record: Inspected) {
        self.modal.open(record);
        self.detail = DetailView::default();
    }

    fn submit(&mut self) {
        match self.contact.submit() {
            Ok(submission) => {
                debug!("Dispatching contact submission");
                submission.dispatch(Arc::clone(&self.sender), self.outcomes.clone());
            }
            Err(SubmitRejected::Invalid(errors)) => {
                if let Some(first) = errors.iter().next() {
                    self.focus.focus(Target::Field(first.field()));
                    self.reveal_focus = true;
                }
            }
            Err(SubmitRejected::InFlight) => {}
        }
    }

    fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        info!(theme = theme.as_str(), "Theme switched");
    }

    fn jump_to(&mut self, section: Section) {
        let line = self.layout.sections[section.index()];
        if self.page_scroll().scroll_to(line) {
            debug!(anchor = section.anchor(), "Jumped to section");
        }
        self.focus.focus(Target::Anchor(section));
    }

    fn move_focus(&mut self, forward: bool) {
        let items = self.focus_targets();
        if forward {
            self.focus.focus_next(&items);
        } else {
            self.focus.focus_previous(&items);
        }
        self.reveal_focus = true;
    }

    fn page_step(&self) -> isize {
        isize::try_from(self.layout.viewport.saturating_sub(2).max(1)).unwrap_or(1)
    }
}
