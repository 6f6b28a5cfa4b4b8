//! Portfolio composition root
//!
//! Wires the accent controller, the page's pointer dispatcher, magnetic
//! controls, reveal sections and the scroll-linked indicators together. The host feeds it pointer samples,
//! viewport changes and frame ticks; renderers read the theme context and
//! the per-control transforms.

use crate::config::FolioConfig;
use folio_animation::{RevealFrame, RevealGroup, ScrollMapping, ScrollProgress};
use folio_core::{PointerDispatcher, PointerEvent, Rect};
use folio_theme::{AccentController, AccentId, AccentStore, ThemeContext};
use folio_widgets::{MagneticAffordance, MagneticTransform};
use slotmap::{new_key_type, SlotMap};
use std::rc::Rc;

new_key_type! {
    /// Handle for a magnetic control
    pub struct ControlId;
    /// Handle for a reveal section
    pub struct SectionId;
}

type BoundsFn = Box<dyn Fn() -> Option<Rect>>;

struct Section {
    group: RevealGroup,
    bounds: BoundsFn,
}

/// The interactive state of one page
pub struct Portfolio {
    config: FolioConfig,
    controller: AccentController,
    dispatcher: Rc<PointerDispatcher>,
    controls: SlotMap<ControlId, MagneticAffordance>,
    sections: SlotMap<SectionId, Section>,
    viewport: Rect,
    scroll_progress: ScrollProgress,
    hero_parallax: ScrollMapping,
}

impl Portfolio {
    /// Restore the persisted accent and paint it into a fresh context
    pub fn new(config: FolioConfig, store: Box<dyn AccentStore>) -> Self {
        let controller = AccentController::initialize(store, ThemeContext::new(), &config.theme);
        controller.apply();
        tracing::info!(accent = %controller.selected(), "portfolio ready");
        let scroll_progress =
            ScrollProgress::default().with_reduced_motion(config.motion.reduced_motion);

        Self {
            config,
            controller,
            dispatcher: Rc::new(PointerDispatcher::new()),
            controls: SlotMap::with_key(),
            sections: SlotMap::with_key(),
            viewport: Rect::ZERO,
            scroll_progress,
            hero_parallax: ScrollMapping::hero_parallax(),
        }
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Read-only styling channel
    pub fn theme(&self) -> &ThemeContext {
        self.controller.context()
    }

    pub fn accent(&self) -> AccentId {
        self.controller.selected()
    }

    /// Switch accent; unknown ids are ignored
    pub fn select_accent(&mut self, id: &str) -> bool {
        self.controller.select(id)
    }

    pub fn dispatcher(&self) -> &Rc<PointerDispatcher> {
        &self.dispatcher
    }

    /// Feed one pointer-move sample to every attached control
    pub fn pointer_moved(&self, x: f32, y: f32, timestamp: u64) -> usize {
        self.dispatcher.dispatch(&PointerEvent::new(x, y, timestamp))
    }

    /// Mount a magnetic control whose layout box is resolved lazily
    pub fn add_control<F>(&mut self, bounds: F) -> ControlId
    where
        F: Fn() -> Option<Rect> + 'static,
    {
        let config = self.config.motion.magnetic();
        let magnet = MagneticAffordance::attach(&self.dispatcher, bounds, config);
        self.controls.insert(magnet)
    }

    pub fn control(&self, id: ControlId) -> Option<&MagneticAffordance> {
        self.controls.get(id)
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut MagneticAffordance> {
        self.controls.get_mut(id)
    }

    /// Unmount a control; its subscription is gone when this returns
    pub fn remove_control(&mut self, id: ControlId) -> bool {
        match self.controls.remove(id) {
            Some(mut magnet) => {
                magnet.detach();
                true
            }
            None => false,
        }
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Register a section of `items` entries that reveal on first view
    pub fn add_section<F>(&mut self, items: usize, bounds: F) -> SectionId
    where
        F: Fn() -> Option<Rect> + 'static,
    {
        let mut section = Section {
            group: RevealGroup::new(self.config.motion.reveal(), items),
            bounds: Box::new(bounds),
        };
        section.group.update(self.viewport, (section.bounds)());
        self.sections.insert(section)
    }

    pub fn section(&self, id: SectionId) -> Option<&RevealGroup> {
        self.sections.get(id).map(|s| &s.group)
    }

    /// Visual state of one item in a section
    pub fn reveal_frame(&self, id: SectionId, index: usize) -> Option<RevealFrame> {
        self.section(id)?.frame(index)
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Reading-progress bar fill, 0.0 to 1.0
    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress.value()
    }

    /// Vertical offset of the hero block for the current scroll position
    pub fn hero_offset(&self) -> f32 {
        self.hero_parallax.map(self.viewport.y())
    }

    /// Move or resize the visible area and re-check reveal triggers
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.scroll_progress.set_scroll(viewport.y());
        for section in self.sections.values_mut() {
            section.group.update(viewport, (section.bounds)());
        }
    }

    /// Advance all animations by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for magnet in self.controls.values_mut() {
            magnet.tick(dt);
        }
        for section in self.sections.values_mut() {
            section.group.tick(dt);
        }
        self.scroll_progress.tick(dt);
    }

    /// Current transform of every control
    pub fn transforms(&self) -> impl Iterator<Item = (ControlId, MagneticTransform)> + '_ {
        self.controls.iter().map(|(id, magnet)| (id, magnet.transform()))
    }

    /// Whether any control, section or indicator is still moving
    pub fn is_animating(&self) -> bool {
        self.scroll_progress.is_animating()
            || self
                .controls
                .values()
                .any(|m| m.is_hovered() || m.is_releasing())
            || self
                .sections
                .values()
                .any(|s| s.group.has_fired() && !s.group.is_complete())
    }
}

impl std::fmt::Debug for Portfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portfolio")
            .field("accent", &self.controller.selected())
            .field("controls", &self.controls.len())
            .field("sections", &self.sections.len())
            .field("viewport", &self.viewport)
            .finish()
    }
}
