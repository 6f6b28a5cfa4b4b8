use folio_app::prelude::*;
use folio_app::{ContentFeed, FolioConfig};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

const FRAME: f32 = 1.0 / 60.0;

fn demo_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn accent_survives_restart_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");

    let mut first = Portfolio::new(FolioConfig::default(), Box::new(FileStore::new(&store_path)));
    assert_eq!(first.accent(), AccentId::Orange);
    assert!(first.select_accent("red"));
    assert!(!first.select_accent("magenta"));
    drop(first);

    let second = Portfolio::new(FolioConfig::default(), Box::new(FileStore::new(&store_path)));
    assert_eq!(second.accent(), AccentId::Red);
    assert!(second.theme().to_css().contains("--primary: #f03746;"));
}

#[test]
fn hover_follow_and_release_on_shared_dispatcher() {
    let mut page = Portfolio::new(FolioConfig::default(), Box::new(MemoryStore::new()));
    let cta = page.add_control(|| Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
    let nav = page.add_control(|| Some(Rect::new(300.0, 0.0, 100.0, 40.0)));

    page.control_mut(cta).unwrap().enter_hover();
    page.pointer_moved(150.0, 20.0, 0);
    for _ in 0..90 {
        page.tick(FRAME);
    }
    let held = page.control(cta).unwrap().transform();
    assert!((held.x - 25.0).abs() < 0.05);
    assert!(page.control(nav).unwrap().transform().is_rest());
    assert_eq!(page.control(nav).unwrap().offset().dx, -50.0);

    page.control_mut(cta).unwrap().exit_hover();
    let mut last = held.magnitude();
    for _ in 0..120 {
        page.tick(FRAME);
        let now = page.control(cta).unwrap().transform().magnitude();
        assert!(now <= last);
        last = now;
    }
    assert_eq!(last, 0.0);
    assert!(!page.is_animating());
}

#[test]
fn reduced_motion_config_keeps_controls_still() {
    let config: FolioConfig = toml::from_str("[motion]\nreduced_motion = true\n").unwrap();
    let mut page = Portfolio::new(config, Box::new(MemoryStore::new()));
    let id = page.add_control(|| Some(Rect::new(0.0, 0.0, 100.0, 40.0)));

    page.control_mut(id).unwrap().enter_hover();
    page.pointer_moved(150.0, 20.0, 0);
    page.tick(FRAME);
    assert!(page.control(id).unwrap().transform().is_rest());

    page.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
    let section = page.add_section(2, || Some(Rect::new(200.0, 200.0, 200.0, 100.0)));
    assert_eq!(page.reveal_frame(section, 1).map(|f| f.translate_y), Some(0.0));

    page.set_viewport(Rect::new(0.0, 400.0, 800.0, 600.0));
    assert_eq!(page.scroll_progress(), 0.4);
}

#[test]
fn scrolling_drives_progress_bar_and_hero() {
    let mut page = Portfolio::new(FolioConfig::default(), Box::new(MemoryStore::new()));
    assert_eq!(page.scroll_progress(), 0.0);
    assert_eq!(page.hero_offset(), 0.0);

    page.set_viewport(Rect::new(0.0, 300.0, 800.0, 600.0));
    assert_eq!(page.hero_offset(), -30.0);
    assert_eq!(page.scroll_progress(), 0.0);
    assert!(page.is_animating());

    page.tick(FRAME);
    assert!(page.scroll_progress() > 0.0);
    for _ in 0..180 {
        page.tick(FRAME);
    }
    assert_eq!(page.scroll_progress(), 0.3);
    assert!(!page.is_animating());

    page.set_viewport(Rect::new(0.0, 5000.0, 800.0, 600.0));
    assert_eq!(page.hero_offset(), -60.0);
    for _ in 0..180 {
        page.tick(FRAME);
    }
    assert_eq!(page.scroll_progress(), 1.0);
}

#[test]
fn late_layout_is_picked_up_on_later_samples() {
    let mut page = Portfolio::new(FolioConfig::default(), Box::new(MemoryStore::new()));
    let laid_out = Rc::new(Cell::new(false));
    let flag = laid_out.clone();
    let id = page.add_control(move || flag.get().then(|| Rect::new(0.0, 0.0, 100.0, 40.0)));

    page.pointer_moved(150.0, 20.0, 0);
    assert_eq!(page.control(id).unwrap().offset().dx, 0.0);

    laid_out.set(true);
    page.pointer_moved(150.0, 20.0, 16);
    assert_eq!(page.control(id).unwrap().offset().dx, 25.0);
}

#[test]
fn demo_content_feed_is_clean() {
    let feed = ContentFeed::load(&demo_path("portfolio.toml")).unwrap();
    assert_eq!(feed.nav.len(), 5);
    assert!(!feed.projects.is_empty());
    assert!(feed.featured().count() >= 1);
    assert!(feed.validate().is_empty());
}

#[test]
fn demo_config_loads() {
    let config = FolioConfig::load(&demo_path("folio.toml")).unwrap();
    assert_eq!(config.theme.storage_key, "accentKey");
    assert_eq!(config.motion.damping_factor, 0.25);
    assert!(config.content.path.is_some());
}
