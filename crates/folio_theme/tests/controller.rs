use folio_theme::store::Result as StoreResult;
use folio_theme::{
    AccentController, AccentId, AccentStore, FileStore, MemoryStore, NullStore, StyleVariables,
    ThemeConfig, ThemeContext,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Store handle that outlives the controller it is lent to
#[derive(Clone, Default)]
struct SharedStore(Rc<MemoryStore>);

impl AccentStore for SharedStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        self.0.load(key)
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.0.save(key, value)
    }
}

fn controller_with(store: impl AccentStore + 'static) -> (AccentController, ThemeContext) {
    let context = ThemeContext::new();
    let controller =
        AccentController::initialize(Box::new(store), context.clone(), &ThemeConfig::default());
    (controller, context)
}

#[test]
fn empty_storage_selects_orange() {
    let (controller, _) = controller_with(MemoryStore::new());
    assert_eq!(controller.selected(), AccentId::Orange);
    assert_eq!(controller.current_token().primary.to_css(), "#f24d1b");
}

#[test]
fn stored_accent_is_restored() {
    let (controller, _) = controller_with(MemoryStore::new().with_entry("accentKey", "cyan"));
    assert_eq!(controller.selected(), AccentId::Cyan);
}

#[test]
fn garbage_in_storage_falls_back_to_default() {
    for value in ["lime", "", "ORANGE", " red", "{\"id\":\"red\"}"] {
        let (controller, _) = controller_with(MemoryStore::new().with_entry("accentKey", value));
        assert_eq!(
            controller.selected(),
            AccentId::Orange,
            "stored value {:?} should fall back to orange",
            value
        );
    }
}

#[test]
fn unavailable_storage_never_errors() {
    let (mut controller, context) = controller_with(NullStore);
    assert_eq!(controller.selected(), AccentId::Orange);

    assert!(controller.select("red"));
    assert_eq!(controller.selected(), AccentId::Red);
    assert_eq!(context.variables().primary, "#f03746");
}

#[test]
fn select_broadcasts_and_persists() {
    let store = SharedStore::default();
    let (mut controller, context) = controller_with(store.clone());

    assert!(controller.select("violet"));
    assert_eq!(controller.selected(), AccentId::Violet);
    assert_eq!(store.0.peek("accentKey").as_deref(), Some("violet"));

    let vars = context.variables();
    assert_eq!(vars.accent, Some(AccentId::Violet));
    assert_eq!(vars.primary, "#8531de");
    assert_eq!(vars, StyleVariables::from_token(AccentId::Violet.token()));
}

#[test]
fn unknown_selection_changes_nothing() {
    let store = SharedStore::default();
    let (mut controller, context) = controller_with(store.clone());
    controller.select("cyan");
    let before = context.variables();
    let revision = context.revision();

    assert!(!controller.select("lime"));
    assert!(!controller.select(""));

    assert_eq!(controller.selected(), AccentId::Cyan);
    assert_eq!(context.variables(), before);
    assert_eq!(context.revision(), revision);
    assert_eq!(store.0.peek("accentKey").as_deref(), Some("cyan"));
}

#[test]
fn selection_is_idempotent() {
    let (mut controller, context) = controller_with(MemoryStore::new());
    controller.select("red");
    let once = context.variables();
    controller.select("red");
    assert_eq!(context.variables(), once);
    assert_eq!(controller.selected(), AccentId::Red);
}

#[test]
fn every_accent_resolves_to_a_token() {
    let (mut controller, context) = controller_with(MemoryStore::new());
    for accent in AccentId::all() {
        controller.select_accent(*accent);
        assert_eq!(controller.current_token().id, *accent);
        assert_eq!(context.accent(), Some(*accent));
        assert!(context.variables().gradient.starts_with("linear-gradient(135deg, "));
    }
}

#[test]
fn selection_survives_a_new_controller() {
    let store = SharedStore::default();
    let (mut first, _) = controller_with(store.clone());
    first.select("red");
    drop(first);

    let (second, _) = controller_with(store);
    assert_eq!(second.selected(), AccentId::Red);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let (mut first, _) = controller_with(FileStore::new(&path));
    first.select("cyan");

    let (second, _) = controller_with(FileStore::new(&path));
    assert_eq!(second.selected(), AccentId::Cyan);
}

#[test]
fn corrupt_file_store_falls_back_and_keeps_session_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let (mut controller, context) = controller_with(FileStore::new(&path));
    assert_eq!(controller.selected(), AccentId::Orange);

    assert!(controller.select("violet"));
    assert_eq!(controller.selected(), AccentId::Violet);
    assert_eq!(context.accent(), Some(AccentId::Violet));
}

#[test]
fn corrupt_file_store_recovers_on_next_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{\"accentKey\": ").unwrap();

    let (mut controller, _context) = controller_with(FileStore::new(&path));
    assert!(controller.select("violet"));
    drop(controller);

    let (restarted, _context) = controller_with(FileStore::new(&path));
    assert_eq!(restarted.selected(), AccentId::Violet);
}

#[test]
fn observers_receive_each_selection() {
    let (mut controller, context) = controller_with(MemoryStore::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    context.subscribe(move |vars| sink.borrow_mut().push(vars.accent));

    controller.select("cyan");
    controller.select("nope");
    controller.select("red");

    assert_eq!(
        *seen.borrow(),
        vec![Some(AccentId::Cyan), Some(AccentId::Red)]
    );
}
