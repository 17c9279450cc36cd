use drift_engine::poem::storage_key;
use drift_engine::{
    AssetManifest, Display, DisplayConfig, FadePhase, InputEvent, MemoryStore, PoemError,
    PoemStore, SceneKind,
};

const FRAME: f64 = 1000.0 / 60.0;

fn display_with(store: MemoryStore) -> Display<MemoryStore> {
    Display::new(DisplayConfig::default(), AssetManifest::default(), store, 7)
}

#[test]
fn four_nexts_return_to_the_start() {
    let mut display = display_with(MemoryStore::new());
    for start in SceneKind::ALL {
        display.load_scene(start);
        for _ in 0..4 {
            display.next_scene();
        }
        assert_eq!(display.active_scene(), start);
        display.prev_scene();
        assert_eq!(display.active_scene(), start.prev());
    }
}

#[test]
fn fade_progress_stays_in_unit_range_under_erratic_clocks() {
    let mut display = display_with(MemoryStore::new());
    let timestamps = [0.0, 5.0, 4.0, 900.0, 10_000.0, 9_000.0, 9_001.0, 60_000.0, 60_016.0];
    for now in timestamps {
        let out = display.frame(now);
        assert!((0.0..=1.0).contains(&out.poem.opacity));
        let progress = display.rotation().progress();
        assert!((0.0..=1.0).contains(&progress), "progress {progress} at {now}");
    }
}

#[test]
fn poem_cycles_through_the_full_sequence() {
    let mut display = display_with(MemoryStore::new());
    let mut now = 0.0;
    display.frame(now);
    assert_eq!(display.rotation().phase(), FadePhase::FadeIn);
    now += 500.0;
    display.frame(now);
    assert_eq!(display.rotation().phase(), FadePhase::Display);
    assert_eq!(display.overlay().opacity, 1.0);
    now += 3000.0;
    display.frame(now);
    assert_eq!(display.rotation().phase(), FadePhase::FadeOut);
    now += 250.0;
    display.frame(now);
    assert!((display.overlay().opacity - 0.5).abs() < 1e-6);
    now += 250.0;
    display.frame(now);
    // Two-line default poem wraps straight back to the first pair
    assert_eq!(display.rotation().phase(), FadePhase::FadeIn);
    assert_eq!(display.rotation().index(), 0);
}

#[test]
fn single_line_save_is_rejected_and_storage_untouched() {
    let mut display = display_with(MemoryStore::new());
    display.load_scene(SceneKind::River);
    let err = display.save_poem("only one line\n\n   ").unwrap_err();
    assert!(matches!(err, PoemError::TooFewLines { found: 1 }));
    assert!(display.store().is_empty());
    assert!(!display.custom_poems().is_enabled(SceneKind::River));
}

#[test]
fn ocean_custom_poem_survives_reload() {
    let mut display = display_with(MemoryStore::new());
    display.load_scene(SceneKind::Ocean);
    assert_eq!(display.current_poem_lines().len(), 4);

    display.save_poem("  Tide pools keep secrets  \n\nthe moon lends them light").unwrap();
    let store = display.into_store();
    assert_eq!(
        store.get(&storage_key(SceneKind::Ocean)).unwrap().as_deref(),
        Some("  Tide pools keep secrets  \n\nthe moon lends them light")
    );

    let mut reloaded = display_with(store);
    reloaded.load_scene(SceneKind::Ocean);
    assert_eq!(
        reloaded.current_poem_lines(),
        vec!["Tide pools keep secrets", "the moon lends them light"]
    );
    let out = reloaded.frame(0.0);
    assert_eq!(out.poem.lines, vec!["Tide pools keep secrets", "the moon lends them light"]);
}

#[test]
fn reset_falls_back_to_the_default_poem() {
    let mut display = display_with(MemoryStore::new());
    display.load_scene(SceneKind::Waves);
    display.save_poem("first\nsecond\nthird").unwrap();
    assert_eq!(display.poem_text(), "first\nsecond\nthird");

    display.reset_poem().unwrap();
    assert!(display.store().is_empty());
    assert_eq!(display.current_poem_lines(), vec!["Rise, fall, return again —", "the rhythm of being."]);
    assert_eq!(display.poem_text(), "Rise, fall, return again —\nthe rhythm of being.");
}

#[test]
fn rain_default_shows_two_lines() {
    let mut display = display_with(MemoryStore::new());
    let out = display.frame(0.0);
    assert_eq!(out.poem.lines, vec!["Each drop holds a memory,", "finding its way home."]);
}

#[test]
fn stored_poems_are_loaded_eagerly() {
    let mut store = MemoryStore::new();
    store.set(&storage_key(SceneKind::Rain), "wet streets\nshine").unwrap();
    store.set(&storage_key(SceneKind::River), "not enough").unwrap();
    let display = display_with(store);
    assert!(display.custom_poems().is_enabled(SceneKind::Rain));
    assert!(!display.custom_poems().is_enabled(SceneKind::River));
    assert_eq!(display.current_poem_lines(), vec!["wet streets", "shine"]);
}

#[test]
fn clicking_fish_removes_topmost_and_empties_are_refilled() {
    let mut display = display_with(MemoryStore::new());
    display.load_scene(SceneKind::Ocean);
    let mut now = 0.0;
    display.frame(now);

    let total = display.scenes().ocean.fish().len();
    for removed in 1..=total {
        let pos = display.scenes().ocean.fish().last().map(|f| f.pos).unwrap();
        display.push_input(InputEvent::PointerDown { x: pos.x, y: pos.y });
        now += FRAME;
        display.frame(now);
        let left = display.scenes().ocean.fish().len();
        if removed < total {
            assert_eq!(left, total - removed);
        } else {
            // The last click empties the school; the same frame's draw refills it.
            assert_eq!(left, total);
        }
    }
}
