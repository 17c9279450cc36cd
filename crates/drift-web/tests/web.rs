#![cfg(target_arch = "wasm32")]

use drift_engine::{PoemStore, SceneKind};
use drift_engine::poem::storage_key;
use drift_web::storage::LocalStorageStore;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn local_storage_store_round_trips() {
    let mut store = LocalStorageStore::new();
    let key = storage_key(SceneKind::Waves);
    store.set(&key, "salt on the wind\nfoam at my feet").unwrap();
    assert_eq!(store.get(&key).unwrap().as_deref(), Some("salt on the wind\nfoam at my feet"));
    store.remove(&key).unwrap();
    assert_eq!(store.get(&key).unwrap(), None);
}

#[wasm_bindgen_test]
fn runner_paints_and_switches_scenes() {
    mount_canvas("drift-test-canvas");
    drift_web::drift_init("drift-test-canvas").unwrap();

    drift_web::drift_frame(0.0);
    drift_web::drift_frame(16.7);
    assert_eq!(
        drift_web::drift_poem_text(),
        "Each drop holds a memory,\nfinding its way home."
    );

    drift_web::drift_next_scene();
    drift_web::drift_frame(33.4);
    assert_eq!(
        drift_web::drift_poem_text(),
        "Flowing gently with time,\ncarrying echoes of the earth."
    );

    let canvas = web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id("drift-test-canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    assert!(canvas.width() >= 1);
}

#[wasm_bindgen_test]
fn init_fails_for_missing_canvas() {
    assert!(drift_web::drift_init("no-such-canvas").is_err());
}
