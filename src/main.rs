//! Doggo Merge entry point
//!
//! The web build is driven from JS through `platform::web::WebGame`.
//! The native binary plays a short scripted session against in-memory storage.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use doggo_merge::engine::{EngineOptions, GameEngine, SelectOutcome};
    use doggo_merge::persistence::MemoryStore;

    env_logger::init();
    log::info!("Doggo Merge (native) starting...");
    log::info!("Native mode has no UI - run the web build for the real game");

    let options = EngineOptions {
        seed: 2024,
        ..Default::default()
    };
    let mut engine = match GameEngine::open(MemoryStore::new(), options) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Bad game configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Hatch a few eggs, then try to merge every pair of neighbours
    for breed in ["corgi", "corgi", "pug", "pug", "corgi"] {
        match engine.spawn_piece(Some(breed)) {
            Ok(spawned) => println!("hatched {} in slot {}", breed, spawned.index),
            Err(e) => println!("could not hatch {}: {}", breed, e),
        }
    }
    for (a, b) in [(0, 1), (2, 3), (0, 4)] {
        engine.select_slot(a);
        match engine.select_slot(b) {
            SelectOutcome::Merge(Ok(merged)) => println!(
                "merged {} + {} -> slot {} (level {}, +{} bones)",
                a,
                b,
                merged.result_index,
                merged.new_level(),
                merged.reward
            ),
            SelectOutcome::Merge(Err(e)) => println!("merge {} + {} refused: {}", a, b, e),
            other => println!("tap {} -> {:?}", b, other),
        }
    }

    let progress = engine.progress();
    println!(
        "\nbones: {}  pieces: {}  collection: {}/{}",
        engine.state().wallet.bones,
        engine.state().board.occupied_count(),
        progress.discovered,
        progress.total
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
