//! Diamond Street entry point
//!
//! Wires the browser page to the game loop on wasm32, or plays a scripted
//! headless race on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use diamond_street::hud::HudSnapshot;
    use diamond_street::input::{SwipeTracker, direction_for_key};
    use diamond_street::platform::web::AnimationFrameScheduler;
    use diamond_street::sim::GameEvent;
    use diamond_street::{Direction, DiscountLedger, GameLoop, Settings};

    /// Page-side state around the loop
    struct Game {
        game_loop: GameLoop<AnimationFrameScheduler>,
        swipe: SwipeTracker,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Diamond Street starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let discount = DiscountLedger::load();
        log::info!(
            "Race: {}s budget, {} units, returning discount {}%",
            settings.total_time,
            settings.total_distance,
            discount.discount()
        );

        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(settings, AnimationFrameScheduler::new(), discount),
            swipe: SwipeTracker::new(),
        }));

        // Frame callback holds a weak handle so a dropped page stops the loop
        {
            let weak = Rc::downgrade(&game);
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                let Some(game) = weak.upgrade() else {
                    return;
                };
                let mut g = game.borrow_mut();
                for event in g.game_loop.on_frame(time) {
                    match event {
                        GameEvent::CompetitorPassed { id } => log::info!("Passed {}", id),
                        GameEvent::Collision { id } => flash_collision(&id),
                        GameEvent::Finished(outcome) => log::info!("Finished: {:?}", outcome),
                    }
                }
                update_hud(&g.game_loop.snapshot());
            });
            game.borrow_mut()
                .game_loop
                .scheduler_mut()
                .set_callback(callback);
        }

        setup_keyboard(game.clone());
        setup_touch(&document, game.clone());
        setup_direction_buttons(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_focus_release(&document, game.clone());
        setup_teardown(game.clone());

        update_hud(&game.borrow().game_loop.snapshot());
        log::info!("Diamond Street ready");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if !g.game_loop.state().is_active() {
                    return;
                }
                if let Some(direction) = direction_for_key(&event.code()) {
                    // Arrow keys would scroll the page
                    event.prevent_default();
                    g.game_loop.set_control(direction, pressed);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(surface) = document.get_element_by_id("game") else {
            log::warn!("No #game element, touch steering disabled");
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.swipe.start(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = surface
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let Game { game_loop, swipe } = &mut *g;
                    swipe.moved(
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                        game_loop.controls_mut(),
                    );
                }
            });
            let _ = surface
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                let Game { game_loop, swipe } = &mut *g;
                swipe.end(game_loop.controls_mut());
            });
            let _ = surface
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen arrows: held while touched
    fn setup_direction_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for direction in Direction::ALL {
            let id = format!("btn-{}", direction.as_str());
            let Some(btn) = document.get_element_by_id(&id) else {
                continue;
            };
            for (event_name, pressed) in
                [("touchstart", true), ("touchend", false), ("touchcancel", false)]
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    if pressed && !g.game_loop.state().is_active() {
                        return;
                    }
                    g.game_loop.set_control(direction, pressed);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.game_loop.start() {
                    update_hud(&g.game_loop.snapshot());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.game_loop.restart();
                update_hud(&g.game_loop.snapshot());
                log::info!("Race restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keys released while the page is not looking are never seen, so drop them all
    fn setup_focus_release(document: &Document, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().game_loop.focus_lost();
                log::info!("Controls released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().game_loop.focus_lost();
                    log::info!("Controls released (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().game_loop.teardown();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back from the page cache: the torn-down session is Idle again
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            update_hud(&game.borrow().game_loop.snapshot());
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn flash_collision(id: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().add_1("bump");
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Push the snapshot into the DOM
    fn update_hud(hud: &HudSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for entity in std::iter::once(&hud.player)
            .chain(hud.competitors.iter())
            .chain(std::iter::once(&hud.destination))
        {
            if let Some(el) = document.get_element_by_id(&entity.id) {
                let opacity = if entity.passed { 0.5 } else { 1.0 };
                if !hud.collision {
                    let _ = el.class_list().remove_1("bump");
                }
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;opacity:{}",
                        entity.pos.x, entity.pos.y, entity.size.x, entity.size.y, opacity
                    ),
                );
            }
        }

        set_text(&document, "#hud-timer .hud-value", &hud.timer_label());
        set_text(&document, "#hud-discount .hud-value", &format!("{}% OFF", hud.discount));
        set_text(
            &document,
            "#hud-progress .hud-value",
            &format!("{}%", hud.progress_percent.round()),
        );
        set_text(
            &document,
            "#hud-passed .hud-value",
            &format!("{} of {}", hud.competitors_passed, hud.competitor_count),
        );

        if let Some(surface) = document.get_element_by_id("game") {
            let _ = surface.set_attribute("data-phase", hud.phase.as_str());
        }
        show(&document, "start-screen", hud.phase == diamond_street::sim::GamePhase::Idle);
        show(&document, "game-over", hud.is_over());
        if let Some(title) = hud.result_title() {
            set_text(&document, "#game-over .title", title);
            set_text(&document, "#final-discount", &format!("{}% OFF", hud.discount));
            set_text(&document, "#final-score", &hud.score.to_string());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use diamond_street::Settings;

    env_logger::init();
    log::info!("Diamond Street (native) starting...");
    log::info!("The playable version runs in the browser; playing a scripted race");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Settings::from_json(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("{}: {}", path, e);
                    std::process::exit(2);
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };

    demo_race(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive up the street for a couple of seconds, then coast to the finish
#[cfg(not(target_arch = "wasm32"))]
fn demo_race(settings: diamond_street::Settings) {
    use diamond_street::consts::DEMO_DT;
    use diamond_street::sim::GameEvent;
    use diamond_street::{Direction, DiscountLedger, GameLoop, ManualScheduler};

    let mut game = GameLoop::new(settings, ManualScheduler::new(), DiscountLedger::new());
    game.start();
    game.set_control(Direction::Up, true);

    let frame_ms = f64::from(DEMO_DT) * 1000.0;
    let mut time = 0.0;
    let mut collisions = 0;
    while game.has_pending_frame() {
        if game.state().elapsed_time() > 2.0 {
            game.set_control(Direction::Up, false);
        }
        for event in game.pump(time) {
            match event {
                GameEvent::CompetitorPassed { id } => println!("  passed {id}"),
                GameEvent::Collision { .. } => collisions += 1,
                GameEvent::Finished(outcome) => println!("  finished: {outcome:?}"),
            }
        }
        time += frame_ms;
    }

    let hud = game.snapshot();
    println!(
        "\n{} in {} - {} of {} competitors passed, {} collision frames, score {}",
        hud.result_title().unwrap_or("Stopped"),
        diamond_street::hud::format_time(hud.elapsed_time),
        hud.competitors_passed,
        hud.competitor_count,
        collisions,
        hud.score
    );
    println!("Discount earned: {}% OFF", game.discount().discount());
    game.teardown();
}
