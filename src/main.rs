//! Main module for the Random Picker application using Yew.
//! Wires mode state, input triggers, and the frame loop driving the core.

use gloo_timers::future::TimeoutFuture;
use log::{debug, info, LevelFilter};
use random_picker::{CandidateState, Selector, SelectorConfig, StartError, Tick};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

mod components;
mod config;
mod logger;
mod utils;

use components::{ChoiceCard, GiantDigit};
use config::{CARD_LABELS, DIGIT_PLACEHOLDER, FRAME_INTERVAL_MS};
use utils::now_ms;

/// Which picker the screen currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    LeftRight,
    Number,
}

impl Mode {
    fn label(self) -> &'static str {
        match self {
            Mode::LeftRight => "left/right",
            Mode::Number => "number",
        }
    }

    fn selector_config(self) -> SelectorConfig {
        match self {
            Mode::LeftRight => SelectorConfig::cards(),
            Mode::Number => SelectorConfig::digits(),
        }
    }
}

/// Render state of the giant digit in number mode.
#[derive(Clone, PartialEq)]
struct DigitView {
    value: Option<usize>,
    state: CandidateState,
}

impl DigitView {
    fn empty() -> Self {
        Self {
            value: None,
            state: CandidateState::Idle,
        }
    }
}

fn highlighted_cards(active: usize) -> [CandidateState; 2] {
    let mut states = [CandidateState::Idle; 2];
    states[active] = CandidateState::Highlighted;
    states
}

fn committed_cards(winner: usize) -> [CandidateState; 2] {
    let mut states = [CandidateState::Loser; 2];
    states[winner] = CandidateState::Winner;
    states
}

/// Primary application component: one selector state machine, two views.
#[function_component(Main)]
fn main_component() -> Html {
    let mode = use_state(|| Mode::LeftRight);
    // The single in-flight run lives here; the frame loop and every input
    // trigger go through this machine.
    let selector = use_mut_ref(Selector::default);
    let running = use_state(|| false);
    let dimmed = use_state(|| false);
    let card_states = use_state(|| [CandidateState::Idle; 2]);
    let digit_view = use_state(DigitView::empty);

    // Start a run for the given mode, then drive it frame by frame until it
    // commits. A second start while animating is rejected by the machine.
    let start = {
        let selector = selector.clone();
        let running = running.clone();
        let dimmed = dimmed.clone();
        let card_states = card_states.clone();
        let digit_view = digit_view.clone();

        Callback::from(move |run_mode: Mode| {
            let info = {
                let mut rng = rand::rng();
                selector
                    .borrow_mut()
                    .start(run_mode.selector_config(), now_ms(), &mut rng)
            };
            let info = match info {
                Ok(info) => info,
                Err(err @ StartError::RunInProgress) => {
                    debug!("Start request ignored: {err}");
                    return;
                }
            };

            info!("Starting {} selection", run_mode.label());
            info!("Planned duration: {:.2}s", info.duration_ms / 1_000.0);

            running.set(true);
            dimmed.set(false);
            match run_mode {
                Mode::LeftRight => card_states.set(highlighted_cards(info.initial_index)),
                Mode::Number => digit_view.set(DigitView {
                    value: Some(info.initial_index),
                    state: CandidateState::Highlighted,
                }),
            }

            let selector = selector.clone();
            let running = running.clone();
            let dimmed = dimmed.clone();
            let card_states = card_states.clone();
            let digit_view = digit_view.clone();
            wasm_bindgen_futures::spawn_local(async move {
                loop {
                    TimeoutFuture::new(FRAME_INTERVAL_MS).await;
                    let tick = {
                        let mut rng = rand::rng();
                        selector.borrow_mut().step(now_ms(), &mut rng)
                    };
                    match tick {
                        Some(Tick::Continue { switched: Some(i) }) => match run_mode {
                            Mode::LeftRight => card_states.set(highlighted_cards(i)),
                            Mode::Number => digit_view.set(DigitView {
                                value: Some(i),
                                state: CandidateState::Highlighted,
                            }),
                        },
                        Some(Tick::Continue { switched: None }) => {}
                        Some(Tick::Commit { winner }) => {
                            match run_mode {
                                Mode::LeftRight => {
                                    info!("Finished. Winner: {}", CARD_LABELS[winner]);
                                    card_states.set(committed_cards(winner));
                                }
                                Mode::Number => {
                                    info!("Finished. Winner: {winner}");
                                    digit_view.set(DigitView {
                                        value: Some(winner),
                                        state: CandidateState::Winner,
                                    });
                                }
                            }
                            dimmed.set(true);
                            running.set(false);
                            break;
                        }
                        None => break,
                    }
                }
            });
        })
    };

    let switch_mode = {
        let mode = mode.clone();
        let selector = selector.clone();
        Callback::from(move |next: Mode| {
            if selector.borrow().is_running() {
                debug!("Cannot switch mode while animating");
                return;
            }
            info!("Switched to {} mode", next.label());
            mode.set(next);
        })
    };

    // Global keyboard shortcuts: Space starts the current mode's run,
    // arrow keys navigate between modes. Re-registered on mode changes so
    // the handler always sees the mode it was rendered for.
    {
        let start = start.clone();
        let switch_mode = switch_mode.clone();
        use_effect_with(*mode, move |&current_mode| {
            let listener = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
                move |event: web_sys::KeyboardEvent| match event.code().as_str() {
                    "Space" => {
                        // Stop the page from scrolling.
                        event.prevent_default();
                        debug!("Spacebar pressed");
                        start.emit(current_mode);
                    }
                    "ArrowRight" if current_mode == Mode::LeftRight => {
                        switch_mode.emit(Mode::Number);
                    }
                    "ArrowLeft" if current_mode == Mode::Number => {
                        switch_mode.emit(Mode::LeftRight);
                    }
                    _ => {}
                },
            );
            gloo_utils::document()
                .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
                .expect("failed to attach keydown listener");
            move || {
                gloo_utils::document()
                    .remove_event_listener_with_callback(
                        "keydown",
                        listener.as_ref().unchecked_ref(),
                    )
                    .ok();
            }
        });
    }

    let on_start_click = {
        let start = start.clone();
        let mode = mode.clone();
        Callback::from(move |_: MouseEvent| {
            debug!("Start button clicked");
            start.emit(*mode);
        })
    };

    html! {
        <div class={classes!("background", (*dimmed).then_some("dimmed"))}>
            { match *mode {
                Mode::LeftRight => html! {
                    <section class="mode-panel">
                        <div class="cards">
                            <ChoiceCard label={CARD_LABELS[0]} state={card_states[0]} />
                            <ChoiceCard label={CARD_LABELS[1]} state={card_states[1]} />
                        </div>
                        <button class="start-btn"
                            disabled={*running}
                            onclick={on_start_click.clone()}
                        >
                            { "PICK A SIDE" }
                        </button>
                        <button class="nav-btn"
                            onclick={switch_mode.reform(|_| Mode::Number)}
                        >
                            { "Number mode \u{2192}" }
                        </button>
                    </section>
                },
                Mode::Number => html! {
                    <section class="mode-panel">
                        <GiantDigit
                            value={digit_view.value}
                            state={digit_view.state}
                            placeholder={DIGIT_PLACEHOLDER}
                        />
                        <button class="start-btn"
                            disabled={*running}
                            onclick={on_start_click.clone()}
                        >
                            { "PICK A NUMBER" }
                        </button>
                        <button class="nav-btn"
                            onclick={switch_mode.reform(|_| Mode::LeftRight)}
                        >
                            { "\u{2190} Left/Right mode" }
                        </button>
                    </section>
                },
            } }
        </div>
    }
}

/// Entry point: installs the panic hook and console logger, then renders.
fn main() {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Debug);
    yew::Renderer::<Main>::new().render();
}
