use arcade_core::{HasUpdate, MiniGame};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use std::time::Duration;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// How often the mounted game is offered the passage of time.
const FRAME_PERIOD: Duration = Duration::from_millis(50);

/// Longest gap fed to a game in one frame, so a throttled background tab does not
/// replay minutes of simulation at once.
const MAX_FRAME_GAP: Duration = Duration::from_secs(1);

/// A mini-game that knows how to draw itself inside [`MountedGame`].
pub(crate) trait GameWidget: MiniGame<Input: 'static> + Sized + 'static {
    /// Labelled counters shown above the board.
    fn stats(&self) -> Vec<(&'static str, String)>;

    /// Board and controls, emitting player input through `input`.
    fn view(&self, input: Callback<Self::Input>) -> Html;

    /// Keyboard input understood while the game is mounted.
    fn key_input(_key: &str) -> Option<Self::Input> {
        None
    }
}

pub(crate) enum HostMsg<I> {
    Input(I),
    Frame,
    Reset,
    Close,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct MountedProps {
    pub seed: u64,
    pub on_close: Callback<()>,
}

/// Owns exactly one running game; dropping it stops the frame clock and key listener.
pub(crate) struct MountedGame<G: GameWidget> {
    game: G,
    notice: Option<String>,
    last_frame: f64,
    _frame_clock: Interval,
    _key_listener: EventListener,
}

impl<G: GameWidget> MountedGame<G> {
    fn create_frame_clock(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        let millis = FRAME_PERIOD.as_millis().try_into().unwrap_or(u32::MAX);
        Interval::new(millis, move || link.send_message(HostMsg::Frame))
    }

    fn create_key_listener(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&gloo::utils::window(), "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(input) = G::key_input(&event.key()) {
                event.prevent_default();
                link.send_message(HostMsg::Input(input));
            }
        })
    }

    fn elapsed_since_last_frame(&mut self) -> Duration {
        let now = js_sys::Date::now();
        let elapsed = frame_gap(self.last_frame, now);
        self.last_frame = now;
        elapsed
    }
}

/// Time between two `Date::now()` readings, clamped to `0..=MAX_FRAME_GAP`.
fn frame_gap(previous_ms: f64, now_ms: f64) -> Duration {
    let elapsed = (now_ms - previous_ms).max(0.);
    Duration::from_secs_f64(elapsed / 1000.).min(MAX_FRAME_GAP)
}

impl<G: GameWidget> Component for MountedGame<G> {
    type Message = HostMsg<G::Input>;
    type Properties = MountedProps;

    fn create(ctx: &Context<Self>) -> Self {
        log::debug!("mounting {}", G::KIND);
        Self {
            game: G::mount(ctx.props().seed),
            notice: None,
            last_frame: js_sys::Date::now(),
            _frame_clock: Self::create_frame_clock(ctx),
            _key_listener: Self::create_key_listener(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use HostMsg::*;

        match msg {
            Input(input) => match self.game.handle(input) {
                Ok(outcome) => {
                    let cleared_notice = self.notice.take().is_some();
                    outcome.has_update() || cleared_notice
                }
                Err(err) => {
                    log::debug!("{} rejected input: {}", G::KIND, err);
                    self.notice = Some(err.to_string());
                    true
                }
            },
            Frame => {
                let elapsed = self.elapsed_since_last_frame();
                self.game.advance(elapsed)
            }
            Reset => {
                log::debug!("resetting {}", G::KIND);
                self.game.reset();
                self.notice = None;
                true
            }
            Close => {
                ctx.props().on_close.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let kind = G::KIND;
        let restart_label = if self.game.is_finished() {
            "Play Again"
        } else {
            "New Game"
        };
        let cb_reset = ctx.link().callback(|_: MouseEvent| HostMsg::Reset);
        let cb_close = ctx.link().callback(|_: MouseEvent| HostMsg::Close);

        html! {
            <article class={classes!("mounted-game", kind.id())}>
                <header>
                    <h3>{kind.title()}</h3>
                    <button class="close" aria-label="Close" onclick={cb_close}>{"×"}</button>
                </header>
                <dl class="stats">
                    {
                        for self.game.stats().into_iter().map(|(label, value)| html! {
                            <div><dt>{label}</dt><dd>{value}</dd></div>
                        })
                    }
                </dl>
                { self.game.view(ctx.link().callback(HostMsg::Input)) }
                if let Some(notice) = &self.notice {
                    <p class="notice">{notice.clone()}</p>
                }
                <footer>
                    <button class="restart" onclick={cb_reset}>{restart_label}</button>
                </footer>
            </article>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::{SnakeGame, TICK_PERIOD};

    #[test]
    fn frame_gap_follows_the_clock() {
        assert_eq!(frame_gap(1000., 1050.), Duration::from_millis(50));
        assert_eq!(frame_gap(1000., 1000.), Duration::ZERO);
    }

    #[test]
    fn clock_going_backwards_is_no_time() {
        assert_eq!(frame_gap(2000., 1500.), Duration::ZERO);
    }

    #[test]
    fn stalled_page_drops_time_beyond_the_cap() {
        assert_eq!(frame_gap(0., 60_000.), MAX_FRAME_GAP);

        let mut game = SnakeGame::mount(5);
        game.start();
        game.advance(frame_gap(0., 60_000.));
        let ticks = (MAX_FRAME_GAP.as_millis() / TICK_PERIOD.as_millis()) as usize;
        assert_eq!(game.head(), (7 + ticks as u8, 7));
        assert!(game.is_running());
    }
}
