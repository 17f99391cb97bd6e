use crate::mounted::MountedGame;
use crate::utils::js_random_seed;
use arcade_core::{GameKind, GuessingGame, MemoryMatchGame, SnakeGame};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Open(GameKind),
    Close,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct ArcadeProps {
    /// Forced seed, a fresh random one is used otherwise.
    #[prop_or_default]
    pub seed: Option<u64>,
    /// Game to mount right away.
    #[prop_or_default]
    pub open: Option<GameKind>,
}

/// Game catalog; mounts at most one game at a time and owns no game state itself.
#[derive(Debug)]
pub(crate) struct ArcadeView {
    rng: SmallRng,
    active: Option<(GameKind, u64)>,
}

impl ArcadeView {
    fn open(&mut self, kind: GameKind) -> bool {
        if matches!(self.active, Some((active, _)) if active == kind) {
            return false;
        }
        let seed = self.rng.random::<u64>();
        log::debug!("open {} with seed {}", kind, seed);
        self.active = Some((kind, seed));
        true
    }

    fn view_catalog_entry(ctx: &Context<Self>, kind: GameKind, active: bool) -> Html {
        let onclick = ctx.link().callback(move |_: MouseEvent| Msg::Open(kind));

        html! {
            <li class={classes!("game-card", kind.id(), active.then_some("active"))}>
                <h3>{kind.title()}</h3>
                <p>{kind.description()}</p>
                <button {onclick}>{"Play"}</button>
            </li>
        }
    }

    fn view_mounted(ctx: &Context<Self>, kind: GameKind, seed: u64) -> Html {
        let on_close = ctx.link().callback(|()| Msg::Close);

        match kind {
            GameKind::NumberGuess => html! {
                <MountedGame<GuessingGame> key={seed.to_string()} {seed} {on_close}/>
            },
            GameKind::MemoryCards => html! {
                <MountedGame<MemoryMatchGame> key={seed.to_string()} {seed} {on_close}/>
            },
            GameKind::Snake => html! {
                <MountedGame<SnakeGame> key={seed.to_string()} {seed} {on_close}/>
            },
        }
    }
}

impl Component for ArcadeView {
    type Message = Msg;
    type Properties = ArcadeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut arcade = Self {
            rng: SmallRng::seed_from_u64(props.seed.unwrap_or_else(js_random_seed)),
            active: None,
        };
        if let Some(kind) = props.open {
            arcade.open(kind);
        }
        arcade
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Open(kind) => self.open(kind),
            Close => {
                log::debug!("close {:?}", self.active.map(|(kind, _)| kind));
                self.active.take().is_some()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let active_kind = self.active.map(|(kind, _)| kind);

        html! {
            <div class="arcade">
                <h2>{"Mini Games"}</h2>
                <ul class="catalog">
                    {
                        for GameKind::ALL.into_iter().map(|kind| {
                            Self::view_catalog_entry(ctx, kind, active_kind == Some(kind))
                        })
                    }
                </ul>
                if let Some((kind, seed)) = self.active {
                    { Self::view_mounted(ctx, kind, seed) }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arcade(seed: u64) -> ArcadeView {
        ArcadeView {
            rng: SmallRng::seed_from_u64(seed),
            active: None,
        }
    }

    fn mounted_seed(arcade: &ArcadeView) -> u64 {
        arcade.active.map(|(_, seed)| seed).unwrap()
    }

    #[test]
    fn forced_seed_replays_mount_seeds() {
        let (mut a, mut b) = (arcade(42), arcade(42));
        for kind in [GameKind::Snake, GameKind::MemoryCards, GameKind::Snake] {
            assert!(a.open(kind));
            assert!(b.open(kind));
            assert_eq!(mounted_seed(&a), mounted_seed(&b));
        }
    }

    #[test]
    fn each_mount_draws_a_fresh_seed() {
        let mut arcade = arcade(1);
        let mut seeds = Vec::new();
        for kind in GameKind::ALL.into_iter().cycle().take(12) {
            assert!(arcade.open(kind));
            seeds.push(mounted_seed(&arcade));
        }
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn reopening_the_active_game_keeps_it_mounted() {
        let mut arcade = arcade(7);
        assert!(arcade.open(GameKind::NumberGuess));
        let seed = mounted_seed(&arcade);
        assert!(!arcade.open(GameKind::NumberGuess));
        assert_eq!(mounted_seed(&arcade), seed);
    }
}
