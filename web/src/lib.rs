use arcade_core::GameKind;
use clap::Parser;
use wasm_bindgen::prelude::*;

mod games;
mod host;
mod mounted;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Game to open on load
    #[arg(short, long)]
    game: Option<GameKind>,
}

impl Args {
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_location_hash(&location_hash).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring url arguments: {err}"));
        Args::from_location_hash("").expect("empty arguments must parse")
    });
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}, game: {:?}", args.seed, args.game);

    let Some(root) = document().get_element_by_id("games") else {
        log::error!("Could not find id=\"games\" element");
        return;
    };

    let props = host::ArcadeProps {
        seed: args.seed.as_deref().map(utils::parse_seed),
        open: args.game,
    };

    log::debug!("App started");
    yew::Renderer::<host::ArcadeView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_location_hash("").unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.game, None);
    }

    #[test]
    fn hash_arguments_are_split_on_ampersands() {
        let args = Args::from_location_hash("#-v&--seed=abc&--game=snake").unwrap();
        assert_eq!(args.seed.as_deref(), Some("abc"));
        assert_eq!(args.game, Some(GameKind::Snake));
        assert!(args.verbose.log_level().is_some());
    }

    #[test]
    fn unknown_game_is_rejected() {
        assert!(Args::from_location_hash("#--game=tetris").is_err());
    }
}
