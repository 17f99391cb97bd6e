use crate::mounted::GameWidget;
use arcade_core::{
    Direction, GuessInput, GuessingGame, MemoryInput, MemoryMatchGame, MiniGame, PAIR_COUNT,
    SnakeCell, SnakeGame, SnakeInput,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

impl GameWidget for GuessingGame {
    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Attempts", self.attempts().to_string()),
            ("Score", self.score().to_string()),
        ]
    }

    fn view(&self, input: Callback<GuessInput>) -> Html {
        let feedback = self.feedback();
        let on_submit = input.reform(GuessInput::Submit);

        html! {
            <div class="guessing">
                <p class={classes!("feedback", feedback.is_correct().then_some("correct"))}>
                    {feedback.to_string()}
                </p>
                if !self.is_finished() {
                    <GuessForm {on_submit}/>
                }
                <p class="tip">{"Tip: The fewer attempts you take, the more points you earn!"}</p>
            </div>
        }
    }
}

#[derive(Properties, PartialEq)]
struct GuessFormProps {
    on_submit: Callback<String>,
}

#[function_component]
fn GuessForm(props: &GuessFormProps) -> Html {
    let text = use_state(String::new);

    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let submit = {
        let text = text.clone();
        let on_submit = props.on_submit.clone();
        move || {
            on_submit.emit((*text).clone());
            text.set(String::new());
        }
    };

    let onkeydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                submit();
            }
        })
    };
    let onclick = Callback::from(move |_: MouseEvent| submit());

    html! {
        <div class="guess-form">
            <input
                type="number"
                min="1"
                max="100"
                placeholder="Enter your guess"
                value={(*text).clone()}
                {oninput}
                {onkeydown}
            />
            <button {onclick}>{"Guess!"}</button>
        </div>
    }
}

impl GameWidget for MemoryMatchGame {
    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Moves", self.moves().to_string()),
            ("Matches", format!("{}/{}", self.matched_pairs(), PAIR_COUNT)),
            ("Score", self.score().to_string()),
        ]
    }

    fn view(&self, input: Callback<MemoryInput>) -> Html {
        let locked = self.is_resolving();

        html! {
            <div class="memory">
                if self.is_finished() {
                    <p class="won">{format!("Congratulations! You won in {} moves!", self.moves())}</p>
                }
                <div class={classes!("cards", locked.then_some("locked"))}>
                    {
                        for self.deck().iter().map(|card| {
                            let id = card.id;
                            let onclick = input.reform(move |_: MouseEvent| MemoryInput::Reveal(id));
                            let class = classes!(
                                "card",
                                card.is_face_up().then_some("face-up"),
                                card.matched.then_some("matched")
                            );
                            let face = if card.is_face_up() { card.symbol.glyph() } else { "?" };
                            html! {
                                <button {class} {onclick}>{face}</button>
                            }
                        })
                    }
                </div>
            </div>
        }
    }
}

impl GameWidget for SnakeGame {
    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Score", self.score().to_string()),
            ("High Score", self.high_score().to_string()),
            ("Length", self.len().to_string()),
        ]
    }

    fn view(&self, input: Callback<SnakeInput>) -> Html {
        let board = self.board();
        let (cols, rows) = self.size();
        let state = self.state();
        let new_high_score = self.score() > 0 && self.score() == self.high_score();
        let cb_start = input.reform(|_: MouseEvent| SnakeInput::Start);
        let pad_button = |direction: Direction, label: &'static str| {
            let onclick = input.reform(move |_: MouseEvent| SnakeInput::Turn(direction));
            html! { <button class={snake_direction_class(direction)} {onclick}>{label}</button> }
        };

        html! {
            <div class="snake">
                <table class="board">
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| html! {
                                        <td class={snake_cell_class(board[[usize::from(x), usize::from(y)]])}/>
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if state.is_finished() {
                    <div class="game-over">
                        <p>{format!("Game Over! Final Score: {}", self.score())}</p>
                        if new_high_score {
                            <p class="high-score">{"New High Score!"}</p>
                        }
                    </div>
                }
                if state.is_ready() {
                    <button class="start" onclick={cb_start}>{"Start Game"}</button>
                }
                <div class="pad">
                    { pad_button(Direction::Up, "▲") }
                    { pad_button(Direction::Left, "◀") }
                    { pad_button(Direction::Right, "▶") }
                    { pad_button(Direction::Down, "▼") }
                </div>
                <p class="tip">{"Use arrow keys or buttons to control the snake"}</p>
            </div>
        }
    }

    fn key_input(key: &str) -> Option<SnakeInput> {
        Direction::from_key(key).map(SnakeInput::Turn)
    }
}

const fn snake_cell_class(cell: SnakeCell) -> &'static str {
    match cell {
        SnakeCell::Empty => "empty",
        SnakeCell::Head => "head",
        SnakeCell::Body => "body",
        SnakeCell::Food => "food",
    }
}

const fn snake_direction_class(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Right => "right",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_turn_the_snake() {
        assert_eq!(
            <SnakeGame as GameWidget>::key_input("ArrowDown"),
            Some(SnakeInput::Turn(Direction::Down))
        );
        assert_eq!(<SnakeGame as GameWidget>::key_input("Enter"), None);
    }

    #[test]
    fn only_snake_listens_to_keys() {
        assert_eq!(<GuessingGame as GameWidget>::key_input("ArrowUp"), None);
        assert_eq!(<MemoryMatchGame as GameWidget>::key_input("ArrowUp"), None);
    }

    #[test]
    fn memory_stats_show_progress_out_of_all_pairs() {
        let game = MemoryMatchGame::mount(3);
        let stats = game.stats();
        assert_eq!(stats[1], ("Matches", "0/8".to_string()));
    }

    #[test]
    fn snake_stats_start_at_length_one() {
        let game = SnakeGame::mount(3);
        assert_eq!(
            game.stats(),
            vec![
                ("Score", "0".to_string()),
                ("High Score", "0".to_string()),
                ("Length", "1".to_string()),
            ]
        );
    }

    #[test]
    fn board_cells_have_distinct_classes() {
        let classes = [
            SnakeCell::Empty,
            SnakeCell::Head,
            SnakeCell::Body,
            SnakeCell::Food,
        ]
        .map(snake_cell_class);
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
