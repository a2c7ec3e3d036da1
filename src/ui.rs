//! Text shown for each screen.

use crate::config::MAX_LEVEL;
use crate::display::Line;
use crate::game::{Game, LossReason, Screen};
use crate::level::Tries;
use crate::time::TimeInstant;
use core::fmt::Write;

/// Composes the two display lines for the current game state.
///
/// `pending_clicks` is the size of the click burst still being counted, shown
/// as a level preview on the welcome and level-select screens.
pub fn compose<I: TimeInstant>(game: &Game<I>, pending_clicks: u8, now: I) -> (Line, Line) {
    let mut top = Line::new();
    let mut bottom = Line::new();
    let unlocked = game.progression().unlocked_level();

    // Overlong text is cut off by the fixed line capacity.
    match game.screen() {
        Screen::Welcome => {
            let _ = top.push_str("Dial Seeker");
            if pending_clicks > 0 {
                let _ = write!(bottom, "Level? {}", pending_clicks.min(MAX_LEVEL));
            } else {
                let _ = write!(bottom, "Unlocked: 1-{}", unlocked);
            }
        }
        Screen::LevelSelect { level } => {
            let _ = write!(top, "Level {}", level);
            if pending_clicks > 0 {
                let _ = write!(bottom, "Level? {}", pending_clicks.min(MAX_LEVEL));
            } else if *level <= unlocked {
                let _ = bottom.push_str("Hold to start");
            } else {
                let _ = bottom.push_str("Locked");
            }
        }
        Screen::InGame(session) => {
            let _ = write!(top, "L{} ", session.level());
            let _ = match session.tries_left() {
                Tries::Unlimited => write!(top, "Try:--"),
                Tries::Limited(n) => write!(top, "Try:{}", n),
            };
            if let Some(left_ms) = session.time_left(now) {
                let _ = write!(top, " {}s", left_ms.div_ceil(1_000));
            }

            match session.last_band() {
                Some(band) => {
                    let _ = bottom.push_str("Heat ");
                    for _ in 0..band.value() {
                        let _ = bottom.push('#');
                    }
                }
                None => {
                    let _ = bottom.push_str("Turn the dial");
                }
            }
        }
        Screen::WinAnimation { level, .. } => {
            let _ = top.push_str("You win!");
            let _ = write!(bottom, "Level {} clear", level);
        }
        Screen::Notice { reason, target, .. } => {
            let _ = top.push_str(match reason {
                LossReason::TimeUp => "Time's up!",
                LossReason::OutOfTries => "No tries left",
            });
            let _ = write!(bottom, "Target was {}", target);
        }
        Screen::Asleep => {}
    }

    (top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::time::tests::At;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn welcome_shows_click_preview() {
        let game = Game::<At>::new(&Config::default());
        let (top, bottom) = compose(&game, 0, At(0));
        assert_eq!(top.as_str(), "Dial Seeker");
        assert_eq!(bottom.as_str(), "Unlocked: 1-1");

        let (_, bottom) = compose(&game, 7, At(0));
        assert_eq!(bottom.as_str(), "Level? 5");
    }

    #[test]
    fn level_select_shows_lock_state() {
        let mut game = Game::<At>::new(&Config::default());
        game.choose_level(1);
        assert_eq!(compose(&game, 0, At(0)).1.as_str(), "Hold to start");
        game.choose_level(2);
        assert_eq!(compose(&game, 0, At(0)).1.as_str(), "Locked");
    }

    #[test]
    fn timed_round_shows_tries_and_seconds() {
        let mut game = Game::<At>::new(&Config::default());
        let mut rng = SmallRng::seed_from_u64(4);
        game.start_level(5, At(0), &mut rng);

        let (top, bottom) = compose(&game, 0, At(1));
        assert_eq!(top.as_str(), "L5 Try:5 20s");
        assert_eq!(bottom.as_str(), "Turn the dial");

        let (top, _) = compose(&game, 0, At(19_001));
        assert_eq!(top.as_str(), "L5 Try:5 1s");
    }

    #[test]
    fn untimed_round_shows_heat_after_a_reading() {
        let mut game = Game::<At>::new(&Config::default());
        let mut rng = SmallRng::seed_from_u64(8);
        game.start_level(1, At(0), &mut rng);
        let target = game.session().unwrap().round_target();
        game.accept_reading(target + 41, At(10));

        let (top, bottom) = compose(&game, 0, At(10));
        assert_eq!(top.as_str(), "L1 Try:--");
        assert_eq!(bottom.as_str(), "Heat ####");
    }
}
