//! Time-based score accumulator
//!
//! Score counts simulated wall time, not frames. The accumulator works in
//! whole microseconds and keeps the remainder after each increment, so the
//! same elapsed time gives the same score at any tick rate.

use super::state::{GameEvent, RoundState};

/// Convert a tick duration in seconds to whole microseconds
pub fn dt_to_us(dt: f32) -> u64 {
    if dt <= 0.0 {
        return 0;
    }
    (f64::from(dt) * 1_000_000.0).round() as u64
}

/// Add `elapsed_us` of play time, pushing one event per point earned
pub fn accumulate(
    round: &mut RoundState,
    elapsed_us: u64,
    interval_us: u64,
    events: &mut Vec<GameEvent>,
) {
    round.score_timer_us += elapsed_us;
    while round.score_timer_us >= interval_us {
        round.score_timer_us -= interval_us;
        round.score += 1;
        events.push(GameEvent::ScoreIncremented { score: round.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(dt: f32, ticks: u32) -> u64 {
        let mut round = RoundState::default();
        let mut events = Vec::new();
        for _ in 0..ticks {
            accumulate(&mut round, dt_to_us(dt), 100_000, &mut events);
        }
        assert_eq!(events.len() as u64, round.score);
        round.score
    }

    #[test]
    fn test_score_is_time_based() {
        // 2.05 s at 50 Hz, 100 Hz and 200 Hz
        assert_eq!(run(1.0 / 50.0, 103), 20);
        assert_eq!(run(1.0 / 100.0, 205), 20);
        assert_eq!(run(1.0 / 200.0, 410), 20);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut round = RoundState::default();
        let mut events = Vec::new();
        accumulate(&mut round, 150_000, 100_000, &mut events);
        assert_eq!(round.score, 1);
        assert_eq!(round.score_timer_us, 50_000);
        accumulate(&mut round, 50_000, 100_000, &mut events);
        assert_eq!(round.score, 2);
        assert_eq!(round.score_timer_us, 0);
        assert_eq!(
            events,
            vec![
                GameEvent::ScoreIncremented { score: 1 },
                GameEvent::ScoreIncremented { score: 2 }
            ]
        );
    }

    #[test]
    fn test_long_frame_awards_every_point() {
        let mut round = RoundState::default();
        let mut events = Vec::new();
        accumulate(&mut round, 350_000, 100_000, &mut events);
        assert_eq!(round.score, 3);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_dt_conversion() {
        assert_eq!(dt_to_us(0.02), 20_000);
        assert_eq!(dt_to_us(1.0 / 60.0), 16_667);
        assert_eq!(dt_to_us(-1.0), 0);
    }
}
