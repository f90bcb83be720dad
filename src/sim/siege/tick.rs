//! Siege rules: keystroke matching, spawning and descent

use glam::Vec2;
use rand::Rng;

use super::state::{SiegePhase, SiegeState, Target, consts};
use super::words;

/// Accept a keystroke, lowercased; None for anything but an ASCII letter
pub fn accept_key(c: char) -> Option<char> {
    c.is_ascii_alphabetic().then(|| c.to_ascii_lowercase())
}

/// Resolve one keystroke against the live targets.
///
/// With any target locked, every locked target whose next letter matches
/// advances and the rest are left alone, wrong keys included. With none
/// locked, every target starting with the letter locks. Completed words are
/// destroyed immediately. Returns how many targets advanced.
pub fn type_char(state: &mut SiegeState, c: char) -> usize {
    if state.phase != SiegePhase::Playing {
        return 0;
    }
    let Some(c) = accept_key(c) else {
        return 0;
    };

    let any_locked = state.targets.iter().any(Target::is_locked);
    let mut advanced = 0;
    for target in &mut state.targets {
        if target.is_locked() != any_locked {
            continue;
        }
        if target.next_char() == Some(c) {
            target.matched += 1;
            advanced += 1;
        }
    }

    if advanced > 0 {
        destroy_completed(state);
    }
    advanced
}

fn destroy_completed(state: &mut SiegeState) {
    let per_letter = state.config.points_per_letter;
    let (done, alive): (Vec<Target>, Vec<Target>) = std::mem::take(&mut state.targets)
        .into_iter()
        .partition(Target::is_complete);
    state.targets = alive;

    for target in done {
        state.score += target.points(per_letter);
        log::debug!("Destroyed '{}' (score {})", target.word, state.score);
        state.particles.scatter(
            &mut state.rng,
            Vec2::new(target.x, target.y),
            consts::BURST_PARTICLES,
            target.color,
            consts::BURST_SPREAD,
        );
    }
}

/// Spawn when more than the current interval has passed since the last
/// spawn; the first playing frame always spawns
pub fn maybe_spawn(state: &mut SiegeState, elapsed_ms: f64, width: f32) -> bool {
    let due = match state.last_spawn_ms {
        None => true,
        Some(last) => elapsed_ms - last > state.spawn_interval_ms,
    };
    if !due {
        return false;
    }

    let span = (width - 2.0 * consts::SPAWN_MARGIN_X).max(0.0);
    let word = words::random_word(&mut state.rng);
    let target = Target {
        id: state.next_id,
        word: word.to_string(),
        x: consts::SPAWN_MARGIN_X + state.rng.random::<f32>() * span,
        y: consts::SPAWN_Y,
        speed: state.config.target_speed(state.score),
        color: words::random_color(&mut state.rng),
        matched: 0,
    };
    log::debug!("Spawned '{}' at x={:.0}", target.word, target.x);

    state.next_id = state.next_id.wrapping_add(1);
    state.targets.push(target);
    state.last_spawn_ms = Some(elapsed_ms);
    state.spawn_interval_ms = state.config.spawn_interval_ms(state.score);
    true
}

/// Move targets down; anything past the baseline costs health.
///
/// Stops processing the moment health runs out.
pub fn descend(state: &mut SiegeState, height: f32) {
    let baseline = height - state.config.baseline_margin;
    let mut i = 0;
    while i < state.targets.len() {
        let target = &mut state.targets[i];
        target.y += target.speed;
        if target.y <= baseline {
            i += 1;
            continue;
        }

        let missed = state.targets.remove(i);
        state.health = (state.health - state.config.health_penalty).clamp(0, state.config.max_health);
        log::debug!("'{}' reached the baseline, health {}", missed.word, state.health);

        if state.health <= 0 {
            game_over(state);
            return;
        }
    }
}

fn game_over(state: &mut SiegeState) {
    state.phase = SiegePhase::GameOver;
    if state.score > state.high_score {
        state.high_score = state.score;
        state.new_high_score = true;
    }
    log::info!(
        "Siege over: score {}, best {}{}",
        state.score,
        state.high_score,
        if state.new_high_score { " (new)" } else { "" }
    );
}

/// One frame: queued keystrokes, then spawning, descent and particles
pub fn tick(state: &mut SiegeState, typed: &[char], elapsed_ms: f64, width: f32, height: f32) {
    if state.phase == SiegePhase::Playing {
        for &c in typed {
            type_char(state, c);
        }
        maybe_spawn(state, elapsed_ms, width);
        descend(state, height);
    }
    state.particles.update();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;
    use crate::sim::siege::state::SiegeConfig;

    fn target(id: u32, word: &str, y: f32) -> Target {
        Target {
            id,
            word: word.to_string(),
            x: 100.0,
            y,
            speed: 1.0,
            color: colors::ACCENT,
            matched: 0,
        }
    }

    fn with_targets(words: &[&str]) -> SiegeState {
        let mut state = SiegeState::playing(1, SiegeConfig::default(), 0);
        state.targets = words
            .iter()
            .enumerate()
            .map(|(i, w)| target(i as u32, w, 100.0))
            .collect();
        state
    }

    #[test]
    fn test_typing_whole_word_destroys_only_that_target() {
        let mut state = with_targets(&["const", "map"]);
        for c in "const".chars() {
            assert_eq!(type_char(&mut state, c), 1);
        }
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].word, "map");
        assert_eq!(state.targets[0].matched, 0);
        assert_eq!(state.score, 5 * consts::POINTS_PER_LETTER);
        assert_eq!(state.particles.len(), consts::BURST_PARTICLES);
    }

    #[test]
    fn test_unmatched_key_changes_nothing() {
        let mut state = with_targets(&["const", "map"]);
        state.targets[0].matched = 2;
        let before = state.targets.clone();

        assert_eq!(type_char(&mut state, 'z'), 0);
        assert_eq!(state.targets, before);
        assert_eq!(state.score, 0);
        assert_eq!(state.health, consts::MAX_HEALTH);
    }

    #[test]
    fn test_wrong_key_on_locked_target_keeps_progress() {
        let mut state = with_targets(&["const", "map"]);
        type_char(&mut state, 'c');
        // 'm' starts another word but a lock is active
        assert_eq!(type_char(&mut state, 'm'), 0);
        assert_eq!(state.targets[0].matched, 1);
        assert_eq!(state.targets[1].matched, 0);
    }

    #[test]
    fn test_first_letter_locks_every_match() {
        let mut state = with_targets(&["catch", "case", "class", "if"]);
        assert_eq!(type_char(&mut state, 'C'), 3);
        assert_eq!(state.locked_count(), 3);

        // Narrow by elimination
        assert_eq!(type_char(&mut state, 'a'), 2);
        let matched: Vec<usize> = state.targets.iter().map(|t| t.matched).collect();
        assert_eq!(matched, vec![2, 2, 1, 0]);
    }

    #[test]
    fn test_shared_prefix_completion_removes_only_finished() {
        let mut state = with_targets(&["for", "form"]);
        for c in "for".chars() {
            type_char(&mut state, c);
        }
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].word, "form");
        assert_eq!(state.targets[0].matched, 3);
        assert_eq!(state.score, 30);

        type_char(&mut state, 'm');
        assert!(state.targets.is_empty());
        assert_eq!(state.score, 70);
    }

    #[test]
    fn test_single_letter_word_removed_on_lock() {
        let mut state = with_targets(&["x", "xor"]);
        assert_eq!(type_char(&mut state, 'x'), 2);
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].word, "xor");
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_non_letters_ignored() {
        let mut state = with_targets(&["if"]);
        for c in ['1', ' ', '-', 'é'] {
            assert_eq!(type_char(&mut state, c), 0);
        }
        assert_eq!(state.targets[0].matched, 0);
        assert_eq!(accept_key('Q'), Some('q'));
    }

    #[test]
    fn test_typing_ignored_outside_play() {
        let mut state = with_targets(&["if"]);
        state.phase = SiegePhase::GameOver;
        assert_eq!(type_char(&mut state, 'i'), 0);
    }

    #[test]
    fn test_baseline_costs_fixed_penalty() {
        let mut state = with_targets(&[]);
        state.targets.push(target(0, "null", 549.5));
        state.targets.push(target(1, "void", 100.0));
        descend(&mut state, 600.0);
        assert_eq!(state.health, 90);
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].word, "void");
        assert_eq!(state.phase, SiegePhase::Playing);
    }

    #[test]
    fn test_three_misses_end_the_game_at_zero() {
        let config = SiegeConfig {
            max_health: 30,
            ..Default::default()
        };
        let mut state = SiegeState::playing(1, config, 0);
        state.score = 120;

        for round in 0..3 {
            state.targets.push(target(round, "await", 560.0));
            descend(&mut state, 600.0);
            if round < 2 {
                assert_eq!(state.phase, SiegePhase::Playing);
                assert!(state.health > 0);
            }
        }
        assert_eq!(state.health, 0);
        assert_eq!(state.phase, SiegePhase::GameOver);
        assert_eq!(state.high_score, 120);
        assert!(state.new_high_score);
    }

    #[test]
    fn test_game_over_stops_processing_and_clamps() {
        let config = SiegeConfig {
            max_health: 10,
            ..Default::default()
        };
        let mut state = SiegeState::playing(1, config, 500);
        state.targets.push(target(0, "a", 560.0));
        state.targets.push(target(1, "b", 560.0));
        state.targets.push(target(2, "c", 100.0));
        descend(&mut state, 600.0);

        assert_eq!(state.health, 0);
        assert_eq!(state.phase, SiegePhase::GameOver);
        // The rest were not moved this frame
        assert_eq!(state.targets.len(), 2);
        assert_eq!(state.targets[0].y, 560.0);
        assert_eq!(state.targets[1].y, 100.0);
        assert!(!state.new_high_score);
        assert_eq!(state.high_score, 500);
    }

    #[test]
    fn test_spawn_schedule_uses_sim_time() {
        let mut state = SiegeState::playing(9, SiegeConfig::default(), 0);
        assert!(maybe_spawn(&mut state, 16.0, 800.0));
        assert!(!maybe_spawn(&mut state, 1000.0, 800.0));
        assert!(!maybe_spawn(&mut state, 2016.0, 800.0));
        assert!(maybe_spawn(&mut state, 2016.5, 800.0));
        assert_eq!(state.targets.len(), 2);

        let t = &state.targets[0];
        assert!((50.0..750.0).contains(&t.x));
        assert_eq!(t.y, consts::SPAWN_Y);
        assert_eq!(t.speed, 0.5);
        assert!(words::WORDS.contains(&t.word.as_str()));
        assert_ne!(state.targets[0].id, state.targets[1].id);
    }

    #[test]
    fn test_interval_recomputed_from_score_at_spawn() {
        let mut state = SiegeState::playing(9, SiegeConfig::default(), 0);
        state.score = 5000;
        maybe_spawn(&mut state, 0.0, 800.0);
        assert_eq!(state.spawn_interval_ms, 1500.0);
        assert!((state.targets[0].speed - 1.5).abs() < 1e-6);

        // Existing targets keep the speed they spawned with
        state.score = 10_000;
        maybe_spawn(&mut state, 2000.0, 800.0);
        assert!((state.targets[0].speed - 1.5).abs() < 1e-6);
        assert!((state.targets[1].speed - 2.5).abs() < 1e-6);
        assert_eq!(state.spawn_interval_ms, 1000.0);
    }

    #[test]
    fn test_tick_processes_keys_before_spawning() {
        let mut state = SiegeState::playing(4, SiegeConfig::default(), 0);
        tick(&mut state, &[], 16.0, 800.0, 600.0);
        assert_eq!(state.targets.len(), 1);
        let word = state.targets[0].word.clone();

        let keys: Vec<char> = word.chars().collect();
        tick(&mut state, &keys, 32.0, 800.0, 600.0);
        assert!(state.targets.is_empty());
        assert_eq!(state.score, word.len() as u32 * consts::POINTS_PER_LETTER);
    }
}
