// Integration tests (native) for the `arrow-rush` crate.
// These drive the session controller through whole games via the public API,
// without any wasm/browser functionality, so they run under `cargo test`.

use arrow_rush::{Direction, GameSession, Phase, Verdict};

fn hit(s: &mut GameSession, now: f64) {
    let dir = s.current_direction().expect("arrow on screen");
    assert!(matches!(s.submit_response(dir, now), Verdict::Correct { .. }));
}

fn miss(s: &mut GameSession, now: f64) {
    let dir = s.current_direction().expect("arrow on screen");
    let wrong = Direction::ALL.into_iter().find(|d| *d != dir).unwrap();
    assert!(matches!(s.submit_response(wrong, now), Verdict::Incorrect { .. }));
}

#[test]
fn score_is_ten_per_level_without_level_up() {
    let mut s = GameSession::with_seed(101);
    s.start_game(0.0);
    for t in 1..=4 {
        hit(&mut s, t as f64);
    }
    assert_eq!(s.score(), 10 * 1 * 4);
}

#[test]
fn five_and_ten_hits_level_up_and_shrink_budget() {
    let mut s = GameSession::with_seed(102);
    s.start_game(0.0);
    for t in 1..=5 {
        hit(&mut s, t as f64);
    }
    assert_eq!(s.level(), 2);
    assert_eq!(s.time_limit_seconds(), 2.8);
    for t in 6..=10 {
        hit(&mut s, t as f64);
    }
    assert_eq!(s.level(), 3);
    assert_eq!(s.time_limit_seconds(), 2.6);
    // 5 hits at level 1 and 5 at level 2.
    assert_eq!(s.score(), 50 + 100);
}

#[test]
fn broken_streak_earns_no_level() {
    let mut s = GameSession::with_seed(103);
    s.start_game(0.0);
    for t in 1..=4 {
        hit(&mut s, t as f64);
    }
    assert_eq!(s.score(), 40);
    assert_eq!(s.correct_streak(), 4);
    miss(&mut s, 5.0);
    let snap = s.snapshot();
    assert_eq!(snap.lives, 2);
    assert_eq!(snap.correct_streak, 0);
    assert_eq!(snap.score, 40);
    assert_eq!(snap.level, 1);
    // The next hit starts a new streak; four more are needed before any level-up.
    for t in 6..=9 {
        hit(&mut s, t as f64);
    }
    assert_eq!(s.level(), 1);
    hit(&mut s, 10.0);
    assert_eq!(s.level(), 2);
}

#[test]
fn mixed_misses_and_timeouts_end_the_game() {
    let mut s = GameSession::with_seed(104);
    s.start_game(0.0);
    hit(&mut s, 100.0);
    miss(&mut s, 200.0);
    // Polled right at the limit: still in time.
    assert!(!s.check_timeout(3_200.0));
    assert!(s.check_timeout(3_201.0));
    assert_eq!(s.correct_streak(), 0);
    assert_eq!(s.lives(), 1);
    miss(&mut s, 3_300.0);

    let snap = s.snapshot();
    assert_eq!(snap.phase, Phase::GameOver);
    assert_eq!(snap.lives, 0);
    assert_eq!(snap.current_direction, None);

    for dir in Direction::ALL {
        assert_eq!(s.submit_response(dir, 3_400.0), Verdict::Ignored);
    }
    assert!(!s.check_timeout(10_000.0));
    assert_eq!(s.score(), 10);
    assert_eq!(s.level(), 1);
    assert_eq!(s.lives(), 0);
}

#[test]
fn late_input_is_judged_against_the_new_arrow() {
    let mut s = GameSession::with_seed(105);
    s.start_game(0.0);
    let missed = s.current_direction().unwrap();
    assert!(s.check_timeout(3_500.0));
    let fresh = s.current_direction().unwrap();
    let verdict = s.submit_response(missed, 3_600.0);
    if missed == fresh {
        assert!(matches!(verdict, Verdict::Correct { .. }));
    } else {
        assert_eq!(verdict, Verdict::Incorrect { game_over: false });
    }
}

#[test]
fn menu_pause_and_game_over_round_trip() {
    let mut s = GameSession::with_seed(106);
    s.start_game(0.0);
    hit(&mut s, 1.0);
    s.pause();
    assert_eq!(s.phase(), Phase::Menu);
    assert_eq!(s.score(), 10);

    s.start_game(2.0);
    assert_eq!(s.score(), 0);
    for t in [3.0, 4.0, 5.0] {
        miss(&mut s, t);
    }
    assert_eq!(s.phase(), Phase::GameOver);
    s.return_to_menu();
    assert_eq!(s.phase(), Phase::Menu);
    s.start_game(6.0);
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.lives(), 3);
}

#[test]
fn direction_is_set_only_while_playing() {
    let mut s = GameSession::with_seed(107);
    let check = |s: &GameSession| {
        let snap = s.snapshot();
        assert_eq!(snap.current_direction.is_some(), snap.phase == Phase::Playing);
        assert_eq!(snap.direction_issued_at_ms.is_some(), snap.phase == Phase::Playing);
    };
    check(&s);
    s.start_game(0.0);
    check(&s);
    s.pause();
    check(&s);
    s.start_game(1.0);
    for t in [2.0, 3.0, 4.0] {
        miss(&mut s, t);
        check(&s);
    }
    s.return_to_menu();
    check(&s);
}

#[cfg(feature = "serde_json")]
#[test]
fn snapshot_serializes_for_js() {
    let mut s = GameSession::with_seed(108);
    s.start_game(0.0);
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["phase"], "Playing");
    assert_eq!(json["lives"], 3);
    assert_eq!(json["time_limit_seconds"], 3.0);
    assert!(json["current_direction"].is_string());
}
