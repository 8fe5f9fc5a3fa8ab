use chromabrew::{MATCH_THRESHOLD, MAX_SOLVE_STEPS, Session, color::distance};

#[test]
fn auto_solve_terminates_within_the_cap() {
    for seed in 0..25u64 {
        let mut session = Session::with_seed(seed);
        let drops_before = session.state().drops;

        let yielded = session.auto_solve().unwrap().count();
        assert!(yielded as u32 <= MAX_SOLVE_STEPS, "seed {seed}");

        let state = session.state();
        assert_eq!(state.drops - drops_before, yielded as u64);

        // Either converged or ran into the safety cap.
        let final_distance = session.current_score().distance;
        assert!(
            final_distance <= MATCH_THRESHOLD || yielded as u32 == MAX_SOLVE_STEPS,
            "seed {seed}: distance {final_distance} after {yielded} steps"
        );
    }
}

#[test]
fn auto_solve_yields_monotone_drop_counters() {
    let mut session = Session::with_seed(8);
    let mut last_drops = session.state().drops;
    for state in session.auto_solve().unwrap() {
        assert_eq!(state.drops, last_drops + 1);
        last_drops = state.drops;
    }
}

#[test]
fn auto_solve_is_a_no_op_once_matched() {
    let mut session = Session::with_seed(17);
    session.force_match();
    let yielded = session.auto_solve().unwrap().count();
    assert_eq!(yielded, 0);
    assert_eq!(session.state().drops, 0);
}

#[test]
fn cancelled_solve_releases_the_guard() {
    let mut session = Session::with_seed(29);

    let mut solve = session.auto_solve().unwrap();
    let first = solve.next();
    drop(solve); // cancel mid-run

    if first.is_some() {
        assert_eq!(session.state().drops, 1);
    }

    // A fresh run can start and finishes the job.
    let _ = session.auto_solve().unwrap().count();
    let score = session.current_score();
    assert!(score.distance <= MATCH_THRESHOLD || session.state().drops >= 1);
}

#[test]
fn auto_solve_never_spends_assists_or_boost() {
    let mut session = Session::with_seed(37);
    session.arm_boost();
    let _ = session.auto_solve().unwrap().count();

    let state = session.state();
    // The loop applies through the plain engine path.
    assert!(state.boost_armed);
    assert!(state.boost_available);
}

#[test]
fn solve_states_stay_in_channel_bounds() {
    let mut session = Session::with_seed(101);
    for state in session.auto_solve().unwrap() {
        for v in [state.mixture.r, state.mixture.g, state.mixture.b] {
            assert!((0.0..=255.0).contains(&v));
        }
    }
}

#[test]
fn best_index_prediction_matches_the_applied_step() {
    let mut session = Session::with_seed(53);
    let round = session.round().clone();
    let mixture = session.state().mixture;

    let idx = chromabrew::best_ingredient_index(mixture, &round.ingredients, round.target).unwrap();
    let predicted = round.ingredients[idx].mixed_into(mixture, round.ingredients[idx].strength);

    let state = session.auto_mix_once().unwrap();
    assert!(distance(state.mixture, predicted) < 1e-9);
}
