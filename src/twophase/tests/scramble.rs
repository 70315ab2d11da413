use twophase::{
    CubieState, ScrambleQueue, SolveOptions,
    facelet::{from_facelets, to_facelets},
    scramble::scramble_with_rng,
};

#[test_log::test]
fn test_scrambles_validate() {
    let mut rng = fastrand::Rng::with_seed(31);
    for _ in 0..20 {
        let scramble = scramble_with_rng(&mut rng, &SolveOptions::default()).unwrap();
        let facelets = to_facelets(&CubieState::SOLVED.apply_all(&scramble));
        assert!(from_facelets(&facelets).is_ok(), "{scramble}");
    }
}

#[test_log::test]
fn test_scrambled_states_are_spread_over_permutation_classes() {
    let mut rng = fastrand::Rng::with_seed(4);
    let mut parities = [0usize; 2];
    let mut urf_positions = [0usize; 8];
    let draws = 400;
    for _ in 0..draws {
        let scramble = scramble_with_rng(&mut rng, &SolveOptions::default()).unwrap();
        let state = CubieState::SOLVED.apply_all(&scramble);
        parities[usize::from(state.corner_parity())] += 1;
        let urf = state.cp.iter().position(|&piece| piece == 0).unwrap();
        urf_positions[urf] += 1;
    }
    // Loose bounds: each class is expected draws / classes times
    for count in parities {
        assert!((140..=260).contains(&count), "{parities:?}");
    }
    for count in urf_positions {
        assert!((20..=85).contains(&count), "{urf_positions:?}");
    }
}

#[test_log::test]
fn test_library_scramble_uses_default_options() {
    let scramble = twophase::scramble(&SolveOptions::default()).unwrap();
    let state = CubieState::SOLVED.apply_all(&scramble);
    let solution = twophase::TwoPhaseSolver::shared()
        .solve(&state, &SolveOptions::default())
        .unwrap();
    assert!(state.apply_all(solution.moves()).is_solved());
}

#[test_log::test]
fn test_queue_prefetches() {
    let queue = ScrambleQueue::with_rng(3, SolveOptions::default(), fastrand::Rng::with_seed(6));
    let scrambles: Vec<_> = queue.take(5).collect::<Result<_, _>>().unwrap();
    assert_eq!(scrambles.len(), 5);
    for pair in scrambles.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}
