mod common;

use beam_core::{ControllerKind, PieceKind, Phase, Player, PlayerId, Space};
use beam_runtime::{Event, InstantClock, Runtime, Topic, TurnEvent};

use common::{RecordingBoard, next_matching, players, test_config};

fn human_runtime(board: RecordingBoard) -> Runtime {
    Runtime::builder()
        .config(test_config())
        .board(board)
        .clock(InstantClock)
        .build()
        .unwrap()
}

fn turn_started(player: u32) -> impl FnMut(&Event) -> bool {
    move |event| {
        matches!(
            event,
            Event::Turn(TurnEvent::Started { player: p, .. }) if *p == PlayerId(player)
        )
    }
}

#[tokio::test]
async fn selection_outside_input_phase_is_ignored() {
    let runtime = human_runtime(RecordingBoard::new(players(ControllerKind::Human, 2)));
    let handle = runtime.handle();

    assert_eq!(handle.phase(), Phase::Idle);
    assert!(!handle.report_selection(Space::new(1, 0)));
}

#[tokio::test]
async fn only_candidate_destinations_are_accepted() {
    let board = RecordingBoard::new(players(ControllerKind::Human, 2));
    let log = board.log();
    let mut runtime = human_runtime(board);
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    runtime.enter_game().await.unwrap();
    handle.wait_for_phase(Phase::WaitingForInput).await.unwrap();
    {
        let log = log.lock().unwrap();
        assert_eq!(log.highlighted_piece, Some(PlayerId(0)));
        assert_eq!(log.highlighted_spaces, Space::ORIGIN.neighbors4());
    }

    // not adjacent: reported, rejected, still waiting
    assert!(handle.report_selection(Space::new(5, 5)));
    let rejected = next_matching(&mut turn_rx, |e| {
        matches!(e, Event::Turn(TurnEvent::SelectionRejected { .. }))
    })
    .await;
    assert_eq!(
        rejected,
        Event::Turn(TurnEvent::SelectionRejected {
            player: PlayerId(0),
            space: Space::new(5, 5),
        })
    );
    assert_eq!(handle.phase(), Phase::WaitingForInput);
    assert!(log.lock().unwrap().moves.is_empty());

    assert!(handle.report_selection(Space::new(1, 0)));
    let applied = next_matching(&mut turn_rx, |e| {
        matches!(e, Event::Turn(TurnEvent::MoveApplied { .. }))
    })
    .await;
    assert_eq!(
        applied,
        Event::Turn(TurnEvent::MoveApplied {
            player: PlayerId(0),
            from: Space::ORIGIN,
            to: Space::new(1, 0),
        })
    );

    next_matching(&mut turn_rx, turn_started(1)).await;
    {
        let log = log.lock().unwrap();
        assert_eq!(log.moves, [(PlayerId(0), Space::new(1, 0))]);
        assert_eq!(log.highlighted_piece, Some(PlayerId(1)));
    }

    runtime.exit_game().await.unwrap();
}

#[tokio::test]
async fn reports_queued_during_a_previous_turn_are_discarded() {
    let board = RecordingBoard::new(players(ControllerKind::Human, 2));
    let log = board.log();
    let mut runtime = human_runtime(board);
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    runtime.enter_game().await.unwrap();
    handle.wait_for_phase(Phase::WaitingForInput).await.unwrap();

    // the second report is a legal destination for player 1 only
    assert!(handle.report_selection(Space::new(1, 0)));
    assert!(handle.report_selection(Space::new(0, 3)));

    next_matching(&mut turn_rx, turn_started(1)).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    assert_eq!(handle.phase(), Phase::WaitingForInput);
    assert_eq!(log.lock().unwrap().moves, [(PlayerId(0), Space::new(1, 0))]);

    runtime.exit_game().await.unwrap();
}

#[tokio::test]
async fn blocker_move_refreshes_the_beam() {
    let board = RecordingBoard::new(vec![
        Player::new(PlayerId(0), PieceKind::Blocker, Space::ORIGIN),
        Player::new(PlayerId(1), PieceKind::Inhabitant, Space::new(0, 8)),
    ]);
    let log = board.log();
    let mut runtime = human_runtime(board);
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    runtime.enter_game().await.unwrap();
    handle.wait_for_phase(Phase::WaitingForInput).await.unwrap();
    assert_eq!(log.lock().unwrap().beam_updates, 1);

    assert!(handle.report_selection(Space::new(1, 0)));
    next_matching(&mut turn_rx, turn_started(1)).await;
    assert_eq!(log.lock().unwrap().beam_updates, 2);

    // an inhabitant moving leaves the beam alone
    assert!(handle.report_selection(Space::new(1, 8)));
    next_matching(&mut turn_rx, turn_started(0)).await;
    assert_eq!(log.lock().unwrap().beam_updates, 2);

    runtime.exit_game().await.unwrap();
}

#[tokio::test]
async fn boxed_in_player_skips_its_turn() {
    // player 0 at the origin is surrounded by the other four pieces
    let mut roster = vec![Player::new(PlayerId(0), PieceKind::Inhabitant, Space::ORIGIN)];
    roster.extend(Space::ORIGIN.neighbors4().into_iter().enumerate().map(|(i, space)| {
        Player::new(PlayerId(i as u32 + 1), PieceKind::Inhabitant, space)
    }));
    let mut runtime = human_runtime(RecordingBoard::new(roster));
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    runtime.enter_game().await.unwrap();

    let skipped = next_matching(&mut turn_rx, |e| {
        matches!(e, Event::Turn(TurnEvent::Skipped { .. }))
    })
    .await;
    assert_eq!(
        skipped,
        Event::Turn(TurnEvent::Skipped {
            player: PlayerId(0)
        })
    );
    next_matching(&mut turn_rx, turn_started(1)).await;

    runtime.exit_game().await.unwrap();
}
