//! End-to-end scheduler runs driven only through commands.

use ripple_core::{
    AccessoryCell, CommandPayload, FieldCell, HistoryCell, MaterialMode, ObstacleId, Point2,
    TickId,
};
use ripple_engine::{SchedulerState, SolverConfig, StepScheduler, TickOutcome};
use ripple_test_utils::{peak_abs_ez, peak_source_amplitude};

fn scheduler(n: u32, parallel: bool) -> StepScheduler {
    StepScheduler::new(SolverConfig {
        width: n,
        height: n,
        parallel,
        check_finite: true,
        ..SolverConfig::default()
    })
    .unwrap()
}

fn run(s: &mut StepScheduler, ticks: usize) {
    for _ in 0..ticks {
        let report = s.advance(1.0 / 60.0).unwrap();
        assert!(matches!(report.outcome, TickOutcome::Ticked { .. }));
    }
}

fn snapshot(s: &StepScheduler) -> (Vec<FieldCell>, Vec<AccessoryCell>, Vec<HistoryCell>, Vec<f32>) {
    let store = s.store();
    (
        store.field().read().cells().to_vec(),
        store.accessory().read().cells().to_vec(),
        store.history().read().cells().to_vec(),
        s.frame().values().to_vec(),
    )
}

fn drive(s: &mut StepScheduler, payloads: impl IntoIterator<Item = CommandPayload>) {
    for p in payloads {
        let receipt = s.apply(p.into());
        assert!(receipt.accepted, "{receipt:?}");
    }
}

// ── Full runs ───────────────────────────────────────────────────

#[test]
fn interactive_session_stays_finite() {
    let mut s = scheduler(64, true);
    drive(
        &mut s,
        [
            CommandPayload::SetSourceActive { active: true },
            CommandPayload::MoveSource {
                position: Point2::new(-0.5, -0.5),
            },
            CommandPayload::Start,
            CommandPayload::SetWriteEnabled { enabled: true },
        ],
    );
    run(&mut s, 50);
    drive(
        &mut s,
        [
            CommandPayload::MoveObstacle {
                obstacle: ObstacleId::SECOND,
                center: Point2::new(0.3, -0.2),
            },
            CommandPayload::SetMaterialMode {
                mode: MaterialMode::Dielectric,
            },
            CommandPayload::MoveObstacle {
                obstacle: ObstacleId::SECOND,
                center: Point2::new(0.0, 0.5),
            },
        ],
    );
    run(&mut s, 250);
    assert_eq!(s.metrics().non_finite_ticks, 0);
    assert_eq!(s.tick_id(), TickId(300));
    assert!(s.frame().values().iter().all(|v| v.is_finite()));
    assert!(s.frame().peak_abs() > 0.0);
    assert!(peak_abs_ez(s.store()) < 10.0);
}

#[test]
fn field_decays_once_sources_are_cleared() {
    let mut s = scheduler(48, true);
    drive(
        &mut s,
        [
            CommandPayload::SetSourceActive { active: true },
            CommandPayload::MoveSource {
                position: Point2::new(0.0, 0.0),
            },
            CommandPayload::SetSourceAmplitude { amplitude: 0.5 },
            CommandPayload::Start,
        ],
    );
    run(&mut s, 100);
    assert!(peak_abs_ez(s.store()) > 0.0);
    drive(
        &mut s,
        [
            CommandPayload::SetSourceActive { active: false },
            CommandPayload::ClearSources,
        ],
    );
    assert_eq!(peak_source_amplitude(s.store()), 0.0);
    run(&mut s, 1000);
    assert!(peak_abs_ez(s.store()) < 1e-3, "{}", peak_abs_ez(s.store()));
}

#[test]
fn parallel_and_sequential_schedulers_agree() {
    let session = [
        CommandPayload::SetSourceActive { active: true },
        CommandPayload::SetWriteEnabled { enabled: true },
        CommandPayload::Join { toward_first: true },
        CommandPayload::Start,
    ];
    let mut a = scheduler(40, true);
    let mut b = scheduler(40, false);
    drive(&mut a, session.clone());
    drive(&mut b, session);
    run(&mut a, 40);
    run(&mut b, 40);
    assert_eq!(snapshot(&a), snapshot(&b));
}

// ── Reset ───────────────────────────────────────────────────────

#[test]
fn reset_is_idempotent() {
    let mut s = scheduler(32, false);
    drive(
        &mut s,
        [
            CommandPayload::SetSourceActive { active: true },
            CommandPayload::SetWriteEnabled { enabled: true },
            CommandPayload::Start,
        ],
    );
    run(&mut s, 20);
    drive(&mut s, [CommandPayload::Reset]);
    let once = snapshot(&s);
    drive(&mut s, [CommandPayload::Reset]);
    assert_eq!(snapshot(&s), once);
    assert!(once.0.iter().all(|c| *c == FieldCell::default()));
    assert!(once.1.iter().all(|c| *c == AccessoryCell::default()));
    assert!(once.2.iter().all(|c| *c == HistoryCell::default()));
    assert_eq!(s.state(), SchedulerState::Editing);
}

#[test]
fn reset_before_any_tick_changes_nothing() {
    let mut s = scheduler(16, false);
    let before = snapshot(&s);
    drive(&mut s, [CommandPayload::Reset, CommandPayload::Reset]);
    assert_eq!(snapshot(&s), before);
    assert_eq!(s.state(), SchedulerState::Idle);
}

// ── Geometry ────────────────────────────────────────────────────

#[test]
fn join_paints_a_continuous_wall() {
    let mut s = scheduler(64, false);
    drive(
        &mut s,
        [
            CommandPayload::SetWriteEnabled { enabled: true },
            CommandPayload::Join { toward_first: true },
        ],
    );
    let mut ticks = 0;
    while s.obstacles().join().is_some() {
        run(&mut s, 1);
        ticks += 1;
        assert!(ticks < 100, "join never finished");
    }
    // one more tick paints the final position
    run(&mut s, 1);
    let extent = s.store().extent();
    let field = s.store().field().read();
    for x in [0.0f32, 0.1, 0.2] {
        let (cx, cy) = extent.cell_at(Point2::new(x, 0.2)).unwrap();
        assert!(field.at(cx, cy).is_pec(), "x = {x}");
    }
}

#[test]
fn clear_geometry_disarms_and_restores_vacuum() {
    let mut s = scheduler(32, false);
    drive(
        &mut s,
        [
            CommandPayload::SetWriteEnabled { enabled: true },
            CommandPayload::Start,
        ],
    );
    run(&mut s, 3);
    assert!(s.store().field().read().cells().iter().any(|c| c.is_pec()));
    drive(&mut s, [CommandPayload::ClearGeometry]);
    assert_eq!(s.state(), SchedulerState::Stepping);
    assert!(s.store().field().read().cells().iter().all(|c| !c.is_pec()));
    run(&mut s, 3);
    assert!(s.store().field().read().cells().iter().all(|c| !c.is_pec()));
}

// ── Ingress ─────────────────────────────────────────────────────

#[test]
fn commands_from_another_thread_land_on_the_next_tick() {
    let mut s = scheduler(32, true);
    let tx = s.command_sender();
    std::thread::spawn(move || {
        tx.submit(CommandPayload::SetSourceActive { active: true })
            .unwrap();
        tx.submit(CommandPayload::StepOnce).unwrap();
    })
    .join()
    .unwrap();
    let report = s.advance(0.01).unwrap();
    assert_eq!(report.receipts.len(), 2);
    assert_eq!(report.outcome, TickOutcome::Ticked { tick_id: TickId(1) });
    assert_eq!(s.state(), SchedulerState::Paused { editing: false });
    assert_eq!(s.advance(0.01).unwrap().outcome, TickOutcome::Paused);
}
