//! Property tests over command sequences.

use proptest::prelude::*;
use ripple_core::{CommandPayload, ObstacleId, Point2, TickId};
use ripple_engine::{SchedulerState, SolverConfig, StepScheduler, TickOutcome};

// Centre of cell (8, 8) on a 16x16 grid.
const CELL_CENTER: Point2 = Point2 { x: 0.0625, y: 0.0625 };

fn small(steps_per_tick: u32) -> StepScheduler {
    StepScheduler::new(SolverConfig {
        width: 16,
        height: 16,
        parallel: false,
        check_finite: true,
        steps_per_tick,
        ..SolverConfig::default()
    })
    .unwrap()
}

fn laid_amplitudes(persist: bool, amplitudes: &[f32]) -> f32 {
    let mut s = small(1);
    for p in [
        CommandPayload::SetPersistence { persist },
        CommandPayload::SetSourceActive { active: true },
        CommandPayload::MoveSource {
            position: CELL_CENTER,
        },
    ] {
        assert!(s.apply(p.into()).accepted);
    }
    for &amplitude in amplitudes {
        assert!(s
            .apply(CommandPayload::SetSourceAmplitude { amplitude }.into())
            .accepted);
        s.tick().unwrap();
    }
    s.store().accessory().read().at(8, 8).source_amplitude
}

fn any_command() -> impl Strategy<Value = CommandPayload> {
    prop_oneof![
        Just(CommandPayload::Start),
        Just(CommandPayload::Pause),
        Just(CommandPayload::TogglePause),
        Just(CommandPayload::StepOnce),
        Just(CommandPayload::Reset),
        Just(CommandPayload::ClearSources),
        Just(CommandPayload::LayBarSource),
        Just(CommandPayload::ClearGeometry),
        any::<bool>().prop_map(|enabled| CommandPayload::SetWriteEnabled { enabled }),
        any::<bool>().prop_map(|active| CommandPayload::SetSourceActive { active }),
        any::<bool>().prop_map(|toward_first| CommandPayload::Join { toward_first }),
        (-1.5f32..1.5, -1.5f32..1.5).prop_map(|(x, y)| CommandPayload::MoveObstacle {
            obstacle: ObstacleId::FIRST,
            center: Point2::new(x, y),
        }),
        (-1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y)| CommandPayload::MoveSource {
            position: Point2::new(x, y),
        }),
        (-5i32..5).prop_map(|steps| CommandPayload::NudgeSourceAmplitude { steps }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn held_amplitude_is_order_independent(a in 0.01f32..2.0, b in 0.01f32..2.0) {
        let ab = laid_amplitudes(true, &[a, b]);
        let ba = laid_amplitudes(true, &[b, a]);
        prop_assert_eq!(ab, ba);
        prop_assert_eq!(ab, a.max(b));
    }

    #[test]
    fn without_persistence_the_last_amplitude_wins(a in 0.01f32..2.0, b in 0.01f32..2.0) {
        prop_assert_eq!(laid_amplitudes(false, &[a, b]), b);
    }

    #[test]
    fn random_sessions_stay_finite_and_count_ticks(
        session in prop::collection::vec((any_command(), 0.0f64..1.5), 1..40),
    ) {
        let mut s = small(2);
        let tx = s.command_sender();
        let mut ticked = 0u64;
        for (command, elapsed) in session {
            tx.submit(command).unwrap();
            let report = s.advance(elapsed).unwrap();
            prop_assert_eq!(report.receipts.len(), 1);
            match report.outcome {
                TickOutcome::Ticked { tick_id } => {
                    ticked += 1;
                    prop_assert_eq!(tick_id, TickId(ticked));
                }
                TickOutcome::Skipped { elapsed_secs } => prop_assert!(elapsed_secs > 1.0),
                TickOutcome::Idle => prop_assert_eq!(s.state(), SchedulerState::Idle),
                TickOutcome::Paused => prop_assert!(!s.state().is_running()),
            }
        }
        prop_assert_eq!(s.tick_id(), TickId(ticked));
        prop_assert_eq!(s.metrics().non_finite_ticks, 0);
        prop_assert!(s.frame().values().iter().all(|v| v.is_finite()));
    }
}
