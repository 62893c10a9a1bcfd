//! Choreography Tests
//!
//! Drive a real Conductor under paused tokio time and check the exact
//! sequence of stage messages a surface would receive.
//!
//! # Test Coverage
//!
//! 1. **Reveal**: typewriter prefixes, button appearance, empty input
//! 2. **Press**: keyframe order and final scale
//! 3. **Breathing**: phase order, repetition count, timing
//! 4. **Restart**: a second activation replays the first
//! 5. **Input handling**: taps during animations, quit, closed surface

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use breathe_core::{
    BreatheConfig, ButtonColor, Conductor, ConductorError, HoldAfter, Phase, StageMessage,
    StageState, SurfaceEvent, BREATH_REPETITIONS,
};

// ============================================================================
// Harness
// ============================================================================

type Stamped = (Duration, StageMessage);

/// A running Conductor plus the surface end of its channels
struct Harness {
    rx: mpsc::Receiver<StageMessage>,
    taps: mpsc::Sender<SurfaceEvent>,
    handle: JoinHandle<Result<(), ConductorError>>,
    start: Instant,
    mirror: StageState,
}

impl Harness {
    fn start(texts: Vec<String>) -> Self {
        Self::start_with(BreatheConfig::default(), texts)
    }

    fn start_with(config: BreatheConfig, texts: Vec<String>) -> Self {
        let (tx, rx) = mpsc::channel(4096);
        let (taps, event_rx) = mpsc::channel(16);

        let mut conductor = Conductor::new(config, tx, event_rx).with_texts(texts);
        let handle = tokio::spawn(async move { conductor.run().await });

        Self {
            rx,
            taps,
            handle,
            start: Instant::now(),
            mirror: StageState::new(),
        }
    }

    /// Receive messages until `done` matches (inclusive)
    async fn until(&mut self, mut done: impl FnMut(&StageMessage) -> bool) -> Vec<Stamped> {
        let mut out = Vec::new();
        while let Some(msg) = self.rx.recv().await {
            self.mirror.apply_message(&msg);
            let stop = done(&msg);
            out.push((self.start.elapsed(), msg));
            if stop {
                break;
            }
        }
        out
    }

    async fn until_awaiting_tap(&mut self) -> Vec<Stamped> {
        self.until(|m| *m == StageMessage::AwaitingTap).await
    }

    async fn until_phase(&mut self, phase: Phase) -> Vec<Stamped> {
        self.until(|m| matches!(m, StageMessage::PhaseChanged { phase: p, .. } if *p == phase))
            .await
    }

    async fn tap(&self) {
        self.taps.send(SurfaceEvent::Tap).await.unwrap();
    }

    /// Tap and play one full activation through to the restart label
    async fn activation(&mut self) -> Vec<Stamped> {
        self.tap().await;
        self.until_phase(Phase::Restart).await
    }
}

fn phases(messages: &[Stamped]) -> Vec<Phase> {
    messages
        .iter()
        .filter_map(|(_, m)| match m {
            StageMessage::PhaseChanged { phase, .. } => Some(*phase),
            _ => None,
        })
        .collect()
}

fn labels(messages: &[Stamped]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|(_, m)| match m {
            StageMessage::PhaseChanged { label, .. } => Some(label.clone()),
            _ => None,
        })
        .collect()
}

fn keyframes(messages: &[Stamped]) -> Vec<f32> {
    messages
        .iter()
        .filter_map(|(_, m)| match m {
            StageMessage::KeyframeReached { value } => Some(*value),
            _ => None,
        })
        .collect()
}

fn time_of(messages: &[Stamped], wanted: &StageMessage) -> Duration {
    messages
        .iter()
        .find(|(_, m)| m == wanted)
        .map(|(t, _)| *t)
        .unwrap_or_else(|| panic!("{wanted:?} not found"))
}

fn phase_time(messages: &[Stamped], phase: Phase) -> Duration {
    messages
        .iter()
        .find(|(_, m)| matches!(m, StageMessage::PhaseChanged { phase: p, .. } if *p == phase))
        .map(|(t, _)| *t)
        .unwrap_or_else(|| panic!("{phase:?} not found"))
}

fn breath_pattern() -> Vec<Phase> {
    let mut expected = vec![Phase::Idle, Phase::Ready];
    for _ in 0..BREATH_REPETITIONS {
        expected.extend([
            Phase::Inhale,
            Phase::Hold(HoldAfter::Inhale),
            Phase::Exhale,
            Phase::Hold(HoldAfter::Exhale),
        ]);
    }
    expected.extend([Phase::Done, Phase::Restart]);
    expected
}

// ============================================================================
// Reveal
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_hi_reveals_prefixes_then_shows_button() {
    let mut h = Harness::start(vec!["Hi".to_string()]);

    let messages = h.until_awaiting_tap().await;
    let kinds: Vec<StageMessage> = messages.iter().map(|(_, m)| m.clone()).collect();

    assert_eq!(
        kinds,
        vec![
            StageMessage::TextRevealed { text: "H".into() },
            StageMessage::TextRevealed { text: "Hi".into() },
            StageMessage::ButtonShown,
            StageMessage::AwaitingTap,
        ]
    );

    assert_eq!(messages[0].0, Duration::ZERO);
    assert_eq!(messages[1].0, Duration::from_millis(160));
    assert_eq!(
        time_of(&messages, &StageMessage::ButtonShown),
        Duration::from_millis(160 * 2 + 1000)
    );

    assert!(h.mirror.show_button());
    assert!(h.mirror.show_button_text());
    assert!(h.mirror.awaiting_tap());
    assert_eq!(h.mirror.display_text(), "Hi");
}

#[tokio::test(start_paused = true)]
async fn test_greeting_never_exceeds_source() {
    let config = BreatheConfig::default();
    let greeting = config.strings.greeting();
    let mut h = Harness::start_with(config, vec![greeting.clone()]);

    let messages = h.until(|m| *m == StageMessage::ButtonShown).await;
    let mut last_len = 0;
    for (_, msg) in &messages {
        if let StageMessage::TextRevealed { text } = msg {
            assert!(greeting.starts_with(text.as_str()));
            assert!(text.len() > last_len);
            last_len = text.len();
        }
    }
    assert_eq!(h.mirror.display_text(), greeting);
}

#[tokio::test(start_paused = true)]
async fn test_empty_text_list_never_shows_button() {
    let mut h = Harness::start(Vec::new());

    // Plenty of virtual time for any reveal to have happened
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(h.rx.try_recv().is_err());

    // Taps without a button do nothing
    h.tap().await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(h.rx.try_recv().is_err());

    h.taps.send(SurfaceEvent::Quit).await.unwrap();
    let messages = h.until(|m| *m == StageMessage::Finished).await;
    assert_eq!(messages.len(), 1);
    assert!(!h.mirror.show_button());

    assert!(h.handle.await.unwrap().is_ok());
}

// ============================================================================
// Press
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_press_keyframes_then_ready() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;

    h.tap().await;
    let messages = h.until_phase(Phase::Ready).await;

    assert_eq!(keyframes(&messages), vec![0.3, 1.2, 1.0]);
    assert_eq!(labels(&messages), vec![String::new(), "ready".to_string()]);
    assert_eq!(h.mirror.scale(), 1.0);
    assert!(!h.mirror.show_button_text());

    // The press pulse finishes before the breathing cycle starts
    let tapped = time_of(&messages, &StageMessage::TapAccepted);
    let ready = phase_time(&messages, Phase::Ready);
    assert_eq!(ready - tapped, Duration::from_millis(1800 * 3 + 200));
}

#[tokio::test(start_paused = true)]
async fn test_press_scale_stays_in_range() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;

    h.tap().await;
    let messages = h.until_phase(Phase::Ready).await;

    for (_, msg) in &messages {
        if let StageMessage::ScaleChanged { value } = msg {
            assert!((0.3..=1.2).contains(value), "scale {value} out of range");
        }
    }
}

// ============================================================================
// Breathing
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_full_cycle_phase_order() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;

    let messages = h.activation().await;

    assert_eq!(phases(&messages), breath_pattern());

    let body = labels(&messages);
    let repetition_labels = &body[2..body.len() - 2];
    assert_eq!(repetition_labels.len(), BREATH_REPETITIONS * 4);
    for chunk in repetition_labels.chunks(4) {
        assert_eq!(chunk, ["inhale", "hold", "exhale", "hold"]);
    }

    assert_eq!(h.mirror.phase(), Phase::Restart);
    assert_eq!(h.mirror.color(), ButtonColor::Purple);
}

#[tokio::test(start_paused = true)]
async fn test_praise_then_restart_after_hold() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;

    let mut messages = h.activation().await;
    messages.extend(h.until_awaiting_tap().await);

    let praise = phase_time(&messages, Phase::Done);
    let restart = phase_time(&messages, Phase::Restart);
    assert_eq!(restart - praise, Duration::from_millis(3000));

    let (_, last) = messages.last().unwrap();
    assert_eq!(*last, StageMessage::AwaitingTap);
    assert!(h.mirror.awaiting_tap());
}

#[tokio::test(start_paused = true)]
async fn test_breath_timing() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;

    let messages = h.activation().await;

    let ready = phase_time(&messages, Phase::Ready);
    let inhale = phase_time(&messages, Phase::Inhale);
    let hold_in = phase_time(&messages, Phase::Hold(HoldAfter::Inhale));
    let exhale = phase_time(&messages, Phase::Exhale);
    let hold_out = phase_time(&messages, Phase::Hold(HoldAfter::Exhale));

    assert_eq!(inhale - ready, Duration::from_millis(3000));
    assert_eq!(hold_in - inhale, Duration::from_millis(7000));
    assert_eq!(exhale - hold_in, Duration::from_millis(3000));
    assert_eq!(hold_out - exhale, Duration::from_millis(7200));
}

#[tokio::test(start_paused = true)]
async fn test_label_and_color_always_agree() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;
    h.tap().await;

    let mut seen = Vec::new();
    h.until(|m| {
        if let StageMessage::PhaseChanged { phase, .. } = m {
            seen.push((*phase, phase.color()));
        }
        matches!(m, StageMessage::PhaseChanged { phase: Phase::Restart, .. })
    })
    .await;

    for (phase, color) in seen {
        let expected = match phase {
            Phase::Idle | Phase::Ready => ButtonColor::LightBlue,
            Phase::Inhale | Phase::Hold(HoldAfter::Inhale) => ButtonColor::PaleBlue,
            _ => ButtonColor::Purple,
        };
        assert_eq!(color, expected, "{phase:?}");
    }
}

// ============================================================================
// Restart
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_second_run_replays_first() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;

    let first = h.activation().await;
    h.until_awaiting_tap().await;
    let second = h.activation().await;

    assert_eq!(phases(&first), phases(&second));
    assert_eq!(labels(&first), labels(&second));
    assert_eq!(keyframes(&first), keyframes(&second));

    let colors = |m: &[Stamped]| -> Vec<ButtonColor> {
        phases(m).into_iter().map(Phase::color).collect()
    };
    assert_eq!(colors(&first), colors(&second));

    let span = |m: &[Stamped]| m.last().unwrap().0 - m.first().unwrap().0;
    assert_eq!(span(&first), span(&second));
}

#[tokio::test(start_paused = true)]
async fn test_greeting_stays_through_restart() {
    let (tx, mut rx) = mpsc::channel(4096);
    let (taps, event_rx) = mpsc::channel(16);
    let mut conductor =
        Conductor::new(BreatheConfig::default(), tx, event_rx).with_texts(vec!["Hi".to_string()]);

    // A fresh stage starts with nothing revealed
    assert_eq!(conductor.state().display_text(), "");
    assert_eq!(conductor.activations(), 0);

    // Hand the Conductor back so its own stage can be inspected afterwards
    let handle = tokio::spawn(async move {
        let result = conductor.run().await;
        (conductor, result)
    });

    let mut mirror = StageState::new();
    while let Some(msg) = rx.recv().await {
        mirror.apply_message(&msg);
        match msg {
            StageMessage::AwaitingTap if mirror.phase() == Phase::Restart => {
                assert_eq!(mirror.display_text(), "Hi");
                taps.send(SurfaceEvent::Quit).await.unwrap();
            }
            StageMessage::AwaitingTap => taps.send(SurfaceEvent::Tap).await.unwrap(),
            StageMessage::Finished => break,
            _ => {}
        }
    }

    let (conductor, result) = handle.await.unwrap();
    assert!(result.is_ok());
    assert_eq!(conductor.activations(), 1);
    assert_eq!(conductor.state(), &mirror);
    assert_eq!(conductor.state().display_text(), "Hi");
    assert!(conductor.state().is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_restart_clears_label_and_color() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;
    h.activation().await;
    h.until_awaiting_tap().await;

    h.tap().await;
    let messages = h.until_phase(Phase::Idle).await;

    assert!(messages
        .iter()
        .any(|(_, m)| *m == StageMessage::ButtonText { visible: false }));
    assert_eq!(h.mirror.label(), "");
    assert_eq!(h.mirror.color(), ButtonColor::LightBlue);
}

// ============================================================================
// Input Handling
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_taps_during_animation_are_ignored() {
    let mut h = Harness::start(vec!["Hi".to_string()]);

    // Taps during the reveal
    h.tap().await;
    h.tap().await;
    h.until_awaiting_tap().await;

    h.tap().await;
    h.until_phase(Phase::Inhale).await;

    // Hammer the button mid-breath
    for _ in 0..5 {
        h.tap().await;
    }
    let messages = h.until_phase(Phase::Restart).await;

    // Exactly one activation: a second would restart the press pulse
    let idles = phases(&messages)
        .into_iter()
        .filter(|p| *p == Phase::Idle)
        .count();
    assert_eq!(idles, 0);
    assert_eq!(
        messages
            .iter()
            .filter(|(_, m)| *m == StageMessage::TapAccepted)
            .count(),
        0
    );

    // The queued taps do not start another round
    let next = h.until_awaiting_tap().await;
    assert_eq!(next.len(), 1);
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_quit_mid_cycle_finishes_cleanly() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;
    h.tap().await;
    h.until_phase(Phase::Exhale).await;

    h.taps.send(SurfaceEvent::Quit).await.unwrap();
    let rest = h.until(|m| *m == StageMessage::Finished).await;

    assert!(!phases(&rest).contains(&Phase::Restart));
    assert!(h.mirror.is_finished());
    assert!(h.handle.await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_dropped_event_sender_stops_at_next_tap() {
    let mut h = Harness::start(vec!["Hi".to_string()]);
    h.until_awaiting_tap().await;
    h.tap().await;

    let Harness {
        mut rx,
        taps,
        handle,
        ..
    } = h;
    drop(taps);

    // The running activation plays out, then the Conductor stops
    let mut saw_restart = false;
    let mut saw_finished = false;
    while let Some(msg) = rx.recv().await {
        match msg {
            StageMessage::PhaseChanged {
                phase: Phase::Restart,
                ..
            } => saw_restart = true,
            StageMessage::Finished => saw_finished = true,
            _ => {}
        }
    }

    assert!(saw_restart);
    assert!(saw_finished);
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_closed_surface_is_an_error() {
    let h = Harness::start(vec!["Hello".to_string()]);
    let Harness { rx, handle, .. } = h;
    drop(rx);

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(ConductorError::SurfaceClosed)));
}
