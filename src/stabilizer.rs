// Gesture stabilization: majority vote over a short window, then a
// cooldown lockout after every change.
//
// Landmark jitter flips finger flags from frame to frame, so the raw
// classification cannot drive one-shot actions directly. The stabilizer
// runs two filters in sequence:
//
// 1. While the cooldown counter is non-zero the frame only decrements it;
//    the stable label is held and the history window is left untouched.
// 2. Otherwise the raw label enters a bounded FIFO. Once the FIFO is full
//    the candidate is its majority label, otherwise the raw label itself.
//    A candidate that differs from the stable label replaces it and
//    re-arms the cooldown.
//
// Majority ties go to the label seen first when scanning the window from
// oldest to newest.

use std::collections::VecDeque;

use tracing::debug;

use crate::gesture::{Gesture, GESTURE_COUNT};

// ── Config ─────────────────────────────────────────────────

/// Window and lockout lengths, both counted in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizerConfig {
    /// Majority-vote window capacity.
    pub window: usize,
    /// Frames to hold a freshly changed label.
    pub cooldown_frames: u32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self { window: 3, cooldown_frames: 10 }
    }
}

// ── State ──────────────────────────────────────────────────

/// Per-session stabilizer state, owned by the frame loop.
#[derive(Debug, Clone)]
pub struct GestureStabilizer {
    config: StabilizerConfig,
    history: VecDeque<Gesture>,
    current: Gesture,
    cooldown: u32,
}

impl GestureStabilizer {
    /// A window of 0 is treated as 1.
    pub fn new(config: StabilizerConfig) -> Self {
        let config = StabilizerConfig { window: config.window.max(1), ..config };
        Self {
            history: VecDeque::with_capacity(config.window + 1),
            config,
            current: Gesture::None,
            cooldown: 0,
        }
    }

    pub fn config(&self) -> StabilizerConfig {
        self.config
    }

    /// Last stabilized label.
    pub fn current(&self) -> Gesture {
        self.current
    }

    /// Frames left before another change can be observed.
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown
    }

    /// Raw labels currently in the vote window, oldest first.
    pub fn history(&self) -> impl Iterator<Item = Gesture> + '_ {
        self.history.iter().copied()
    }

    /// Feed one frame's raw label, get the stabilized label back.
    pub fn update(&mut self, raw: Gesture) -> Gesture {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return self.current;
        }

        self.history.push_back(raw);
        while self.history.len() > self.config.window {
            self.history.pop_front();
        }

        let candidate = if self.history.len() >= self.config.window {
            self.majority()
        } else {
            raw
        };

        if candidate != self.current {
            debug!(
                from = self.current.as_str(),
                to = candidate.as_str(),
                cooldown = self.config.cooldown_frames,
                "stable gesture changed"
            );
            self.current = candidate;
            self.cooldown = self.config.cooldown_frames;
        }

        self.current
    }

    /// Most frequent label in the window, first-seen on ties.
    fn majority(&self) -> Gesture {
        let mut counts = [0usize; GESTURE_COUNT];
        for g in &self.history {
            counts[*g as usize] += 1;
        }

        let mut best = Gesture::None;
        let mut best_count = 0;
        for g in &self.history {
            let count = counts[*g as usize];
            if count > best_count {
                best = *g;
                best_count = count;
            }
        }
        best
    }
}

impl Default for GestureStabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn no_cooldown(window: usize) -> GestureStabilizer {
        GestureStabilizer::new(StabilizerConfig { window, cooldown_frames: 0 })
    }

    fn feed(stab: &mut GestureStabilizer, raws: &[Gesture]) -> Vec<Gesture> {
        raws.iter().map(|g| stab.update(*g)).collect()
    }

    fn any_gesture() -> impl Strategy<Value = Gesture> {
        (0..GESTURE_COUNT).prop_map(|i| Gesture::ALL[i])
    }

    #[test]
    fn test_initial_state() {
        let stab = GestureStabilizer::default();
        assert_eq!(stab.current(), Gesture::None);
        assert_eq!(stab.cooldown_remaining(), 0);
        assert_eq!(stab.history().count(), 0);
    }

    #[test]
    fn test_move_outvoted() {
        use Gesture::{Draw, Move};
        let mut stab = no_cooldown(3);
        let out = feed(&mut stab, &[Draw, Draw, Move, Draw, Draw, Draw]);
        assert_eq!(out[2..], [Draw, Draw, Draw, Draw]);
        assert!(out.iter().all(|g| *g == Draw));
    }

    #[test]
    fn test_single_spike_ignored() {
        use Gesture::{Draw, Undo};
        let mut stab = no_cooldown(3);
        let out = feed(&mut stab, &[Draw, Draw, Draw, Draw, Undo, Draw, Draw, Draw]);
        assert!(out.iter().all(|g| *g == Draw), "{out:?}");
    }

    #[test]
    fn test_partial_window_passes_raw_through() {
        let mut stab = no_cooldown(5);
        assert_eq!(stab.update(Gesture::Pause), Gesture::Pause);
        assert_eq!(stab.update(Gesture::Redo), Gesture::Redo);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut stab = no_cooldown(3);
        feed(&mut stab, &[Gesture::Draw; 10]);
        assert_eq!(stab.history().count(), 3);
    }

    #[test]
    fn test_tie_goes_to_oldest() {
        use Gesture::{Clear, Draw, Move, Pause};
        let mut stab = no_cooldown(4);
        // Window [Move, Draw, Draw, Move]: 2 vs 2, Move seen first.
        feed(&mut stab, &[Pause, Move, Draw, Draw]);
        assert_eq!(stab.update(Move), Move);
        // Window [Draw, Draw, Move, Clear]: Draw wins outright.
        assert_eq!(stab.update(Clear), Draw);
    }

    #[test]
    fn test_all_distinct_window_picks_oldest() {
        use Gesture::{Move, Redo, Undo};
        let mut stab = no_cooldown(3);
        let out = feed(&mut stab, &[Undo, Redo, Move]);
        assert_eq!(out[2], Undo);
    }

    #[test]
    fn test_cooldown_holds_for_exact_frames() {
        let cooldown = 10;
        let mut stab = GestureStabilizer::new(StabilizerConfig { window: 3, cooldown_frames: cooldown });

        // First frame: window not full, Draw adopted, lockout armed.
        assert_eq!(stab.update(Gesture::Draw), Gesture::Draw);
        assert_eq!(stab.cooldown_remaining(), cooldown);

        // Raw input flips every frame; nothing moves during the lockout.
        let noisy = [Gesture::Clear, Gesture::Undo];
        for i in 0..cooldown {
            assert_eq!(stab.update(noisy[i as usize % 2]), Gesture::Draw, "frame {i}");
        }
        assert_eq!(stab.cooldown_remaining(), 0);
        // History only held the first frame.
        assert_eq!(stab.history().collect::<Vec<_>>(), vec![Gesture::Draw]);

        // Lockout over: window [Draw, Clear] is still partial, raw wins.
        assert_eq!(stab.update(Gesture::Clear), Gesture::Clear);
        assert_eq!(stab.cooldown_remaining(), cooldown);
    }

    #[test]
    fn test_held_pose_with_default_lockout() {
        let mut stab = GestureStabilizer::default();
        let out = feed(&mut stab, &[Gesture::Move; 40]);
        assert!(out.iter().all(|g| *g == Gesture::Move));
    }

    #[test]
    fn test_same_label_does_not_rearm() {
        let mut stab = GestureStabilizer::new(StabilizerConfig { window: 3, cooldown_frames: 2 });
        feed(&mut stab, &[Gesture::Pause; 3]);
        assert_eq!(stab.cooldown_remaining(), 0);
        feed(&mut stab, &[Gesture::Pause; 5]);
        assert_eq!(stab.cooldown_remaining(), 0);
        assert_eq!(stab.current(), Gesture::Pause);
    }

    #[test]
    fn test_zero_window_acts_as_one() {
        let mut stab = no_cooldown(0);
        assert_eq!(stab.config().window, 1);
        assert_eq!(stab.update(Gesture::Move), Gesture::Move);
        assert_eq!(stab.update(Gesture::Draw), Gesture::Draw);
    }

    proptest! {
        #[test]
        fn constant_input_settles_within_window(
            g in any_gesture(),
            window in 1usize..8,
            warmup in proptest::collection::vec(any_gesture(), 0..20),
        ) {
            let mut stab = no_cooldown(window);
            feed(&mut stab, &warmup);
            let out = feed(&mut stab, &vec![g; window]);
            prop_assert_eq!(*out.last().unwrap(), g);
            // And it stays put.
            let out = feed(&mut stab, &vec![g; 50]);
            prop_assert!(out.iter().all(|x| *x == g));
        }

        #[test]
        fn changes_are_separated_by_cooldown(
            raws in proptest::collection::vec(any_gesture(), 1..200),
            window in 1usize..6,
            cooldown in 0u32..15,
        ) {
            let mut stab = GestureStabilizer::new(StabilizerConfig { window, cooldown_frames: cooldown });
            let mut prev = Gesture::None;
            let mut last_change: Option<usize> = None;
            for (i, raw) in raws.iter().enumerate() {
                let out = stab.update(*raw);
                if out != prev {
                    if let Some(at) = last_change {
                        prop_assert!(i - at > cooldown as usize, "change at {} too soon after {}", i, at);
                    }
                    last_change = Some(i);
                    prev = out;
                }
            }
        }

        #[test]
        fn output_is_none_or_a_seen_label(
            raws in proptest::collection::vec(any_gesture(), 1..100),
            window in 1usize..6,
        ) {
            let mut stab = no_cooldown(window);
            for (i, raw) in raws.iter().enumerate() {
                let out = stab.update(*raw);
                prop_assert!(out == Gesture::None || raws[..=i].contains(&out));
            }
        }
    }
}
