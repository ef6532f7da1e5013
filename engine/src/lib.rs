pub mod cadence;
pub mod fingerprint;

pub use cadence::FrameCadence;

/// Frame-by-frame state history with rewind and branching.
///
/// `limit` bounds how many states are kept; the oldest frames are dropped
/// first once it is exceeded, so `frame()` is always an index into
/// `history()`.
#[derive(Debug, Clone)]
pub struct TimeMachine<State> {
    states: Vec<State>,
    frame: usize,
    limit: Option<usize>,
    dropped: usize,
}

impl<State> TimeMachine<State> {
    pub fn new(initial_state: State) -> Self {
        Self {
            states: vec![initial_state],
            frame: 0,
            limit: None,
            dropped: 0,
        }
    }

    pub fn bounded(initial_state: State, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(initial_state)
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Total frames recorded since creation, including dropped ones.
    pub fn absolute_frame(&self) -> usize {
        self.dropped + self.frame
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self) -> &State {
        &self.states[self.frame]
    }

    pub fn state_at(&self, frame: usize) -> Option<&State> {
        self.states.get(frame)
    }

    pub fn history(&self) -> &[State] {
        &self.states
    }

    pub fn can_rewind(&self) -> bool {
        self.frame > 0
    }

    pub fn can_forward(&self) -> bool {
        self.frame + 1 < self.states.len()
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.frame = self.frame.saturating_sub(frames);
        self.frame
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        let max_frame = self.states.len().saturating_sub(1);
        self.frame = (self.frame + frames).min(max_frame);
        self.frame
    }

    /// Records `state` after the current frame, discarding any forward branch.
    pub fn record(&mut self, state: State) -> usize {
        if self.frame + 1 < self.states.len() {
            self.states.truncate(self.frame + 1);
        }
        self.states.push(state);
        self.frame += 1;

        if let Some(limit) = self.limit {
            if self.states.len() > limit {
                let excess = self.states.len() - limit;
                self.states.drain(..excess);
                self.frame -= excess;
                self.dropped += excess;
            }
        }
        self.frame
    }
}

pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a [`GameLogic`] without a window: one `step` per frame.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    timemachine: TimeMachine<G::State>,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let initial_state = game.initial_state();
        Self {
            game,
            timemachine: TimeMachine::new(initial_state),
        }
    }

    pub fn with_history_limit(game: G, limit: usize) -> Self {
        let initial_state = game.initial_state();
        Self {
            game,
            timemachine: TimeMachine::bounded(initial_state, limit),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn frame(&self) -> usize {
        self.timemachine.frame()
    }

    pub fn state(&self) -> &G::State {
        self.timemachine.state()
    }

    pub fn history(&self) -> &[G::State] {
        self.timemachine.history()
    }

    pub fn timemachine(&self) -> &TimeMachine<G::State> {
        &self.timemachine
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        let next_state = self.game.step(self.timemachine.state(), input);
        self.timemachine.record(next_state)
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        let mut last_frame = self.frame();
        for input in inputs {
            last_frame = self.step(input);
        }
        last_frame
    }

    /// Steps `frames` times with the same input, stopping early if `done`
    /// reports true for the newest state.
    pub fn run_until<F>(&mut self, frames: usize, input: G::Input, mut done: F) -> usize
    where
        G::Input: Clone,
        F: FnMut(&G::State) -> bool,
    {
        for _ in 0..frames {
            if done(self.state()) {
                break;
            }
            self.step(input.clone());
        }
        self.frame()
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.timemachine.rewind(frames)
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        self.timemachine.forward(frames)
    }
}
