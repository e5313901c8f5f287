//! Core session controller implementation
//!
//! Owns the conversation-bookmark state machine for a single focus window:
//! builds the bookmark registry, wires engine callbacks into its dispatch
//! loop, arbitrates voice- and UI-triggered navigation through one gate,
//! runs the idle deadline, and tears everything down on focus loss.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::bookmarks::{BookmarkRegistry, CheckpointKind};
use crate::config::MenuConfig;
use crate::conversation::{ConversationEngine, ConversationEvent, Subscription};
use crate::events::SessionEvent;
use crate::flows::{FlowKind, FlowLauncher};
use crate::maps::MapStore;
use crate::navigation::NavigationGate;
use crate::timer::IdleTimer;
use crate::ui::{MenuControl, MenuUi};

/// The two states of the menu session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// No focus held, nothing wired
    Idle,
    /// Focus held, conversation running
    Active,
}

impl Default for MenuState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuState::Idle => write!(f, "Idle"),
            MenuState::Active => write!(f, "Active"),
        }
    }
}

/// Context granted with focus
///
/// The engine handle is only usable while focus is held; the robot revokes
/// it together with focus.
#[derive(Clone)]
pub struct FocusContext {
    engine: Arc<dyn ConversationEngine>,
}

impl FocusContext {
    pub fn new(engine: Arc<dyn ConversationEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<dyn ConversationEngine> {
        &self.engine
    }
}

impl fmt::Debug for FocusContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusContext").finish_non_exhaustive()
    }
}

/// Operator actions surfaced by the menu UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ChooseCreate,
    ChooseUse,
    Close,
}

/// Inputs consumed by the controller's dispatch loop
#[derive(Debug)]
pub enum MenuInput {
    FocusGained(FocusContext),
    FocusLost,
    FocusRefused { reason: String },
    Conversation(ConversationEvent),
    Ui(UiAction),
}

/// The state machine driving the map menu across one focus window
///
/// All inputs are dispatched on a single context; the only other execution
/// context is the idle timer's worker task, which touches nothing but the
/// navigation gate and its own handle.
pub struct SessionController {
    config: MenuConfig,
    ui: Arc<dyn MenuUi>,
    flows: Arc<dyn FlowLauncher>,
    maps: Arc<dyn MapStore>,
    gate: Arc<NavigationGate>,
    timer: IdleTimer,
    /// Latched false the first time `start_timer` is reached in a session
    timer_armed: bool,
    engine: Option<Arc<dyn ConversationEngine>>,
    subscriptions: Vec<Subscription>,
    state: MenuState,
    input_tx: mpsc::Sender<MenuInput>,
    input_rx: Option<mpsc::Receiver<MenuInput>>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionController {
    /// Create a controller; session events are emitted on `event_tx`
    pub fn new(
        config: MenuConfig,
        ui: Arc<dyn MenuUi>,
        flows: Arc<dyn FlowLauncher>,
        maps: Arc<dyn MapStore>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        let (input_tx, input_rx) = mpsc::channel(32);
        Self {
            config,
            ui,
            flows,
            maps,
            gate: Arc::new(NavigationGate::new()),
            timer: IdleTimer::new(),
            timer_armed: true,
            engine: None,
            subscriptions: Vec::new(),
            state: MenuState::Idle,
            input_tx,
            input_rx: Some(input_rx),
            event_tx,
        }
    }

    /// Sender for feeding lifecycle, conversation, and UI inputs
    pub fn input_sender(&self) -> mpsc::Sender<MenuInput> {
        self.input_tx.clone()
    }

    /// Get the current state
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Run the dispatch loop until the input channel closes
    pub async fn run(&mut self) {
        let Some(mut input_rx) = self.input_rx.take() else {
            warn!("session controller is already running");
            return;
        };

        info!("session controller started in Idle state");

        while let Some(input) = input_rx.recv().await {
            self.dispatch(input);
        }

        info!("session controller stopped");
    }

    fn dispatch(&mut self, input: MenuInput) {
        match input {
            MenuInput::FocusGained(ctx) => self.handle_focus_gained(ctx),
            MenuInput::FocusLost => self.handle_focus_lost(),
            MenuInput::FocusRefused { reason } => self.handle_focus_refused(&reason),
            MenuInput::Conversation(ConversationEvent::Started) => {
                self.handle_conversation_started()
            }
            MenuInput::Conversation(ConversationEvent::CheckpointReached { name }) => {
                self.handle_checkpoint_reached(&name)
            }
            MenuInput::Ui(action) => self.handle_ui_action(action),
        }
    }

    /// Build one session: registry, proposal, callbacks, conversation start
    fn handle_focus_gained(&mut self, ctx: FocusContext) {
        if self.state == MenuState::Active {
            warn!("focus gained while a session is active, tearing the old one down");
            self.handle_focus_lost();
        }

        let engine = Arc::clone(ctx.engine());
        self.timer_armed = true;

        let map_available = self.maps.map_exists();

        // fresh choice: nothing selected, "use" only offered with a map
        self.ui.set_checked(MenuControl::CreateMap, false);
        self.ui.set_checked(MenuControl::UseMap, false);
        self.ui.set_enabled(MenuControl::CreateMap, true);
        self.ui.set_enabled(MenuControl::UseMap, map_available);

        let registry = Arc::new(BookmarkRegistry::load(engine.as_ref(), &self.config.script));

        if map_available {
            engine.set_variable(&self.config.proposal_variable, &self.config.prompt_with_map);
        } else {
            engine.set_variable(&self.config.proposal_variable, &self.config.prompt_no_map);
            // keep the voice flow out of the "use" branch that cannot work
            match registry.get(CheckpointKind::Map) {
                Some(checkpoint) => engine.set_autonomous_reaction_enabled(checkpoint, false),
                None => debug!("script has no map checkpoint to disable"),
            }
        }

        let checkpoint_tx = self.input_tx.clone();
        let checkpoint_sub = engine.on_checkpoint_reached(Box::new(move |name| {
            let input = MenuInput::Conversation(ConversationEvent::CheckpointReached { name });
            if checkpoint_tx.try_send(input).is_err() {
                warn!("dropping checkpoint event, dispatch queue unavailable");
            }
        }));

        let started_tx = self.input_tx.clone();
        let started_sub = engine.on_conversation_started(Box::new(move || {
            if started_tx
                .try_send(MenuInput::Conversation(ConversationEvent::Started))
                .is_err()
            {
                warn!("dropping conversation-started event, dispatch queue unavailable");
            }
        }));

        self.subscriptions.push(checkpoint_sub);
        self.subscriptions.push(started_sub);

        self.gate.install(registry, Arc::clone(&engine));
        engine.start_conversation();
        self.engine = Some(engine);

        self.transition_to(MenuState::Active);
        info!(map_available, "menu session started");
        self.emit(SessionEvent::SessionStarted { map_available });
    }

    /// Tear one session down; every step is a no-op on absent handles
    fn handle_focus_lost(&mut self) {
        self.timer.cancel();
        for mut subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        self.gate.clear();
        self.engine = None;

        if self.state == MenuState::Active {
            self.transition_to(MenuState::Idle);
            info!("menu session ended");
            self.emit(SessionEvent::SessionEnded);
        }
    }

    fn handle_focus_refused(&mut self, reason: &str) {
        error!(reason, "focus refused");
        self.emit(SessionEvent::FocusRefused {
            reason: reason.to_string(),
        });
    }

    /// The script always opens by landing on the start checkpoint
    fn handle_conversation_started(&mut self) {
        if self.gate.try_go_to(CheckpointKind::Start) {
            self.emit(SessionEvent::NavigationIssued {
                target: CheckpointKind::Start,
            });
        }
    }

    fn handle_checkpoint_reached(&mut self, name: &str) {
        debug!(checkpoint = name, "checkpoint reached");
        self.emit(SessionEvent::CheckpointReached {
            name: name.to_string(),
        });

        let Some(kind) = CheckpointKind::from_name(name) else {
            debug!(checkpoint = name, "ignoring checkpoint the menu does not know");
            return;
        };

        match kind {
            CheckpointKind::Create => {
                self.ui.set_checked(MenuControl::CreateMap, true);
                self.disable_controls();
            }
            CheckpointKind::Map => {
                self.ui.set_checked(MenuControl::UseMap, true);
                self.disable_controls();
            }
            CheckpointKind::CreateEnd => self.launch_flow(FlowKind::Mapping),
            CheckpointKind::UseEnd => self.launch_flow(FlowKind::Localization),
            CheckpointKind::StartTimer => self.arm_idle_timer(),
            CheckpointKind::StopTimer => {
                self.timer.cancel();
                self.emit(SessionEvent::IdleTimerCancelled);
            }
            // reaching start or use carries no menu action of its own
            CheckpointKind::Start | CheckpointKind::Use => {}
        }
    }

    fn handle_ui_action(&mut self, action: UiAction) {
        debug!(?action, "ui action");
        match action {
            UiAction::ChooseCreate => self.choose(CheckpointKind::Create, FlowKind::Mapping),
            UiAction::ChooseUse => self.choose(CheckpointKind::Use, FlowKind::Localization),
            UiAction::Close => self.flows.terminate(),
        }
    }

    /// A UI choice mirrors the voice flow: disable the controls, let the
    /// conversation walk the confirmation branch, and fall back to the
    /// direct flow when the script cannot take us there.
    fn choose(&mut self, target: CheckpointKind, fallback: FlowKind) {
        self.disable_controls();
        if self.gate.try_go_to(target) {
            self.emit(SessionEvent::NavigationIssued { target });
        } else {
            self.emit(SessionEvent::NavigationFellBack { target });
            self.launch_flow(fallback);
        }
    }

    /// Arm the idle deadline once per session
    ///
    /// The latch makes repeated `start_timer` checkpoints a no-op, so
    /// duplicate timer-control events cannot arm two concurrent deadlines.
    fn arm_idle_timer(&mut self) {
        if !self.timer_armed {
            debug!("idle timer already used this session");
            return;
        }
        self.timer_armed = false;

        let gate = Arc::clone(&self.gate);
        let event_tx = self.event_tx.clone();
        let timeout = self.config.idle_timeout;

        self.timer.arm(timeout, move || {
            debug!("idle timeout elapsed, navigating back to start");
            let _ = event_tx.send(SessionEvent::IdleTimedOut);
            // a failed attempt means the script lost its start checkpoint;
            // nothing further happens
            gate.try_go_to(CheckpointKind::Start);
        });

        self.emit(SessionEvent::IdleTimerArmed {
            timeout_ms: timeout.as_millis() as u64,
        });
    }

    fn launch_flow(&mut self, flow: FlowKind) {
        info!(%flow, "handing off to flow");
        match flow {
            FlowKind::Mapping => self.flows.start_mapping(),
            FlowKind::Localization => self.flows.start_localization(),
        }
        self.emit(SessionEvent::FlowLaunched { flow });
    }

    fn disable_controls(&self) {
        self.ui.set_enabled(MenuControl::CreateMap, false);
        self.ui.set_enabled(MenuControl::UseMap, false);
    }

    fn transition_to(&mut self, new_state: MenuState) {
        if self.state != new_state {
            info!(from = %self.state, to = %new_state, "state transition");
            self.state = new_state;
        }
    }

    fn emit(&self, event: SessionEvent) {
        debug!(?event, "emitting session event");
        let _ = self.event_tx.send(event);
    }
}
