use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::Datelike;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::io::gateway::{SuggestError, SuggestionGateway};
use crate::io::gemini::GeminiGateway;
use crate::model::{AppConfig, Field, SuggestionBatch, Thumb, ValidationErrors};
use crate::ops::search_link::search_url;
use crate::ops::session::{Completion, RequestTicket, Session, SubmitError, SwipeOutcome, View};

use super::gesture::{CardGesture, SwipeDirection};
use super::input;
use super::render;
use super::slider::{BudgetDrag, SliderGeometry};
use super::theme::Theme;

/// Frame interval; also drives the spinner and the card exit animation
const TICK: Duration = Duration::from_millis(60);

/// Result of a gateway call, tagged with its request generation
pub type Delivery = (u64, Result<SuggestionBatch, SuggestError>);

/// Focusable controls on the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Characteristic(usize),
    Gender,
    BirthYear,
    Location,
    Budget,
    Occasion,
    Submit,
}

impl FormFocus {
    /// The validated field this control edits, if any
    pub fn field(self) -> Option<Field> {
        match self {
            FormFocus::Characteristic(i) => Some(Field::Characteristic(i)),
            FormFocus::BirthYear => Some(Field::BirthYear),
            FormFocus::Location => Some(Field::Location),
            FormFocus::Budget => Some(Field::Budget),
            FormFocus::Gender | FormFocus::Occasion | FormFocus::Submit => None,
        }
    }

    /// Controls that take free text (where `q` and `?` are typed, not commands)
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormFocus::Characteristic(_)
                | FormFocus::BirthYear
                | FormFocus::Location
                | FormFocus::Occasion
        )
    }

    fn from_field(field: Field) -> FormFocus {
        match field {
            Field::Characteristic(i) => FormFocus::Characteristic(i),
            Field::BirthYear => FormFocus::BirthYear,
            Field::Location => FormFocus::Location,
            Field::Budget => FormFocus::Budget,
        }
    }
}

/// Main application state
pub struct App {
    pub session: Session,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub should_quit: bool,
    pub show_help: bool,
    pub current_year: i32,
    /// Form: focused control
    pub focus: FormFocus,
    /// Form: thumb moved by ←/→ on the budget row
    pub active_thumb: Thumb,
    /// Form: messages from the last failed submit
    pub form_errors: ValidationErrors,
    /// Suggestions: drag / exit animation of the top card
    pub gesture: CardGesture,
    /// Form: budget thumb being dragged with the mouse
    pub budget_drag: Option<BudgetDrag>,
    /// Set by the renderer so mouse events can be hit-tested
    pub slider_geometry: Option<SliderGeometry>,
    pub card_area: Option<Rect>,
    /// Favourites: selected row
    pub favourites_cursor: usize,
    /// Animation frame counter for the spinner
    pub spinner_frame: usize,
    /// One-shot message for the status row, cleared by the next key
    pub status_message: Option<String>,
    /// Opens a URL in the user's browser
    pub opener: fn(&str) -> io::Result<()>,
    /// Submitted request waiting to be handed to the runtime
    pending_request: Option<RequestTicket>,
}

impl App {
    pub fn new(theme: Theme, show_key_hints: bool, current_year: i32) -> Self {
        App {
            session: Session::new(),
            theme,
            show_key_hints,
            should_quit: false,
            show_help: false,
            current_year,
            focus: FormFocus::Characteristic(0),
            active_thumb: Thumb::Min,
            form_errors: ValidationErrors::default(),
            gesture: CardGesture::Idle,
            budget_drag: None,
            slider_geometry: None,
            card_area: None,
            favourites_cursor: 0,
            spinner_frame: 0,
            status_message: None,
            opener: open_in_browser,
            pending_request: None,
        }
    }

    pub fn view(&self) -> View {
        self.session.view()
    }

    /// Form controls in tab order
    pub fn focus_order(&self) -> Vec<FormFocus> {
        let mut order: Vec<FormFocus> = (0..self.session.draft().characteristics.len())
            .map(FormFocus::Characteristic)
            .collect();
        order.extend([
            FormFocus::Gender,
            FormFocus::BirthYear,
            FormFocus::Location,
            FormFocus::Budget,
            FormFocus::Occasion,
            FormFocus::Submit,
        ]);
        order
    }

    fn move_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let len = order.len() as isize;
        self.set_focus(order[(idx + delta).rem_euclid(len) as usize]);
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    pub fn set_focus(&mut self, focus: FormFocus) {
        if focus != self.focus {
            self.release_drag();
        }
        self.focus = focus;
    }

    /// End any budget drag. Called on mouse-up and on every way out of the form.
    pub fn release_drag(&mut self) {
        if self.budget_drag.take().is_some() {
            debug!("budget drag released");
        }
    }

    /// Text of the focused text control
    pub fn focused_text(&self) -> Option<&str> {
        let draft = self.session.draft();
        match self.focus {
            FormFocus::Characteristic(i) => draft.characteristics.get(i).map(String::as_str),
            FormFocus::BirthYear => Some(&draft.birth_year),
            FormFocus::Location => Some(&draft.location),
            FormFocus::Occasion => Some(&draft.occasion),
            _ => None,
        }
    }

    /// Replace the focused text control's content. Edits that break the
    /// field's input rules (length, digits-only year) are refused.
    pub fn set_focused_text(&mut self, value: String) -> bool {
        let focus = self.focus;
        let draft = self.session.draft_mut();
        let accepted = match focus {
            FormFocus::Characteristic(i) => draft.set_characteristic(i, value),
            FormFocus::BirthYear => {
                if value.len() > 4 || !value.chars().all(|c| c.is_ascii_digit()) {
                    false
                } else {
                    draft.birth_year = value;
                    true
                }
            }
            FormFocus::Location => {
                draft.location = value;
                true
            }
            FormFocus::Occasion => {
                draft.occasion = value;
                true
            }
            _ => false,
        };
        if accepted {
            self.clear_error(focus);
        }
        accepted
    }

    /// Editing a field clears its inline message
    pub fn clear_error(&mut self, focus: FormFocus) {
        if let Some(field) = focus.field() {
            self.form_errors.remove(field);
        }
    }

    pub fn cycle_gender(&mut self, forward: bool) {
        let draft = self.session.draft_mut();
        draft.gender = if forward {
            draft.gender.next()
        } else {
            draft.gender.prev()
        };
    }

    /// Move the active budget thumb by whole steps
    pub fn step_budget(&mut self, steps: i32) {
        let draft = self.session.draft_mut();
        draft.budget = draft.budget.step(self.active_thumb, steps);
        self.clear_error(FormFocus::Budget);
    }

    pub fn add_characteristic(&mut self) {
        if self.session.draft_mut().add_characteristic() {
            let last = self.session.draft().characteristics.len() - 1;
            self.set_focus(FormFocus::Characteristic(last));
        }
    }

    /// Remove the focused characteristic slot (extra slots only)
    pub fn remove_characteristic(&mut self) {
        let FormFocus::Characteristic(i) = self.focus else {
            return;
        };
        if !self.session.draft_mut().remove_characteristic(i) {
            return;
        }
        // Indices shifted; drop the stale per-slot messages
        let stale: Vec<Field> = self
            .form_errors
            .iter()
            .map(|(f, _)| f)
            .filter(|f| matches!(f, Field::Characteristic(_)))
            .collect();
        for field in stale {
            self.form_errors.remove(field);
        }
        let remaining = self.session.draft().characteristics.len();
        self.set_focus(FormFocus::Characteristic(i.min(remaining - 1)));
    }

    pub fn begin_budget_drag(&mut self, column: u16, row: u16) -> bool {
        let Some(geometry) = self.slider_geometry else {
            return false;
        };
        if !geometry.contains(column, row) {
            return false;
        }
        self.set_focus(FormFocus::Budget);
        let budget = self.session.draft().budget;
        let (drag, updated) = BudgetDrag::start(&geometry, column, budget);
        self.active_thumb = drag.thumb;
        self.session.draft_mut().budget = updated;
        self.budget_drag = Some(drag);
        self.clear_error(FormFocus::Budget);
        true
    }

    pub fn update_budget_drag(&mut self, column: u16) {
        let (Some(drag), Some(geometry)) = (self.budget_drag, self.slider_geometry) else {
            return;
        };
        let budget = self.session.draft().budget;
        self.session.draft_mut().budget = drag.update(&geometry, column, budget);
    }

    /// Submit the form; on success the request is queued for the runtime
    pub fn submit(&mut self) {
        self.release_drag();
        match self.session.submit(self.current_year) {
            Ok(ticket) => {
                self.form_errors = ValidationErrors::default();
                self.gesture.cancel();
                self.spinner_frame = 0;
                self.pending_request = Some(ticket);
            }
            Err(SubmitError::Invalid(errors)) => {
                if let Some((field, _)) = errors.iter().next() {
                    self.focus = FormFocus::from_field(field);
                }
                self.form_errors = errors;
            }
            Err(SubmitError::NotOnForm) => {}
        }
    }

    /// Hand over the request submitted since the last call
    pub fn take_pending_request(&mut self) -> Option<RequestTicket> {
        self.pending_request.take()
    }

    /// A gateway result arrived
    pub fn deliver(&mut self, generation: u64, result: Result<SuggestionBatch, SuggestError>) {
        if self.session.complete(generation, result) == Completion::Showing {
            self.gesture.cancel();
            self.card_area = None;
        }
    }

    pub fn cancel(&mut self) {
        self.back_to_form();
    }

    pub fn back_to_form(&mut self) {
        self.release_drag();
        self.gesture.cancel();
        self.pending_request = None;
        self.session.back_to_form();
    }

    pub fn show_favourites(&mut self) {
        self.release_drag();
        self.gesture.cancel();
        self.pending_request = None;
        self.session.show_favourites();
        self.clamp_favourites_cursor();
    }

    /// Start a keyboard swipe on the top card
    pub fn swipe(&mut self, direction: SwipeDirection) {
        if let Some(head) = self.session.queue().head() {
            let id = head.id;
            self.gesture.fling(id, direction);
        }
    }

    pub fn end_card_drag(&mut self) {
        match self.session.queue().head() {
            Some(head) => {
                let id = head.id;
                self.gesture.release(id);
            }
            None => self.gesture.cancel(),
        }
    }

    /// Advance animations; a finished swipe is applied to the session here
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        let Some((id, direction)) = self.gesture.tick() else {
            return;
        };
        let outcome = self.session.decide(id, direction.decision());
        if outcome == SwipeOutcome::Exhausted {
            self.clamp_favourites_cursor();
        }
    }

    pub fn move_favourites_cursor(&mut self, delta: isize) {
        let len = self.session.favourites().len();
        if len == 0 {
            self.favourites_cursor = 0;
            return;
        }
        let next = (self.favourites_cursor as isize + delta).clamp(0, len as isize - 1);
        self.favourites_cursor = next as usize;
    }

    pub fn unfavourite_selected(&mut self) {
        let Some(id) = self
            .session
            .favourites()
            .get_index(self.favourites_cursor)
            .map(|s| s.id)
        else {
            return;
        };
        self.session.unfavourite(id);
        self.clamp_favourites_cursor();
    }

    /// Open a web search for the selected favourite
    pub fn open_selected_search(&mut self) {
        let Some(name) = self
            .session
            .favourites()
            .get_index(self.favourites_cursor)
            .map(|s| s.name.clone())
        else {
            return;
        };
        let url = search_url(&name);
        self.status_message = Some(match (self.opener)(&url) {
            Ok(()) => {
                info!(%url, "opened gift search");
                format!("Opened a search for {}", name)
            }
            Err(e) => {
                warn!(%url, error = %e, "could not open browser");
                format!("Could not open a browser; search at {}", url)
            }
        });
    }

    fn clamp_favourites_cursor(&mut self) {
        let len = self.session.favourites().len();
        self.favourites_cursor = self.favourites_cursor.min(len.saturating_sub(1));
    }
}

fn open_in_browser(url: &str) -> io::Result<()> {
    open::that_detached(url)
}

/// Run the TUI application
pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let gateway: Arc<dyn SuggestionGateway> = Arc::new(GeminiGateway::from_config(&config.api)?);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let theme = Theme::from_config(&config.ui);
    let mut app = App::new(theme, config.ui.show_key_hints, chrono::Local::now().year());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    info!("TUI started");
    let (tx, rx) = mpsc::channel();
    let result = run_event_loop(&mut terminal, &mut app, &runtime, &gateway, &tx, &rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // An in-flight request is abandoned rather than awaited
    runtime.shutdown_background();
    info!("TUI stopped");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &tokio::runtime::Runtime,
    gateway: &Arc<dyn SuggestionGateway>,
    tx: &Sender<Delivery>,
    rx: &Receiver<Delivery>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if let Some(ticket) = app.take_pending_request() {
            let gateway = Arc::clone(gateway);
            let tx = tx.clone();
            runtime.spawn(async move {
                let result = gateway.suggest(&ticket.profile).await;
                // The receiver is gone only when the app is shutting down
                let _ = tx.send((ticket.generation, result));
            });
        }

        while let Ok((generation, result)) = rx.try_recv() {
            app.deliver(generation, result);
        }

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
