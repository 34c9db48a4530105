use std::{
    sync::mpsc::{self, RecvError, TryRecvError},
    thread,
};

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
};
use tilewise_engine::{GameSession, SessionState};
use tilewise_evaluator::{search::SearchResult, session_runner::SessionRunner};

use crate::{schema::agent_config::AgentConfig, view::widgets::SessionDisplay};

/// Watches the agent play; the search runs on a worker thread so the screen stays responsive.
#[derive(Debug)]
pub struct AutoPlayScreen {
    snapshot: Snapshot,
    description: String,
    turbo: bool,
    is_exiting: bool,
    tx: mpsc::Sender<Request>,
    rx: mpsc::Receiver<Snapshot>,
}

impl AutoPlayScreen {
    pub fn new(config: &AgentConfig, turbo: bool) -> Self {
        let session = config
            .seed
            .map_or_else(GameSession::new, GameSession::with_seed);
        let snapshot = Snapshot {
            session,
            last_search: None,
        };
        let auto_play = AutoPlay {
            snapshot: snapshot.clone(),
            runner: config.session_runner(),
        };
        let (tx_request, rx_request) = mpsc::channel();
        let (tx_snapshot, rx_snapshot) = mpsc::channel();
        thread::spawn(move || ai_thread(auto_play, &tx_snapshot, &rx_request));
        Self {
            snapshot,
            description: describe(config),
            turbo,
            is_exiting: false,
            tx: tx_request,
            rx: rx_snapshot,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    fn session(&self) -> &GameSession {
        &self.snapshot.session
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(self.session()).turbo(self.turbo);
        let last_move = match &self.snapshot.last_search {
            Some(SearchResult {
                direction: Some(direction),
                value,
                stats,
            }) => format!(
                "Last move: {} {direction} (value {value:.1}, {} nodes)",
                direction.arrow(),
                stats.nodes
            ),
            Some(_) => "Last move: none".to_owned(),
            None => "Last move: -".to_owned(),
        };
        let turbo_text = if self.turbo {
            "t (Turbo: ON)"
        } else {
            "t (Turbo: OFF)"
        };
        let help_text = match self.session().session_state() {
            SessionState::Playing => format!("Controls: {turbo_text} | p (Pause) | q (Quit)"),
            SessionState::Paused => "Controls: p (Resume) | q (Quit)".to_owned(),
            SessionState::GameOver => "Controls: q (Quit)".to_owned(),
        };
        let dim = Style::default().fg(Color::DarkGray);

        let [main_area, info_area, help_area] = Layout::vertical([
            Constraint::Length(18),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(
            Text::from(vec![Line::from(self.description.as_str()), Line::from(last_move)])
                .style(dim)
                .centered(),
            info_area,
        );
        frame.render_widget(Text::from(help_text).style(dim).centered(), help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        let state = self.session().session_state();
        match key.code {
            KeyCode::Char('t') if state.is_playing() => self.turbo = !self.turbo,
            KeyCode::Char('p') if !state.is_game_over() => self.request(Request::TogglePause),
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    /// Asks the worker for the next move (or, in turbo mode, everything since the last tick).
    pub fn update(&mut self) {
        if !self.session().session_state().is_playing() {
            return;
        }
        let req = if self.turbo {
            Request::TurboRun
        } else {
            Request::Run
        };
        self.request(req);
    }

    fn request(&mut self, req: Request) {
        let received = self
            .tx
            .send(req)
            .ok()
            .and_then(|()| self.rx.recv().ok());
        match received {
            Some(snapshot) => self.snapshot = snapshot,
            None => {
                log::error!("search worker stopped unexpectedly");
                self.is_exiting = true;
            }
        }
    }
}

fn describe(config: &AgentConfig) -> String {
    let depth = if config.variable_depth {
        format!("depth {}..={}", config.min_depth, config.max_depth)
    } else {
        format!("depth {}", config.depth)
    };
    format!("Agent: {} | {depth}", config.algorithm)
}

#[derive(Debug, Clone, Copy)]
enum Request {
    TogglePause,
    Run,
    TurboRun,
}

#[derive(Debug, Clone)]
struct Snapshot {
    session: GameSession,
    last_search: Option<SearchResult>,
}

/// Answers each request with exactly one snapshot.
///
/// After a turbo request the worker keeps moving until the next request arrives.
fn ai_thread(mut auto_play: AutoPlay, tx: &mpsc::Sender<Snapshot>, rx: &mpsc::Receiver<Request>) {
    let Ok(mut req) = rx.recv() else {
        return;
    };

    loop {
        match req {
            Request::TogglePause => auto_play.snapshot.session.toggle_pause(),
            Request::Run | Request::TurboRun => auto_play.step(),
        }
        if tx.send(auto_play.snapshot.clone()).is_err() {
            return;
        }

        req = match req {
            Request::TurboRun => loop {
                if !auto_play.is_playing() {
                    match rx.recv() {
                        Ok(r) => break r,
                        Err(RecvError) => return,
                    }
                }
                match rx.try_recv() {
                    Ok(r) => break r,
                    Err(TryRecvError::Disconnected) => return,
                    Err(TryRecvError::Empty) => auto_play.step(),
                }
            },
            Request::TogglePause | Request::Run => match rx.recv() {
                Ok(r) => r,
                Err(RecvError) => return,
            },
        };
    }
}

#[derive(Debug)]
struct AutoPlay {
    snapshot: Snapshot,
    runner: SessionRunner<'static>,
}

impl AutoPlay {
    fn is_playing(&self) -> bool {
        self.snapshot.session.session_state().is_playing()
    }

    fn step(&mut self) {
        if !self.is_playing() {
            return;
        }
        let session = &mut self.snapshot.session;
        let result = self.runner.next_move(session.board());
        if let Some(direction) = result.direction
            && let Err(e) = session.try_move(direction)
        {
            log::warn!("search chose {direction} but the move was rejected: {e}");
        }
        self.snapshot.last_search = Some(result);
    }
}
