//! TUI module - Terminal dashboard with ratatui

pub mod route;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::Config;
use crate::db::{Database, WorkoutLog};
use crate::program::{DayId, exercises_by_day, find_day, program};
use crate::session::Session;
use crate::stats::WorkoutStats;
use crate::tracker::{CompletionSignal, ExerciseCard, TimerState, TrackerEvent};

pub use route::Route;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const RECENT_LOGS: usize = 5;

/// App state for TUI
pub struct App {
    db: Database,
    config: Config,
    session: Session,
    today: NaiveDate,
    route: Route,
    cards: Vec<ExerciseCard>,
    selected: usize,
    logs: Vec<WorkoutLog>,
    stats: WorkoutStats,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database, config: Config, session: Session) -> Result<Self> {
        let today = Local::now().date_naive();
        let mut app = Self {
            db,
            config,
            session,
            today,
            route: Route::Overview,
            cards: Vec::new(),
            selected: 0,
            logs: Vec::new(),
            stats: WorkoutStats::default(),
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switch view by path; day views get fresh exercise cards
    pub fn navigate(&mut self, path: &str) -> Result<()> {
        self.today = Local::now().date_naive();
        self.route = Route::parse(path);
        self.selected = 0;
        self.cards.clear();

        if let Route::Day(day) = self.route {
            for exercise in find_day(day).exercises {
                let signal = CompletionSignal::from_config(&self.config);
                self.cards.push(ExerciseCard::load(&self.db, exercise, self.today, signal)?);
            }
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.today = Local::now().date_naive();
        self.logs = self.db.get_logs()?;
        self.stats = self.db.stats(self.today)?;
        Ok(())
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
            self.advance(Instant::now());
        }
        Ok(())
    }

    /// Let every card catch up to `now` on its own clock
    fn advance(&mut self, now: Instant) {
        for card in &mut self.cards {
            for event in card.advance(now) {
                if event == TrackerEvent::TimerCompleted {
                    debug!("Rest over for {}", card.exercise().name);
                }
            }
        }
    }

    /// Message of the first card still celebrating
    fn celebration(&self) -> Option<String> {
        self.cards
            .iter()
            .find(|c| c.sets().is_celebrating())
            .map(|c| format!("All {} sets of {} complete. Great work!", c.exercise().sets, c.exercise().name))
    }

    /// Message of the first card whose rest just ended
    fn status(&self) -> Option<String> {
        self.cards
            .iter()
            .find(|c| c.timer().state() == TimerState::Complete)
            .map(|c| format!("Rest over: {}, next set!", c.exercise().name))
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let user = match self.session.user() {
            Some(u) => u.name.clone(),
            None => "not signed in".to_string(),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("3DaysFit", Style::default().fg(Color::Cyan).bold()),
            Span::raw(format!("  {}  ", self.route)),
            Span::styled(user, Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        match self.route {
            Route::Overview => self.render_overview(frame, chunks[1]),
            Route::Day(day) => self.render_day(frame, chunks[1], day),
            Route::LogWorkout => self.render_logs(frame, chunks[1]),
            Route::NotFound => {
                let text = Paragraph::new("404 Page Not Found\n\nPress o to go back to the overview.")
                    .style(Style::default().fg(Color::Red))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(text, chunks[1]);
            }
        }

        // Footer
        let keys = match self.route {
            Route::Day(_) => "j/k: select | s: start | p: pause | x: reset | c: set done | u: undo | i: info | o: overview | q: quit",
            _ => "1/2/3: days | l: log | o: overview | r: refresh | q: quit",
        };
        let celebration = self.celebration();
        let footer_style = if celebration.is_some() {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let footer_text = celebration
            .or_else(|| self.status())
            .unwrap_or_else(|| keys.to_string());
        let footer = Paragraph::new(footer_text)
            .style(footer_style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn stats_line(&self) -> Line<'static> {
        Line::from(format!(
            "Total: {}   Streak: {} day(s)   Weekly avg: {:.1}",
            self.stats.total_workouts, self.stats.current_streak, self.stats.avg_weekly
        ))
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = program()
            .iter()
            .enumerate()
            .map(|(i, day)| {
                Row::new(vec![
                    Cell::from(format!("{}", i + 1)),
                    Cell::from(day.name),
                    Cell::from(day.description),
                    Cell::from(format!("{} exercises", day.exercises.len())),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(24),
                Constraint::Min(30),
                Constraint::Length(12),
            ],
        )
        .header(Row::new(vec!["#", "Day", "Focus", ""]).style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(self.stats_line()));

        frame.render_widget(table, area);
    }

    fn render_day(&self, frame: &mut Frame, area: Rect, day: DayId) {
        let workout = find_day(day);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(workout.warmup.len() as u16 + 2),
                Constraint::Min(6),
                Constraint::Length(8),
            ])
            .split(area);

        let warmup: Vec<Line> = workout.warmup
            .iter()
            .map(|w| Line::from(vec![
                Span::styled(format!("{}: ", w.name), Style::default().bold()),
                Span::raw(w.description),
            ]))
            .collect();
        frame.render_widget(
            Paragraph::new(warmup).block(Block::default().borders(Borders::ALL).title("Warm-up")),
            chunks[0],
        );

        let rows: Vec<Row> = self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let ex = card.exercise();
                let checks: String = card.sets()
                    .sets()
                    .iter()
                    .map(|s| if s.is_complete { '■' } else { '□' })
                    .collect();
                let timer = card.timer();
                let timer_text = match timer.state() {
                    TimerState::Idle => format!("rest {}", timer.display()),
                    TimerState::Running => format!("▶ {}", timer.display()),
                    TimerState::Paused => format!("⏸ {}", timer.display()),
                    TimerState::Complete => "done!".to_string(),
                };

                let mut style = Style::default();
                if card.sets().is_done() {
                    style = style.fg(Color::Green);
                }
                if i == self.selected {
                    style = style.bg(Color::DarkGray);
                }

                Row::new(vec![
                    Cell::from(format!("{}. {}", i + 1, ex.name)),
                    Cell::from(ex.primary_muscles),
                    Cell::from(format!("{} {}/{}", checks, card.sets().completed_count(), ex.sets)),
                    Cell::from(ex.reps),
                    Cell::from(timer_text),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(26),
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Length(10),
            ],
        )
        .header(Row::new(vec!["Exercise", "Muscles", "Sets", "Reps", "Timer"]).style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(workout.name));
        frame.render_widget(table, chunks[1]);

        let details = match self.cards.get(self.selected) {
            Some(card) if card.show_instructions => {
                let ex = card.exercise();
                let mut lines: Vec<Line> = ex.instructions
                    .iter()
                    .enumerate()
                    .map(|(i, step)| Line::from(format!("{}. {}", i + 1, step)))
                    .collect();
                if let Some(link) = ex.details {
                    lines.push(Line::from(Span::styled(link, Style::default().fg(Color::Blue))));
                }
                lines
            }
            Some(card) => {
                let ex = card.exercise();
                vec![Line::from(format!(
                    "Primary: {}{}   Rest: {}   (i: instructions)",
                    ex.primary_muscles,
                    ex.secondary_muscles.map(|s| format!(", Secondary: {}", s)).unwrap_or_default(),
                    ex.rest
                ))]
            }
            None => Vec::new(),
        };
        frame.render_widget(
            Paragraph::new(details)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Details")),
            chunks[2],
        );
    }

    fn render_logs(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(8)])
            .split(area);

        let rows: Vec<Row> = self.logs
            .iter()
            .rev()
            .take(RECENT_LOGS)
            .map(|l| {
                Row::new(vec![
                    Cell::from(l.date.format("%Y-%m-%d").to_string()),
                    Cell::from(l.exercise.clone()),
                    Cell::from(format!("{}x{} @ {}", l.sets, l.reps, l.weight)),
                    Cell::from(l.day.label()),
                    Cell::from(l.notes.clone().unwrap_or_default()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(26),
                Constraint::Length(14),
                Constraint::Length(14),
                Constraint::Min(10),
            ],
        )
        .header(Row::new(vec!["Date", "Exercise", "Sets x Reps", "Day", "Notes"]).style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(self.stats_line()));
        frame.render_widget(table, chunks[0]);

        // Exercises accepted by `threedaysfit log --day <day>`
        let choices: Vec<Line> = DayId::all()
            .iter()
            .map(|day| Line::from(vec![
                Span::styled(format!("{:6} ", day), Style::default().bold()),
                Span::raw(exercises_by_day(*day).join(", ")),
            ]))
            .collect();
        frame.render_widget(
            Paragraph::new(choices)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Exercises")),
            chunks[1],
        );
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code)?;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('o') => self.navigate("/")?,
            KeyCode::Char('l') => {
                self.refresh()?;
                self.navigate("/log-workout")?;
            }
            KeyCode::Char('r') => self.refresh()?,
            KeyCode::Char(c @ '1'..='3') if !matches!(self.route, Route::Day(_)) => {
                let day = DayId::all()[c as usize - '1' as usize];
                self.navigate(find_day(day).url)?;
            }
            _ => self.handle_card_key(code)?,
        }
        Ok(())
    }

    fn handle_card_key(&mut self, code: KeyCode) -> Result<()> {
        let count = self.cards.len();
        let Some(card) = self.cards.get_mut(self.selected) else {
            return Ok(());
        };

        match code {
            KeyCode::Char('j') | KeyCode::Down => self.selected = (self.selected + 1) % count,
            KeyCode::Char('k') | KeyCode::Up => self.selected = (self.selected + count - 1) % count,
            KeyCode::Char('s') => card.start_timer(),
            KeyCode::Char('p') => {
                card.toggle_pause();
            }
            KeyCode::Char('x') => card.reset_timer(),
            KeyCode::Char('i') => card.show_instructions = !card.show_instructions,
            KeyCode::Char('c') => {
                card.complete_next(&self.db)?;
            }
            KeyCode::Char('u') => card.undo_last(&self.db)?,
            _ => {}
        }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Database::open_in_memory().unwrap(), Config::default(), Session::anonymous()).unwrap()
    }

    #[test]
    fn test_navigation_builds_cards() {
        let mut app = app();
        assert_eq!(app.route(), Route::Overview);

        app.handle_key(KeyCode::Char('2')).unwrap();
        assert_eq!(app.route(), Route::Day(DayId::Back));
        assert_eq!(app.cards.len(), 4);

        app.navigate("/nowhere").unwrap();
        assert_eq!(app.route(), Route::NotFound);
        assert!(app.cards.is_empty());
    }

    #[test]
    fn test_card_keys() {
        let mut app = app();
        app.navigate("/upper").unwrap();

        app.handle_key(KeyCode::Char('j')).unwrap();
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Char('k')).unwrap();
        app.handle_key(KeyCode::Char('k')).unwrap();
        assert_eq!(app.selected, 3);

        app.handle_key(KeyCode::Char('s')).unwrap();
        assert_eq!(app.cards[3].timer().state(), TimerState::Running);

        for _ in 0..3 {
            app.handle_key(KeyCode::Char('c')).unwrap();
        }
        let done = Instant::now();
        assert!(app.celebration().unwrap().contains("Dumbbell Curls"));
        let stored = app.db.today_sets(app.today, "Dumbbell Curls").unwrap();
        assert_eq!(stored.iter().filter(|s| s.is_complete).count(), 3);

        app.advance(done + Duration::from_secs(3));
        assert!(app.celebration().is_none());
    }

    #[test]
    fn test_first_second_counts_from_start() {
        let mut app = app();
        app.navigate("/upper").unwrap();

        // Card built a while before the timer starts
        let built = Instant::now();
        app.advance(built + Duration::from_millis(900));
        app.handle_key(KeyCode::Char('s')).unwrap();
        let started = Instant::now();

        app.advance(started + Duration::from_millis(150));
        assert_eq!(app.cards[0].timer().remaining(), 90);
        app.advance(started + Duration::from_secs(1));
        assert_eq!(app.cards[0].timer().remaining(), 89);
    }

    #[test]
    fn test_overlapping_celebrations_clear_independently() {
        let mut app = app();
        app.navigate("/back").unwrap();

        for _ in 0..app.cards[0].exercise().sets {
            app.handle_key(KeyCode::Char('c')).unwrap();
        }
        let first = Instant::now();
        app.advance(first + Duration::from_secs(2));

        app.handle_key(KeyCode::Char('j')).unwrap();
        for _ in 0..app.cards[1].exercise().sets {
            app.handle_key(KeyCode::Char('c')).unwrap();
        }
        let second = Instant::now();
        let second_name = app.cards[1].exercise().name;

        // The first card's celebration ends; the second one keeps showing
        app.advance(first + Duration::from_secs(3));
        assert!(!app.cards[0].sets().is_celebrating());
        assert!(app.celebration().unwrap().contains(second_name));

        app.advance(second + Duration::from_secs(3));
        assert!(app.celebration().is_none());
    }

    #[test]
    fn test_rest_over_message_per_card() {
        let mut app = app();
        app.navigate("/upper").unwrap();
        app.handle_key(KeyCode::Char('s')).unwrap();
        let started = Instant::now();

        app.advance(started + Duration::from_secs(90));
        assert!(app.status().unwrap().contains(app.cards[0].exercise().name));
        app.advance(started + Duration::from_secs(93));
        assert!(app.status().is_none());
    }

    #[test]
    fn test_navigate_refreshes_date() {
        let mut app = app();
        app.today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        app.navigate("/legs").unwrap();
        assert_eq!(app.today, Local::now().date_naive());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q')).unwrap();
        assert!(app.should_quit);
    }
}
