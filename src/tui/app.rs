//! TUI Application logic and event handling.

use super::ui;
use crate::animation::{AnimationConfig, CounterState};
use crate::dashboard::DashboardSnapshot;
use crate::metrics::MetricEntry;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Configuration for the dashboard
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Server URL to fetch the snapshot from
    pub server_url: String,
    /// Snapshot refresh interval in milliseconds
    pub refresh_ms: u64,
    /// Card animation timing
    pub animation: AnimationConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8501".to_string(),
            refresh_ms: 5000,
            animation: AnimationConfig::default(),
        }
    }
}

/// Application state for the dashboard
pub struct App {
    /// Latest snapshot
    pub snapshot: Option<DashboardSnapshot>,
    /// Last error message
    pub error: Option<String>,
    /// Count-up state per card
    pub counters: Vec<CounterState>,
    /// Text currently shown on each card
    pub displays: Vec<String>,
    /// Whether to exit
    pub should_quit: bool,
    /// Server URL
    pub server_url: String,
    /// Animation step divisor
    pub steps: u64,
}

impl App {
    pub fn new(server_url: String, steps: u64) -> Self {
        Self {
            snapshot: None,
            error: None,
            counters: Vec::new(),
            displays: Vec::new(),
            should_quit: false,
            server_url,
            steps,
        }
    }

    /// Fetch the snapshot from the server
    pub async fn update_snapshot(&mut self) {
        let url = format!("{}/api/dashboard", self.server_url);

        match reqwest::get(&url).await {
            Ok(response) if !response.status().is_success() => {
                self.error = Some(format!("Server returned {}", response.status()));
            }
            Ok(response) => match response.json::<DashboardSnapshot>().await {
                Ok(snapshot) => self.apply_snapshot(snapshot),
                Err(e) => {
                    self.error = Some(format!("Failed to parse snapshot: {}", e));
                }
            },
            Err(e) => {
                self.error = Some(format!("Failed to connect: {}", e));
            }
        }
    }

    /// Install a snapshot. Cards restart their animation only when their
    /// values changed.
    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        let changed = self
            .snapshot
            .as_ref()
            .map(|s| s.metrics != snapshot.metrics)
            .unwrap_or(true);

        if changed {
            self.reset_counters(&snapshot.metrics);
        }
        self.snapshot = Some(snapshot);
        self.error = None;
    }

    /// Restart every card from its baseline
    pub fn restart_animation(&mut self) {
        if let Some(metrics) = self.snapshot.as_ref().map(|s| s.metrics.clone()) {
            self.reset_counters(&metrics);
        }
    }

    fn reset_counters(&mut self, metrics: &[MetricEntry]) {
        self.counters = metrics
            .iter()
            .map(|m| CounterState::new(&m.value, self.steps))
            .collect();
        self.displays = self.counters.iter().map(|c| c.display()).collect();
    }

    /// Advance the first unfinished card by one frame, so cards count up
    /// left to right. Text cards settle without consuming a tick.
    pub fn animate(&mut self) {
        for (index, counter) in self.counters.iter_mut().enumerate() {
            if counter.is_finished() {
                continue;
            }
            if let Some(display) = counter.tick() {
                self.displays[index] = display;
            }
            if counter.is_animated() {
                return;
            }
        }
    }

    pub fn animation_finished(&self) -> bool {
        self.counters.iter().all(|c| c.is_finished())
    }
}

/// Run the TUI dashboard
pub async fn run_dashboard(config: DashboardConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.server_url, config.animation.steps);
    let tick_rate = config.animation.tick.max(Duration::from_millis(1));
    let refresh_rate = Duration::from_millis(config.refresh_ms);
    let mut last_tick = Instant::now();
    let mut last_refresh = Instant::now();

    // Initial fetch
    app.update_snapshot().await;

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // Handle events with timeout
        let timeout = tick_rate
            .saturating_sub(last_tick.elapsed())
            .min(refresh_rate.saturating_sub(last_refresh.elapsed()));
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Char('r') => {
                            app.update_snapshot().await;
                            app.restart_animation();
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            app.animate();
            last_tick = Instant::now();
        }

        if last_refresh.elapsed() >= refresh_rate {
            app.update_snapshot().await;
            last_refresh = Instant::now();
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
