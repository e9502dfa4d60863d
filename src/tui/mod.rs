//! Ratatui-based calculator panel.
//!
//! The panel holds the annual inflation assumption used by the retirement
//! calculator and lets the user replace it with a fetched figure: the Focus
//! median, the realized trailing 12 months, or the 5y/10y averages of the
//! selected index. Fetches run on worker threads; the UI thread never blocks.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::api::ApiService;
use crate::cli::TuiArgs;
use crate::data::HistoricalRequest;
use crate::data::sgs::HistoricalSeries;
use crate::domain::{ForecastMedian, Horizon, InflationIndex, PeriodKeyword};
use crate::error::AppError;
use crate::math::{monthly_from_annual_pct, nominal_from_real_pct};
use crate::report::{fmt_annual_br, fmt_number_br};

mod plotters_chart;
mod requests;

use plotters_chart::SeriesChart;
use requests::{RequestTracker, Ticket};

/// Step for the arrow-key nudges, in percentage points.
const NUDGE: f64 = 0.1;

/// Start the TUI.
pub fn run(service: Arc<ApiService>, args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::internal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(service, &args);
    let result = app.event_loop(&mut terminal);
    app.shutdown();
    result
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::internal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::internal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Whether the calculator works in today's money or in nominal terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceMode {
    Real,
    Nominal,
}

impl PriceMode {
    fn toggle(self) -> Self {
        match self {
            PriceMode::Real => PriceMode::Nominal,
            PriceMode::Nominal => PriceMode::Real,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PriceMode::Real => "real",
            PriceMode::Nominal => "nominal",
        }
    }
}

enum Payload {
    History(Result<HistoricalSeries, AppError>),
    Focus(Result<ForecastMedian, AppError>),
}

struct FetchMessage {
    ticket: Ticket,
    payload: Payload,
}

struct App {
    service: Arc<ApiService>,
    index: InflationIndex,
    inflation_annual: f64,
    real_return: f64,
    mode: PriceMode,

    history: Option<HistoricalSeries>,
    history_loading: bool,
    history_error: Option<String>,

    focus_loading: bool,
    focus_error: Option<String>,
    confirm_focus: bool,
    last_focus_applied: Option<f64>,

    realized_error: Option<String>,
    last_realized_applied: Option<f64>,

    status: String,
    history_requests: RequestTracker,
    focus_requests: RequestTracker,
    tx: Sender<FetchMessage>,
    rx: Receiver<FetchMessage>,
}

impl App {
    fn new(service: Arc<ApiService>, args: &TuiArgs) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            service,
            index: args.index,
            inflation_annual: args.inflation,
            real_return: args.real,
            mode: PriceMode::Real,
            history: None,
            history_loading: false,
            history_error: None,
            focus_loading: false,
            focus_error: None,
            confirm_focus: false,
            last_focus_applied: None,
            realized_error: None,
            last_realized_applied: None,
            status: String::new(),
            history_requests: RequestTracker::default(),
            focus_requests: RequestTracker::default(),
            tx,
            rx,
        };
        app.load_history();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.drain_messages() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::internal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::internal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::internal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Invalidate everything in flight; late results are dropped unseen.
    fn shutdown(&mut self) {
        self.history_requests.invalidate();
        self.focus_requests.invalidate();
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.confirm_focus {
            match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.confirm_focus = false;
                    self.start_focus();
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_focus = false;
                    self.status = "Focus median not applied.".to_string();
                }
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.select_index(self.index.prev()),
            KeyCode::Right | KeyCode::Char('i') => self.select_index(self.index.next()),
            KeyCode::Up => self.set_inflation(self.inflation_annual + NUDGE),
            KeyCode::Down => self.set_inflation(self.inflation_annual - NUDGE),
            KeyCode::Char('+') => self.real_return = round_tenth(self.real_return + NUDGE),
            KeyCode::Char('-') => self.real_return = round_tenth(self.real_return - NUDGE),
            KeyCode::Char('m') => {
                self.mode = self.mode.toggle();
                self.status = format!("mode: {}", self.mode.label());
            }
            KeyCode::Char('f') => self.request_focus(),
            KeyCode::Char('r') => self.apply_realized_12m(),
            KeyCode::Char('5') => {
                let avg = self.history.as_ref().and_then(|h| h.avg_5y);
                self.apply_average("5y average", avg);
            }
            KeyCode::Char('0') => {
                let avg = self.history.as_ref().and_then(|h| h.avg_10y);
                self.apply_average("10y average", avg);
            }
            KeyCode::Char('l') => self.load_history(),
            _ => {}
        }

        false
    }

    fn set_inflation(&mut self, value: f64) {
        self.inflation_annual = round_tenth(value);
    }

    fn select_index(&mut self, index: InflationIndex) {
        if index == self.index {
            return;
        }
        self.index = index;
        self.history = None;
        self.load_history();
    }

    fn load_history(&mut self) {
        let ticket = self.history_requests.begin();
        self.history_loading = true;
        self.history_error = None;
        self.status = format!("Loading {} history...", self.index.display_name());

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let request = HistoricalRequest {
            index: self.index,
            period: PeriodKeyword::Years10,
            ..Default::default()
        };
        thread::spawn(move || {
            let result = service.sgs().historical(&request, service.today());
            let _ = tx.send(FetchMessage {
                ticket,
                payload: Payload::History(result),
            });
        });
    }

    /// The Focus median is an IPCA figure; other indices need confirmation.
    fn request_focus(&mut self) {
        if self.index != InflationIndex::Ipca {
            self.confirm_focus = true;
            self.status = format!(
                "The Focus median (12m) is an IPCA figure. Apply it to {} anyway? (y/n)",
                self.index.display_name()
            );
            return;
        }
        self.start_focus();
    }

    fn start_focus(&mut self) {
        let ticket = self.focus_requests.begin();
        self.focus_loading = true;
        self.focus_error = None;
        self.status = "Loading Focus median...".to_string();

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = service.focus().fetch_median(Horizon::Months12);
            let _ = tx.send(FetchMessage {
                ticket,
                payload: Payload::Focus(result),
            });
        });
    }

    fn apply_realized_12m(&mut self) {
        self.realized_error = None;
        match self.history.as_ref().and_then(|h| h.series.avg_12m()) {
            Some(annual) => {
                self.inflation_annual = annual;
                self.last_realized_applied = Some(annual);
                self.status = format!("Realized 12m applied: {}", fmt_annual_br(annual));
            }
            None => {
                let msg = if self.history_loading { "still loading" } else { "no data" };
                self.realized_error = Some(msg.to_string());
                self.status = format!("Realized 12m unavailable: {msg}");
            }
        }
    }

    fn apply_average(&mut self, label: &str, value: Option<f64>) {
        match value {
            Some(annual) => {
                self.inflation_annual = annual;
                self.status = format!("{label} applied: {}", fmt_annual_br(annual));
            }
            None => self.status = format!("{label} unavailable."),
        }
    }

    fn drain_messages(&mut self) -> bool {
        let mut applied = false;
        while let Ok(msg) = self.rx.try_recv() {
            applied |= self.apply_message(msg);
        }
        applied
    }

    /// Apply a fetch result if its ticket is still current. Returns `true` when applied.
    fn apply_message(&mut self, msg: FetchMessage) -> bool {
        match msg.payload {
            Payload::History(result) => {
                if !self.history_requests.is_current(msg.ticket) {
                    return false;
                }
                self.history_loading = false;
                match result {
                    Ok(history) => {
                        self.status = format!(
                            "{}: {} months loaded",
                            history.index.display_name(),
                            history.series.len()
                        );
                        self.history = Some(history);
                    }
                    Err(err) => {
                        self.status = format!("History fetch failed: {err}");
                        self.history_error = Some(err.to_string());
                    }
                }
            }
            Payload::Focus(result) => {
                if !self.focus_requests.is_current(msg.ticket) {
                    return false;
                }
                self.focus_loading = false;
                match result {
                    Ok(median) => {
                        self.inflation_annual = median.value;
                        self.last_focus_applied = Some(median.value);
                        self.status = format!("Focus median applied: {}", fmt_annual_br(median.value));
                    }
                    Err(err) => {
                        self.status = format!("Focus fetch failed: {err}");
                        self.focus_error = Some(err.to_string());
                    }
                }
            }
        }
        true
    }

    fn effective_return(&self) -> f64 {
        match self.mode {
            PriceMode::Real => self.real_return,
            PriceMode::Nominal => nominal_from_real_pct(self.real_return, self.inflation_annual),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if self.confirm_focus {
            self.draw_confirm(frame, size);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("infl", Style::default().fg(Color::Cyan)),
                Span::raw(" - retirement calculator inflation assumption"),
            ]),
            Line::from(Span::styled(
                format!(
                    "{} annual: {} | mode: {} | return used: {}",
                    self.index.display_name(),
                    fmt_annual_br(self.inflation_annual),
                    self.mode.label(),
                    fmt_annual_br(self.effective_return()),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(46)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!("{} monthly % (BCB/SGS)", self.index.display_name());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(history) = self.history.as_ref().filter(|h| !h.series.is_empty()) else {
            let msg = if self.history_loading {
                "Waiting for data..."
            } else {
                "No data."
            };
            let p = Paragraph::new(msg).style(Style::default().fg(Color::Yellow));
            frame.render_widget(p, inner);
            return;
        };

        let reference = monthly_from_annual_pct(self.inflation_annual);
        let (monthly, x_bounds, y_bounds) = chart_series(history, reference);
        let widget = SeriesChart {
            monthly: &monthly,
            reference: Some(reference),
            x_bounds,
            y_bounds,
            x_label: "year",
            y_label: "% m/m",
            fmt_x: fmt_axis_year,
            fmt_y: fmt_axis_pct,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let dim = Style::default().fg(Color::Gray);
        let warn = Style::default().fg(Color::Red);
        let opt = |v: Option<f64>| v.map(fmt_annual_br).unwrap_or_else(|| "-".to_string());

        let avg_5y = self.history.as_ref().and_then(|h| h.avg_5y);
        let avg_10y = self.history.as_ref().and_then(|h| h.avg_10y);
        let avg_12m = self.history.as_ref().and_then(|h| h.series.avg_12m());

        let mut lines = vec![
            Line::from(format!("Index      : {}", self.index.display_name())),
            Line::from(format!("Inflation  : {}", fmt_annual_br(self.inflation_annual))),
            Line::from(format!("Real return: {}", fmt_annual_br(self.real_return))),
            Line::from(format!(
                "Nominal    : {}",
                fmt_annual_br(nominal_from_real_pct(self.real_return, self.inflation_annual))
            )),
            Line::from(Span::styled(
                "nominal = (1+real)(1+inflation) - 1".to_string(),
                dim,
            )),
            Line::from(""),
            Line::from(format!("12m realized: {}", opt(avg_12m))),
            Line::from(format!("5y average  : {}", opt(avg_5y))),
            Line::from(format!("10y average : {}", opt(avg_10y))),
            Line::from(Span::styled("(geometric, annualized)".to_string(), dim)),
            Line::from(""),
        ];

        if let Some(v) = self.last_focus_applied {
            lines.push(Line::from(format!("Focus median applied: {}", fmt_annual_br(v))));
        }
        if let Some(v) = self.last_realized_applied {
            lines.push(Line::from(format!("Realized 12m applied: {}", fmt_annual_br(v))));
        }
        if self.focus_loading {
            lines.push(Line::from(Span::styled("Loading Focus median...".to_string(), dim)));
        }
        if let Some(err) = &self.history_error {
            lines.push(Line::from(Span::styled(format!("History failed: {err}"), warn)));
        }
        if let Some(err) = &self.focus_error {
            lines.push(Line::from(Span::styled(format!("Focus failed: {err}"), warn)));
        }
        if let Some(err) = &self.realized_error {
            lines.push(Line::from(Span::styled(format!("Realized 12m failed: {err}"), warn)));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Assumptions").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ index  ↑/↓ inflation  +/- real  f Focus  r 12m  5/0 avg  m mode  l reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_confirm(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let width = area.width.min(60);
        let height = 5u16.min(area.height);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let text = format!(
            "The Focus median (12m) is an IPCA figure.\nApply it to {} anyway? (y/n)",
            self.index.display_name()
        );
        let p = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(Block::default().title("Confirm").borders(Borders::ALL));
        frame.render_widget(Clear, rect);
        frame.render_widget(p, rect);
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Build the chart line (x in fractional years) and padded bounds.
fn chart_series(history: &HistoricalSeries, reference: f64) -> (Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let points: Vec<(f64, f64)> = history
        .series
        .observations()
        .iter()
        .map(|o| {
            let x = o.year_month.year() as f64 + (o.year_month.month() - 1) as f64 / 12.0;
            (x, o.percent_change)
        })
        .collect();

    let (mut x0, mut x1) = match (points.first(), points.last()) {
        (Some(a), Some(b)) => (a.0, b.0),
        _ => (0.0, 1.0),
    };
    if x1 <= x0 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &points {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if reference.is_finite() {
        y_min = y_min.min(reference);
        y_max = y_max.max(reference);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = -1.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-6);
    (points, [x0, x1], [y_min - pad, y_max + pad])
}

fn fmt_axis_year(v: f64) -> String {
    format!("{:.0}", v.floor())
}

fn fmt_axis_pct(v: f64) -> String {
    fmt_number_br(v, 2)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::config::Settings;
    use crate::data::transport::fake::FakeTransport;
    use crate::domain::MonthRange;
    use crate::series::MonthlySeries;

    fn app() -> App {
        let settings = Settings::from_lookup(|_| None).unwrap();
        let service = ApiService::new(Arc::new(FakeTransport::failing("offline")), &settings)
            .with_clock(|| NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        App::new(Arc::new(service), &TuiArgs::default())
    }

    fn history(index: InflationIndex, monthly: &str, months: u32) -> HistoricalSeries {
        let rows: Vec<(String, String)> = (1..=months)
            .map(|m| (format!("01/{:02}/{}", (m - 1) % 12 + 1, 2023 + (m - 1) / 12), monthly.to_string()))
            .collect();
        let series = MonthlySeries::from_rows(rows);
        HistoricalSeries {
            index,
            period: PeriodKeyword::Years10,
            range: MonthRange::resolve(
                PeriodKeyword::Years10,
                None,
                None,
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            ),
            avg_5y: series.avg_5y(),
            avg_10y: series.avg_10y(),
            series,
            source: crate::data::sgs::SGS_SOURCE,
        }
    }

    #[test]
    fn stale_history_is_discarded_after_index_change() {
        let mut app = app();
        let stale = app.history_requests.begin();
        app.select_index(InflationIndex::Igpm);

        let applied = app.apply_message(FetchMessage {
            ticket: stale,
            payload: Payload::History(Ok(history(InflationIndex::Ipca, "0,5", 12))),
        });
        assert!(!applied);
        assert!(app.history.is_none());
        assert!(app.history_loading);
    }

    #[test]
    fn current_history_is_applied() {
        let mut app = app();
        let ticket = app.history_requests.begin();
        let applied = app.apply_message(FetchMessage {
            ticket,
            payload: Payload::History(Ok(history(InflationIndex::Ipca, "0,5", 18))),
        });
        assert!(applied);
        assert!(!app.history_loading);
        assert_eq!(app.history.as_ref().map(|h| h.series.len()), Some(18));
    }

    #[test]
    fn results_after_shutdown_are_dropped() {
        let mut app = app();
        let ticket = app.focus_requests.begin();
        app.shutdown();
        let applied = app.apply_message(FetchMessage {
            ticket,
            payload: Payload::Focus(Ok(ForecastMedian::ipca_12m(3.9))),
        });
        assert!(!applied);
        assert_eq!(app.inflation_annual, 4.0);
    }

    #[test]
    fn focus_median_replaces_assumption() {
        let mut app = app();
        let ticket = app.focus_requests.begin();
        app.apply_message(FetchMessage {
            ticket,
            payload: Payload::Focus(Ok(ForecastMedian::ipca_12m(3.96))),
        });
        assert_eq!(app.inflation_annual, 3.96);
        assert_eq!(app.last_focus_applied, Some(3.96));
        assert!(app.status.contains("3,96% a.a."));
    }

    #[test]
    fn focus_on_other_index_asks_first() {
        let mut app = app();
        app.select_index(InflationIndex::Ipca15);
        app.handle_key(KeyCode::Char('f'));
        assert!(app.confirm_focus);
        assert!(!app.focus_loading);

        app.handle_key(KeyCode::Char('n'));
        assert!(!app.confirm_focus);
        assert!(!app.focus_loading);

        app.handle_key(KeyCode::Char('f'));
        app.handle_key(KeyCode::Char('y'));
        assert!(!app.confirm_focus);
        assert!(app.focus_loading);
    }

    #[test]
    fn realized_12m_uses_trailing_year_of_history() {
        let mut app = app();
        app.apply_realized_12m();
        assert!(app.realized_error.is_some());

        app.history = Some(history(InflationIndex::Ipca, "1,0", 18));
        app.apply_realized_12m();
        let expected = (1.01_f64.powi(12) - 1.0) * 100.0;
        assert!((app.inflation_annual - expected).abs() < 1e-9);
        assert_eq!(app.last_realized_applied, Some(app.inflation_annual));
        assert!(app.realized_error.is_none());
    }

    #[test]
    fn nudges_and_mode() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Up);
        assert!((app.inflation_annual - 4.2).abs() < 1e-12);
        assert_eq!(app.effective_return(), 4.0);

        app.handle_key(KeyCode::Char('m'));
        let expected = nominal_from_real_pct(4.0, 4.2);
        assert!((app.effective_return() - expected).abs() < 1e-12);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn chart_bounds_include_reference_line() {
        let h = history(InflationIndex::Ipca, "0,2", 6);
        let (points, x, y) = chart_series(&h, 0.9);
        assert_eq!(points.len(), 6);
        assert!((x[0] - 2023.0).abs() < 1e-12);
        assert!(y[0] < 0.2 && y[1] > 0.9);
    }
}
