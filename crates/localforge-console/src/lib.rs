//! Colored console output for solver events.
//!
//! Provides a `tracing` layer that renders the structured events of
//! `localforge_solver` as one colored line each.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve and phase start/end)
//! - **DEBUG**: Steps and new best solutions

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const SOLVER_TARGET: &str = "localforge_solver";

/// Initializes the console output.
///
/// Safe to call multiple times, only the first call has effect. `RUST_LOG`
/// overrides the default `localforge_solver=info` filter. Does nothing if
/// another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let default_directive = format!("{SOLVER_TARGET}=info")
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(default_directive)
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    SOLVE_START_NANOS.store(epoch.elapsed().as_nanos() as u64, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats solver events with colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with(SOLVER_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    phases: Option<u64>,
    step: Option<u64>,
    steps: Option<u64>,
    moves: Option<u64>,
    speed: Option<u64>,
    accepted: Option<u64>,
    selected: Option<u64>,
    duration_ms: Option<u64>,
    score: Option<String>,
    best_score: Option<String>,
    feasible: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, format!("{value:?}").trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "phases" => self.phases = Some(value),
            "step" => self.step = Some(value),
            "steps" => self.steps = Some(value),
            "moves" => self.moves = Some(value),
            "speed" => self.speed = Some(value),
            "accepted" => self.accepted = Some(value),
            "selected" => self.selected = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if let Ok(value) = u64::try_from(value) {
            self.record_u64(field, value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "best_score" => self.best_score = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "step" => format_step(v),
        "new_best" => format_new_best(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs()).bright_black().to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let phases = v.phases.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Solving │ {} phases │ starting score {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        phases.to_formatted_string(&Locale::en).bright_yellow(),
        format_score(score)
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let status = if v.feasible.unwrap_or(false) {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };

    format!(
        "{} {} Solving ended │ {} │ {} steps │ {} moves │ {} moves/s │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.moves.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.speed.unwrap_or(0).to_formatted_string(&Locale::en).bright_magenta().bold(),
        format_score(score),
        status
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} phase ({}) started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {} phase ({}) ended │ {} │ {} steps │ {} moves/s │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.speed.unwrap_or(0).to_formatted_string(&Locale::en).bright_magenta().bold(),
        format_score(score)
    )
}

fn format_step(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let best_score = v.best_score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Step {:>8} │ {:>6}/{:<6} accepted │ {} │ best {}",
        format_elapsed(),
        "·".bright_black(),
        v.step.unwrap_or(0).to_formatted_string(&Locale::en).bright_black(),
        v.accepted.unwrap_or(0).to_formatted_string(&Locale::en),
        v.selected.unwrap_or(0).to_formatted_string(&Locale::en),
        format_score(score),
        format_score(best_score)
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} New best at step {:>8} │ {}",
        format_elapsed(),
        "★".bright_yellow(),
        v.step.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_score(score)
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Colors hard/soft levels red/yellow when negative and simple scores by sign.
fn format_score(score: &str) -> String {
    if let Some((hard, soft)) = score.split_once('/') {
        if let (Some(hard), Some(soft)) = (hard.strip_suffix("hard"), soft.strip_suffix("soft")) {
            let hard_str = if hard.starts_with('-') {
                format!("{hard}hard").bright_red().to_string()
            } else {
                format!("{hard}hard").bright_green().to_string()
            };
            let soft_str = if soft.starts_with('-') {
                format!("{soft}soft").yellow().to_string()
            } else {
                format!("{soft}soft").white().to_string()
            };
            return format!("{hard_str}/{soft_str}");
        }
    }

    match score.parse::<i64>() {
        Ok(n) if n < 0 => score.bright_red().to_string(),
        Ok(_) => score.bright_green().to_string(),
        Err(_) => score.white().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_unknown_events_render_nothing() {
        assert!(format_event(&EventVisitor::default()).is_empty());
        assert!(format_event(&visitor("move_thread_joined")).is_empty());
    }

    #[test]
    fn test_phase_end_shows_counts() {
        let v = EventVisitor {
            phase: Some("Local Search".to_string()),
            phase_index: Some(1),
            steps: Some(12_345),
            duration_ms: Some(1500),
            score: Some("-2".to_string()),
            ..visitor("phase_end")
        };
        let output = format_event(&v);
        assert!(output.contains("Local Search"), "{output}");
        assert!(output.contains("12,345"), "{output}");
        assert!(output.contains("1.50s"), "{output}");
        assert!(output.contains("-2"), "{output}");
    }

    #[test]
    fn test_solve_end_shows_feasibility() {
        let feasible = EventVisitor {
            feasible: Some(true),
            score: Some("0hard/-3soft".to_string()),
            ..visitor("solve_end")
        };
        let output = format_event(&feasible);
        assert!(output.contains("FEASIBLE"), "{output}");
        assert!(!output.contains("INFEASIBLE"), "{output}");

        let infeasible = visitor("solve_end");
        assert!(format_event(&infeasible).contains("INFEASIBLE"));
    }

    #[test]
    fn test_durations() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(2500), "2.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_score_keeps_text() {
        for score in ["-7", "0", "0hard/-3soft", "-1hard/0soft", "N/A"] {
            let hard_soft = score.replace("hard", "").replace("soft", "");
            let output = format_score(score);
            for part in hard_soft.split('/') {
                assert!(output.contains(part), "{score} -> {output}");
            }
        }
    }
}
