/// OpenGL debug output: driver messages routed into the glw logger.
///
/// Severities map HIGH to Error, MEDIUM to Warn, LOW to Info and
/// NOTIFICATION to Debug. Repeated message ids are counted and only their
/// first occurrence is logged in full.

use colored::*;
use glw_graphics::glw::log::LogSeverity;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

const SOURCE: &str = "glw::OpenGl";

/// Global message statistics (thread-safe atomic counters)
static DEBUG_STATS: DebugStatsTracker = DebugStatsTracker::new();

/// Occurrences per driver message id
static MESSAGE_TRACKER: Mutex<Option<FxHashMap<u32, u32>>> = Mutex::new(None);

/// Messages received since the callback was installed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugOutputStats {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub notification: u32,
}

impl DebugOutputStats {
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low + self.notification
    }
}

struct DebugStatsTracker {
    high: AtomicU32,
    medium: AtomicU32,
    low: AtomicU32,
    notification: AtomicU32,
}

impl DebugStatsTracker {
    const fn new() -> Self {
        Self {
            high: AtomicU32::new(0),
            medium: AtomicU32::new(0),
            low: AtomicU32::new(0),
            notification: AtomicU32::new(0),
        }
    }

    fn increment(&self, severity: u32) {
        let counter = match severity {
            glow::DEBUG_SEVERITY_HIGH => &self.high,
            glow::DEBUG_SEVERITY_MEDIUM => &self.medium,
            glow::DEBUG_SEVERITY_LOW => &self.low,
            _ => &self.notification,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get_stats(&self) -> DebugOutputStats {
        DebugOutputStats {
            high: self.high.load(Ordering::Relaxed),
            medium: self.medium.load(Ordering::Relaxed),
            low: self.low.load(Ordering::Relaxed),
            notification: self.notification.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.high.store(0, Ordering::Relaxed);
        self.medium.store(0, Ordering::Relaxed);
        self.low.store(0, Ordering::Relaxed);
        self.notification.store(0, Ordering::Relaxed);
    }
}

/// Reset counters and the repeated-message tracker
pub fn init_debug_output() {
    DEBUG_STATS.reset();
    if let Ok(mut tracker) = MESSAGE_TRACKER.lock() {
        *tracker = Some(FxHashMap::default());
    }
}

pub fn debug_output_stats() -> DebugOutputStats {
    DEBUG_STATS.get_stats()
}

/// Print a colored summary of the driver messages received so far
pub fn print_debug_output_report() {
    let stats = debug_output_stats();

    if stats.total() == 0 {
        println!("\n{}", "No OpenGL debug messages".green().bold());
        return;
    }

    println!("\n{}", "=== OpenGL Debug Output ===".bright_blue().bold());
    if stats.high > 0 {
        println!("  {} {}", "High:".red().bold(), stats.high);
    }
    if stats.medium > 0 {
        println!("  {} {}", "Medium:".yellow().bold(), stats.medium);
    }
    if stats.low > 0 {
        println!("  {} {}", "Low:".cyan(), stats.low);
    }
    if stats.notification > 0 {
        println!("  {} {}", "Notification:".bright_black(), stats.notification);
    }
}

pub(crate) fn severity_to_log(severity: u32) -> LogSeverity {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => LogSeverity::Error,
        glow::DEBUG_SEVERITY_MEDIUM => LogSeverity::Warn,
        glow::DEBUG_SEVERITY_LOW => LogSeverity::Info,
        _ => LogSeverity::Debug,
    }
}

pub(crate) fn source_label(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "api",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "window system",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "shader compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "third party",
        glow::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    }
}

pub(crate) fn type_label(message_type: u32) -> &'static str {
    match message_type {
        glow::DEBUG_TYPE_ERROR => "error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behavior",
        glow::DEBUG_TYPE_PORTABILITY => "portability",
        glow::DEBUG_TYPE_PERFORMANCE => "performance",
        glow::DEBUG_TYPE_MARKER => "marker",
        _ => "other",
    }
}

/// Callback handed to `glDebugMessageCallback`
///
/// Public so applications that install their own callback can forward to it.
pub fn on_debug_message(source: u32, message_type: u32, id: u32, severity: u32, message: &str) {
    DEBUG_STATS.increment(severity);

    let occurrences = match MESSAGE_TRACKER.lock() {
        Ok(mut tracker) => {
            let count = tracker.get_or_insert_with(FxHashMap::default).entry(id).or_insert(0);
            *count += 1;
            *count
        }
        Err(_) => 1,
    };
    if occurrences > 1 {
        return;
    }

    glw_graphics::log::log(
        severity_to_log(severity),
        SOURCE,
        format!("[{}/{}] #{} {}", source_label(source), type_label(message_type), id, message.trim_end()),
    );
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
