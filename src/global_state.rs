use crate::app::TooltipData;
use crate::application::DashboardState;
use leptos::*;
use once_cell::sync::OnceCell;

/// Activity log keeps only the most recent lines
pub const MAX_LOG_LINES: usize = 100;

pub struct Globals {
    pub dashboard: RwSignal<DashboardState>,
    pub logs: RwSignal<Vec<String>>,
    pub logs_paused: RwSignal<bool>,
    pub tooltip: RwSignal<Option<TooltipData>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        dashboard: create_rw_signal(DashboardState::default()),
        logs: create_rw_signal(Vec::new()),
        logs_paused: create_rw_signal(false),
        tooltip: create_rw_signal(None),
    })
}

crate::global_signals! {
    pub dashboard_state => dashboard: DashboardState,
    pub log_lines => logs: Vec<String>,
    pub logs_paused => logs_paused: bool,
    pub tooltip_data => tooltip: Option<TooltipData>,
}

/// Append to the activity log unless it is paused
pub fn push_log_line(line: String) {
    if logs_paused().get_untracked() {
        return;
    }
    log_lines().update(|lines| {
        lines.push(line);
        if lines.len() > MAX_LOG_LINES {
            let excess = lines.len() - MAX_LOG_LINES;
            lines.drain(..excess);
        }
    });
}
