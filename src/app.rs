use leptos::html::Canvas;
use leptos::*;
use std::rc::Rc;

use crate::{
    application::{DashboardEvent, DashboardService, DashboardView},
    config::DashboardConfig,
    domain::{
        alerts::{AlertStatus, AlertThresholds},
        chart::{Figure, format_price},
        errors::AppError,
        logging::{LogComponent, LogEntry, Logger},
        market_data::{CurrencyPair, TimeInterval},
    },
    global_state::{dashboard_state, log_lines, logs_paused, push_log_line, tooltip_data},
    infrastructure::{
        http::TwelveDataClient,
        rendering::{CanvasRenderer, ChartGeometry},
    },
    log_error, log_info, log_warn,
};

const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 540;

type Service = Rc<DashboardService<TwelveDataClient>>;
type ViewModel = Memo<Option<Result<DashboardView, AppError>>>;

/// OHLC popup shown while hovering a candle
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipData {
    pub x: f64,
    pub y: f64,
    pub formatted_text: String,
}

impl TooltipData {
    /// `None` when bar `index` is missing any of its four prices
    pub fn from_figure(figure: &Figure, index: usize, x: f64, y: f64) -> Option<Self> {
        let trace = figure.candlestick()?;
        let (open, high, low, close) = trace.ohlc_at(index)?;
        let datetime = trace.x.get(index)?;

        let change = close - open;
        let change_pct = if open != 0.0 { change / open * 100.0 } else { 0.0 };
        let trend = if change >= 0.0 { "🟢" } else { "🔴" };

        let formatted_text = format!(
            "{} {}\nOpen:   {}\nHigh:   {}\nLow:    {}\nClose:  {}\nChange: {} ({:.2}%)\n{}",
            trend,
            trace.name,
            format_price(open),
            format_price(high),
            format_price(low),
            format_price(close),
            format_price(change),
            change_pct,
            datetime
        );

        Some(Self { x, y, formatted_text })
    }
}

/// Bridge from `domain::logging` into the activity log signal
pub struct LeptosLogger;

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        push_log_line(entry.format_line());
    }
}

/// Run one event through the reducer, perform its effect, then publish the
/// new state. The effect goes first so a refresh never reads a stale cache.
fn dispatch(service: StoredValue<Service>, event: DashboardEvent) {
    let mut next = dashboard_state().get_untracked();
    if let Some(effect) = next.apply(event) {
        if let Err(e) = service.with_value(|s| s.perform(effect)) {
            log_error!(LogComponent::Presentation("App"), "❌ {}", e);
        }
    }
    dashboard_state().set(next);
}

fn parse_threshold(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn status_icon(status: AlertStatus) -> &'static str {
    match status {
        AlertStatus::AboveUpper | AlertStatus::BelowLower => "🚨",
        AlertStatus::WithinBand => "✅",
        AlertStatus::Unknown => "❔",
    }
}

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let service = store_value(Rc::new(DashboardService::from_config(&config)));
    let output_size = config.output_size;

    let series = create_local_resource(
        move || dashboard_state().with(|s| (s.query(output_size), s.refresh_nonce)),
        move |(query, _refresh)| {
            let service = service.get_value();
            async move { service.fetch_tagged(query).await }
        },
    );

    // The resource keeps its last value while refetching; `view` yields
    // `None` until the fetched query matches the selection again.
    let view_model: ViewModel = create_memo(move |_| {
        let fetched = series.get()?;
        dashboard_state().with(|state| service.with_value(|s| s.view(state, &fetched)))
    });
    let loading = series.loading();

    log_info!(
        LogComponent::Presentation("App"),
        "🚀 {} ready ({} candles per request)",
        config.page_title,
        output_size
    );

    view! {
        <style>{STYLES}</style>
        <div class="bar-app">
            <Sidebar service=service view_model=view_model />
            <main class="bar-main">
                <Header view_model=view_model loading=loading />
                <ChartContainer view_model=view_model />
                <ActivityLog />
            </main>
        </div>
    }
}

#[component]
fn Sidebar(service: StoredValue<Service>, view_model: ViewModel) -> impl IntoView {
    let on_pair = move |ev: ev::Event| match event_target_value(&ev).parse::<CurrencyPair>() {
        Ok(pair) => dispatch(service, DashboardEvent::SelectPair(pair)),
        Err(_) => {
            log_warn!(LogComponent::Presentation("Sidebar"), "unknown pair selected");
        }
    };
    let on_interval = move |ev: ev::Event| match event_target_value(&ev).parse::<TimeInterval>() {
        Ok(interval) => dispatch(service, DashboardEvent::SelectInterval(interval)),
        Err(_) => {
            log_warn!(LogComponent::Presentation("Sidebar"), "unknown interval selected");
        }
    };

    view! {
        <aside class="sidebar">
            <h2>"Side Panel"</h2>
            <div class="selectors">
                <label>
                    "Select Pair"
                    <select on:change=on_pair>
                        {CurrencyPair::all()
                            .into_iter()
                            .map(|pair| {
                                view! {
                                    <option
                                        value=pair.symbol().to_string()
                                        prop:selected=move || dashboard_state().with(|s| s.pair == pair)
                                    >
                                        {pair.symbol().to_string()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Select Interval"
                    <select on:change=on_interval>
                        {TimeInterval::all()
                            .into_iter()
                            .map(|interval| {
                                view! {
                                    <option
                                        value=interval.to_api_str().to_string()
                                        prop:selected=move || {
                                            dashboard_state().with(|s| s.interval == interval)
                                        }
                                    >
                                        {interval.to_api_str().to_string()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
            </div>
            <button class="bar-btn" on:click=move |_| dispatch(service, DashboardEvent::Refresh)>
                "🔄 Refresh"
            </button>
            <AlertPanel service=service view_model=view_model />
        </aside>
    }
}

/// Expandable "Subscribe to a price alert" panel
#[component]
fn AlertPanel(service: StoredValue<Service>, view_model: ViewModel) -> impl IntoView {
    let shown = move |pick: fn(&AlertThresholds) -> f64| {
        view_model.with(|vm| match vm {
            Some(Ok(view)) => pick(&view.thresholds).to_string(),
            _ => String::new(),
        })
    };

    let on_subscribe = move |_| {
        let thresholds = view_model.with_untracked(|vm| match vm {
            Some(Ok(view)) => Some(view.thresholds),
            _ => None,
        });
        match thresholds {
            Some(thresholds) => dispatch(service, DashboardEvent::Subscribe(thresholds)),
            None => {
                log_warn!(LogComponent::Presentation("AlertPanel"), "no thresholds to subscribe to");
            }
        }
    };

    view! {
        <details class="alert-panel" prop:open=move || dashboard_state().with(|s| s.alert_panel_open)>
            <summary on:click=move |ev| {
                ev.prevent_default();
                dispatch(service, DashboardEvent::ToggleAlertPanel);
            }>"Subscribe to a price alert"</summary>
            <label>
                "Upper"
                <input
                    type="number"
                    step="any"
                    prop:value=move || shown(|t| t.upper)
                    on:change=move |ev| {
                        dispatch(service, DashboardEvent::SetUpper(parse_threshold(&event_target_value(&ev))))
                    }
                />
            </label>
            <label>
                "Lower"
                <input
                    type="number"
                    step="any"
                    prop:value=move || shown(|t| t.lower)
                    on:change=move |ev| {
                        dispatch(service, DashboardEvent::SetLower(parse_threshold(&event_target_value(&ev))))
                    }
                />
            </label>
            <label>
                "Subscriber Gmail (gmail only)"
                <input
                    type="text"
                    prop:value=move || dashboard_state().with(|s| s.email.clone())
                    on:input=move |ev| dispatch(service, DashboardEvent::SetEmail(event_target_value(&ev)))
                />
            </label>
            <div class="alert-actions">
                <button class="bar-btn" on:click=on_subscribe>"🔔 Subscribe"</button>
                <button class="bar-btn" on:click=move |_| dispatch(service, DashboardEvent::ResetThresholds)>
                    "↩️ Reset to defaults"
                </button>
            </div>
            <div class="alert-feedback">
                {move || {
                    dashboard_state()
                        .with(|s| match (&s.subscription_error, &s.subscription) {
                            (Some(error), _) => format!("⚠️ {}", error),
                            (None, Some(sub)) => format!("✅ {} will be alerted on {}", sub.email, sub.pair),
                            (None, None) => String::new(),
                        })
                }}
            </div>
        </details>
    }
}

#[component]
fn Header(view_model: ViewModel, loading: Signal<bool>) -> impl IntoView {
    let title = move || {
        view_model.with(|vm| match vm {
            Some(Ok(view)) => view.title.clone(),
            _ => dashboard_state().with(|s| s.pair.to_string()),
        })
    };
    let status = move || {
        if loading.get() {
            return "⏳ Loading...".to_string();
        }
        view_model.with(|vm| match vm {
            Some(Ok(view)) => format!(
                "{} {} • {} candles",
                status_icon(view.alert_status),
                view.alert_status,
                view.candle_count
            ),
            _ => String::new(),
        })
    };

    view! {
        <header class="header">
            <h1>{title}</h1>
            <div class="status">{status}</div>
        </header>
    }
}

#[component]
fn ChartContainer(view_model: ViewModel) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let geometry = create_rw_signal::<Option<ChartGeometry>>(None);

    create_effect(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        view_model.with(|vm| {
            let Some(Ok(view)) = vm else {
                geometry.set(None);
                tooltip_data().set(None);
                return;
            };
            let renderer = CanvasRenderer::new(CHART_WIDTH, CHART_HEIGHT);
            match renderer.render(&canvas, &view.figure) {
                Ok(drawn) => geometry.set(drawn),
                Err(e) => {
                    log_error!(LogComponent::Presentation("Chart"), "❌ Render error: {}", e);
                }
            }
        });
    });

    let on_mouse_move = move |ev: ev::MouseEvent| {
        let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
        let tooltip = geometry.with_untracked(|g| {
            let g = g.as_ref()?;
            let index = g.source_index(g.slot_at(x)?)?;
            view_model.with_untracked(|vm| match vm {
                Some(Ok(view)) => TooltipData::from_figure(&view.figure, index, x, y),
                _ => None,
            })
        });
        tooltip_data().set(tooltip);
    };

    let has_chart = move || view_model.with(|vm| matches!(vm, Some(Ok(_))));

    view! {
        <div class="chart-container">
            {move || {
                view_model
                    .with(|vm| match vm {
                        Some(Err(e)) => Some(view! { <div class="chart-error">{format!("⚠️ {}", e)}</div> }),
                        None => Some(view! { <div class="chart-loading">"⏳ Loading..."</div> }),
                        Some(Ok(_)) => None,
                    })
            }}
            <div class="chart-wrapper" style:display=move || if has_chart() { "block" } else { "none" }>
                <canvas
                    node_ref=canvas_ref
                    width=CHART_WIDTH
                    height=CHART_HEIGHT
                    on:mousemove=on_mouse_move
                    on:mouseleave=move |_| tooltip_data().set(None)
                />
                <ChartTooltip />
            </div>
        </div>
    }
}

#[component]
fn ChartTooltip() -> impl IntoView {
    view! {
        <div
            class="tooltip"
            style:display=move || tooltip_data().with(|t| if t.is_some() { "block" } else { "none" })
            style:left=move || tooltip_data().with(|t| format!("{}px", t.as_ref().map_or(0.0, |t| t.x)))
            style:top=move || tooltip_data().with(|t| format!("{}px", t.as_ref().map_or(0.0, |t| t.y)))
        >
            {move || tooltip_data().with(|t| t.as_ref().map(|t| t.formatted_text.clone()).unwrap_or_default())}
        </div>
    }
}

/// Collapsible activity log fed by [`LeptosLogger`]
#[component]
fn ActivityLog() -> impl IntoView {
    view! {
        <details class="debug-console">
            <summary class="debug-header">"🐛 Activity log"</summary>
            <div class="debug-actions">
                <button
                    class="debug-btn"
                    on:click=move |_| {
                        logs_paused().update(|p| *p = !*p);
                        if logs_paused().get_untracked() {
                            log_info!(LogComponent::Presentation("ActivityLog"), "🛑 Logging paused");
                        } else {
                            log_info!(LogComponent::Presentation("ActivityLog"), "▶️ Logging resumed");
                        }
                    }
                >
                    {move || if logs_paused().get() { "▶️ Resume" } else { "⏸️ Pause" }}
                </button>
                <button class="debug-btn" on:click=move |_| log_lines().set(Vec::new())>
                    "🗑️ Clear"
                </button>
            </div>
            <div class="debug-log">
                {move || {
                    log_lines()
                        .get()
                        .into_iter()
                        .map(|line| view! { <div class="log-line">{line}</div> })
                        .collect_view()
                }}
            </div>
        </details>
    }
}

const STYLES: &str = r#"
.bar-app {
    font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
    background: #0e1117;
    min-height: 100vh;
    display: flex;
    color: #fafafa;
}

.sidebar {
    width: 280px;
    padding: 20px;
    background: #262730;
    display: flex;
    flex-direction: column;
    gap: 14px;
}

.selectors {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 10px;
}

.sidebar label, .alert-panel label {
    display: flex;
    flex-direction: column;
    font-size: 13px;
    gap: 4px;
}

.sidebar select, .sidebar input {
    background: #0e1117;
    color: #fafafa;
    border: 1px solid #4a5d73;
    border-radius: 5px;
    padding: 5px;
}

.alert-panel {
    border: 1px solid #4a5d73;
    border-radius: 8px;
    padding: 10px;
    display: flex;
    flex-direction: column;
    gap: 8px;
}

.alert-panel summary {
    cursor: pointer;
    font-weight: 600;
}

.alert-actions {
    display: flex;
    gap: 6px;
    margin-top: 8px;
}

.alert-feedback {
    font-size: 12px;
    margin-top: 6px;
}

.bar-main {
    flex: 1;
    padding: 20px;
    overflow-x: auto;
}

.header h1 {
    margin: 0 0 6px 0;
}

.status {
    color: #72c685;
    font-size: 14px;
    margin-bottom: 12px;
}

.chart-container {
    position: relative;
    margin-bottom: 20px;
}

.chart-wrapper {
    position: relative;
    display: inline-block;
}

.chart-wrapper canvas {
    border: 1px solid #4a5d73;
    border-radius: 8px;
    cursor: crosshair;
}

.chart-error {
    color: #ff6b6b;
    background: rgba(255, 68, 68, 0.1);
    border: 1px solid #ff4444;
    border-radius: 8px;
    padding: 16px;
}

.chart-loading {
    color: #aaaaaa;
    padding: 16px;
}

.tooltip {
    position: absolute;
    background: rgba(0, 0, 0, 0.9);
    color: white;
    padding: 8px 12px;
    border-radius: 6px;
    font-size: 12px;
    font-family: 'Courier New', monospace;
    white-space: pre-line;
    pointer-events: none;
    z-index: 1000;
    border: 1px solid #4a5d73;
    line-height: 1.4;
    transform: translate(10px, -100%);
}

.bar-btn, .debug-btn {
    background: #4a5d73;
    color: white;
    border: none;
    padding: 6px 10px;
    border-radius: 5px;
    cursor: pointer;
    font-size: 12px;
}

.bar-btn:hover, .debug-btn:hover {
    background: #5a6d83;
}

.debug-console {
    background: rgba(0, 0, 0, 0.8);
    border-radius: 10px;
    padding: 15px;
    border: 1px solid #4a5d73;
}

.debug-header {
    color: #72c685;
    font-weight: bold;
    cursor: pointer;
}

.debug-actions {
    margin: 8px 0;
    display: flex;
    gap: 5px;
}

.debug-log {
    font-family: 'Courier New', monospace;
    font-size: 11px;
    line-height: 1.3;
    max-height: 300px;
    overflow-y: auto;
}

.log-line {
    color: #e0e0e0;
    margin: 2px 0;
    padding: 1px 5px;
}
"#;
