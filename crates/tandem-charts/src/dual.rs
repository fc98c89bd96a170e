//! Bar-over-scatter SVG chart
//!
//! Renders one `ChartFrame`: a bar panel stacked over a scatter panel, both
//! driven by the same (optionally zoomed) time scale. Hover, tooltip and zoom
//! state live in signals created by this component, so they are dropped with
//! it when the next render cycle mounts a fresh view.

use crate::{
    BAR_HOVER_STROKE, ChartFrame, ChartKind, DOT_HOVER_RADIUS, DOT_HOVER_STROKE, DOT_RADIUS,
    LinearScale, PanelRect, Scale, ScatterDot, TimeScale, TooltipContent, TooltipPlacement,
    TooltipState, Y_TICKS, ZoomTransform, colors, format_time, nearest_dot,
};
use leptos::callback::{Callable, Callback};
use leptos::html;
use leptos::prelude::*;
use tandem_core::{FixedDecimalFormatter, TemporalKey, ValueFormatter};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::MouseEvent;

/// Shape under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hover {
    Bar(usize),
    Dot(usize),
}

/// Dual chart component
#[component]
pub fn DualChart(
    frame: ChartFrame,
    /// Fired with the key of a clicked bar or dot
    #[prop(into)]
    on_select: Callback<TemporalKey>,
) -> impl IntoView {
    let layout = frame.layout;
    let zoom_enabled = frame.style.zoom;
    let mark_separators = frame.style.mark_separators;
    let zoom_config = frame.zoom_config();
    let bar_fill = frame.style.bar_color.as_ref().map(|c| c.as_str().to_string());
    let dot_fill = frame.style.scatter_color.as_ref().map(|c| c.as_str().to_string());
    let bar_hover_fill = bar_fill.clone();
    let dot_overlay_fill = dot_fill.clone();

    // Jitter is drawn once per cycle; zoom only moves dots horizontally
    let dots = StoredValue::new(frame.dots(&frame.scales.x));
    let frame = StoredValue::new(frame);

    let zoom = RwSignal::new(ZoomTransform::IDENTITY);
    let hovered = RwSignal::new(None::<Hover>);
    let raised = RwSignal::new(None::<usize>);
    let drag_from = RwSignal::new(None::<f64>);
    let tooltip = RwSignal::new(TooltipState::hidden());
    let tooltip_ref = NodeRef::<html::Div>::new();

    let x_scale = Memo::new(move |_| frame.with_value(|f| f.x_scale(&zoom.get())));

    let zoomed_dots = move || {
        let x = x_scale.get();
        dots.with_value(|all| rezoom_dots(all, &x))
    };

    // ===== Tooltip =====

    let show_tooltip = move |kind: ChartKind, index: usize, ev: &MouseEvent| {
        let content = frame.with_value(|f| {
            let data = match kind {
                ChartKind::Bar => &f.points,
                ChartKind::Scatter => &f.scatter,
            };
            data.points
                .get(index)
                .map(|point| TooltipContent::for_point(point, &f.fields, kind))
        });
        if let Some(content) = content {
            let placement = tooltip_placement(ev, tooltip_ref);
            tooltip.update(|t| t.show(content, placement));
        }
    };
    let move_tooltip = move |ev: &MouseEvent| {
        let placement = tooltip_placement(ev, tooltip_ref);
        tooltip.update(|t| t.move_to(placement));
    };
    let hide_tooltip = move || {
        hovered.set(None);
        tooltip.update(TooltipState::hide);
    };

    // ===== Zoom and pan =====

    let on_wheel = move |ev: web_sys::WheelEvent| {
        if !zoom_enabled {
            return;
        }
        ev.prevent_default();
        let Some((px, _)) = pointer_in(&ev, &layout.scatter) else {
            return;
        };
        let factor = ZoomTransform::wheel_factor(ev.delta_y(), ev.delta_mode());
        zoom.update(|z| *z = z.zoom_at(px, factor, &zoom_config));
    };
    let on_mouse_down = move |ev: MouseEvent| {
        if zoom_enabled {
            drag_from.set(Some(ev.client_x() as f64));
        }
    };
    let end_drag = move || drag_from.set(None);

    let on_mouse_move = move |ev: MouseEvent| {
        if let Some(from) = drag_from.get_untracked() {
            let to = ev.client_x() as f64;
            drag_from.set(Some(to));
            zoom.update(|z| *z = z.pan(to - from, &zoom_config));
        }

        let Some((px, py)) = pointer_in(&ev, &layout.scatter) else {
            return;
        };
        let nearest = nearest_dot(&zoomed_dots(), px, py);
        if raised.get_untracked() != nearest {
            raised.set(nearest);
        }
    };

    view! {
        <div class="tandem-viz">
            <svg
                class="tandem-chart"
                width=layout.svg_width()
                height=layout.svg_height()
                viewBox=layout.viewbox()
                on:wheel=on_wheel
                on:mousedown=on_mouse_down
                on:mousemove=on_mouse_move
                on:mouseup=move |_| end_drag()
                on:mouseleave=move |_| {
                    end_drag();
                    raised.set(None);
                }
            >
                // ===== Bar panel =====
                <svg
                    class="bar-area"
                    x=layout.bar.left
                    y=layout.bar.top
                    width=layout.width
                    height=layout.bar.height
                    overflow="hidden"
                >
                    {move || {
                        let x = x_scale.get();
                        frame.with_value(|f| f.bars(&x)).into_iter().map(|bar| {
                            let index = bar.index;
                            let key = bar.key;
                            view! {
                                <rect
                                    class="bar"
                                    x=bar.x
                                    y=bar.y
                                    width=bar.width
                                    height=bar.height
                                    fill=bar_fill.clone()
                                    on:mouseover=move |ev| {
                                        hovered.set(Some(Hover::Bar(index)));
                                        show_tooltip(ChartKind::Bar, index, &ev);
                                    }
                                    on:mousemove=move |ev| move_tooltip(&ev)
                                    on:mouseout=move |_| hide_tooltip()
                                    on:click=move |_| on_select.run(key)
                                />
                            }
                        }).collect_view()
                    }}

                    // Hovered bar, outlined and painted on top
                    {move || {
                        let Some(Hover::Bar(index)) = hovered.get() else {
                            return None;
                        };
                        let x = x_scale.get();
                        let bar = frame.with_value(|f| f.bars(&x)).into_iter().nth(index)?;
                        let fill = bar_hover_fill.clone();
                        Some(view! {
                            <rect
                                class="bar hovered"
                                x=bar.x
                                y=bar.y
                                width=bar.width
                                height=bar.height
                                fill=fill.clone()
                                stroke=fill
                                stroke-width=BAR_HOVER_STROKE
                                pointer-events="none"
                            />
                        })
                    }}
                </svg>

                <g class="bar-axes" transform=layout.bar.transform()>
                    // Top time axis, no ticks
                    <line
                        x1="0" y1="0"
                        x2=layout.width y2="0"
                        stroke=colors::AXIS
                    />
                    {frame.with_value(|f| {
                        view! {
                            <ValueAxis
                                scale=f.scales.y_bar.clone()
                                formatter=f.bar_formatter()
                            />
                        }
                    })}
                    <PanelBorder panel=layout.bar />
                    <text
                        class="axis-title"
                        transform="rotate(-90)"
                        x={-layout.bar.height / 2.0}
                        y={-layout.margin.left}
                        dy="1em"
                        text-anchor="middle"
                    >
                        {frame.with_value(ChartFrame::bar_y_title)}
                    </text>
                    {mark_separators.then(|| {
                        view! {
                            <rect
                                class="separator"
                                x="0"
                                y={layout.bar.height - 1.0}
                                width=layout.width
                                height="1"
                                fill=colors::AXIS
                            />
                            <rect
                                class="separator"
                                x="0"
                                y={layout.bar.height + layout.spacing * 2.0 - 1.0}
                                width=layout.width
                                height="1"
                                fill=colors::AXIS
                            />
                        }
                    })}
                </g>

                // ===== Scatter panel =====
                <svg
                    class="scatter-area"
                    x=layout.scatter.left
                    y=layout.scatter.top
                    width=layout.width
                    height=layout.scatter.height
                    overflow="hidden"
                >
                    {move || {
                        zoomed_dots().into_iter().map(|dot| {
                            let index = dot.index;
                            let key = dot.key;
                            view! {
                                <circle
                                    class="dot"
                                    cx=dot.cx
                                    cy=dot.cy
                                    r=DOT_RADIUS
                                    fill=dot_fill.clone()
                                    on:mouseover=move |ev| {
                                        hovered.set(Some(Hover::Dot(index)));
                                        show_tooltip(ChartKind::Scatter, index, &ev);
                                    }
                                    on:mousemove=move |ev| move_tooltip(&ev)
                                    on:mouseout=move |_| hide_tooltip()
                                    on:click=move |_| on_select.run(key)
                                />
                            }
                        }).collect_view()
                    }}

                    // Nearest dot raised, hovered dot emphasised
                    {move || {
                        let current = zoomed_dots();
                        let top = raised.get().and_then(|i| current.get(i).cloned());
                        let emphasised = match hovered.get() {
                            Some(Hover::Dot(i)) => current.get(i).cloned(),
                            _ => None,
                        };
                        let fill = dot_overlay_fill.clone();
                        let raised_view = top.map(|dot| {
                            view! {
                                <circle
                                    class="dot raised"
                                    cx=dot.cx
                                    cy=dot.cy
                                    r=DOT_RADIUS
                                    fill=fill.clone()
                                    pointer-events="none"
                                />
                            }
                        });
                        let hovered_view = emphasised.map(|dot| {
                            view! {
                                <circle
                                    class="dot hovered"
                                    cx=dot.cx
                                    cy=dot.cy
                                    r=DOT_HOVER_RADIUS
                                    fill=dot_overlay_fill.clone()
                                    stroke=colors::HOVER_STROKE
                                    stroke-width=DOT_HOVER_STROKE
                                    pointer-events="none"
                                />
                            }
                        });
                        (raised_view, hovered_view)
                    }}
                </svg>

                <g class="scatter-axes" transform=layout.scatter.transform()>
                    <g class="x-axis" transform=format!("translate(0, {})", layout.scatter.height)>
                        <line x1="0" y1="0" x2=layout.width y2="0" stroke=colors::AXIS />
                        {move || {
                            let x = x_scale.get();
                            let ticks = frame.with_value(|f| f.x_ticks(&zoom.get()));
                            ticks.into_iter().map(|t| view! { <TimeTick x={x.scale(t)} timestamp=t /> }).collect_view()
                        }}
                    </g>
                    {frame.with_value(|f| {
                        view! {
                            <ValueAxis
                                scale=f.scales.y_scatter.clone()
                                formatter=f.scatter_formatter()
                            />
                        }
                    })}
                    <PanelBorder panel=layout.scatter />
                    <text
                        class="axis-title"
                        x={layout.width / 2.0}
                        y={layout.scatter.height + layout.margin.bottom}
                        text-anchor="middle"
                    >
                        {frame.with_value(ChartFrame::scatter_x_title)}
                    </text>
                    <text
                        class="axis-title"
                        transform="rotate(-90)"
                        x={-layout.scatter.height / 2.0}
                        y={-layout.margin.left}
                        dy="1em"
                        text-anchor="middle"
                    >
                        {frame.with_value(ChartFrame::scatter_y_title)}
                    </text>
                </g>
            </svg>

            <Tooltip state=tooltip anchor=tooltip_ref />
        </div>
    }
}

/// Left value axis without tick marks
#[component]
fn ValueAxis(scale: LinearScale, formatter: FixedDecimalFormatter) -> impl IntoView {
    let (r0, r1) = scale.range_bounds();
    let ticks = scale.nice_ticks(Y_TICKS);

    view! {
        <g class="y-axis">
            <line x1="0" y1=r0 x2="0" y2=r1 stroke=colors::AXIS />
            {ticks.into_iter().map(|tick| {
                view! {
                    <text
                        x="-10"
                        y=scale.scale(tick)
                        dy="0.32em"
                        text-anchor="end"
                        font-size="10"
                    >
                        {formatter.format(tick)}
                    </text>
                }
            }).collect_view()}
        </g>
    }
}

/// Date label under the scatter panel
#[component]
fn TimeTick(x: f64, timestamp: i64) -> impl IntoView {
    view! {
        <text
            class="tick"
            transform=format!("translate({}, 5) rotate(-15)", x)
            dy="0.71em"
            text-anchor="end"
            font-size="10"
        >
            {format_time(timestamp)}
        </text>
    }
}

/// 1 px border on the right edge of a panel
#[component]
fn PanelBorder(panel: PanelRect) -> impl IntoView {
    view! {
        <rect
            class="panel-border"
            x={panel.width - 1.0}
            y="0"
            width="1"
            height=panel.height
            fill=colors::AXIS
        />
    }
}

#[component]
fn Tooltip(state: RwSignal<TooltipState>, anchor: NodeRef<html::Div>) -> impl IntoView {
    view! {
        <div class="tandem-tooltip" node_ref=anchor style=move || state.with(TooltipState::css)>
            {move || {
                state.with(|s| {
                    s.content.lines.iter().map(|line| {
                        let label = format!("{}:", line.label);
                        let value = line.value.clone();
                        view! {
                            <div style="margin-bottom: 4px">
                                <strong>{label}</strong>
                                " "
                                {value}
                            </div>
                        }
                    }).collect_view()
                })
            }}
        </div>
    }
}

// ============================================================================
// EVENT HELPERS
// ============================================================================

/// Dots moved to `x` horizontally, keeping their jittered `cy`
fn rezoom_dots(dots: &[ScatterDot], x: &TimeScale) -> Vec<ScatterDot> {
    dots.iter()
        .map(|dot| ScatterDot {
            cx: x.scale(dot.key.timestamp_millis()),
            ..dot.clone()
        })
        .collect()
}

/// Pointer position relative to `panel`, measured against the listening SVG
fn pointer_in(ev: &MouseEvent, panel: &PanelRect) -> Option<(f64, f64)> {
    let target = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = target.get_bounding_client_rect();
    Some((
        ev.client_x() as f64 - rect.left() - panel.left,
        ev.client_y() as f64 - rect.top() - panel.top,
    ))
}

fn tooltip_placement(ev: &MouseEvent, tooltip_ref: NodeRef<html::Div>) -> TooltipPlacement {
    let size = tooltip_ref
        .get_untracked()
        .map(|el| (el.offset_width() as f64, el.offset_height() as f64))
        .unwrap_or((0.0, 0.0));
    TooltipPlacement::compute((ev.page_x() as f64, ev.page_y() as f64), size, page_size())
}

fn page_size() -> (f64, f64) {
    let window = window();
    let read = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(f64::INFINITY)
    };
    (read(window.inner_width()), read(window.inner_height()))
}
