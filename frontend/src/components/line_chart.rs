use geotrack_shared::analytics::{ChartGeometry, MonthlyCost};
use geotrack_shared::format::format_currency;
use leptos::prelude::*;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 150.0;
const PADDING: f64 = 20.0;

/// 月度成本折线图 (SVG)
#[component]
pub fn LineChart(#[prop(into)] data: Signal<Vec<MonthlyCost>>) -> impl IntoView {
    let geometry = Memo::new(move |_| {
        let totals: Vec<f64> = data.with(|d| d.iter().map(|m| m.total).collect());
        ChartGeometry::new(&totals, WIDTH, HEIGHT, PADDING)
    });

    let grid = move || {
        geometry.with(|g| {
            g.grid_lines()
                .into_iter()
                .map(|y| {
                    view! {
                        <line x1=PADDING.to_string() y1=format!("{y:.1}")
                            x2=(WIDTH - PADDING).to_string() y2=format!("{y:.1}")
                            stroke="currentColor" stroke-opacity="0.1" stroke-dasharray="4 4" />
                    }
                })
                .collect_view()
        })
    };

    let dots = move || {
        geometry.with(|g| {
            g.points
                .iter()
                .map(|p| {
                    view! { <circle cx=format!("{:.1}", p.x) cy=format!("{:.1}", p.y) r="3" class="fill-primary" /> }
                })
                .collect_view()
        })
    };

    let labels = move || {
        data.with(|d| {
            geometry.with(|g| {
                d.iter()
                    .zip(g.points.iter())
                    .map(|(m, p)| {
                        view! {
                            <text x=format!("{:.1}", p.x) y=(HEIGHT - 4.0).to_string() text-anchor="middle"
                                class="fill-current text-[9px] opacity-50">
                                {m.label.clone()}
                            </text>
                        }
                    })
                    .collect_view()
            })
        })
    };

    let peak = move || geometry.with(|g| format_currency(g.max));

    view! {
        <div class="w-full">
            <svg viewBox=format!("0 0 {WIDTH} {HEIGHT}") class="w-full h-auto text-base-content">
                {grid}
                <path d=move || geometry.with(|g| g.area_path()) class="fill-primary/10" />
                <polyline
                    points=move || geometry.with(|g| g.polyline())
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    class="text-primary"
                />
                {dots}
                {labels}
            </svg>
            <p class="text-right text-[10px] opacity-50 font-mono">"Peak " {peak}</p>
        </div>
    }
}
