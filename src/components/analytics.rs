use yew::prelude::*;

use super::{error_banner, spinner};
use crate::config::CONFIG;
use crate::models::{AnalyticsOverview, DoaByChannel};
use crate::services::ApiClient;
use crate::utils::money_whole;

#[derive(Properties, PartialEq)]
pub struct AnalyticsProps {
    pub api: ApiClient,
}

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Ready(AnalyticsOverview, Vec<DoaByChannel>),
    Failed(String),
}

/// Resumen y DOA por canal se piden en paralelo
#[function_component(Analytics)]
pub fn analytics(props: &AnalyticsProps) -> Html {
    let load = use_state(|| Load::Loading);

    {
        let api = props.api.clone();
        let load = load.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let weeks = CONFIG.ui.analytics_weeks;
                let (overview, channels) = futures::join!(api.analytics_overview(), api.doa_by_channel(weeks));
                match (overview, channels) {
                    (Ok(overview), Ok(channels)) => load.set(Load::Ready(overview, channels)),
                    (Err(e), _) | (_, Err(e)) => {
                        log::error!("❌ [ANALYTICS] {}", e);
                        load.set(Load::Failed(e.user_message("Failed to load analytics")));
                    }
                }
            });
            || ()
        });
    }

    let body = match &*load {
        Load::Loading => spinner(),
        Load::Failed(message) => error_banner(message),
        Load::Ready(overview, channels) => {
            let max_rate = channels.iter().map(|c| c.doa_rate).fold(0.0_f64, f64::max);
            html! {
                <>
                    <div class="stat-grid">
                        { stat_card("Open Tickets", overview.open_tickets.to_string(), false) }
                        { stat_card("DOA Rate", format!("{:.1}%", overview.doa_rate), overview.doa_above_target) }
                        { stat_card("Reships (Mo)", money_whole(overview.reship_cost.month), false) }
                        { stat_card("Refunds (Mo)", money_whole(overview.refunds.month), false) }
                    </div>
                    <section class="channel-chart">
                        <h4>{format!("DOA by Channel ({} wks)", CONFIG.ui.analytics_weeks)}</h4>
                        if channels.is_empty() {
                            <p class="muted">{"No data"}</p>
                        }
                        { for channels.iter().map(|c| {
                            let width = if max_rate > 0.0 { c.doa_rate / max_rate * 100.0 } else { 0.0 };
                            html! {
                                <div class="bar-row">
                                    <span class="bar-label">{c.channel.clone()}</span>
                                    <div class="bar-track">
                                        <div class="bar-fill" style={format!("width: {:.0}%", width)}></div>
                                    </div>
                                    <span class="bar-value">{format!("{:.1}%", c.doa_rate)}</span>
                                </div>
                            }
                        }) }
                    </section>
                </>
            }
        }
    };

    html! {
        <div class="analytics-screen">
            <header class="screen-header"><h2>{"Analytics"}</h2></header>
            { body }
        </div>
    }
}

fn stat_card(label: &str, value: String, alert: bool) -> Html {
    html! {
        <div class={classes!("stat-card", alert.then_some("alert"))}>
            <div class="stat-value">{value}</div>
            <div class="stat-label">{label.to_string()}</div>
        </div>
    }
}
