use yew::prelude::*;

use crate::viewmodels::Tab;

#[derive(Properties, PartialEq)]
pub struct TabBarProps {
    pub active: Tab,
    pub on_select: Callback<Tab>,
}

#[function_component(TabBar)]
pub fn tab_bar(props: &TabBarProps) -> Html {
    html! {
        <nav class="tab-bar">
            { for Tab::ALL.iter().map(|tab| {
                let tab = *tab;
                let class = classes!("tab-item", (tab == props.active).then_some("active"));
                let onclick = props.on_select.reform(move |_: MouseEvent| tab);
                html! {
                    <button {class} {onclick}>
                        <span class="tab-icon">{tab.icon()}</span>
                        <span class="tab-label">{tab.label()}</span>
                    </button>
                }
            }) }
        </nav>
    }
}
