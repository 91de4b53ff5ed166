use crate::usecases::u601_generate_docs::DocsGenPanel;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <main class="app">
                <DocsGenPanel />
            </main>
        </ConfigProvider>
    }
}
