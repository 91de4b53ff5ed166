//! u601 Documentation Generator - View Component

use contracts::usecases::u601_generate_docs::language::accept_filter;
use contracts::usecases::u601_generate_docs::prompt::RESPONSE_PLACEHOLDER;
use contracts::usecases::u601_generate_docs::Language;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

use super::state::GenerationStatus;
use super::view_model::DocsGenVm;
use crate::shared::code_highlight::highlight_code;

const UPLOAD_BUSY_TOOLTIP: &str = "Can't upload files during generation";

#[component]
#[allow(non_snake_case)]
pub fn DocsGenPanel() -> impl IntoView {
    let vm = DocsGenVm::new();
    let file_input_ref = NodeRef::<leptos::html::Input>::new();
    let accept = accept_filter();

    // запрос не должен пережить панель
    on_cleanup(move || vm.cancel());

    let is_running = Signal::derive(move || vm.state.with(|s| s.is_running()));
    let can_export = Signal::derive(move || vm.state.with(|s| s.can_export()));

    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());

        if let Some(input) = input {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                vm.load_file(file);
            }
        }
    };

    let handle_reset = move |_: leptos::ev::MouseEvent| {
        vm.reset();
        if let Some(input) = file_input_ref.get() {
            input.set_value("");
        }
    };

    let button_class = move || match vm.state.with(|s| s.status) {
        GenerationStatus::Error => "docs-gen__generate docs-gen__generate--error",
        GenerationStatus::Running => "docs-gen__generate docs-gen__generate--running",
        GenerationStatus::Idle => "docs-gen__generate",
    };

    view! {
        <div class="docs-gen">
            <h2 class="docs-gen__header">
                {move || {
                    format!(
                        "Programming Language Detected: {}",
                        vm.state.with(|s| s.language.label()),
                    )
                }}
            </h2>

            // Input surface
            <div class="docs-gen__input">
                <input
                    type="file"
                    accept=accept
                    node_ref=file_input_ref
                    disabled=move || is_running.get()
                    title=move || if is_running.get() { UPLOAD_BUSY_TOOLTIP } else { "" }
                    on:change=handle_file_select
                />
                <textarea
                    class="docs-gen__editor"
                    spellcheck="false"
                    prop:value=move || vm.state.with(|s| s.document_text.clone())
                    readonly=move || is_running.get()
                    on:input=move |ev| vm.on_text_changed(event_target_value(&ev))
                ></textarea>
                {move || {
                    vm.state
                        .with(|s| s.is_too_long())
                        .then(|| {
                            view! { <div class="docs-gen__warning">"Code input is too long"</div> }
                        })
                }}
                <button
                    class=button_class
                    disabled=move || is_running.get()
                    on:click=move |_| vm.generate()
                >
                    {move || vm.state.with(|s| s.button_label())}
                </button>
            </div>

            // Output surface
            <div class="docs-gen__output">
                <pre class="docs-gen__code">
                    <code inner_html=move || {
                        vm.state.with(|s| {
                            if s.response_text == RESPONSE_PLACEHOLDER {
                                highlight_code(&s.response_text, Language::Unknown)
                            } else {
                                highlight_code(&s.response_text, s.language)
                            }
                        })
                    }></code>
                </pre>

                <Flex gap=FlexGap::Small>
                    <Show when=move || vm.state.with(|s| s.can_reset())>
                        <Button appearance=ButtonAppearance::Secondary on_click=handle_reset>
                            "Reset"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || !can_export.get())
                        on_click=move |_| vm.copy()
                    >
                        "Copy"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || !can_export.get())
                        on_click=move |_| vm.download()
                    >
                        "Download"
                    </Button>
                    <Show when=move || is_running.get()>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.cancel()>
                            "Cancel"
                        </Button>
                    </Show>
                </Flex>

                {move || {
                    vm.state
                        .with(|s| s.notice.clone())
                        .map(|notice| {
                            view! {
                                <div class="docs-gen__notice" on:click=move |_| vm.dismiss_notice()>
                                    {notice}
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}
