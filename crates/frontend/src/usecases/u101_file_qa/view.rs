//! File Q&A - View Component

use super::model;
use super::session::{answer_meta_line, ChatRole, EntryBody, ModelChoice, TranscriptEntry};
use super::view_model::FileQaVm;
use crate::shared::format::format_file_size;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[component]
#[allow(non_snake_case)]
pub fn FileQaPage() -> impl IntoView {
    let vm = FileQaVm::new();
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    // Scroll to bottom helper
    let scroll_to_bottom = {
        let messages_container_ref = messages_container_ref.clone();
        move || {
            if let Some(container) = messages_container_ref.get() {
                request_animation_frame(move || {
                    container.set_scroll_top(container.scroll_height());
                });
            }
        }
    };

    // One selection path for the picker and the drop target: take files[0],
    // ignore the rest, then upload immediately.
    let handle_files = {
        let scroll_to_bottom = scroll_to_bottom.clone();
        move |file_list: Option<web_sys::FileList>| {
            let Some(list) = file_list else { return };
            let Some(file) = list.get(0) else { return };

            let mut session = vm.session.get();
            let ticket = session.select_file(file.name(), file.size() as u64);
            vm.session.set(session);

            vm.is_processing.set(true);
            let scroll_to_bottom = scroll_to_bottom.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = model::upload_file(&file).await;
                let mut session = vm.session.get();
                match outcome {
                    Ok(response) => {
                        if !session.upload_succeeded(ticket, response.data) {
                            log::debug!("dropping upload result for a superseded selection");
                        }
                    }
                    Err(message) => {
                        log::error!("upload failed: {}", message);
                        session.upload_failed(ticket, &message);
                    }
                }
                vm.session.set(session);
                vm.is_processing.set(false);
                scroll_to_bottom();
            });
        }
    };
    let handle_files_on_change = handle_files.clone();
    let handle_files_on_drop = handle_files.clone();

    // Submit handler - using Callback so the keydown and click paths share it
    let handle_ask = Callback::new({
        let scroll_to_bottom = scroll_to_bottom.clone();
        move |_: ()| {
            let input = vm.question.get();

            let mut session = vm.session.get();
            let request = session.submit_question(&input);
            vm.session.set(session);
            scroll_to_bottom();

            let Some(request) = request else { return };
            vm.question.set(String::new());

            vm.is_processing.set(true);
            let scroll_to_bottom = scroll_to_bottom.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = model::ask(&request).await;
                let mut session = vm.session.get();
                match outcome {
                    Ok(response) => session.ask_succeeded(response),
                    Err(message) => {
                        log::error!("ask failed: {}", message);
                        session.ask_failed(&message);
                    }
                }
                vm.session.set(session);
                vm.is_processing.set(false);
                scroll_to_bottom();
            });
        }
    });

    view! {
        <div style="flex: 1; display: flex; flex-direction: column; min-height: 0;">
            // Drop target
            <div
                class="drop-area"
                class:highlight=move || vm.drag_active.get()
                style=move || {
                    let border = if vm.drag_active.get() {
                        "var(--colorBrandStroke1, #4f8ff7)"
                    } else {
                        "var(--colorNeutralStroke2, #c7c7c7)"
                    };
                    format!(
                        "border: 2px dashed {}; border-radius: 10px; padding: 24px; text-align: center; cursor: pointer; margin-bottom: 8px;",
                        border
                    )
                }
                on:click=move |_| {
                    if let Some(window) = web_sys::window() {
                        if let Some(document) = window.document() {
                            if let Some(input) = document.get_element_by_id("file-qa-input") {
                                if let Ok(input) = input.dyn_into::<web_sys::HtmlElement>() {
                                    input.click();
                                }
                            }
                        }
                    }
                }
                on:dragenter=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    vm.drag_active.set(true);
                }
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    vm.drag_active.set(true);
                }
                on:dragleave=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    vm.drag_active.set(false);
                }
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    vm.drag_active.set(false);
                    handle_files_on_drop(ev.data_transfer().and_then(|dt| dt.files()));
                }
            >
                <p style="margin: 0; font-size: 15px;">
                    "Drag & drop a file here, or click to browse"
                </p>
                <p style="margin: 6px 0 0; font-size: 12px; color: var(--colorNeutralForeground3);">
                    ".txt, .pdf, .csv and .json files are supported"
                </p>
            </div>

            <input
                type="file"
                accept=".txt,.pdf,.csv,.json"
                style="display: none;"
                id="file-qa-input"
                on:change=move |ev: web_sys::Event| {
                    let input = ev
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
                    if let Some(input) = input {
                        handle_files_on_change(input.files());
                        // allow re-selecting the same file
                        input.set_value("");
                    }
                }
            />

            // File info label
            {move || {
                vm.session
                    .with(|s| s.file().map(|f| (f.name.clone(), f.size)))
                    .map(|(name, size)| {
                        view! {
                            <div style="margin-bottom: 8px; font-size: 13px;">
                                "Selected file: "
                                <strong>{name}</strong>
                                {format!(" ({})", format_file_size(size))}
                            </div>
                        }
                    })
            }}

            // Messages area
            <div
                node_ref=messages_container_ref
                class="chat-messages"
                style="flex: 1; overflow-y: auto; display: flex; flex-direction: column; gap: 12px; margin-bottom: 12px; padding: 12px; background: var(--colorNeutralBackground1); border: 1px solid var(--colorNeutralStroke2); border-radius: 8px;"
            >
                <For
                    each=move || vm.session.with(|s| s.transcript().to_vec())
                    key=|entry| entry.id
                    let:entry
                >
                    <TranscriptEntryView entry=entry />
                </For>
            </div>

            // Input area
            <Flex style="gap: 8px; align-items: center;">
                <label style="display: flex; align-items: center; gap: 6px; font-size: 13px; white-space: nowrap; cursor: pointer;">
                    <input
                        type="checkbox"
                        prop:checked=move || vm.session.with(|s| s.model().use_openai())
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            let choice = if checked {
                                ModelChoice::OpenAi
                            } else {
                                ModelChoice::HuggingFace
                            };
                            let mut session = vm.session.get();
                            session.set_model(choice);
                            vm.session.set(session);
                            scroll_to_bottom();
                        }
                    />
                    {move || vm.session.with(|s| s.model().label())}
                </label>

                <input
                    type="text"
                    placeholder="Ask a question about your file..."
                    style="flex: 1; padding: 8px 12px; border: 1px solid var(--colorNeutralStroke2); border-radius: 6px; font-size: 14px;"
                    prop:value=move || vm.question.get()
                    on:input=move |ev| vm.question.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            handle_ask.run(());
                        }
                    }
                />

                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=vm.is_processing
                    on_click=move |_| handle_ask.run(())
                >
                    {move || if vm.is_processing.get() { " Processing..." } else { " Ask" }}
                </Button>
            </Flex>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn TranscriptEntryView(entry: TranscriptEntry) -> impl IntoView {
    let class = format!("message {}-message", entry.role.as_str());
    let style = bubble_style(entry.role);
    match entry.body {
        EntryBody::Text(text) => view! {
            <div class=class style=style>
                <div style="white-space: pre-wrap;">{text}</div>
            </div>
        }
        .into_any(),
        EntryBody::Answer(response) => {
            let meta = answer_meta_line(&response);
            view! {
                <div class=class style=style>
                    <div style="white-space: pre-wrap;">{response.answer.clone()}</div>
                    <div style="font-size: 11px; opacity: 0.7; margin-top: 6px;">{meta}</div>
                </div>
            }
            .into_any()
        }
    }
}

fn bubble_style(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => {
            "align-self: flex-end; max-width: 70%; background: var(--colorBrandBackground2, #dce8ff); padding: 10px 14px; border-radius: 12px;"
        }
        ChatRole::Assistant => {
            "align-self: flex-start; max-width: 70%; background: var(--colorNeutralBackground2, #f2f2f2); padding: 10px 14px; border-radius: 12px;"
        }
        ChatRole::System => {
            "align-self: center; max-width: 80%; color: var(--colorNeutralForeground3, #777); font-size: 12px; font-style: italic;"
        }
    }
}
