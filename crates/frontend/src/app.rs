use crate::usecases::u101_file_qa::FileQaPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div style="max-width: 860px; margin: 0 auto; height: 100vh; display: flex; flex-direction: column; padding: 16px; box-sizing: border-box;">
            <header style="margin-bottom: 12px;">
                <h1 style="font-size: 22px; font-weight: bold; margin: 0;">"File Q&A"</h1>
                <p style="margin: 4px 0 0; color: var(--colorNeutralForeground3); font-size: 13px;">
                    "Upload a document and ask questions about its content"
                </p>
            </header>
            <FileQaPage />
        </div>
    }
}
