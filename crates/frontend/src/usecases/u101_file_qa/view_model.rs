//! File Q&A - View Model

use super::session::Session;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct FileQaVm {
    pub session: RwSignal<Session>,
    pub question: RwSignal<String>,
    pub is_processing: RwSignal<bool>,
    pub drag_active: RwSignal<bool>,
}

impl FileQaVm {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(Session::new()),
            question: RwSignal::new(String::new()),
            is_processing: RwSignal::new(false),
            drag_active: RwSignal::new(false),
        }
    }
}

impl Default for FileQaVm {
    fn default() -> Self {
        Self::new()
    }
}
