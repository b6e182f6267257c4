//! Toast notifications

use leptos::*;
use std::time::Duration;
use ua_core::{Notifier, ToastLevel, ToastQueue};

const AUTO_DISMISS: Duration = Duration::from_secs(4);

/// Signal-backed [`Notifier`] rendered by [`ToastHost`]
#[derive(Clone, Copy)]
pub struct ToastStore {
    queue: RwSignal<ToastQueue>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self {
            queue: create_rw_signal(ToastQueue::new()),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|queue| {
            queue.dismiss(id);
        });
    }

    fn push(&self, level: ToastLevel, message: &str) {
        let mut id = 0;
        self.queue.update(|queue| id = queue.push(level, message));
        tracing::debug!("Toast {} [{}]: {}", id, level.as_str(), message);

        // Errors stay until dismissed
        if level != ToastLevel::Error {
            let store = *self;
            set_timeout(move || store.dismiss(id), AUTO_DISMISS);
        }
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastStore {
    fn info(&self, message: &str) {
        self.push(ToastLevel::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastLevel::Error, message);
    }

    fn remove_all(&self) {
        self.queue.update(ToastQueue::clear);
    }
}

#[component]
pub fn ToastHost(store: ToastStore) -> impl IntoView {
    view! {
        <div class="fixed top-4 right-4 z-50 space-y-2 w-80">
            <For
                each=move || store.queue.with(|queue| queue.iter().cloned().collect::<Vec<_>>())
                key=|toast| toast.id
                children=move |toast| {
                    let (bg, text) = match toast.level {
                        ToastLevel::Info => ("bg-blue-50 border-blue-200", "text-blue-800"),
                        ToastLevel::Success => ("bg-green-50 border-green-200", "text-green-800"),
                        ToastLevel::Error => ("bg-red-50 border-red-200", "text-red-800"),
                    };
                    let id = toast.id;

                    view! {
                        <div class=format!("p-4 rounded-lg border shadow flex justify-between items-start {}", bg)>
                            <span class=format!("text-sm {}", text)>{toast.message}</span>
                            <button
                                class="ml-4 text-gray-400 hover:text-gray-600"
                                on:click=move |_| store.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
