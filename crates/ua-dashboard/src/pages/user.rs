//! User detail page: owns the record the form edits

use leptos::*;
use leptos_router::*;
use std::rc::Rc;
use ua_core::{
    fetch_user, submit_user, FieldChange, FieldErrors, FormMode, LoadGeneration, Notifier, UserDto,
};
use crate::app::Ports;
use crate::components::UserForm;

const NEW_USER_ID: &str = "new";

#[component]
pub fn UserPage() -> impl IntoView {
    let Ports { api, toasts } = expect_context::<Ports>();
    let notifier: Rc<dyn Notifier> = Rc::new(toasts);

    let params = use_params_map();
    let user_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    // `?mode=edit` opens an existing user straight in edit mode
    let query = use_query_map();
    let requested_mode = move || {
        query.with(|q| q.get("mode").and_then(|m| m.parse::<FormMode>().ok()))
    };

    let (user, set_user) = create_signal(UserDto::default());
    // Last loaded or saved copy, restored on cancel
    let (saved, set_saved) = create_signal(UserDto::default());
    let (mode, set_mode) = create_signal(FormMode::View);
    let (errors, set_errors) = create_signal(FieldErrors::new());
    let (saving, set_saving) = create_signal(false);
    let generation = store_value(LoadGeneration::default());

    // Reload whenever the route id changes
    {
        let api = Rc::clone(&api);
        let notifier = Rc::clone(&notifier);
        create_effect(move |_| {
            let id = user_id();
            let initial_mode = requested_mode().unwrap_or(FormMode::View);
            let mut ticket = 0;
            generation.update_value(|g| ticket = g.begin());
            set_errors.set(FieldErrors::new());

            if id == NEW_USER_ID {
                set_user.set(UserDto::default());
                set_saved.set(UserDto::default());
                set_mode.set(FormMode::Edit);
                return;
            }

            set_mode.set(initial_mode);
            let api = Rc::clone(&api);
            let notifier = Rc::clone(&notifier);
            spawn_local(async move {
                let result = fetch_user(api.as_ref(), &id).await;
                if !generation.with_value(|g| g.is_current(ticket)) {
                    tracing::debug!("Dropping stale load of user {}", id);
                    return;
                }
                match result {
                    Ok(loaded) => {
                        set_saved.set(loaded.clone());
                        set_user.set(loaded);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load user {}: {}", id, e);
                        notifier.error(&e.to_string());
                    }
                }
            });
        });
    }

    let on_change = Callback::new(move |change: FieldChange| {
        set_user.update(|user| *user = change.apply(user));
    });

    let on_toggle = move |_| {
        if mode.get_untracked().is_read_only() {
            toasts.remove_all();
        } else {
            set_user.set(saved.get_untracked());
        }
        set_errors.set(FieldErrors::new());
        set_mode.update(|mode| *mode = mode.toggled());
    };

    let on_save = {
        let api = Rc::clone(&api);
        let notifier = Rc::clone(&notifier);
        move |_| {
            let current = user.get_untracked();
            let validation = current.validate();
            if !validation.is_empty() {
                set_errors.set(validation);
                return;
            }
            set_errors.set(FieldErrors::new());
            set_saving.set(true);

            let api = Rc::clone(&api);
            let notifier = Rc::clone(&notifier);
            let ticket = generation.with_value(LoadGeneration::current);
            spawn_local(async move {
                let stored = submit_user(api.as_ref(), notifier.as_ref(), &current).await;
                // the route may have moved on while the POST was in flight
                if stored && generation.with_value(|g| g.is_current(ticket)) {
                    set_saved.set(current);
                    set_mode.set(FormMode::View);
                }
                set_saving.set(false);
            });
        }
    };

    let title = move || {
        let id = user_id();
        if id == NEW_USER_ID {
            "New User".to_string()
        } else {
            format!("User {}", id)
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-3xl font-bold text-gray-900">{title}</h1>
                <div class="space-x-2">
                    <button
                        class="bg-gray-200 text-gray-800 px-4 py-2 rounded-lg hover:bg-gray-300"
                        on:click=on_toggle
                    >
                        {move || if mode.get().is_read_only() { "Edit" } else { "Cancel" }}
                    </button>
                    <Show when=move || !mode.get().is_read_only()>
                        <button
                            class="bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 disabled:opacity-50"
                            disabled=move || saving.get()
                            on:click=on_save.clone()
                        >
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </Show>
                </div>
            </div>

            <div class="bg-white rounded-lg shadow p-6">
                <UserForm
                    user=user
                    mode=mode
                    errors=errors
                    api=api
                    notifier=notifier
                    on_change=on_change
                />
            </div>
        </div>
    }
}
