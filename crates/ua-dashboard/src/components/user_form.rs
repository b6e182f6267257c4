//! User form bound to a [`UserDto`]
//!
//! Loads the position list once on mount and renders every field read-only
//! or editable depending on the mode. Edits are reported as [`FieldChange`]
//! values; the owner decides what to do with them.

use leptos::*;
use std::rc::Rc;
use ua_core::{
    load_codes, ApiService, CodesState, FieldChange, FieldErrors, FieldView, FormMode, Notifier,
    PositionView, UserDto, UserField,
};

const INPUT_CLASS: &str = "mt-1 block w-full px-3 py-2 border rounded-md read-only:bg-gray-50 disabled:bg-gray-50";

#[component]
pub fn UserForm(
    #[prop(into)] user: Signal<UserDto>,
    #[prop(into)] mode: Signal<FormMode>,
    #[prop(optional, into)] errors: Option<Signal<FieldErrors>>,
    api: Rc<dyn ApiService>,
    notifier: Rc<dyn Notifier>,
    #[prop(into)] on_change: Callback<FieldChange>,
) -> impl IntoView {
    let errors = errors.unwrap_or_else(|| Signal::derive(FieldErrors::default));
    let (codes, set_codes) = create_signal(CodesState::NotLoaded);

    // Fetch codes on mount
    create_effect(move |_| {
        let api = Rc::clone(&api);
        let notifier = Rc::clone(&notifier);
        set_codes.set(CodesState::Loading);
        spawn_local(async move {
            let state = load_codes(api.as_ref(), notifier.as_ref()).await;
            set_codes.set(state);
        });
    });

    let emit = move |field: UserField, value: String| {
        if let Some(change) = FieldChange::in_mode(mode.get_untracked(), field, value) {
            on_change.call(change);
        }
    };

    let position = create_memo(move |_| {
        user.with(|user| {
            errors.with(|errors| {
                codes.with(|codes| PositionView::new(user, mode.get(), errors, codes))
            })
        })
    });

    let text_inputs = UserField::TEXT_INPUTS
        .into_iter()
        .map(move |field| {
            let input = create_memo(move |_| {
                user.with(|user| errors.with(|errors| FieldView::new(field, user, mode.get(), errors)))
            });

            view! {
                <FormField field=field error=Signal::derive(move || input.with(|i| i.error.clone()))>
                    <input
                        type=field.input_type()
                        id=field.as_str()
                        name=field.as_str()
                        class=INPUT_CLASS
                        readonly=move || input.with(|i| i.read_only)
                        prop:value=move || input.with(|i| i.value.clone())
                        on:input=move |ev| emit(field, event_target_value(&ev))
                    />
                </FormField>
            }
        })
        .collect_view();

    view! {
        <form class="space-y-4" on:submit=|ev| ev.prevent_default()>
            {text_inputs}

            <FormField
                field=UserField::Code
                error=Signal::derive(move || position.with(|p| p.error.clone()))
            >
                <select
                    id=UserField::Code.as_str()
                    name=UserField::Code.as_str()
                    class=INPUT_CLASS
                    disabled=move || position.with(|p| p.disabled)
                    prop:value=move || position.with(|p| p.value.clone())
                    on:change=move |ev| emit(UserField::Code, event_target_value(&ev))
                >
                    <option value="" disabled=true>"Select a position"</option>
                    <For
                        each=move || position.with(|p| p.options.clone())
                        key=|option| option.value.clone()
                        children=move |option| {
                            let selected = option.clone();
                            view! {
                                <option
                                    value=option.value
                                    selected=move || position.with(|p| p.is_selected(&selected))
                                >
                                    {option.label}
                                </option>
                            }
                        }
                    />
                </select>
                <Show when=move || !codes.with(CodesState::is_settled)>
                    <p class="mt-1 text-sm text-gray-500">"Loading positions..."</p>
                </Show>
                {move || position.with(|p| {
                    p.selected_label.clone().filter(|_| p.disabled).map(|label| view! {
                        <p class="mt-1 text-sm text-gray-600">"Current position: " {label}</p>
                    })
                })}
            </FormField>
        </form>
    }
}

/// Label, control and error line for one field
#[component]
fn FormField(
    field: UserField,
    #[prop(into)] error: Signal<Option<String>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div>
            <label for=field.as_str() class="block text-sm font-medium text-gray-700">
                {field.label()}
            </label>
            {children()}
            {move || error.get().map(|message| view! {
                <p class="mt-1 text-sm text-red-600">{message}</p>
            })}
        </div>
    }
}
