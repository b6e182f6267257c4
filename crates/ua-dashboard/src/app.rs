//! Main application component

use leptos::*;
use leptos_router::*;
use std::rc::Rc;
use ua_core::config::DEFAULT_BASE_URL;
use ua_core::{ApiConfig, ApiService, HttpApiService};
use crate::pages::*;
use crate::components::*;

/// Backend and notification ports shared with the pages
#[derive(Clone)]
pub struct Ports {
    pub api: Rc<dyn ApiService>,
    pub toasts: ToastStore,
}

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::with_base_url(
        option_env!("USER_ADMIN_API_URL").unwrap_or(DEFAULT_BASE_URL),
    );

    let api = match HttpApiService::new(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Invalid API configuration: {}", e);
            return view! {
                <p class="p-8 text-red-600">"Cannot reach the backend: " {e.to_string()}</p>
            }
            .into_view();
        }
    };
    let backend = api.base_url().to_string();
    tracing::info!("Using API at {}", backend);

    let toasts = ToastStore::new();
    provide_context(Ports {
        api: Rc::new(api),
        toasts,
    });

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100">
                <Nav backend=backend/>
                <ToastHost store=toasts/>
                <main class="container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=|| view! { <Redirect path="/users/new"/> }/>
                        <Route path="/users/:id" view=UserPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
    .into_view()
}
