//! Navigation component

use leptos::*;

/// Top bar with the user links and the backend the dashboard talks to
#[component]
pub fn Nav(#[prop(into)] backend: String) -> impl IntoView {
    view! {
        <nav class="bg-white shadow">
            <div class="container mx-auto px-4">
                <div class="flex justify-between h-16">
                    <div class="flex items-center">
                        <a href="/" class="text-xl font-bold text-gray-900">
                            "User Admin"
                        </a>
                        <div class="hidden md:flex ml-10 space-x-4">
                            <a href="/users/new" class="text-gray-600 hover:text-gray-900 px-3 py-2">"New User"</a>
                        </div>
                    </div>
                    <div class="flex items-center">
                        <span class="text-sm text-gray-500" title="Backend">{backend}</span>
                    </div>
                </div>
            </div>
        </nav>
    }
}
