use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::routes::{Contact, Delivery};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Report a problem with your delivery"/>
        <div class="my-0 mx-auto px-8 max-w-3xl text-left">
            <Router>
                <nav class="py-2 px-4 text-lg font-medium h-12 bg-black flex items-center">
                    <a href="/" class="text-white hover:text-green-500 mr-4 font-mono font-bold">"Delivery"</a>
                    <a href="/contact" class="text-white hover:text-green-500 mr-4 font-mono font-bold">"Contact"</a>
                </nav>
                <main>
                    <Routes>
                        <Route path="/" view=Delivery/>
                        <Route path="/contact" view=Contact/>
                        // unknown paths fall back to the delivery form
                        <Route path="/*any" view=Delivery/>
                    </Routes>
                </main>
            </Router>
        </div>
    }
}
