pub mod global_context;
pub mod left;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

/// Каркас приложения.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |          Content              |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                <left::Left>
                    <left::sidebar::Sidebar />
                </left::Left>

                <div class="app-main">
                    <div data-zone="center" class="app-center" style="flex: 1; overflow: auto;">
                        {children()}
                    </div>
                </div>
            </div>
        </div>
    }
}
