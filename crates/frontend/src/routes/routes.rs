use crate::domain::a001_grid_configuration::ui::details::GridConfigurationDetails;
use crate::domain::a001_grid_configuration::ui::list::GridConfigurationList;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <Shell>
            {move || match ctx.page.get() {
                Page::GridList => view! { <GridConfigurationList /> }.into_any(),
                Page::GridDetails { id } => view! { <GridConfigurationDetails id=id /> }.into_any(),
            }}
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
