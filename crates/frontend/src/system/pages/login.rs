use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::{api, context::apply_login, context::use_auth};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Логин без пробелов по краям, пароль как есть
    pub fn credentials(&self) -> Result<(String, String), String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("Введите логин".to_string());
        }
        if self.password.is_empty() {
            return Err("Введите пароль".to_string());
        }
        Ok((username.to_string(), self.password.clone()))
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let form = RwSignal::new(LoginForm::default());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);
    let (_, set_auth_state) = use_auth();

    let submit = move || {
        if submitting.get_untracked() {
            return;
        }
        let (username, password) = match form.with_untracked(|f| f.credentials()) {
            Ok(credentials) => credentials,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            match api::login(username, password).await {
                // Новый AuthState сам переключит приложение на основной каркас
                Ok(response) => apply_login(set_auth_state, response),
                Err(e) => {
                    error.try_set(Some(e));
                }
            }
            submitting.try_set(false);
        });
    };

    view! {
        <div class="login-container">
            <form
                class="login-box"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit();
                }
            >
                <h1>"Shopdesk"</h1>
                <p class="login-box__subtitle">"Конструктор сеток витрины"</p>

                {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

                <div class="form-group">
                    <label for="username">"Логин"</label>
                    <input
                        type="text"
                        id="username"
                        autocomplete="username"
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.username = value);
                        }
                        disabled=move || submitting.get()
                    />
                </div>

                <div class="form-group">
                    <label for="password">"Пароль"</label>
                    <input
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.password = value);
                        }
                        disabled=move || submitting.get()
                    />
                </div>

                <button type="submit" class="button button--primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Вход..." } else { "Войти" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_trim_username() {
        let form = LoginForm {
            username: "  admin ".to_string(),
            password: " secret ".to_string(),
        };
        assert_eq!(
            form.credentials(),
            Ok(("admin".to_string(), " secret ".to_string()))
        );
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let form = LoginForm {
            username: "   ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(form.credentials(), Err("Введите логин".to_string()));

        let form = LoginForm {
            username: "admin".to_string(),
            password: String::new(),
        };
        assert_eq!(form.credentials(), Err("Введите пароль".to_string()));
    }
}
