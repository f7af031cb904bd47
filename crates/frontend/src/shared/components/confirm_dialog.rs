//! Диалог подтверждения поверх стека модальных окон

use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::{Button, ButtonAppearance};

/// Показать вопрос. Закрытие окна без ответа равносильно отмене.
pub fn confirm_dialog(
    modal_stack: ModalStackService,
    message: String,
    on_confirm: impl Fn() + Send + Sync + 'static,
    on_cancel: impl Fn() + Send + Sync + 'static,
) {
    let on_confirm = Arc::new(on_confirm);
    let on_cancel: Arc<dyn Fn() + Send + Sync> = Arc::new(on_cancel);

    modal_stack.push_with_frame(
        Some("max-width: min(480px, 95vw);".to_string()),
        Some(on_cancel.clone()),
        move |handle| {
            let message = message.clone();
            let on_confirm = on_confirm.clone();
            let on_cancel = on_cancel.clone();
            let handle_yes = handle.clone();
            let handle_no = handle.clone();
            view! {
                <div class="confirm-dialog">
                    <div class="confirm-dialog__body">
                        {icon("alert-circle")}
                        <p>{message}</p>
                    </div>
                    <div class="confirm-dialog__actions">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| {
                                handle_no.close();
                                on_cancel();
                            }
                        >
                            "Отмена"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                handle_yes.close();
                                on_confirm();
                            }
                        >
                            "Продолжить"
                        </Button>
                    </div>
                </div>
            }
            .into_any()
        },
    );
}
