//! Отложенный вызов: срабатывает только последний из серии вызовов.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Счётчик поколений. Каждый новый вызов делает предыдущие устаревшими.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn bump(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[derive(Clone, Copy)]
pub struct Debouncer {
    delay_ms: u32,
    generation: StoredValue<Generation>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: StoredValue::new(Generation::default()),
        }
    }

    /// Выполнить `f` через `delay_ms`, если за это время не было нового вызова
    pub fn call(&self, f: impl FnOnce() + 'static) {
        let Some(ticket) = self.generation.try_update_value(|g| g.bump()) else {
            return;
        };
        let generation = self.generation;
        let delay = self.delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            // Компонент мог быть уже удалён вместе со счётчиком
            let current = generation
                .try_with_value(|g| g.is_current(ticket))
                .unwrap_or(false);
            if current {
                f();
            }
        });
    }

    /// Отменить ожидающий вызов
    pub fn cancel(&self) {
        self.generation.try_update_value(|g| {
            g.bump();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_ticket_is_current() {
        let mut generation = Generation::default();
        let first = generation.bump();
        let second = generation.bump();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));

        generation.bump();
        assert!(!generation.is_current(second));
    }
}
