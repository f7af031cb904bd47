use super::{AggregateId, EntityMetadata};

/// Корень агрегата: идентификатор, метаданные и имя для сообщений
pub trait AggregateRoot {
    type Id: AggregateId;

    fn id(&self) -> Self::Id;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Имя элемента для сообщений пользователю
    fn element_name() -> &'static str;

    /// Вызывается перед каждой записью в хранилище
    fn record_write(&mut self) {
        self.metadata_mut().record_write();
    }
}
