use serde::{Deserialize, Serialize};

/// Обёртка `{ "data": ... }`, в которой сервис возвращает полезную нагрузку
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}
