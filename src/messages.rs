//! User-facing text shown in the result container.

use crate::error::ViewError;

pub const ENTER_ORDER_ID: &str = "Введите ID заказа";
pub const LOADING: &str = "Загрузка...";
pub const NO_ORDER_DATA: &str = "Нет данных о заказе";
pub const EMPTY_LIST: &str = "(пусто)";
pub const MISSING_VALUE: &str = "-";
pub const MAIN_SECTION_TITLE: &str = "Основная информация";
pub const ERROR_PREFIX: &str = "Ошибка";

pub fn order_heading(id: &str) -> String {
    format!("Заказ #{id}")
}

/// Localized message for a failed presentation. Fetch failures always
/// carry the status code so the user can tell a missing order from a
/// broken backend.
pub fn describe_error(err: &ViewError) -> String {
    match err {
        ViewError::EmptyInput => ENTER_ORDER_ID.to_string(),
        ViewError::Fetch { status } => format!("Заказ не найден: {status}"),
        ViewError::Network { source } => format!("Сеть недоступна: {source}"),
        ViewError::Parse { source } => format!("Некорректный ответ сервера: {source}"),
        ViewError::MissingOrder => NO_ORDER_DATA.to_string(),
    }
}
