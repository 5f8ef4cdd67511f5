/// All user-facing strings shown by the panel
///
/// Strings are stored raw. The view layer escapes them before they are placed
/// into HTML, so they may contain any characters.
#[derive(Debug, Clone)]
pub struct PanelStrings {
    // ==================== Broadcast ====================
    /// Alert shown when the broadcast message is empty
    pub broadcast_empty: &'static str,

    /// Confirmation asked before sending a broadcast
    pub broadcast_confirm: &'static str,

    /// Submit button label while a broadcast is in flight
    pub broadcast_sending: &'static str,

    /// Submit button label when idle
    pub broadcast_submit: &'static str,

    /// Status shown when the broadcast request never got a response
    pub broadcast_network_error: &'static str,

    // ==================== Logs ====================
    /// Placeholder shown while logs are loading
    pub logs_loading: &'static str,

    /// Shown when the server returned an empty log
    pub logs_empty: &'static str,

    /// Prefix for a server-reported logs failure
    pub logs_error_prefix: &'static str,

    /// Prefix for a transport failure while loading logs
    pub logs_network_error_prefix: &'static str,

    // ==================== Translations ====================
    /// Placeholder option of the language selector
    pub language_placeholder: &'static str,

    /// Label shown above every translation field
    pub field_label: &'static str,

    /// Alert shown when the selected language is missing from the loaded set
    pub language_not_found: &'static str,

    /// Alert shown when saving without a selected language
    pub language_not_selected: &'static str,

    /// Confirmation asked before discarding edits
    pub cancel_confirm: &'static str,

    /// Alert shown when the session expired
    pub reauth_required: &'static str,

    /// Prefix for a server-reported load failure
    pub load_error_prefix: &'static str,

    /// Prefix for a transport failure during load
    pub load_network_error_prefix: &'static str,

    /// Prefix for a server-reported save failure
    pub save_error_prefix: &'static str,

    /// Prefix for a transport failure during save
    pub save_network_error_prefix: &'static str,

    /// Save button label when idle
    pub save_submit: &'static str,

    /// Save button label while a save is in flight
    pub save_in_progress: &'static str,

    /// Rejection of a second save while the first is in flight
    pub save_already_running: &'static str,

    /// Shown after a successful save while the restart is pending
    pub restart_pending: &'static str,

    // ==================== Restart ====================
    /// Shown when a restart was requested on its own
    pub restart_done: &'static str,

    /// Shown when the bot restarted after a save
    pub restart_success: &'static str,

    /// Shown when the server refused to restart the bot
    pub restart_failed: &'static str,

    /// Shown when the restart request never got a response
    pub restart_network_failed: &'static str,

    /// Hint appended to every restart failure
    pub restart_manual_hint: &'static str,
}

/// Strings of the panel (the admin interface is Russian-only)
pub static STRINGS: PanelStrings = PanelStrings {
    broadcast_empty: "Введите сообщение",
    broadcast_confirm: "Отправить сообщение всем пользователям?",
    broadcast_sending: "Отправка...",
    broadcast_submit: "🚀 Отправить рассылку",
    broadcast_network_error: "Ошибка сети",

    logs_loading: "Загрузка логов...",
    logs_empty: "Логи пусты",
    logs_error_prefix: "Ошибка: ",
    logs_network_error_prefix: "Ошибка загрузки логов: ",

    language_placeholder: "Выберите язык...",
    field_label: "Перевод для ключа:",
    language_not_found: "Переводы для выбранного языка не найдены",
    language_not_selected: "Язык не выбран",
    cancel_confirm: "Отменить все изменения и вернуть исходные значения?",
    reauth_required: "Требуется повторная авторизация. Обновите страницу.",
    load_error_prefix: "Ошибка загрузки переводов: ",
    load_network_error_prefix: "Ошибка сети при загрузке переводов: ",
    save_error_prefix: "Ошибка: ",
    save_network_error_prefix: "Ошибка сети: ",
    save_submit: "💾 Сохранить",
    save_in_progress: "Сохранение...",
    save_already_running: "Сохранение уже выполняется",
    restart_pending: "🔄 Перезапускаем бота для применения изменений...",

    restart_done: "Бот успешно перезапущен",
    restart_success: "Переводы сохранены\n🎉 Бот успешно перезапущен и загрузил новые переводы!",
    restart_failed: "⚠️ Переводы сохранены, но не удалось перезапустить бота автоматически.",
    restart_network_failed: "⚠️ Переводы сохранены, но произошла ошибка при перезапуске бота.",
    restart_manual_hint: "💡 Попробуйте перезапустить бота вручную.",
};
