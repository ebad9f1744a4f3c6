//! Chat commands that open the language menu.

/// Accepted spellings, compared after lowercasing.
pub const LANGUAGE_COMMANDS: [&str; 3] = ["/lang", "/language", "/语言"];

/// Whether `text` is exactly one of [`LANGUAGE_COMMANDS`], ignoring case.
///
/// In groups clients append the bot's username (`/lang@polyglot_bot`); that
/// suffix is accepted only when it names this bot.
pub fn is_language_command(text: &str, bot_username: &str) -> bool {
    let lowered = text.to_lowercase();
    let command = match lowered.split_once('@') {
        Some((command, mention)) if mention == bot_username.to_lowercase() => command,
        Some(_) => return false,
        None => lowered.as_str(),
    };
    LANGUAGE_COMMANDS.contains(&command)
}

/// Whether a message should start the language menu instead of reaching
/// the other handlers.
pub fn should_trigger(text: Option<&str>, bot_username: &str, armed: bool) -> bool {
    armed && text.is_some_and(|t| is_language_command(t, bot_username))
}
