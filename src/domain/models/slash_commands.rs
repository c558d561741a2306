#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    args: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let (prefix, rest) = text.split_once(' ').unwrap_or((text, ""));
        let cmd = SlashCommand {
            command: prefix.to_string(),
            args: rest.trim().to_string(),
        };
        if cmd.is_quit() || cmd.is_load() || cmd.is_reset() || cmd.is_help() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_load(&self) -> bool {
        return ["/l", "/load", "/upload"].contains(&self.command.as_str());
    }

    pub fn is_reset(&self) -> bool {
        return ["/r", "/reset"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    /// Everything after the command as typed, so paths keep their inner
    /// spacing.
    pub fn args_text(&self) -> String {
        return self.args.to_string();
    }
}
