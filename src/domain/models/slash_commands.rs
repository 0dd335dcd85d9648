#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() || !args[0].starts_with('/') {
            return None;
        }

        let prefix = args.remove(0).to_lowercase();
        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_next()
            || cmd.is_prev()
            || cmd.is_hint()
            || cmd.is_audio()
            || cmd.is_add()
            || cmd.is_delete()
            || cmd.is_words()
            || cmd.is_past()
            || cmd.is_category()
            || cmd.is_nine()
            || cmd.is_repeat()
            || cmd.is_help()
            || cmd.is_quit()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back together, e.g. a category name with spaces.
    pub fn rest(&self) -> Option<String> {
        if self.args.is_empty() {
            return None;
        }

        return Some(self.args.join(" "));
    }

    pub fn is_next(&self) -> bool {
        return ["/n", "/next"].contains(&self.command.as_str());
    }

    pub fn is_prev(&self) -> bool {
        return ["/p", "/prev"].contains(&self.command.as_str());
    }

    pub fn is_hint(&self) -> bool {
        return ["/i", "/hint"].contains(&self.command.as_str());
    }

    pub fn is_audio(&self) -> bool {
        return ["/a", "/audio"].contains(&self.command.as_str());
    }

    pub fn is_add(&self) -> bool {
        return self.command == "/add";
    }

    pub fn is_delete(&self) -> bool {
        return ["/d", "/delete"].contains(&self.command.as_str());
    }

    pub fn is_words(&self) -> bool {
        return ["/w", "/words"].contains(&self.command.as_str());
    }

    pub fn is_past(&self) -> bool {
        return ["/ed", "/past"].contains(&self.command.as_str());
    }

    pub fn is_category(&self) -> bool {
        return ["/c", "/category"].contains(&self.command.as_str());
    }

    pub fn is_nine(&self) -> bool {
        return ["/9", "/nine"].contains(&self.command.as_str());
    }

    pub fn is_repeat(&self) -> bool {
        return ["/r", "/repeat"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }
}
