//! Raw key names to normalized commands
//!
//! Pointer and touch presses always map to `Command::PrimaryAction`; the
//! driver handles those directly.

use crate::game::Command;

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        " " | "ArrowUp" | "w" | "W" | "Enter" => Some(Command::PrimaryAction),
        "r" | "R" => Some(Command::Reset),
        "m" | "M" => Some(Command::ToggleMute),
        "c" | "C" => Some(Command::ClearBest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys() {
        for key in [" ", "ArrowUp", "w", "Enter"] {
            assert_eq!(command_for_key(key), Some(Command::PrimaryAction));
        }
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(command_for_key("R"), Some(Command::Reset));
        assert_eq!(command_for_key("m"), Some(Command::ToggleMute));
        assert_eq!(command_for_key("c"), Some(Command::ClearBest));
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(command_for_key("Shift"), None);
        assert_eq!(command_for_key("x"), None);
    }
}
