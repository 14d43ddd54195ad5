//! Property-based tests for the history cap invariant

use proptest::prelude::*;
use stanza::history::{parse_entries, serialize_entries, CommandsHistory, History, MemoryHistory};
use tempfile::TempDir;

fn command_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ;]{0,10}"
}

proptest! {
    #[test]
    fn test_memory_history_keeps_last_entries(
        max in 1usize..8,
        commands in prop::collection::vec(command_strategy(), 0..20),
    ) {
        let mut history = MemoryHistory::new(max);
        for cmd in &commands {
            history.append_command(cmd).unwrap();
        }
        let expected: Vec<String> = commands
            .iter()
            .skip(commands.len().saturating_sub(max))
            .cloned()
            .collect();
        prop_assert_eq!(history.commands(), expected);
    }

    #[test]
    fn test_file_history_survives_reload(
        max in 1usize..6,
        commands in prop::collection::vec(command_strategy(), 1..10),
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history");
        let mut history = CommandsHistory::open(&path, max).unwrap();
        for cmd in &commands {
            history.append_command(cmd).unwrap();
        }
        prop_assert!(history.commands().len() <= max);

        // Reload reads the trailing `2 * max` lines so every entry is in view.
        let reloaded = CommandsHistory::open(&path, max * 2).unwrap();
        prop_assert_eq!(reloaded.commands(), history.commands());
    }

    #[test]
    fn test_serialized_entries_parse_back(
        commands in prop::collection::vec(command_strategy(), 1..10),
    ) {
        let mut history = MemoryHistory::new(100);
        for cmd in &commands {
            history.append_command(cmd).unwrap();
        }
        let entries = parse_entries(
            &serialize_entries(&parse_entries(&commands.join("\n"), 100)),
            100,
        );
        let parsed: Vec<String> = entries.into_iter().map(|e| e.command).collect();
        prop_assert_eq!(parsed, history.commands());
    }
}
