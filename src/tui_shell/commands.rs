#[derive(Clone, Copy, Debug)]
pub(super) struct CommandDef {
    pub(super) name: &'static str,
    pub(super) aliases: &'static [&'static str],
    pub(super) usage: &'static str,
    pub(super) help: &'static str,
}

pub(super) fn command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help [command]",
            help: "Show help",
        },
        CommandDef {
            name: "refresh",
            aliases: &["r"],
            usage: "refresh",
            help: "Re-fetch the tree and the ingestion dashboard",
        },
        CommandDef {
            name: "open",
            aliases: &["o"],
            usage: "open [path]",
            help: "Open a file in a new tab (default: selected node)",
        },
        CommandDef {
            name: "close",
            aliases: &[],
            usage: "close",
            help: "Close the active tab",
        },
        CommandDef {
            name: "tab",
            aliases: &[],
            usage: "tab <n>",
            help: "Focus tab n (1-based)",
        },
        CommandDef {
            name: "mkdir",
            aliases: &[],
            usage: "mkdir <path>",
            help: "Create a folder",
        },
        CommandDef {
            name: "touch",
            aliases: &[],
            usage: "touch <path.json|path.txt>",
            help: "Create an empty .json or .txt file",
        },
        CommandDef {
            name: "mv",
            aliases: &["rename"],
            usage: "mv <old> <new>",
            help: "Rename a file or folder",
        },
        CommandDef {
            name: "rm",
            aliases: &["delete"],
            usage: "rm <path>",
            help: "Delete a file or folder (asks first)",
        },
        CommandDef {
            name: "upload",
            aliases: &[],
            usage: "upload <local-file> [folder]",
            help: "Upload a local file (default folder: selected)",
        },
        CommandDef {
            name: "url",
            aliases: &[],
            usage: "url [path]",
            help: "Show a download URL",
        },
        CommandDef {
            name: "ask",
            aliases: &[],
            usage: "ask <question>",
            help: "Ask the assistant",
        },
        CommandDef {
            name: "chat",
            aliases: &[],
            usage: "chat",
            help: "Toggle the assistant tab",
        },
        CommandDef {
            name: "pick",
            aliases: &[],
            usage: "pick <sync|wipe> <id|ALL>",
            help: "Toggle a document in a bulk selection",
        },
        CommandDef {
            name: "clear",
            aliases: &[],
            usage: "clear <sync|wipe>",
            help: "Clear a bulk selection",
        },
        CommandDef {
            name: "candidates",
            aliases: &["cand"],
            usage: "candidates <sync|wipe>",
            help: "List documents eligible for a bulk action",
        },
        CommandDef {
            name: "sync",
            aliases: &[],
            usage: "sync [ingest|retry|resume]",
            help: "Submit the sync selection",
        },
        CommandDef {
            name: "wipe",
            aliases: &[],
            usage: "wipe",
            help: "Submit the wipe selection (asks first)",
        },
        CommandDef {
            name: "status",
            aliases: &["st"],
            usage: "status <document-id>",
            help: "Show ingestion status details",
        },
        CommandDef {
            name: "time",
            aliases: &[],
            usage: "time",
            help: "Toggle relative/absolute timestamps",
        },
        CommandDef {
            name: "quit",
            aliases: &["q"],
            usage: "quit",
            help: "Exit",
        },
    ]
}

/// Canonical command name for `word`, if it names one.
pub(super) fn resolve(word: &str) -> Option<&'static str> {
    let word = word.trim_start_matches('/');
    command_defs()
        .into_iter()
        .find(|d| d.name == word || d.aliases.contains(&word))
        .map(|d| d.name)
}

/// Splits a command line on whitespace; double quotes group words.
pub(super) fn split_args(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut quoted = false;
    let mut has_token = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                has_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if has_token {
                    out.push(std::mem::take(&mut cur));
                    has_token = false;
                }
            }
            c => {
                cur.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        out.push(cur);
    }
    out
}

#[cfg(test)]
#[path = "../tests/tui_shell/commands_tests.rs"]
mod tests;
