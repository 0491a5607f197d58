//! The `file` task namespace.
//!
//! The host task runner discovers plugins through the `edwh.tasks`
//! entry-point group; this table is the Rust-side record of what the `file`
//! entry contributes. Every task here is a subcommand of `edwh-file`, with
//! the same aliases.

/// Entry-point group the host runner scans
pub const ENTRY_POINT_GROUP: &str = "edwh.tasks";

/// Namespace the tasks are registered under
pub const NAMESPACE: &str = "file";

/// Module path registered for the namespace
pub const ENTRY_POINT: &str = "edwh_files_plugin.files_plugin";

/// One task of the namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub about: &'static str,
}

impl TaskSpec {
    /// `file.<name>`
    pub fn qualified_name(&self) -> String {
        format!("{NAMESPACE}.{}", self.name)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

pub const TASKS: &[TaskSpec] = &[
    TaskSpec {
        name: "upload",
        aliases: &["add"],
        about: "Upload a file (directories are packed first)",
    },
    TaskSpec {
        name: "download",
        aliases: &["get"],
        about: "Download a file",
    },
    TaskSpec {
        name: "delete",
        aliases: &["remove"],
        about: "Delete an uploaded file through its deletion URL",
    },
    TaskSpec {
        name: "compress",
        aliases: &[],
        about: "Pack a file or directory into an archive",
    },
    TaskSpec {
        name: "decompress",
        aliases: &[],
        about: "Unpack an archive",
    },
];

/// Look a task up by name, alias, or namespaced form (`file.add`)
pub fn resolve(name: &str) -> Option<&'static TaskSpec> {
    let name = name.trim();
    let bare = match name.split_once('.') {
        Some((namespace, task)) if namespace == NAMESPACE => task,
        Some(_) => return None,
        None => name,
    };
    TASKS.iter().find(|task| task.matches(bare))
}
