// List the tasks of the `file` namespace

use edwh_files_compression::registrations;

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::plugin::{ENTRY_POINT, ENTRY_POINT_GROUP, NAMESPACE, TASKS};

pub struct TasksCommand;

impl TasksCommand {
    pub fn new() -> Self {
        Self
    }

    /// Human-readable listing of tasks and available archive formats
    pub fn render(&self, style: &OutputStyle) -> String {
        let mut lines = vec![style.header(&format!(
            "Namespace '{NAMESPACE}' ({ENTRY_POINT_GROUP} → {ENTRY_POINT})"
        ))];

        for task in TASKS {
            let aliases = if task.aliases.is_empty() {
                String::new()
            } else {
                format!(" (aliases: {})", task.aliases.join(", "))
            };
            lines.push(format!("  {:<24}{}{}", task.qualified_name(), task.about, aliases));
        }

        lines.push(String::new());
        lines.push(style.header("Compression formats (best first)"));
        for registration in registrations(None) {
            lines.push(format!(
                "  {:<6} {:<6} priority {}",
                registration.extension,
                registration.backend().name(),
                registration.priority
            ));
        }
        lines.join("\n")
    }
}

impl Default for TasksCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Command for TasksCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.render(&OutputStyle::default()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_task() {
        let rendered = TasksCommand::new().render(&OutputStyle::plain());
        for task in TASKS {
            assert!(rendered.contains(&task.qualified_name()));
        }
        assert!(rendered.contains("aliases: add"));
        assert!(rendered.contains("zip"));
    }
}
