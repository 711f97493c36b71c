//! Operator-facing terminal output.

use crate::domain::ReleaseStage;
use crate::error::ReleaseError;
use crate::warning::ReleaseWarning;
use console::style;

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

/// Announce the start of a pipeline stage
pub fn display_stage_start(stage: ReleaseStage, detail: &str) {
    let label = match stage {
        ReleaseStage::Bump => "Bumping",
        ReleaseStage::Commit => "Committing",
        ReleaseStage::Push => "Pushing to remote",
        ReleaseStage::Tag => "Adding tag",
        ReleaseStage::PushTag => "Pushing tag",
    };
    if detail.is_empty() {
        display_status(&format!("{}...", label));
    } else {
        display_status(&format!("{} {}...", label, detail));
    }
}

pub fn display_stage_done(stage: ReleaseStage) {
    display_success(&format!("Finished {}.", stage));
}

/// Lines reported for a failed release. Completed stages are not repeated
/// here; the pipeline already warned about them when the stage failed.
pub fn failure_lines(error: &ReleaseError) -> Vec<String> {
    match error {
        ReleaseError::StageFailed { stage, .. } => vec![
            format!("Release failed at stage '{}'", stage),
            error.root_cause().to_string(),
        ],
        other => vec![other.to_string()],
    }
}

pub fn display_failure(error: &ReleaseError) {
    for line in failure_lines(error) {
        display_error(&line);
    }
}

pub fn display_usage() {
    println!(
        "usage: release [platform] [environment] [app_name] <bump_type=patch|minor|major> --tagname=custom_tag_name"
    );
}

pub fn display_available_apps(apps: &[&str]) {
    println!("{}", style("Registered apps:").bold());
    for app in apps {
        println!("  - {}", app);
    }
}

/// Print the commands a dry run would execute
pub fn display_plan(steps: &[(ReleaseStage, Vec<String>)]) {
    println!("\n{}", style("Dry run - planned commands:").bold());
    for (stage, commands) in steps {
        println!("  {}", style(stage).underlined());
        for command in commands {
            println!("    {}", command);
        }
    }
}

pub fn display_released(tag: &str, app_name: &str) {
    println!(
        "\n{} Released {} for {}\n",
        style("✓").green(),
        style(tag).green().bold(),
        app_name
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failure_reports_stage_and_cause_once() {
        let err = ReleaseError::StageFailed {
            stage: ReleaseStage::Tag,
            completed: vec![ReleaseStage::Bump, ReleaseStage::Commit, ReleaseStage::Push],
            source: Box::new(ReleaseError::external_command(
                "fastlane run add_git_tag",
                Some(1),
                "",
                "tag exists",
            )),
        };

        let lines = failure_lines(&err);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Release failed at stage 'tag'");
        assert!(lines[1].contains("tag exists"));
        assert!(lines.iter().all(|l| !l.contains("commit")));
    }

    #[test]
    fn test_other_failures_are_reported_as_is() {
        let err = ReleaseError::validation("Platform : web not found.");
        assert_eq!(
            failure_lines(&err),
            vec!["Validation error: Platform : web not found.".to_string()]
        );
    }
}
