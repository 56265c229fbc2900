//! Task categories and the prompt sent to the model for each.

use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    GenerateTestcase,
    GenerateCode,
    GenerateFrameworkSelenium,
    GenerateFrameworkCucumber,
    GenerateApi,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::GenerateTestcase,
        Task::GenerateCode,
        Task::GenerateFrameworkSelenium,
        Task::GenerateFrameworkCucumber,
        Task::GenerateApi,
    ];

    /// Form value used by the task selector
    pub fn key(&self) -> &'static str {
        match self {
            Task::GenerateTestcase => "generate_testcase",
            Task::GenerateCode => "generate_code",
            Task::GenerateFrameworkSelenium => "generate_framework_selenium",
            Task::GenerateFrameworkCucumber => "generate_framework_cucumber",
            Task::GenerateApi => "generate_api",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Task::GenerateTestcase => "Generate test cases",
            Task::GenerateCode => "Generate code",
            Task::GenerateFrameworkSelenium => "Selenium framework",
            Task::GenerateFrameworkCucumber => "Cucumber framework",
            Task::GenerateApi => "API specification",
        }
    }

    /// Instruction placed in front of the user's prompt
    pub fn instruction(&self) -> &'static str {
        match self {
            Task::GenerateTestcase => "Generate test cases for the following input:",
            Task::GenerateCode => "Write code based on this description:",
            Task::GenerateFrameworkSelenium => "Create a Selenium framework structure for:",
            Task::GenerateFrameworkCucumber => "Create a Cucumber framework structure for:",
            Task::GenerateApi => "Design an API specification for:",
        }
    }
}

impl FromStr for Task {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| anyhow!("Unknown task {}", s))
    }
}

/// Build the text sent to the model: the task instruction, the
/// prompt and the uploaded file contents, one per line. An unknown
/// task contributes an empty instruction.
pub fn compose_prompt(task: &str, prompt: &str, file_content: &str) -> String {
    let instruction = match task.parse::<Task>() {
        Ok(task) => task.instruction(),
        Err(e) => {
            tracing::warn!("{}, sending prompt without instruction", e);
            ""
        }
    };
    format!("{}\n{}\n{}", instruction, prompt, file_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_every_task_key() {
        for task in Task::ALL {
            assert_eq!(task.key().parse::<Task>().unwrap(), task);
        }
        assert!("generate_poetry".parse::<Task>().is_err());
    }

    #[test]
    fn it_composes_instruction_prompt_and_file_in_order() {
        let composed = compose_prompt("generate_code", "a fizzbuzz", "fn main() {}");
        assert_eq!(
            composed,
            "Write code based on this description:\na fizzbuzz\nfn main() {}"
        );
    }

    #[test]
    fn it_keeps_the_trailing_line_without_a_file() {
        let composed = compose_prompt("generate_api", "a todo service", "");
        assert_eq!(composed, "Design an API specification for:\na todo service\n");
    }

    #[test]
    fn it_uses_an_empty_instruction_for_unknown_tasks() {
        let composed = compose_prompt("generate_poetry", "roses", "");
        assert_eq!(composed, "\nroses\n");
    }
}
