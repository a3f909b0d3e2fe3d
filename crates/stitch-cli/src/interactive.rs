//! Interactive prompts for project setup and component selection.
//!
//! Uses dialoguer for terminal UI prompts.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};

use stitch_core::config::{ProjectConfig, StyleStrategy};
use stitch_core::status::ComponentStatus;

/// Answers collected by the init flow.
#[derive(Debug, Clone)]
pub struct InitAnswers {
    pub component_path: String,
    pub strategy: StyleStrategy,
    pub storybook: bool,
}

/// Prompt for the project setup choices, seeded with defaults.
pub fn init_prompts(defaults: &ProjectConfig) -> Result<InitAnswers> {
    let theme = ColorfulTheme::default();

    let component_path: String = Input::with_theme(&theme)
        .with_prompt("Where should components be installed?")
        .default(defaults.component_path.clone())
        .interact_text()?;

    let strategy_index = Select::with_theme(&theme)
        .with_prompt("How do you want to handle styles?")
        .items(&["Tailwind only", "Tailwind + CSS files"])
        .default(0)
        .interact()?;
    let strategy = if strategy_index == 1 {
        StyleStrategy::TailwindCss
    } else {
        StyleStrategy::TailwindOnly
    };

    let storybook = Confirm::with_theme(&theme)
        .with_prompt("Enable Storybook integration?")
        .default(false)
        .interact()?;

    Ok(InitAnswers {
        component_path,
        strategy,
        storybook,
    })
}

/// Multi-select over registry components, annotated with install state.
pub fn select_components(statuses: &[ComponentStatus]) -> Result<Vec<String>> {
    let labels: Vec<String> = statuses
        .iter()
        .map(|status| {
            if status.installed {
                format!("{} {}", status.name, style("(installed)").dim())
            } else {
                status.name.clone()
            }
        })
        .collect();

    let picks = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select components to add (space to select, enter to confirm)")
        .items(&labels)
        .interact()?;

    Ok(picks
        .into_iter()
        .map(|index| statuses[index].name.clone())
        .collect())
}

/// Yes/no confirmation with a default.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
