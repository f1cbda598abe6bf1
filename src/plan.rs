//! Import plan construction
//!
//! Builds the strictly ordered list of orchestrate invocations for one run:
//! tool purge, connection reset, per-environment configuration, tool import.

use crate::config::Config;
use crate::orchestrate::OrchestrateCommand;
use std::path::Path;

/// The ordered command list for one import run
#[derive(Debug, Clone)]
pub struct ImportPlan {
    steps: Vec<OrchestrateCommand>,
}

impl ImportPlan {
    /// Build the plan from configuration
    pub fn from_config(config: &Config) -> Self {
        let app = &config.connection.app_name;
        let mut steps = Vec::new();

        if config.run.purge_tools {
            steps.push(OrchestrateCommand::tools_remove_all());
        }

        steps.push(OrchestrateCommand::connections_remove(app));
        steps.push(OrchestrateCommand::connections_add(app));

        for env in &config.connection.environments {
            steps.push(OrchestrateCommand::connections_configure(
                app,
                env,
                &config.connection.auth_type,
                &config.connection.auth_kind,
            ));
        }

        steps.push(OrchestrateCommand::tools_import(
            &config.import.kind,
            &config.import.tool_file,
            &config.import.requirements,
            app,
        ));

        Self { steps }
    }

    pub fn steps(&self) -> &[OrchestrateCommand] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render the numbered plan for display
    pub fn render(&self, app_name: &str, bin: &Path) -> String {
        let mut out = format!("Import plan for '{}':\n", app_name);
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("  #{}: {}\n", i + 1, step.render(bin)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_plan_is_six_steps_in_order() {
        let config = Config::default();
        let plan = ImportPlan::from_config(&config);

        let argv: Vec<String> = plan
            .steps()
            .iter()
            .map(|s| s.args.join(" "))
            .collect();

        assert_eq!(
            argv,
            vec![
                "tools remove -n",
                "connections remove -a groq_search",
                "connections add -a groq_search",
                "connections configure -a groq_search --env draft -t team -k bearer",
                "connections configure -a groq_search --env live -t team -k bearer",
                "tools import -k python -f search_tool.py -r requirements.txt -a groq_search",
            ]
        );
    }

    #[test]
    fn test_no_step_repeats() {
        let config = Config::default();
        let plan = ImportPlan::from_config(&config);

        for (i, a) in plan.steps().iter().enumerate() {
            for b in plan.steps().iter().skip(i + 1) {
                assert_ne!(a.args, b.args);
            }
        }
    }

    #[test]
    fn test_app_name_propagates_uniformly() {
        let mut config = Config::default();
        config.connection.app_name = "web_lookup".to_string();
        let plan = ImportPlan::from_config(&config);

        let carrying_app: Vec<_> = plan
            .steps()
            .iter()
            .filter(|s| s.args.contains(&"-a".to_string()))
            .collect();
        assert_eq!(carrying_app.len(), 5);

        for step in carrying_app {
            let pos = step.args.iter().position(|a| a == "-a").unwrap();
            assert_eq!(step.args[pos + 1], "web_lookup");
            assert!(!step.args.contains(&"groq_search".to_string()));
        }
    }

    #[test]
    fn test_purge_disabled_drops_only_first_step() {
        let mut config = Config::default();
        config.run.purge_tools = false;
        let plan = ImportPlan::from_config(&config);

        assert_eq!(plan.len(), 5);
        assert_eq!(
            plan.steps()[0].args,
            vec!["connections", "remove", "-a", "groq_search"]
        );
        assert!(!plan
            .steps()
            .iter()
            .any(|s| s.args.starts_with(&["tools".to_string(), "remove".to_string()])));
    }

    #[test]
    fn test_environment_order_is_preserved() {
        let mut config = Config::default();
        config.connection.environments =
            vec!["dev".to_string(), "staging".to_string(), "prod".to_string()];
        let plan = ImportPlan::from_config(&config);

        let envs: Vec<&String> = plan
            .steps()
            .iter()
            .filter(|s| s.args.first().map(String::as_str) == Some("connections")
                && s.args.get(1).map(String::as_str) == Some("configure"))
            .map(|s| {
                let pos = s.args.iter().position(|a| a == "--env").unwrap();
                &s.args[pos + 1]
            })
            .collect();

        assert_eq!(envs, vec!["dev", "staging", "prod"]);
        assert_eq!(plan.len(), 7);
    }

    #[test]
    fn test_render_numbers_every_step() {
        let config = Config::default();
        let plan = ImportPlan::from_config(&config);
        let rendered = plan.render("groq_search", &PathBuf::from("orchestrate"));

        assert!(rendered.starts_with("Import plan for 'groq_search':"));
        assert!(rendered.contains("#1: orchestrate tools remove -n"));
        assert!(rendered.contains(
            "#6: orchestrate tools import -k python -f search_tool.py -r requirements.txt -a groq_search"
        ));
    }
}
