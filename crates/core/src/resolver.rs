//! Target and toolchain resolution
//!
//! Precedence, highest first: explicit override (`SetTarget`/`SetToolchain`),
//! project-local `.mbed`, user-global `.mbed`, the value mbed itself reports,
//! and finally an interactive prompt.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::{
    command::MbedCommand,
    config::{ConfigFiles, SUPPORTED_TOOLCHAINS, SessionConfig},
    editor::Editor,
    error::{Error, Result},
    tool::ExternalTool,
};

/// mbed prints this when asked for a value nobody configured
pub const NOT_SET_MARKER: &str = "not set";

static ANNOTATION_RE: OnceLock<Regex> = OnceLock::new();

/// Which half of the configuration is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Target,
    Toolchain,
}

impl Field {
    fn subcommand(self) -> &'static str {
        match self {
            Field::Target => "target",
            Field::Toolchain => "toolchain",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    files: ConfigFiles,
}

impl ConfigResolver {
    pub fn new(files: ConfigFiles) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &ConfigFiles {
        &self.files
    }

    /// Make sure `config` holds a target and a toolchain.
    ///
    /// Without `force`, an already resolved config is returned as is and
    /// nothing external is touched. With `force`, both values are queried
    /// again; a failed re-query keeps the previous value.
    pub fn resolve<T, E>(
        &self,
        config: &mut SessionConfig,
        tool: &T,
        editor: &mut E,
        force: bool,
    ) -> Result<SessionConfig>
    where
        T: ExternalTool + ?Sized,
        E: Editor + ?Sized,
    {
        if !force && config.is_resolved() {
            return Ok(config.clone());
        }

        self.seed(config);

        for field in [Field::Target, Field::Toolchain] {
            let current = match field {
                Field::Target => &config.target,
                Field::Toolchain => &config.toolchain,
            };
            if !force && !current.is_empty() {
                continue;
            }

            let value = match query(tool, field)? {
                Some(value) => value,
                None => match field {
                    Field::Target => prompt_target(tool, editor)?,
                    Field::Toolchain => prompt_toolchain(editor)?,
                },
            };

            info!("Resolved {}: {}", field.subcommand(), value);
            match field {
                Field::Target => config.target = value,
                Field::Toolchain => config.toolchain = value,
            }
        }

        Ok(config.clone())
    }

    /// Fill unset values from the config files. Unreadable files are skipped.
    pub fn seed(&self, config: &mut SessionConfig) {
        let defaults = self.files.load();

        if config.target.is_empty() {
            if let Some(target) = defaults.target {
                debug!("Seeded target from config file: {}", target);
                config.target = target;
            }
        }
        if config.toolchain.is_empty() {
            if let Some(toolchain) = defaults.toolchain {
                debug!("Seeded toolchain from config file: {}", toolchain);
                config.toolchain = toolchain;
            }
        }
    }
}

/// Ask mbed for its current value. `None` means mbed does not know one.
fn query<T: ExternalTool + ?Sized>(tool: &T, field: Field) -> Result<Option<String>> {
    let output = tool.run(&MbedCommand::new(field.subcommand()))?;
    let text = output.combined();

    if !output.succeeded() || text.contains(NOT_SET_MARKER) {
        debug!(
            "`{}` query failed (exit {}): {}",
            field.subcommand(),
            output.exit_code,
            text.trim()
        );
        return Ok(None);
    }

    let value = clean_response(&text);
    Ok((!value.is_empty()).then_some(value))
}

/// Strip a leading `[mbed] ` style annotation and trailing newlines
pub fn clean_response(raw: &str) -> String {
    let annotation =
        ANNOTATION_RE.get_or_init(|| Regex::new(r"^\[[^\]]*\]\s*").expect("valid annotation regex"));
    annotation
        .replace(raw, "")
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

/// Prompt for a target and check it against `mbed target -S`.
///
/// The check is a plain substring match on the listing, so short answers can
/// match part of an unrelated name. An empty answer never matches.
fn prompt_target<T, E>(tool: &T, editor: &mut E) -> Result<String>
where
    T: ExternalTool + ?Sized,
    E: Editor + ?Sized,
{
    let answer = editor
        .prompt("Target: ")
        .map(|a| a.trim().to_string())
        .unwrap_or_default();

    let listing = tool.run(&MbedCommand::new("target").arg("-S"))?;
    if !listing.succeeded() {
        return Err(Error::ConfigQueryFailed {
            what: "supported targets",
            reason: listing.combined().trim().to_string(),
        });
    }

    let supported = listing.combined();
    if !answer.is_empty() && supported.contains(answer.as_str()) {
        return Ok(answer);
    }

    editor.show_info("Supported targets", &supported);
    Err(Error::ValidationFailed(if answer.is_empty() {
        "No target given".to_string()
    } else {
        format!("`{answer}` is not a supported target")
    }))
}

fn prompt_toolchain<E: Editor + ?Sized>(editor: &mut E) -> Result<String> {
    let question = format!("Toolchain ({}): ", SUPPORTED_TOOLCHAINS.join(", "));
    let answer = editor
        .prompt(&question)
        .map(|a| a.trim().to_string())
        .unwrap_or_default();

    if SUPPORTED_TOOLCHAINS.contains(&answer.as_str()) {
        Ok(answer)
    } else {
        Err(Error::ValidationFailed(format!(
            "`{answer}` is not a supported toolchain, expected one of {}",
            SUPPORTED_TOOLCHAINS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MemoryEditor;
    use crate::tool::ToolOutput;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Answers keyed by the full argument list; records every call
    #[derive(Default)]
    struct ScriptedTool {
        responses: HashMap<String, ToolOutput>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedTool {
        fn respond(mut self, args: &str, output: ToolOutput) -> Self {
            self.responses.insert(args.to_string(), output);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl ExternalTool for ScriptedTool {
        fn run(&self, command: &MbedCommand) -> Result<ToolOutput> {
            let key = command.args.join(" ");
            self.calls.borrow_mut().push(key.clone());
            Ok(self
                .responses
                .get(&key)
                .cloned()
                .unwrap_or_else(|| ToolOutput::failure(1, "unexpected command")))
        }

        fn program(&self) -> &str {
            "mbed"
        }
    }

    fn resolver_without_files() -> ConfigResolver {
        ConfigResolver::new(ConfigFiles::default())
    }

    #[test]
    fn test_clean_response() {
        assert_eq!(clean_response("[mbed] K64F\n"), "K64F");
        assert_eq!(clean_response("GCC_ARM\r\n\n"), "GCC_ARM");
        assert_eq!(clean_response("NUCLEO_F401RE"), "NUCLEO_F401RE");
    }

    #[test]
    fn test_queries_tool_and_strips_annotation() {
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::success("[mbed] K64F\n"))
            .respond("toolchain", ToolOutput::success("[mbed] GCC_ARM\n"));
        let mut editor = MemoryEditor::new();
        let mut config = SessionConfig::default();

        let resolved = resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap();

        assert_eq!(resolved, SessionConfig::new("K64F", "GCC_ARM"));
        assert_eq!(config, resolved);
        assert!(editor.prompts.is_empty());
    }

    #[test]
    fn test_resolved_config_is_not_queried_again() {
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::success("[mbed] K64F\n"))
            .respond("toolchain", ToolOutput::success("[mbed] ARM\n"));
        let mut editor = MemoryEditor::new();
        let mut config = SessionConfig::default();
        let resolver = resolver_without_files();

        resolver.resolve(&mut config, &tool, &mut editor, false).unwrap();
        let calls_after_first = tool.calls().len();
        resolver.resolve(&mut config, &tool, &mut editor, false).unwrap();

        assert_eq!(calls_after_first, 2);
        assert_eq!(tool.calls().len(), calls_after_first);
    }

    #[test]
    fn test_force_requeries_resolved_config() {
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::success("[mbed] DISCO_L475VG\n"))
            .respond("toolchain", ToolOutput::success("[mbed] IAR\n"));
        let mut editor = MemoryEditor::new();
        let mut config = SessionConfig::new("K64F", "ARM");

        resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, true)
            .unwrap();

        assert_eq!(tool.calls(), vec!["target", "toolchain"]);
        assert_eq!(config, SessionConfig::new("DISCO_L475VG", "IAR"));
    }

    #[test]
    fn test_not_set_falls_back_to_prompt() {
        let tool = ScriptedTool::default()
            .respond(
                "target",
                ToolOutput::success("[mbed] No default target is not set\n"),
            )
            .respond("target -S", ToolOutput::success("NUCLEO_F401RE\nDISCO_L475VG\n"))
            .respond("toolchain", ToolOutput::failure(255, "[mbed] ERROR"));
        let mut editor = MemoryEditor::new().with_answers(["NUCLEO_F401RE", "GCC_ARM"]);
        let mut config = SessionConfig::default();

        resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap();

        assert_eq!(config, SessionConfig::new("NUCLEO_F401RE", "GCC_ARM"));
        assert_eq!(editor.prompts.len(), 2);
        assert!(editor.info.is_empty());
    }

    #[test]
    fn test_unknown_target_shows_list_and_stays_unset() {
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::failure(1, ""))
            .respond("target -S", ToolOutput::success("NUCLEO_F401RE\nDISCO_L475VG"));
        let mut editor = MemoryEditor::new().with_answers(["Z"]);
        let mut config = SessionConfig::default();

        let err = resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap_err();

        assert!(matches!(err, Error::ValidationFailed(_)));
        assert_eq!(config.target, "");
        assert_eq!(
            editor.info,
            vec![(
                "Supported targets".to_string(),
                "NUCLEO_F401RE\nDISCO_L475VG".to_string()
            )]
        );
        // Toolchain resolution never started
        assert!(!tool.calls().contains(&"toolchain".to_string()));
    }

    #[test]
    fn test_single_letter_target_matches_by_substring() {
        // Known imprecision: "N" is part of NUCLEO_F401RE, so it is accepted
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::failure(1, ""))
            .respond("target -S", ToolOutput::success("NUCLEO_F401RE\nDISCO_L475VG"))
            .respond("toolchain", ToolOutput::success("ARM"));
        let mut editor = MemoryEditor::new().with_answers(["N"]);
        let mut config = SessionConfig::default();

        resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap();

        assert_eq!(config.target, "N");
    }

    #[test]
    fn test_dismissed_target_prompt_fails_validation() {
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::failure(1, ""))
            .respond("target -S", ToolOutput::success("K64F"));
        let mut editor = MemoryEditor::new();
        let mut config = SessionConfig::default();

        let err = resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap_err();

        assert!(matches!(err, Error::ValidationFailed(_)));
        assert_eq!(editor.info.len(), 1);
    }

    #[test]
    fn test_failed_target_listing_is_query_error() {
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::failure(1, ""))
            .respond("target -S", ToolOutput::failure(2, "network unreachable"));
        let mut editor = MemoryEditor::new().with_answers(["K64F"]);
        let mut config = SessionConfig::default();

        let err = resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap_err();

        assert!(matches!(err, Error::ConfigQueryFailed { .. }));
    }

    #[test]
    fn test_unknown_toolchain_is_rejected() {
        let tool = ScriptedTool::default()
            .respond("target", ToolOutput::success("K64F"))
            .respond("toolchain", ToolOutput::failure(1, ""));
        let mut editor = MemoryEditor::new().with_answers(["CLANG"]);
        let mut config = SessionConfig::default();

        let err = resolver_without_files()
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap_err();

        assert!(matches!(err, Error::ValidationFailed(_)));
        assert_eq!(config.target, "K64F");
        assert_eq!(config.toolchain, "");
    }

    #[test]
    fn test_seeded_toolchain_still_queries_target() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join(".mbed");
        fs::write(&local, "TOOLCHAIN=GCC_ARM\n").unwrap();

        let tool = ScriptedTool::default().respond("target", ToolOutput::success("[mbed] K64F\n"));
        let mut editor = MemoryEditor::new();
        let mut config = SessionConfig::default();

        ConfigResolver::new(ConfigFiles::new(None, Some(local)))
            .resolve(&mut config, &tool, &mut editor, false)
            .unwrap();

        assert_eq!(config, SessionConfig::new("K64F", "GCC_ARM"));
        assert_eq!(tool.calls(), vec!["target"]);
    }

    #[test]
    fn test_seeding_does_not_override_memory() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join(".mbed");
        fs::write(&local, "TARGET=K64F\nTOOLCHAIN=ARM\n").unwrap();

        let resolver = ConfigResolver::new(ConfigFiles::new(None, Some(local)));
        let mut config = SessionConfig::new("DISCO_L475VG", "");
        resolver.seed(&mut config);

        assert_eq!(config, SessionConfig::new("DISCO_L475VG", "ARM"));
    }

    #[test]
    fn test_unreadable_global_config_does_not_hide_local() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.mbed");
        let local = temp_dir.path().join(".mbed");
        fs::write(&global, [0xff, 0xfe, 0xfd]).unwrap();
        fs::write(&local, "TARGET=K64F\nTOOLCHAIN=ARM\n").unwrap();

        let resolver = ConfigResolver::new(ConfigFiles::new(Some(global), Some(local)));
        let mut config = SessionConfig::default();
        resolver.seed(&mut config);

        assert_eq!(config, SessionConfig::new("K64F", "ARM"));
    }

    #[test]
    fn test_tool_not_found_is_not_recovered() {
        struct Missing;
        impl ExternalTool for Missing {
            fn run(&self, _command: &MbedCommand) -> Result<ToolOutput> {
                Err(Error::ToolNotFound("mbed".to_string()))
            }
            fn program(&self) -> &str {
                "mbed"
            }
        }

        let mut editor = MemoryEditor::new().with_answers(["K64F"]);
        let mut config = SessionConfig::default();
        let err = resolver_without_files()
            .resolve(&mut config, &Missing, &mut editor, false)
            .unwrap_err();

        assert!(err.is_fatal());
        assert!(editor.prompts.is_empty());
    }
}
