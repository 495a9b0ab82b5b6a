use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::step::{
    AwkOptions, CountOptions, CutOptions, GrepOptions, PatternSource, SortOptions, StepKind,
    StepType, TrOptions, WcOptions,
};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Where the user overlay lives unless `--config` names another file.
pub const USER_CONFIG_PATH: &str = "~/.config/pipesmith/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub templates: Templates,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// First stage of every generated command, the one that reads the file.
    pub source: String,
    /// Emit multi-line commands unless a request says otherwise.
    pub format: bool,
    /// Indent of continuation lines in formatted commands.
    pub indent: String,
    pub log_level: String,
    /// Request history file; empty disables it. `~` is expanded.
    pub history_log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: "cat YOUR_FILE.csv".into(),
            format: false,
            indent: "  ".into(),
            log_level: "warn".into(),
            history_log: "~/.local/share/pipesmith/history.log".into(),
        }
    }
}

/// The options each newly added step starts with.
///
/// `uniq` has no options and so no template.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Templates {
    pub cut: CutOptions,
    pub grep: GrepOptions,
    pub sort: SortOptions,
    pub head: CountOptions,
    pub tail: CountOptions,
    pub tr: TrOptions,
    pub wc: WcOptions,
    pub awk: AwkOptions,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            cut: CutOptions {
                fields: "1".into(),
                ..CutOptions::default()
            },
            grep: GrepOptions {
                pattern: PatternSource::Match("search".into()),
                ..GrepOptions::default()
            },
            sort: SortOptions::default(),
            head: CountOptions::default(),
            tail: CountOptions::default(),
            tr: TrOptions::default(),
            wc: WcOptions::default(),
            awk: AwkOptions::default(),
        }
    }
}

impl Templates {
    /// A fresh step of `step_type` built from its template.
    pub fn kind(&self, step_type: StepType) -> StepKind {
        match step_type {
            StepType::Cut => StepKind::Cut(self.cut.clone()),
            StepType::Grep => StepKind::Grep(self.grep.clone()),
            StepType::Sort => StepKind::Sort(self.sort.clone()),
            StepType::Uniq => StepKind::Uniq,
            StepType::Head => StepKind::Head(self.head.clone()),
            StepType::Tail => StepKind::Tail(self.tail.clone()),
            StepType::Tr => StepKind::Tr(self.tr.clone()),
            StepType::Wc => StepKind::Wc(self.wc.clone()),
            StepType::Awk => StepKind::Awk(self.awk.clone()),
        }
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    templates: TemplatesOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    source: Option<String>,
    format: Option<bool>,
    indent: Option<String>,
    log_level: Option<String>,
    history_log: Option<String>,
}

/// A table present here replaces the whole template of that type.
#[derive(Debug, Deserialize, Default)]
struct TemplatesOverlay {
    cut: Option<CutOptions>,
    grep: Option<GrepOptions>,
    sort: Option<SortOptions>,
    head: Option<CountOptions>,
    tail: Option<CountOptions>,
    tr: Option<TrOptions>,
    wc: Option<WcOptions>,
    awk: Option<AwkOptions>,
}

// ── Merge logic ──

fn merge<T>(base: &mut T, overlay: Option<T>) {
    if let Some(v) = overlay {
        *base = v;
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the overlay at `path`, or at [`USER_CONFIG_PATH`] (if it exists)
    ///
    /// Scalars in the overlay override; template tables replace.
    pub fn load(path: Option<&str>) -> Self {
        let mut config = Self::default_config();
        let explicit = path.is_some();
        let path = shellexpand::tilde(path.unwrap_or(USER_CONFIG_PATH)).into_owned();
        if let Some(overlay) = Self::load_overlay(Path::new(&path), explicit) {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Read an overlay file. A missing default file is silent; a missing
    /// explicit file or a parse error is reported and the file ignored.
    fn load_overlay(path: &Path, explicit: bool) -> Option<ConfigOverlay> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if explicit {
                    eprintln!("pipesmith: cannot read {}: {e}", path.display());
                }
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("pipesmith: config parse error in {}: {e}", path.display());
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        merge(&mut self.settings.source, s.source);
        merge(&mut self.settings.format, s.format);
        merge(&mut self.settings.indent, s.indent);
        merge(&mut self.settings.log_level, s.log_level);
        merge(&mut self.settings.history_log, s.history_log);

        let t = overlay.templates;
        merge(&mut self.templates.cut, t.cut);
        merge(&mut self.templates.grep, t.grep);
        merge(&mut self.templates.sort, t.sort);
        merge(&mut self.templates.head, t.head);
        merge(&mut self.templates.tail, t.tail);
        merge(&mut self.templates.tr, t.tr);
        merge(&mut self.templates.wc, t.wc);
        merge(&mut self.templates.awk, t.awk);
    }

    /// The merged configuration as TOML, for `--dump-config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
