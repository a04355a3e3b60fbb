use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::history::DEFAULT_ROUTE_PREFIX;
use crate::widgets::dropdown::{MenuAlign, MenuPlacement};
use crate::widgets::hover_glow::{DEFAULT_GLOW_COLOR, DEFAULT_GLOW_RADIUS, HoverGlow};

pub const SETTINGS_DIRECTORY_NAME: &str = "chat-sidebar";
pub const SETTINGS_FILE_NAME: &str = "sidebar.json";
/// Offset between a history row's menu trigger and its overlay.
pub const DEFAULT_HISTORY_MENU_OFFSET: u16 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarSettings {
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
    #[serde(default = "default_menu_align")]
    pub menu_align: MenuAlign,
    #[serde(default = "default_menu_side_offset")]
    pub menu_side_offset: u16,
    #[serde(default = "default_glow_radius")]
    pub glow_radius: f32,
    #[serde(default = "default_glow_color")]
    pub glow_color: String,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            route_prefix: default_route_prefix(),
            menu_align: default_menu_align(),
            menu_side_offset: default_menu_side_offset(),
            glow_radius: default_glow_radius(),
            glow_color: default_glow_color(),
        }
    }
}

impl SidebarSettings {
    pub fn menu_placement(&self) -> MenuPlacement {
        MenuPlacement {
            align: self.menu_align,
            side_offset: self.menu_side_offset,
        }
    }

    pub fn hover_glow(&self) -> HoverGlow {
        HoverGlow::new(self.glow_radius, self.glow_color.clone())
    }

    pub fn normalized(mut self) -> Self {
        let route_prefix = self.route_prefix.trim().trim_end_matches('/');
        self.route_prefix = if route_prefix.is_empty() {
            default_route_prefix()
        } else if route_prefix.starts_with('/') {
            route_prefix.to_string()
        } else {
            format!("/{route_prefix}")
        };

        if !self.glow_radius.is_finite() || self.glow_radius < 0.0 {
            self.glow_radius = default_glow_radius();
        }

        self.glow_color = self.glow_color.trim().to_string();
        if self.glow_color.is_empty() {
            self.glow_color = default_glow_color();
        }

        self
    }
}

pub struct SettingsStore {
    settings: Arc<ArcSwap<SidebarSettings>>,
    config_path: PathBuf,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".chat-sidebar"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let settings = Self::load_from_disk(&config_path);
        Self {
            settings: Arc::new(ArcSwap::from_pointee(settings)),
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> Arc<SidebarSettings> {
        self.settings.load_full()
    }

    pub fn update(&self, settings: SidebarSettings) -> Result<(), SettingsError> {
        let normalized_settings = settings.normalized();
        self.persist(&normalized_settings)?;
        self.settings.store(Arc::new(normalized_settings));
        Ok(())
    }

    fn load_from_disk(path: &Path) -> SidebarSettings {
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using defaults", path);
            return SidebarSettings::default();
        }

        let figment = Figment::from(Serialized::defaults(SidebarSettings::default()))
            .merge(Json::file(path));

        match figment.extract::<SidebarSettings>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                SidebarSettings::default()
            }
        }
    }

    fn persist(&self, settings: &SidebarSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(CreateDirSnafu {
                stage: "create-settings-directory",
                path: parent.to_path_buf(),
            })?;
        }

        let content = serde_json::to_string_pretty(settings).context(SerializeConfigSnafu {
            stage: "serialize-settings-json",
        })?;

        let temp_path = self.config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).context(WriteFileSnafu {
            stage: "write-temporary-settings-file",
            path: temp_path.clone(),
        })?;

        std::fs::rename(&temp_path, &self.config_path).context(RenameTempFileSnafu {
            stage: "rename-temporary-settings-file",
            from: temp_path,
            to: self.config_path.clone(),
        })?;

        tracing::info!("saved settings to {:?}", self.config_path);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to create settings directory at {path:?} on `{stage}`: {source}"))]
    CreateDir {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to serialize settings on `{stage}`: {source}"))]
    SerializeConfig {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to write settings file at {path:?} on `{stage}`: {source}"))]
    WriteFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "failed to replace settings file from {from:?} to {to:?} on `{stage}`: {source}"
    ))]
    RenameTempFile {
        stage: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

fn default_route_prefix() -> String {
    DEFAULT_ROUTE_PREFIX.to_string()
}

fn default_menu_align() -> MenuAlign {
    MenuAlign::Start
}

fn default_menu_side_offset() -> u16 {
    DEFAULT_HISTORY_MENU_OFFSET
}

fn default_glow_radius() -> f32 {
    DEFAULT_GLOW_RADIUS
}

fn default_glow_color() -> String {
    DEFAULT_GLOW_COLOR.to_string()
}
