use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::row_config::OFFSET_BUFFER;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub gutters: GutterConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// How section headers behave while the viewport scrolls past them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Headers scroll with the content, no overlay.
    #[default]
    Default,
    /// One header pinned at the top, pushed off by the next one.
    Locking,
    /// Passed headers accumulate in a top stack; upcoming ones wait in a bottom gutter.
    Stacking,
}

impl HeaderMode {
    /// Whether lock positions account for previously stacked headers.
    pub fn stacks_headers(&self) -> bool {
        matches!(self, HeaderMode::Stacking)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Rows per partition
    #[serde(default = "default_offset_buffer")]
    pub offset_buffer: usize,
    #[serde(default)]
    pub header_mode: HeaderMode,
    #[serde(default = "default_scrollbar_size")]
    pub vertical_scrollbar_width: f64,
    #[serde(default = "default_scrollbar_size")]
    pub horizontal_scrollbar_height: f64,
    /// Width of row content excluding gutters; `None` disables horizontal scrolling
    #[serde(default)]
    pub content_width: Option<f64>,
    /// Milliseconds after the last scroll before `is_scrolling` clears
    #[serde(default = "default_scroll_idle_ms")]
    pub scroll_idle_ms: u64,
    /// Vertical delta, in viewport heights per applied update, that counts as fast scrolling
    #[serde(default = "default_fast_scroll_threshold")]
    pub fast_scroll_threshold: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            offset_buffer: default_offset_buffer(),
            header_mode: HeaderMode::default(),
            vertical_scrollbar_width: default_scrollbar_size(),
            horizontal_scrollbar_height: default_scrollbar_size(),
            content_width: None,
            scroll_idle_ms: default_scroll_idle_ms(),
            fast_scroll_threshold: default_fast_scroll_threshold(),
        }
    }
}

/// Easing curve applied to animation progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump at the end
    None,
    Linear,
    /// Ease-out cubic
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate programmatic scrolls
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Frame budget for animation ticks
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    #[serde(default)]
    pub easing: EasingType,
    /// Maximum applied wheel updates per second
    #[serde(default = "default_animation_fps")]
    pub wheel_throttle_fps: u32,
    /// Rows scrolled per key press in hosts that scroll by keyboard
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
            wheel_throttle_fps: default_animation_fps(),
            scroll_lines: default_scroll_lines(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GutterSideConfig {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub handle_width: f64,
    #[serde(default)]
    pub min_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GutterConfig {
    #[serde(default)]
    pub left: GutterSideConfig,
    #[serde(default)]
    pub right: GutterSideConfig,
    /// Apply resized widths to the controller's own layout instead of leaving it to the host
    #[serde(default = "default_true")]
    pub apply_resize_to_layout: bool,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            left: GutterSideConfig::default(),
            right: GutterSideConfig::default(),
            apply_resize_to_layout: default_true(),
        }
    }
}

impl GutterConfig {
    /// Total horizontal space taken by gutters and their handles.
    pub fn total_width(&self) -> f64 {
        self.left.width + self.left.handle_width + self.right.handle_width + self.right.width
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Event poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_offset_buffer() -> usize {
    OFFSET_BUFFER
}

fn default_scrollbar_size() -> f64 {
    15.0
}

fn default_scroll_idle_ms() -> u64 {
    150
}

fn default_fast_scroll_threshold() -> f64 {
    1.0
}

fn default_animation_duration() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    120
}

fn default_scroll_lines() -> u16 {
    3
}

fn default_tick_rate() -> u64 {
    16
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollkit/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollkit")
            .join("config.toml")
    }
}
