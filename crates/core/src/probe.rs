//! Best-guess description of the visitor's machine for `fastfetch`.
//!
//! [`probe`] is a pure function of [`EnvironmentSignals`]. Every field is a
//! heuristic substring match checked in a fixed priority order, with an
//! "Unknown" fallback. [`EnvironmentSignals::detect`] gathers the signals from
//! the host running the terminal.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Outcome of the optional graphics renderer probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuSignal {
    /// Renderer string reported by the platform
    Renderer(String),
    /// Platform offers no way to ask
    Unavailable,
    /// The probe itself failed
    Failed(String),
}

/// Raw environment signals
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSignals {
    /// Agent string the OS, shell and terminal heuristics run against
    pub user_agent: String,
    /// Platform reported directly by the environment, when it has one
    pub platform_hint: Option<String>,
    pub screen_width: u16,
    pub screen_height: u16,
    /// Bits per pixel
    pub color_depth: u8,
    pub pixel_ratio: f32,
    pub hardware_concurrency: Option<usize>,
    pub timezone: String,
    pub language: String,
    pub languages: Vec<String>,
    /// Time since the session started
    pub uptime: Duration,
    pub gpu: GpuSignal,
}

impl Default for EnvironmentSignals {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            platform_hint: None,
            screen_width: 0,
            screen_height: 0,
            color_depth: 24,
            pixel_ratio: 1.0,
            hardware_concurrency: None,
            timezone: "UTC".to_string(),
            language: "en-US".to_string(),
            languages: Vec::new(),
            uptime: Duration::ZERO,
            gpu: GpuSignal::Unavailable,
        }
    }
}

/// Descriptive snapshot shown in the profile summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub os: String,
    pub kernel: String,
    pub device_type: String,
    pub shell: String,
    pub terminal: String,
    pub platform: String,
    pub resolution: String,
    pub color_depth: String,
    pub pixel_ratio: f32,
    pub cpu: String,
    pub gpu: String,
    pub memory: String,
    pub memory_used: String,
    pub timezone: String,
    pub language: String,
    pub languages: String,
    pub uptime: String,
}

/// Derive a [`DeviceInfo`] from raw signals
pub fn probe(signals: &EnvironmentSignals) -> DeviceInfo {
    let agent = signals.user_agent.as_str();
    let (os, kernel, device_type) = detect_os(agent);
    let (shell, terminal) = detect_shell(agent);

    let languages = if signals.languages.is_empty() {
        signals.language.clone()
    } else {
        signals.languages.join(", ")
    };

    DeviceInfo {
        os: os.to_string(),
        kernel: kernel.to_string(),
        device_type: device_type.to_string(),
        shell,
        terminal,
        platform: detect_platform(signals.platform_hint.as_deref(), agent).to_string(),
        resolution: format!("{}x{}", signals.screen_width, signals.screen_height),
        color_depth: format!("{}-bit", signals.color_depth),
        pixel_ratio: if signals.pixel_ratio > 0.0 { signals.pixel_ratio } else { 1.0 },
        cpu: match signals.hardware_concurrency {
            Some(cores) if cores > 0 => format!("{} cores", cores),
            _ => "Unknown CPU".to_string(),
        },
        gpu: classify_gpu(&signals.gpu),
        memory: "Available".to_string(),
        memory_used: "Available".to_string(),
        timezone: signals.timezone.clone(),
        language: signals.language.clone(),
        languages,
        uptime: format_uptime(signals.uptime),
    }
}

fn detect_platform<'a>(hint: Option<&'a str>, agent: &str) -> &'a str {
    if let Some(hint) = hint.filter(|h| !h.is_empty()) {
        return hint;
    }

    if agent.contains("Windows") {
        "Windows"
    } else if agent.contains("Mac") {
        "macOS"
    } else if agent.contains("Linux") && !agent.contains("Android") {
        "Linux"
    } else if agent.contains("Android") {
        "Android"
    } else if agent.contains("iPhone") {
        "iPhone"
    } else if agent.contains("iPad") {
        "iPad"
    } else {
        "Unknown"
    }
}

fn detect_os(agent: &str) -> (&'static str, &'static str, &'static str) {
    if agent.contains("Windows") {
        ("Windows", "NT", "Desktop")
    } else if agent.contains("iPad") {
        ("iOS", "XNU", "Tablet")
    } else if agent.contains("iPhone") {
        ("iOS", "XNU", "Mobile")
    } else if agent.contains("Mac OS X") {
        ("macOS", "Darwin", "Desktop")
    } else if agent.contains("Android") {
        ("Android", "Linux", "Mobile")
    } else if agent.contains("Linux") {
        let os = if agent.contains("Ubuntu") {
            "Ubuntu"
        } else if agent.contains("Fedora") {
            "Fedora"
        } else if agent.contains("CentOS") {
            "CentOS"
        } else {
            "Linux"
        };
        (os, "Linux", "Desktop")
    } else {
        ("Unknown OS", "Unknown", "Desktop")
    }
}

fn detect_shell(agent: &str) -> (String, String) {
    let browser = if agent.contains("Chrome") && !agent.contains("Edg") {
        Some(("Chrome", "Chromium Engine"))
    } else if agent.contains("Firefox") {
        Some(("Firefox", "Gecko Engine"))
    } else if agent.contains("Safari") && !agent.contains("Chrome") {
        Some(("Safari", "WebKit Engine"))
    } else if agent.contains("Edg") {
        Some(("Edge", "Chromium Engine"))
    } else {
        None
    };

    if let Some((shell, terminal)) = browser {
        return (shell.to_string(), terminal.to_string());
    }

    let token = |prefix: &str| {
        agent
            .split_whitespace()
            .find_map(|t| t.strip_prefix(prefix))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    (
        token("shell/").unwrap_or_else(|| "Unknown".to_string()),
        token("term/").unwrap_or_else(|| "Unknown".to_string()),
    )
}

fn classify_gpu(signal: &GpuSignal) -> String {
    match signal {
        GpuSignal::Renderer(renderer) => {
            if renderer.contains("Intel") && renderer.contains("Graphics") {
                "Intel Graphics [Integrated]"
            } else if renderer.contains("NVIDIA") || renderer.contains("RTX") || renderer.contains("GTX") {
                "NVIDIA Graphics [Discrete]"
            } else if renderer.contains("AMD") || renderer.contains("Radeon") {
                "AMD Graphics [Discrete]"
            } else {
                "Graphics Card Available"
            }
        }
        GpuSignal::Unavailable => "Unknown GPU",
        GpuSignal::Failed(reason) => {
            tracing::debug!(%reason, "gpu probe failed");
            "Unknown GPU"
        }
    }
    .to_string()
}

fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

impl EnvironmentSignals {
    /// Collect signals from the host
    ///
    /// Screen dimensions are left at zero; the terminal front end fills them in
    /// with [`EnvironmentSignals::with_screen`].
    pub fn detect(started: Instant) -> Self {
        let shell = std::env::var("SHELL")
            .ok()
            .and_then(|s| s.rsplit('/').next().map(str::to_string))
            .filter(|s| !s.is_empty());
        let terminal = std::env::var("TERM_PROGRAM")
            .ok()
            .or_else(|| std::env::var("TERM").ok())
            .filter(|s| !s.is_empty());

        let mut agent = format!("termfolio/{} ({})", env!("CARGO_PKG_VERSION"), os_marker());
        if let Some(shell) = shell {
            agent.push_str(&format!(" shell/{}", shell));
        }
        if let Some(terminal) = terminal {
            agent.push_str(&format!(" term/{}", terminal));
        }

        let language = std::env::var("LC_ALL")
            .ok()
            .or_else(|| std::env::var("LANG").ok())
            .filter(|l| !l.is_empty() && l != "C" && l != "POSIX")
            .map(|l| normalize_locale(&l))
            .unwrap_or_else(|| "en-US".to_string());
        let languages = std::env::var("LANGUAGE")
            .map(|l| l.split(':').filter(|s| !s.is_empty()).map(normalize_locale).collect())
            .unwrap_or_default();

        let timezone = std::env::var("TZ")
            .ok()
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| format!("UTC{}", chrono::Local::now().offset()));

        let color_depth = match std::env::var("COLORTERM").as_deref() {
            Ok("truecolor") | Ok("24bit") => 24,
            _ if std::env::var("TERM").is_ok_and(|t| t.contains("256color")) => 8,
            _ => 4,
        };

        let signals = Self {
            user_agent: agent,
            platform_hint: None,
            screen_width: 0,
            screen_height: 0,
            color_depth,
            pixel_ratio: 1.0,
            hardware_concurrency: Some(num_cpus::get()),
            timezone,
            language,
            languages,
            uptime: started.elapsed(),
            gpu: detect_gpu(),
        };
        tracing::debug!(agent = %signals.user_agent, "collected environment signals");
        signals
    }

    /// Record the visible screen size (terminal cells)
    pub fn with_screen(mut self, width: u16, height: u16) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Refresh the uptime from the session start
    pub fn with_uptime(mut self, uptime: Duration) -> Self {
        self.uptime = uptime;
        self
    }
}

fn normalize_locale(raw: &str) -> String {
    raw.split('.').next().unwrap_or(raw).replace('_', "-")
}

fn os_marker() -> String {
    match std::env::consts::OS {
        "windows" => "Windows NT".to_string(),
        "macos" => "Macintosh; Intel Mac OS X".to_string(),
        "android" => "Linux; Android".to_string(),
        "ios" => "iPhone; CPU iPhone OS".to_string(),
        "linux" => match linux_distribution() {
            Some(distro) => format!("X11; Linux {}; {}", std::env::consts::ARCH, distro),
            None => format!("X11; Linux {}", std::env::consts::ARCH),
        },
        other => other.to_string(),
    }
}

fn linux_distribution() -> Option<String> {
    let release = std::fs::read_to_string("/etc/os-release").ok()?;
    release
        .lines()
        .find_map(|line| line.strip_prefix("NAME="))
        .map(|name| name.trim_matches('"').to_string())
}

#[cfg(target_os = "linux")]
fn detect_gpu() -> GpuSignal {
    match std::fs::read_to_string("/sys/class/drm/card0/device/vendor") {
        Ok(vendor) => GpuSignal::Renderer(renderer_for_vendor(vendor.trim())),
        Err(e) => GpuSignal::Failed(e.to_string()),
    }
}

#[cfg(not(target_os = "linux"))]
fn detect_gpu() -> GpuSignal {
    GpuSignal::Unavailable
}

/// Map a PCI vendor id to a renderer-like string
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn renderer_for_vendor(vendor: &str) -> String {
    match vendor.to_ascii_lowercase().as_str() {
        "0x8086" => "Intel Graphics".to_string(),
        "0x10de" => "NVIDIA".to_string(),
        "0x1002" => "AMD Radeon".to_string(),
        other => format!("PCI vendor {}", other),
    }
}
