//! Utility functions and helpers for the Fibonacci benchmark
//!
//! Host information for the banner and handing the rendered chart to the
//! platform image viewer.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{BenchError, Result};

/// Human-readable OS name and version
pub fn os_description() -> String {
    let info = os_info::get();
    format!("{} {} ({})", info.os_type(), info.version(), info.bitness())
}

/// CPU brand string, when the CPU reports one
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub fn cpu_description() -> Option<String> {
    raw_cpuid::CpuId::new()
        .get_processor_brand_string()
        .map(|brand| brand.as_str().trim().to_string())
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
pub fn cpu_description() -> Option<String> {
    None
}

fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    }
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open an image with the desktop's default viewer
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let display_error = |reason: String| BenchError::Display {
        path: path.display().to_string(),
        reason,
    };

    let status = viewer_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| display_error(e.to_string()))?;

    if !status.success() {
        return Err(display_error(format!("viewer exited with {}", status)));
    }
    Ok(())
}
