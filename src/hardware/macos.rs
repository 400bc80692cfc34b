use std::error::Error;
use std::process::Command;

/// CPU brand string via `sysctl machdep.cpu.brand_string`.
pub fn get_cpu_id() -> Result<String, Box<dyn Error>> {
    let output = Command::new("sysctl")
        .args(["-n", "machdep.cpu.brand_string"])
        .output()?;

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        Ok("macos_cpu_unknown".to_string())
    } else {
        Ok(value)
    }
}

/// Platform serial number from `ioreg`.
pub fn get_motherboard_id() -> Result<String, Box<dyn Error>> {
    let output = Command::new("ioreg")
        .args(["-rd1", "-c", "IOPlatformExpertDevice"])
        .output()?;

    let result = String::from_utf8_lossy(&output.stdout);
    let serial = result
        .lines()
        .find(|line| line.contains("IOPlatformSerialNumber"))
        .and_then(|line| line.split('=').nth(1))
        .map(|value| value.trim().trim_matches('"').to_string())
        .unwrap_or_default();

    if serial.is_empty() {
        Ok("macos_mb_unknown".to_string())
    } else {
        Ok(serial)
    }
}
