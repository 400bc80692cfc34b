use std::error::Error;
use std::process::Command;

fn wmic_value(args: &[&str]) -> Result<String, Box<dyn Error>> {
    let output = Command::new("wmic").args(args).output()?;
    let result = String::from_utf8_lossy(&output.stdout);
    Ok(result.lines().nth(1).unwrap_or("").trim().to_string())
}

pub fn get_cpu_id() -> Result<String, Box<dyn Error>> {
    wmic_value(&["cpu", "get", "ProcessorId"])
}

pub fn get_motherboard_id() -> Result<String, Box<dyn Error>> {
    wmic_value(&["baseboard", "get", "SerialNumber"])
}
