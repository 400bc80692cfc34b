use std::error::Error;
use std::fs;

/// systemd / dbus machine id.
pub fn get_machine_id() -> Result<String, Box<dyn Error>> {
    let id = fs::read_to_string("/etc/machine-id")
        .or_else(|_| fs::read_to_string("/var/lib/dbus/machine-id"))?;
    Ok(id.trim().to_string())
}

/// DMI board serial. Usually readable only by root.
pub fn get_motherboard_id() -> Result<String, Box<dyn Error>> {
    let serial = fs::read_to_string("/sys/devices/virtual/dmi/id/board_serial")?;
    Ok(serial.trim().to_string())
}
