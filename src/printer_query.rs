//! Consultas CIM (Win32_Printer / Win32_PrinterDriver) vía PowerShell.
//!
//! Si una consulta falla, el llamador recibe listas vacías: el listado
//! simplemente queda en blanco y el usuario puede refrescar. El renombrado
//! sí reporta el error, porque el usuario lo pidió explícitamente.

use crate::model::{PrinterDriver, PrinterInfo};
use serde_json::Value;

#[cfg(windows)]
use std::process::Command;

const PRINTERS_SCRIPT: &str = r#"
$ErrorActionPreference = 'Stop'
$list = @(Get-CimInstance -ClassName Win32_Printer |
    Select-Object Name, PortName, DriverName, Default)
ConvertTo-Json -InputObject $list -Compress -Depth 3
"#;

const DRIVERS_SCRIPT: &str = r#"
$ErrorActionPreference = 'Stop'
$list = @(Get-CimInstance -ClassName Win32_PrinterDriver |
    Select-Object Name, Version, SupportedPlatform, InfName, DriverPath, DataFile, ConfigFile)
ConvertTo-Json -InputObject $list -Compress -Depth 3
"#;

/// Impresoras instaladas, cada una unida con su driver por nombre.
/// Incluye también los puertos centinela; el filtrado es cosa de la UI.
pub fn get_printers(drivers: &[PrinterDriver]) -> Vec<PrinterInfo> {
    match run_powershell(PRINTERS_SCRIPT) {
        Ok(json) => decode_printers(&json, drivers),
        Err(_) => Vec::new(),
    }
}

pub fn get_installed_drivers() -> Vec<PrinterDriver> {
    match run_powershell(DRIVERS_SCRIPT) {
        Ok(json) => decode_drivers(&json),
        Err(_) => Vec::new(),
    }
}

/// Renombra una impresora por su nombre actual usando el método CIM
/// `RenamePrinter` de `Win32_Printer`.
pub fn rename_printer(current_name: &str, new_name: &str) -> Result<(), String> {
    let script = format!(
        r#"
$ErrorActionPreference = 'Stop'
$printer = Get-CimInstance -ClassName Win32_Printer | Where-Object Name -eq '{current}'
if (-not $printer) {{ throw 'impresora no encontrada' }}
$result = Invoke-CimMethod -InputObject $printer -MethodName RenamePrinter -Arguments @{{ NewPrinterName = '{new}' }}
if ($result.ReturnValue -ne 0) {{ throw $result.ReturnValue }}
"#,
        current = ps_quote(current_name),
        new = ps_quote(new_name),
    );

    run_powershell(&script).map(|_| ())
}

#[cfg(windows)]
fn run_powershell(script: &str) -> Result<String, String> {
    use std::os::windows::process::CommandExt;
    use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;

    // CREATE_NO_WINDOW: sin consola parpadeando delante de la ventana egui.
    let output = Command::new("powershell")
        .args([
            "-NoProfile",
            "-ExecutionPolicy",
            "Bypass",
            "-Command",
            script,
        ])
        .creation_flags(CREATE_NO_WINDOW)
        .output()
        .map_err(|e| format!("No se pudo ejecutar PowerShell: {e}"))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("PowerShell terminó con error:\n{stderr}"))
    }
}

#[cfg(not(windows))]
fn run_powershell(_script: &str) -> Result<String, String> {
    Err("Consultas de impresoras solo soportadas en Windows".to_string())
}

/// Literal PowerShell entre comillas simples: la comilla simple se duplica.
fn ps_quote(s: &str) -> String {
    s.replace('\'', "''")
}

fn decode_printers(json: &str, drivers: &[PrinterDriver]) -> Vec<PrinterInfo> {
    instances(json)
        .iter()
        .map(|obj| {
            let driver_name = prop_str(obj, "DriverName");
            let driver_details = drivers.iter().find(|d| d.name == driver_name).cloned();
            PrinterInfo {
                is_default: prop_bool(obj, "Default"),
                port_name: prop_str(obj, "PortName"),
                display_name: prop_str(obj, "Name"),
                driver_name,
                driver_details,
            }
        })
        .collect()
}

fn decode_drivers(json: &str) -> Vec<PrinterDriver> {
    instances(json)
        .iter()
        .map(|obj| PrinterDriver {
            name: prop_str(obj, "Name"),
            version: prop_str(obj, "Version"),
            environment: prop_str(obj, "SupportedPlatform"),
            inf_name: prop_str(obj, "InfName"),
            driver_path: prop_str(obj, "DriverPath"),
            data_file: prop_str(obj, "DataFile"),
            config_file: prop_str(obj, "ConfigFile"),
        })
        .collect()
}

/// `ConvertTo-Json` entrega un arreglo, pero versiones viejas de PowerShell
/// desenvuelven el arreglo de un solo elemento. Aceptamos ambas formas.
fn instances(json: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(json.trim()) {
        Ok(Value::Array(items)) => items,
        Ok(obj @ Value::Object(_)) => vec![obj],
        _ => Vec::new(),
    }
}

/// Lectura tolerante de una propiedad CIM: ausente, null o de otro tipo
/// degrada a cadena vacía (números se formatean, p.ej. `Version`).
fn prop_str(obj: &Value, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn prop_bool(obj: &Value, key: &str) -> bool {
    matches!(obj.get(key), Some(Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_printer_array_and_joins_driver() {
        let drivers = vec![PrinterDriver {
            name: "HP Universal Printing PCL 6".to_string(),
            inf_name: r"C:\Windows\INF\oem12.inf".to_string(),
            ..Default::default()
        }];
        let json = r#"[
            {"Name":"HP LaserJet","PortName":"USB001","DriverName":"HP Universal Printing PCL 6","Default":true},
            {"Name":"Fax","PortName":"nul:","DriverName":"Microsoft Shared Fax Driver","Default":false}
        ]"#;

        let printers = decode_printers(json, &drivers);
        assert_eq!(printers.len(), 2);
        assert!(printers[0].is_default);
        assert_eq!(printers[0].port_name, "USB001");
        assert_eq!(
            printers[0].driver_details.as_ref().map(|d| d.inf_name.as_str()),
            Some(r"C:\Windows\INF\oem12.inf")
        );
        // El Fax no tiene driver instalado que coincida.
        assert!(printers[1].driver_details.is_none());
    }

    #[test]
    fn accepts_single_object_json() {
        let printers = decode_printers(
            r#"{"Name":"Solo","PortName":"COM1","DriverName":"X","Default":false}"#,
            &[],
        );
        assert_eq!(printers.len(), 1);
        assert_eq!(printers[0].display_name, "Solo");
    }

    #[test]
    fn missing_and_null_properties_degrade_to_empty() {
        let drivers = decode_drivers(
            r#"[{"Name":"Generic / Text Only","Version":3,"InfName":null}]"#,
        );
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].name, "Generic / Text Only");
        assert_eq!(drivers[0].version, "3");
        assert_eq!(drivers[0].inf_name, "");
        assert_eq!(drivers[0].environment, "");
    }

    #[test]
    fn garbage_json_decodes_to_empty_list() {
        assert!(decode_printers("no soy json", &[]).is_empty());
        assert!(decode_drivers("").is_empty());
    }

    #[test]
    fn ps_quote_doubles_single_quotes() {
        assert_eq!(ps_quote("Bob's printer"), "Bob''s printer");
        assert_eq!(ps_quote("sin comillas"), "sin comillas");
    }
}
