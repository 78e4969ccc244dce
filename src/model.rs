/// Fila del listado tal como la devuelve `Win32_Printer`, ya unida con su
/// driver instalado (si lo hay).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrinterInfo {
    pub is_default: bool,
    /// Clave única del listado: dos impresoras pueden compartir nombre,
    /// pero no puerto.
    pub port_name: String,
    pub display_name: String,
    pub driver_name: String,
    pub driver_details: Option<PrinterDriver>,
}

/// Registro de `Win32_PrinterDriver`. Todos los campos son opcionales en CIM;
/// los ausentes quedan como cadena vacía.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrinterDriver {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub inf_name: String,
    pub driver_path: String,
    pub data_file: String,
    pub config_file: String,
}

impl PrinterInfo {
    /// Excluye del listado los puertos centinela que Windows usa para
    /// impresoras virtuales sin salida real ("nul:", "PORTPROMPT:") y los
    /// puertos en blanco.
    pub fn has_real_port(&self) -> bool {
        let port = self.port_name.trim();
        !port.is_empty() && port != "nul:" && port != "PORTPROMPT:"
    }
}

pub fn port_in_use(printers: &[PrinterInfo], port: &str) -> bool {
    printers.iter().any(|p| p.port_name == port)
}

pub fn name_in_use(printers: &[PrinterInfo], name: &str) -> bool {
    printers.iter().any(|p| p.display_name == name)
}
