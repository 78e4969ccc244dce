use crate::model::{name_in_use, port_in_use, PrinterDriver, PrinterInfo};
use crate::{native, printer_query, printui};
use eframe::egui;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Estado del diálogo de alta. El combo de drivers mezcla los drivers
/// instalados (consulta CIM) con los .inf que el usuario cargó a mano.
struct AddDialog {
    set_default: bool,
    port_name: String,
    display_name: String,
    drivers: Vec<PrinterDriver>,
    extra_infs: Vec<(String, PathBuf)>, // (nombre de archivo, ruta completa)
    selected: usize,
}

impl AddDialog {
    fn new(drivers: Vec<PrinterDriver>) -> Self {
        Self {
            set_default: false,
            port_name: String::new(),
            display_name: String::new(),
            drivers,
            extra_infs: Vec::new(),
            selected: 0,
        }
    }

    fn option_count(&self) -> usize {
        self.drivers.len() + self.extra_infs.len()
    }

    fn option_label(&self, idx: usize) -> &str {
        if idx < self.drivers.len() {
            &self.drivers[idx].name
        } else {
            self.extra_infs
                .get(idx - self.drivers.len())
                .map(|(label, _)| label.as_str())
                .unwrap_or("")
        }
    }

    /// Agrega el .inf elegido al combo (si no estaba) y lo deja seleccionado.
    fn push_inf(&mut self, path: PathBuf) {
        let label = Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if label.is_empty() {
            return;
        }
        if let Some(pos) = self.extra_infs.iter().position(|(l, _)| *l == label) {
            self.selected = self.drivers.len() + pos;
            return;
        }
        self.extra_infs.push((label, path));
        self.selected = self.drivers.len() + self.extra_infs.len() - 1;
    }

    /// (ruta del .inf, modelo) según la opción elegida. Para un driver
    /// instalado el modelo es su nombre; para un .inf suelto usamos el
    /// nombre de archivo sin extensión como modelo.
    fn driver_source(&self) -> Option<(String, String)> {
        if let Some(driver) = self.drivers.get(self.selected) {
            let inf = if driver.inf_name.is_empty() {
                driver.driver_path.clone()
            } else {
                driver.inf_name.clone()
            };
            return Some((inf, driver.name.clone()));
        }
        let (label, path) = self.extra_infs.get(self.selected - self.drivers.len())?;
        let model = Path::new(label)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| label.clone());
        Some((path.to_string_lossy().into_owned(), model))
    }
}

struct RenameDialog {
    target: PrinterInfo,
    new_name: String,
}

struct PortDialog {
    target: PrinterInfo,
    new_port: String,
}

pub struct PrinterManagerApp {
    printers: Vec<PrinterInfo>,
    drivers: Vec<PrinterDriver>,
    selected_port: Option<String>,

    status: Option<String>,
    status_is_error: bool,

    add_dialog: Option<AddDialog>,
    rename_dialog: Option<RenameDialog>,
    port_dialog: Option<PortDialog>,
    confirm_remove: Option<PrinterInfo>,
    notice: Option<String>,

    did_initial_refresh: bool,
}

impl Default for PrinterManagerApp {
    fn default() -> Self {
        Self {
            printers: Vec::new(),
            drivers: Vec::new(),
            selected_port: None,

            status: None,
            status_is_error: false,

            add_dialog: None,
            rename_dialog: None,
            port_dialog: None,
            confirm_remove: None,
            notice: None,

            did_initial_refresh: false,
        }
    }
}

/// Nombre de puerto estilo WSD, suficientemente único para un alta manual.
fn random_port_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("WSD-{:012x}", nanos & 0xffff_ffff_ffff)
}

impl PrinterManagerApp {
    /// Vuelve a consultar drivers e impresoras. El estado guarda el conjunto
    /// completo: las impresoras de puerto centinela ("Fax" en nul:, etc.)
    /// existen aunque el listado no las pinte, y cuentan al validar choques.
    /// La selección se conserva solo si su puerto sigue visible.
    fn refresh(&mut self) {
        self.drivers = printer_query::get_installed_drivers();
        self.printers = printer_query::get_printers(&self.drivers);

        if let Some(port) = &self.selected_port {
            let still_listed = self
                .printers
                .iter()
                .any(|p| &p.port_name == port && p.has_real_port());
            if !still_listed {
                self.selected_port = None;
            }
        }
    }

    /// Filas visibles del listado: el filtro de puertos centinela es solo
    /// cosa de pintado.
    fn listed_printers(&self) -> impl Iterator<Item = &PrinterInfo> {
        self.printers.iter().filter(|p| p.has_real_port())
    }

    fn selected_printer(&self) -> Option<&PrinterInfo> {
        let port = self.selected_port.as_ref()?;
        self.printers.iter().find(|p| &p.port_name == port)
    }

    fn report_ok(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
        self.status_is_error = false;
    }

    fn report_error(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
        self.status_is_error = true;
    }

    fn require_selection(&mut self) -> Option<PrinterInfo> {
        match self.selected_printer().cloned() {
            Some(printer) => Some(printer),
            None => {
                self.report_error("Selecciona una impresora primero.");
                None
            }
        }
    }

    fn set_default_clicked(&mut self) {
        let Some(printer) = self.require_selection() else {
            return;
        };
        match native::set_default_printer(&printer.display_name) {
            Ok(()) => {
                self.refresh();
                self.report_ok(format!(
                    "'{}' es ahora la impresora predeterminada.",
                    printer.display_name
                ));
            }
            Err(e) => {
                self.report_error(format!("No se pudo establecer la predeterminada: {e}"))
            }
        }
    }

    fn open_add_dialog(&mut self) {
        // Consulta fresca: el combo debe reflejar los drivers de ahora.
        self.add_dialog = Some(AddDialog::new(printer_query::get_installed_drivers()));
    }

    fn submit_add(&mut self, dialog: AddDialog) {
        let port = dialog.port_name.trim().to_owned();
        let display = dialog.display_name.trim().to_owned();
        let Some((inf, model)) = dialog.driver_source() else {
            self.report_error("Datos incompletos: elige un driver o un archivo .inf.");
            return;
        };
        if port.is_empty() || display.is_empty() || model.is_empty() {
            self.report_error("Datos incompletos: puerto, nombre y driver son obligatorios.");
            return;
        }
        if port.contains('"') || display.contains('"') {
            self.report_error("Las comillas dobles no están permitidas en puerto ni nombre.");
            return;
        }
        // Otra sesión pudo tocar el spooler con el diálogo abierto: los
        // choques se validan contra una consulta fresca y sin filtrar,
        // no contra lo pintado.
        let current = printer_query::get_printers(&self.drivers);
        if port_in_use(&current, &port) {
            self.report_error("Ya existe una impresora en ese puerto.");
            return;
        }

        match printui::add_printer(&display, &port, &inf, &model) {
            Ok(()) => {
                if dialog.set_default {
                    if let Err(e) = native::set_default_printer(&display) {
                        self.report_error(format!(
                            "Impresora agregada, pero no quedó como predeterminada: {e}"
                        ));
                        self.refresh();
                        return;
                    }
                }
                self.refresh();
                self.report_ok(format!("Impresora '{display}' agregada."));
            }
            Err(e) => self.report_error(format!("No se pudo agregar la impresora: {e}")),
        }
    }

    fn remove_confirmed(&mut self, printer: PrinterInfo) {
        match printui::delete_printer(&printer.display_name) {
            Ok(()) => {
                self.refresh();
                self.notice = Some(format!(
                    "'{}' en el puerto {} fue eliminada.",
                    printer.display_name, printer.port_name
                ));
            }
            Err(e) => self.report_error(format!("No se pudo quitar la impresora: {e}")),
        }
    }

    fn submit_rename(&mut self, dialog: RenameDialog) {
        let new_name = dialog.new_name.trim().to_owned();
        if new_name.is_empty() {
            // Entrada vacía = el usuario se arrepintió.
            return;
        }
        if new_name.contains('"') {
            self.report_error("Las comillas dobles no están permitidas en el nombre.");
            return;
        }
        let current = printer_query::get_printers(&self.drivers);
        if name_in_use(&current, &new_name) {
            self.report_error("Ya existe una impresora con ese nombre.");
            return;
        }

        match printer_query::rename_printer(&dialog.target.display_name, &new_name) {
            Ok(()) => {
                self.refresh();
                self.notice = Some(format!(
                    "'{}' ahora se llama '{}'.",
                    dialog.target.display_name, new_name
                ));
            }
            Err(e) => self.report_error(format!("No se pudo renombrar la impresora: {e}")),
        }
    }

    fn submit_change_port(&mut self, dialog: PortDialog) {
        let new_port = dialog.new_port.trim().to_owned();
        if new_port.is_empty() {
            return;
        }
        if new_port.contains('"') {
            self.report_error("Las comillas dobles no están permitidas en el puerto.");
            return;
        }
        let current = printer_query::get_printers(&self.drivers);
        if port_in_use(&current, &new_port) {
            self.report_error("Ya existe una impresora en ese puerto.");
            return;
        }

        match printui::set_port(&dialog.target.display_name, &new_port) {
            Ok(()) => {
                self.refresh();
                self.notice = Some(format!(
                    "El puerto de '{}' cambió a '{}'.",
                    dialog.target.display_name, new_port
                ));
            }
            Err(e) => self.report_error(format!("No se pudo cambiar el puerto: {e}")),
        }
    }

    fn open_queue_clicked(&mut self) {
        let Some(printer) = self.require_selection() else {
            return;
        };
        if let Err(e) = printui::open_queue(&printer.display_name) {
            self.report_error(format!("No se pudo abrir la cola: {e}"));
        }
    }

    fn open_properties_clicked(&mut self) {
        let Some(printer) = self.require_selection() else {
            return;
        };
        if let Err(e) = printui::open_properties(&printer.display_name) {
            self.report_error(format!("No se pudieron abrir las propiedades: {e}"));
        }
    }

    fn ui_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("🔄 Refrescar").clicked() {
                self.refresh();
                self.report_ok("Listado actualizado.");
            }
            ui.separator();
            if ui.button("⭐ Predeterminada").clicked() {
                self.set_default_clicked();
            }
            if ui.button("➕ Agregar…").clicked() {
                self.open_add_dialog();
            }
            if ui.button("🗑 Quitar…").clicked() {
                if let Some(printer) = self.require_selection() {
                    self.confirm_remove = Some(printer);
                }
            }
            if ui.button("✏ Renombrar…").clicked() {
                if let Some(printer) = self.require_selection() {
                    self.rename_dialog = Some(RenameDialog {
                        target: printer,
                        new_name: String::new(),
                    });
                }
            }
            if ui.button("🔌 Cambiar puerto…").clicked() {
                if let Some(printer) = self.require_selection() {
                    self.port_dialog = Some(PortDialog {
                        target: printer,
                        new_port: String::new(),
                    });
                }
            }
            ui.separator();
            if ui.button("📄 Cola").clicked() {
                self.open_queue_clicked();
            }
            if ui.button("⚙ Propiedades").clicked() {
                self.open_properties_clicked();
            }
        });

        if let Some(status) = &self.status {
            let color = if self.status_is_error {
                egui::Color32::RED
            } else {
                egui::Color32::DARK_GREEN
            };
            ui.label(egui::RichText::new(status).color(color).small());
        }
    }

    fn ui_printer_table(&mut self, ui: &mut egui::Ui) {
        if self.listed_printers().next().is_none() {
            ui.label(egui::RichText::new("(no hay impresoras con puerto real)").weak());
            return;
        }

        let mut clicked: Option<String> = None;
        egui::ScrollArea::vertical()
            .id_salt("printer_table_scroll")
            .show(ui, |ui| {
                egui::Grid::new("printer_grid")
                    .striped(true)
                    .num_columns(4)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new("Predet.").strong());
                        ui.label(egui::RichText::new("Puerto*").strong());
                        ui.label(egui::RichText::new("Nombre").strong());
                        ui.label(egui::RichText::new("Driver").strong());
                        ui.end_row();

                        for printer in self.listed_printers() {
                            let selected = self.selected_port.as_deref()
                                == Some(printer.port_name.as_str());
                            let default_mark = if printer.is_default { "✔" } else { "" };
                            let cells = [
                                default_mark,
                                printer.port_name.as_str(),
                                printer.display_name.as_str(),
                                printer.driver_name.as_str(),
                            ];
                            for text in cells {
                                if ui.selectable_label(selected, text).clicked() {
                                    clicked = Some(printer.port_name.clone());
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        if let Some(port) = clicked {
            self.selected_port = Some(port);
        }

        if let Some(driver) = self
            .selected_printer()
            .and_then(|p| p.driver_details.clone())
        {
            ui.add_space(8.0);
            egui::CollapsingHeader::new("Detalles del driver")
                .default_open(false)
                .show(ui, |ui| {
                    egui::Grid::new("driver_grid").num_columns(2).show(ui, |ui| {
                        ui.label("Driver:");
                        ui.monospace(&driver.name);
                        ui.end_row();
                        ui.label("Versión:");
                        ui.monospace(&driver.version);
                        ui.end_row();
                        ui.label("Entorno:");
                        ui.monospace(&driver.environment);
                        ui.end_row();
                        ui.label("INF:");
                        ui.monospace(&driver.inf_name);
                        ui.end_row();
                        ui.label("Binario:");
                        ui.monospace(&driver.driver_path);
                        ui.end_row();
                        ui.label("Data:");
                        ui.monospace(&driver.data_file);
                        ui.end_row();
                        ui.label("Config:");
                        ui.monospace(&driver.config_file);
                        ui.end_row();
                    });
                });
        }
    }

    fn ui_add_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.add_dialog else {
            return;
        };
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new("Agregar impresora")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("add_grid").num_columns(3).show(ui, |ui| {
                    ui.label("Predeterminada");
                    ui.checkbox(&mut dialog.set_default, "");
                    ui.label("");
                    ui.end_row();

                    ui.label("Puerto");
                    ui.text_edit_singleline(&mut dialog.port_name);
                    if ui.button("Aleatorio").clicked() {
                        dialog.port_name = random_port_name();
                    }
                    ui.end_row();

                    ui.label("Nombre");
                    ui.text_edit_singleline(&mut dialog.display_name);
                    ui.label("");
                    ui.end_row();

                    ui.label("Driver");
                    egui::ComboBox::from_id_salt("driver_combo")
                        .width(220.0)
                        .selected_text(dialog.option_label(dialog.selected).to_owned())
                        .show_ui(ui, |ui| {
                            for idx in 0..dialog.option_count() {
                                let label = dialog.option_label(idx).to_owned();
                                ui.selectable_value(&mut dialog.selected, idx, label);
                            }
                        });
                    if ui.button("Cargar .inf").clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("INF Files", &["inf"])
                            .pick_file()
                        {
                            dialog.push_inf(path);
                        }
                    }
                    ui.end_row();
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Agregar").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancelar").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel {
            self.add_dialog = None;
        } else if submit {
            if let Some(dialog) = self.add_dialog.take() {
                self.submit_add(dialog);
            }
        }
    }

    fn ui_rename_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.rename_dialog else {
            return;
        };
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new("Renombrar impresora")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("Nuevo nombre para '{}':", dialog.target.display_name));
                ui.text_edit_singleline(&mut dialog.new_name);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Renombrar").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancelar").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel {
            self.rename_dialog = None;
        } else if submit {
            if let Some(dialog) = self.rename_dialog.take() {
                self.submit_rename(dialog);
            }
        }
    }

    fn ui_port_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.port_dialog else {
            return;
        };
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new("Cambiar puerto")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!(
                    "Nuevo puerto para '{}' (actual: {}):",
                    dialog.target.display_name, dialog.target.port_name
                ));
                ui.text_edit_singleline(&mut dialog.new_port);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cambiar").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancelar").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel {
            self.port_dialog = None;
        } else if submit {
            if let Some(dialog) = self.port_dialog.take() {
                self.submit_change_port(dialog);
            }
        }
    }

    fn ui_confirm_remove(&mut self, ctx: &egui::Context) {
        let Some(printer) = &self.confirm_remove else {
            return;
        };
        let name = printer.display_name.clone();
        let mut accept = false;
        let mut cancel = false;

        egui::Window::new("Quitar impresora")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("¿Seguro que quieres quitar '{name}' de este equipo?"));
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Sí, quitar").clicked() {
                        accept = true;
                    }
                    if ui.button("No").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel {
            self.confirm_remove = None;
        } else if accept {
            if let Some(printer) = self.confirm_remove.take() {
                self.remove_confirmed(printer);
            }
        }
    }

    fn ui_notice(&mut self, ctx: &egui::Context) {
        let Some(text) = &self.notice else {
            return;
        };
        let text = text.clone();
        let mut close = false;

        egui::Window::new("Aviso")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(text);
                ui.separator();
                if ui.button("Aceptar").clicked() {
                    close = true;
                }
            });

        if close {
            self.notice = None;
        }
    }
}

impl eframe::App for PrinterManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Primera carga del listado: aquí y no en Default, para no consultar
        // CIM antes de que exista la ventana.
        if !self.did_initial_refresh {
            self.did_initial_refresh = true;
            self.refresh();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.ui_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_printer_table(ui);
        });

        self.ui_add_dialog(ctx);
        self.ui_rename_dialog(ctx);
        self.ui_port_dialog(ctx);
        self.ui_confirm_remove(ctx);
        self.ui_notice(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(port: &str, name: &str) -> PrinterInfo {
        PrinterInfo {
            port_name: port.to_string(),
            display_name: name.to_string(),
            ..Default::default()
        }
    }

    fn seeded(printers: Vec<PrinterInfo>) -> PrinterManagerApp {
        let mut app = PrinterManagerApp::default();
        app.printers = printers;
        app
    }

    fn windows_stock_set() -> Vec<PrinterInfo> {
        vec![
            printer("nul:", "Fax"),
            printer("PORTPROMPT:", "Microsoft Print to PDF"),
            printer("USB001", "HP LaserJet"),
        ]
    }

    #[test]
    fn listing_hides_sentinels_but_state_keeps_them() {
        let app = seeded(windows_stock_set());

        // El listado solo pinta la impresora con puerto real...
        let listed: Vec<&str> = app
            .listed_printers()
            .map(|p| p.display_name.as_str())
            .collect();
        assert_eq!(listed, ["HP LaserJet"]);

        // ...pero el estado conserva las ocultas, así que renombrar a
        // "Fax" o reusar sus puertos sí cuenta como choque.
        assert!(name_in_use(&app.printers, "Fax"));
        assert!(name_in_use(&app.printers, "Microsoft Print to PDF"));
        assert!(port_in_use(&app.printers, "nul:"));
        assert!(port_in_use(&app.printers, "PORTPROMPT:"));
    }

    #[test]
    fn rename_rejects_double_quotes() {
        let mut app = seeded(windows_stock_set());
        app.submit_rename(RenameDialog {
            target: printer("USB001", "HP LaserJet"),
            new_name: "HP \"nueva\"".to_string(),
        });
        assert!(app.status_is_error);
        assert!(app.status.as_deref().unwrap_or("").contains("comillas"));
    }

    #[test]
    fn change_port_rejects_double_quotes() {
        let mut app = seeded(windows_stock_set());
        app.submit_change_port(PortDialog {
            target: printer("USB001", "HP LaserJet"),
            new_port: "COM\"3".to_string(),
        });
        assert!(app.status_is_error);
        assert!(app.status.as_deref().unwrap_or("").contains("comillas"));
    }

    #[test]
    fn add_rejects_double_quotes() {
        let mut app = seeded(Vec::new());
        let mut dialog = AddDialog::new(vec![PrinterDriver {
            name: "Generic / Text Only".to_string(),
            driver_path: "unidrv.dll".to_string(),
            ..Default::default()
        }]);
        dialog.port_name = "COM\"1".to_string();
        dialog.display_name = "Etiquetadora".to_string();
        app.submit_add(dialog);
        assert!(app.status_is_error);
        assert!(app.status.as_deref().unwrap_or("").contains("comillas"));
    }

    // Solo fuera de Windows: la consulta fresca del stub devuelve vacío,
    // así que un puerto que sigue pintado como ocupado ya no bloquea el
    // cambio; lo que falla es la invocación de printui, no la validación.
    #[cfg(not(windows))]
    #[test]
    fn collisions_validate_against_fresh_query_not_stale_listing() {
        let mut app = seeded(vec![printer("COM9", "Vieja")]);
        app.submit_change_port(PortDialog {
            target: printer("USB001", "HP LaserJet"),
            new_port: "COM9".to_string(),
        });
        let status = app.status.clone().unwrap_or_default();
        assert!(!status.contains("Ya existe"));
        assert!(app.status_is_error);
    }

    #[test]
    fn random_port_name_has_wsd_prefix() {
        let name = random_port_name();
        assert!(name.starts_with("WSD-"));
        assert_eq!(name.len(), "WSD-".len() + 12);
    }

    #[test]
    fn add_dialog_prefers_inf_name_over_driver_path() {
        let mut dialog = AddDialog::new(vec![
            PrinterDriver {
                name: "HP Universal Printing PCL 6".to_string(),
                inf_name: r"C:\Windows\INF\oem12.inf".to_string(),
                driver_path: r"C:\Windows\System32\spool\drivers\x64\3\hpcu.dll".to_string(),
                ..Default::default()
            },
            PrinterDriver {
                name: "Generic / Text Only".to_string(),
                driver_path: r"C:\Windows\System32\spool\drivers\x64\3\unidrv.dll".to_string(),
                ..Default::default()
            },
        ]);

        dialog.selected = 0;
        assert_eq!(
            dialog.driver_source(),
            Some((
                r"C:\Windows\INF\oem12.inf".to_string(),
                "HP Universal Printing PCL 6".to_string()
            ))
        );

        // Sin InfName cae al binario del driver.
        dialog.selected = 1;
        assert_eq!(
            dialog.driver_source(),
            Some((
                r"C:\Windows\System32\spool\drivers\x64\3\unidrv.dll".to_string(),
                "Generic / Text Only".to_string()
            ))
        );
    }

    #[test]
    fn add_dialog_loaded_inf_becomes_selected_option() {
        let mut dialog = AddDialog::new(vec![PrinterDriver {
            name: "Generic / Text Only".to_string(),
            ..Default::default()
        }]);

        let picked = PathBuf::from("drivers").join("zbrn.inf");
        dialog.push_inf(picked.clone());
        assert_eq!(dialog.option_count(), 2);
        assert_eq!(dialog.selected, 1);
        assert_eq!(dialog.option_label(1), "zbrn.inf");
        assert_eq!(
            dialog.driver_source(),
            Some((picked.to_string_lossy().into_owned(), "zbrn".to_string()))
        );

        // Cargar el mismo .inf otra vez no duplica la opción.
        dialog.push_inf(picked);
        assert_eq!(dialog.option_count(), 2);
        assert_eq!(dialog.selected, 1);
    }
}
